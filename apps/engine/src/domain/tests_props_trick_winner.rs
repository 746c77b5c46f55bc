/// Property-based tests for trick winner resolution
use proptest::prelude::*;

use crate::domain::cards_logic::{trick_winner_index, TrickContext};
use crate::domain::{test_gens, test_prelude, Card, GameConfig, Suit, Trump};

fn ctx(trump: Trump, lead_suit: Suit) -> TrickContext {
    TrickContext {
        trump,
        mighty: GameConfig::default().mighty_for(trump),
        lead_suit,
        joker_led: false,
        joker_live: true,
        joker_led_beats_mighty: false,
    }
}

/// Independent ranking: Mighty, then trump by rank, then lead suit by rank.
fn oracle(cards: &[Card], ctx: &TrickContext) -> usize {
    let strength = |c: &Card| -> i32 {
        if *c == ctx.mighty {
            return 1000;
        }
        let (Some(suit), Some(rank)) = (c.suit(), c.rank()) else {
            return -1;
        };
        if ctx.trump.suit() == Some(suit) {
            200 + rank as i32
        } else if suit == ctx.lead_suit {
            100 + rank as i32
        } else {
            -1
        }
    };
    let mut best = 0;
    for (i, c) in cards.iter().enumerate() {
        if strength(c) > strength(&cards[best]) {
            best = i;
        }
    }
    best
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Ranked tricks resolve exactly as the independent ranking says.
    #[test]
    fn prop_trick_winner_matches_oracle((cards, trump) in test_gens::complete_ranked_trick()) {
        let lead = cards[0].suit().unwrap();
        let c = ctx(trump, lead);
        prop_assert_eq!(trick_winner_index(&cards, &c), oracle(&cards, &c));
    }

    /// The winner always played the Mighty, a trump, or the lead suit.
    #[test]
    fn prop_winner_is_never_an_off_suit_discard((cards, trump) in test_gens::complete_ranked_trick()) {
        let lead = cards[0].suit().unwrap();
        let c = ctx(trump, lead);
        let w = cards[trick_winner_index(&cards, &c)];
        prop_assert!(
            w == c.mighty || w.is_suit(lead) || trump.suit().is_some_and(|t| w.is_suit(t)),
            "{} won a {:?} trick under {:?}", w, lead, trump
        );
    }

    /// A live Joker wins anything except the Mighty.
    #[test]
    fn prop_live_joker_beats_all_but_mighty(
        (mut cards, trump) in test_gens::complete_ranked_trick(),
        slot in 1usize..5,
    ) {
        let lead = cards[0].suit().unwrap();
        let c = ctx(trump, lead);
        let had_mighty = cards.iter().position(|x| *x == c.mighty);
        if had_mighty == Some(slot) {
            return Ok(());
        }
        cards[slot] = Card::Joker;
        let w = trick_winner_index(&cards, &c);
        match had_mighty {
            Some(m) => prop_assert_eq!(w, m),
            None => prop_assert_eq!(w, slot),
        }
    }
}
