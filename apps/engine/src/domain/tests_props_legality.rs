//! Property tests for play legality and card conservation.

use proptest::prelude::*;

use crate::domain::rules::DECK_SIZE;
use crate::domain::state::{Phase, Trick};
use crate::domain::test_state_helpers::{make_game_state, random_playthrough, MakeGameStateArgs};
use crate::domain::tricks::{legal_plays_from, PlayRules};
use crate::domain::{deal_hands, hand_has_suit, Action, Card, GameConfig, Suit, Trump};
use crate::domain::{test_gens, test_prelude};

fn following_trick(lead: Card) -> Trick {
    let mut trick = Trick::new(0);
    trick.plays.push((0, lead));
    trick.lead_suit = lead.suit();
    trick
}

fn played_card(action: &Action) -> Card {
    match action {
        Action::Play { card, .. } => *card,
        other => panic!("expected a play, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Holding the lead suit restricts plays to that suit plus the Joker.
    #[test]
    fn prop_follow_suit_legality(
        lead_suit in test_gens::suit(),
        lead_rank in test_gens::rank(),
        hand in test_gens::unique_cards_up_to(10),
        trump in test_gens::trump(),
    ) {
        let lead = Card::new(lead_suit, lead_rank);
        let hand: Vec<Card> = hand.into_iter().filter(|c| *c != lead).collect();
        let config = GameConfig::default();
        let rules = PlayRules { config: &config, trump, joker_out: false };
        let legal: Vec<Card> = legal_plays_from(&hand, &following_trick(lead), rules)
            .iter()
            .map(played_card)
            .collect();

        if hand_has_suit(&hand, lead_suit) {
            for card in &legal {
                prop_assert!(card.is_suit(lead_suit) || card.is_joker(),
                    "{} is not a follow of {:?}", card, lead_suit);
            }
            for card in hand.iter().filter(|c| c.is_suit(lead_suit) || c.is_joker()) {
                prop_assert!(legal.contains(card));
            }
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }

    /// A void hand may play anything.
    #[test]
    fn prop_void_hand_plays_anything(
        lead_rank in test_gens::rank(),
        hand in test_gens::hand_without_suit(Suit::Clubs),
    ) {
        let lead = Card::new(Suit::Clubs, lead_rank);
        let config = GameConfig::default();
        let rules = PlayRules { config: &config, trump: Trump::NoTrump, joker_out: false };
        let legal = legal_plays_from(&hand, &following_trick(lead), rules);
        prop_assert_eq!(legal.len(), hand.len());
    }

    /// The Joker is never blocked by follow-suit.
    #[test]
    fn prop_joker_always_playable(
        lead_suit in test_gens::suit(),
        lead_rank in test_gens::rank(),
        hand in test_gens::unique_cards_up_to(9),
    ) {
        let lead = Card::new(lead_suit, lead_rank);
        let mut hand: Vec<Card> = hand.into_iter().filter(|c| *c != lead).collect();
        if !hand.contains(&Card::Joker) {
            hand.push(Card::Joker);
        }
        let config = GameConfig::default();
        let rules = PlayRules { config: &config, trump: Trump::NoTrump, joker_out: false };
        let legal = legal_plays_from(&hand, &following_trick(lead), rules);
        prop_assert!(legal.contains(&Action::play(Card::Joker)));
    }

    /// Whole games: every offered action applies, every play comes from the
    /// actor's hand, and all 53 cards stay accounted for.
    #[test]
    fn prop_random_games_stay_legal(seed in test_gens::game_seed()) {
        let state = make_game_state(deal_hands(seed), MakeGameStateArgs::default());
        let states = random_playthrough(state, seed ^ 0x5eed);
        for s in &states {
            prop_assert_eq!(s.card_count(), DECK_SIZE);
            if let (Phase::Play { .. }, Some(turn)) = (s.phase, s.turn) {
                let hand = &s.hands[turn as usize];
                for action in s.legal_actions() {
                    prop_assert!(hand.contains(&played_card(&action)));
                }
            }
        }
        let last = states.last().unwrap();
        prop_assert_eq!(last.phase, Phase::Finished);
        prop_assert!(last.legal_actions().is_empty());
    }
}
