//! Property-based tests tying each seat's view to the full state.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::rules::PLAYERS;
use crate::domain::test_state_helpers::{make_game_state, random_playthrough, MakeGameStateArgs};
use crate::domain::{deal_hands, test_gens, test_prelude, Card, InformationSet};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Every reachable state projects to a valid view for every seat, and no
    /// view exposes a card it should not see.
    #[test]
    fn prop_views_are_valid_and_hide_other_hands(seed in test_gens::game_seed()) {
        let state = make_game_state(deal_hands(seed), MakeGameStateArgs::default());
        for s in random_playthrough(state, seed.rotate_left(7)) {
            for seat in 0..PLAYERS as u8 {
                let info = InformationSet::from_state(&s, seat);
                prop_assert!(info.validate().is_ok(), "{:?}", info.validate());

                let unseen: HashSet<Card> = info.unseen_cards().into_iter().collect();
                for (other, hand) in s.hands.iter().enumerate() {
                    if other == seat as usize {
                        prop_assert!(hand.iter().all(|c| !unseen.contains(c)));
                    } else {
                        prop_assert!(hand.iter().all(|c| unseen.contains(c)));
                    }
                }
                for c in &s.kitty {
                    prop_assert!(unseen.contains(c));
                }
                let others: usize = info
                    .hand_sizes
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != seat as usize)
                    .map(|(_, n)| *n as usize)
                    .sum();
                prop_assert_eq!(unseen.len(), others + info.hidden_pile_size());
            }
        }
    }

    /// The acting seat computes the same legal actions from its view as the
    /// engine does from the full state.
    #[test]
    fn prop_view_legal_actions_match_state(seed in test_gens::game_seed()) {
        let state = make_game_state(deal_hands(seed), MakeGameStateArgs::default());
        for s in random_playthrough(state, seed.wrapping_add(1)) {
            let Some(turn) = s.turn else { continue };
            let info = InformationSet::from_state(&s, turn);
            prop_assert_eq!(info.legal_actions(), s.legal_actions());
            let bystander = InformationSet::from_state(&s, (turn + 1) % PLAYERS as u8);
            prop_assert!(bystander.legal_actions().is_empty());
        }
    }

    /// An unrevealed partner stays hidden from everyone but the partner.
    #[test]
    fn prop_hidden_partner_is_not_leaked(seed in test_gens::game_seed()) {
        let state = make_game_state(deal_hands(seed), MakeGameStateArgs::default());
        for s in random_playthrough(state, seed ^ 0xa11) {
            if s.partner_revealed {
                continue;
            }
            for seat in 0..PLAYERS as u8 {
                let info = InformationSet::from_state(&s, seat);
                if Some(seat) != s.partner {
                    prop_assert_eq!(info.partner, None);
                }
            }
        }
    }
}
