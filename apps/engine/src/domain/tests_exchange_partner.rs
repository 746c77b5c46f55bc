use crate::domain::partner::PartnerCall;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{
    drive, make_game_state, random_playthrough, MakeGameStateArgs,
};
use crate::domain::{deal_hands, score_of, Action, Card, GameState, Outcome, Suit, Trump};
use crate::errors::domain::IllegalKind;

const HEARTS: Trump = Trump::Suit(Suit::Hearts);

/// Seat 0 wins the auction with hearts at `target`.
fn declarer_state(seed: u64, target: u8) -> GameState {
    let mut state = make_game_state(deal_hands(seed), MakeGameStateArgs::default());
    drive(
        &mut state,
        &[
            Action::Bid {
                trump: HEARTS,
                target,
            },
            Action::Pass,
            Action::Pass,
            Action::Pass,
            Action::Pass,
        ],
    );
    assert_eq!(state.phase, Phase::Exchange);
    state
}

fn first_three(state: &GameState) -> [Card; 3] {
    let hand = &state.hands[0];
    [hand[0], hand[1], hand[2]]
}

/// Through the exchange, keeping hearts.
fn partner_call_state(seed: u64) -> GameState {
    let mut state = declarer_state(seed, 13);
    let discards = first_three(&state);
    drive(
        &mut state,
        &[Action::Exchange {
            discards,
            trump: HEARTS,
        }],
    );
    state
}

#[test]
fn exchange_returns_declarer_to_ten_cards() {
    let mut state = declarer_state(10, 13);
    let discards = first_three(&state);
    drive(
        &mut state,
        &[Action::Exchange {
            discards,
            trump: HEARTS,
        }],
    );
    assert_eq!(state.phase, Phase::PartnerCall);
    assert_eq!(state.hands[0].len(), 10);
    assert_eq!(state.discards.len(), 3);
    assert_eq!(state.contract.unwrap().target, 13);
    assert_eq!(state.card_count(), 53);
    for card in discards {
        assert!(!state.hands[0].contains(&card));
    }
}

#[test]
fn trump_change_raises_target() {
    let mut state = declarer_state(11, 13);
    let discards = first_three(&state);
    drive(
        &mut state,
        &[Action::Exchange {
            discards,
            trump: Trump::NoTrump,
        }],
    );
    let contract = state.contract.unwrap();
    assert_eq!(contract.trump, Trump::NoTrump);
    assert_eq!(contract.target, 15);
}

#[test]
fn trump_change_past_twenty_is_illegal() {
    let mut state = declarer_state(12, 19);
    let discards = first_three(&state);
    let err = state
        .apply(&Action::Exchange {
            discards,
            trump: Trump::NoTrump,
        })
        .unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::InvalidExchange));
    assert!(state
        .legal_actions()
        .iter()
        .all(|a| matches!(a, Action::Exchange { trump, .. } if *trump == HEARTS)));
}

#[test]
fn discarding_a_foreign_card_is_rejected() {
    let mut state = declarer_state(13, 13);
    let foreign = state.hands[1][0];
    let hand = &state.hands[0];
    let discards = [hand[0], hand[1], foreign];
    let err = state
        .apply(&Action::Exchange {
            discards,
            trump: HEARTS,
        })
        .unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::CardNotInHand));
}

#[test]
fn calling_own_card_means_solo_with_solo_scoring() {
    let mut state = partner_call_state(20);
    let own = state.hands[0][5];
    drive(&mut state, &[Action::CallPartner(PartnerCall::Card(own))]);
    assert_eq!(state.partner, None);
    assert!(!state.partner_revealed, "solo stays hidden until the card is played");
    assert_eq!(state.phase, Phase::Play { trick_no: 1 });

    let finished = random_playthrough(state, 99).pop().unwrap();
    let Some(Outcome::Scored(result)) = finished.outcome else {
        panic!("expected a scored game");
    };
    assert_eq!(result.partner, None);
    let payouts = score_of(&finished).unwrap();
    let unit = payouts[1];
    assert_eq!(payouts[0], -4 * unit);
    assert!(payouts[1..].iter().all(|p| *p == unit));
}

#[test]
fn calling_a_discard_means_solo() {
    let mut state = partner_call_state(21);
    let discarded = state.discards[0];
    drive(
        &mut state,
        &[Action::CallPartner(PartnerCall::Card(discarded))],
    );
    assert_eq!(state.partner, None);
}

#[test]
fn partner_is_revealed_when_the_called_card_is_played() {
    let mut state = partner_call_state(22);
    let called = state.hands[3][0];
    drive(&mut state, &[Action::CallPartner(PartnerCall::Card(called))]);
    assert_eq!(state.partner, Some(3));
    assert!(!state.partner_revealed);

    let states = random_playthrough(state, 5);
    let reveal_at = states
        .iter()
        .position(|s| s.partner_revealed)
        .expect("partner is revealed by the end");
    let played_by_then = states[reveal_at]
        .tricks
        .iter()
        .chain(states[reveal_at].current_trick.as_ref())
        .any(|t| t.contains(called));
    assert!(played_by_then);
    assert!(!states[reveal_at - 1]
        .tricks
        .iter()
        .chain(states[reveal_at - 1].current_trick.as_ref())
        .any(|t| t.contains(called)));
}

#[test]
fn first_trick_call_picks_the_trick_one_winner() {
    let mut state = partner_call_state(23);
    drive(&mut state, &[Action::CallPartner(PartnerCall::FirstTrick)]);
    let states = random_playthrough(state, 8);
    let after_first = states
        .iter()
        .find(|s| s.tricks.len() == 1)
        .expect("trick 1 completes");
    let winner = after_first.tricks[0].winner.unwrap();
    assert!(after_first.partner_revealed);
    let expected = if winner == 0 { None } else { Some(winner) };
    assert_eq!(after_first.partner, expected);
}

#[test]
fn no_partner_call_is_public_solo() {
    let mut state = partner_call_state(24);
    drive(&mut state, &[Action::CallPartner(PartnerCall::None)]);
    assert_eq!(state.partner, None);
    assert!(state.partner_revealed);
}
