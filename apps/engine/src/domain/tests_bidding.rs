use crate::domain::scoring::{Outcome, RedealReason};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{
    deal_with_first_hand, drive, make_game_state, MakeGameStateArgs,
};
use crate::domain::{
    deal_hands, is_terminal, score_of, Action, GameConfig, GameState, Suit, Trump,
};
use crate::errors::domain::IllegalKind;

fn fresh(seed: u64) -> GameState {
    make_game_state(deal_hands(seed), MakeGameStateArgs::default())
}

fn bid(trump: Trump, target: u8) -> Action {
    Action::Bid { trump, target }
}

const SPADES: Trump = Trump::Suit(Suit::Spades);
const DIAMONDS: Trump = Trump::Suit(Suit::Diamonds);

// A ten-card hand with no point cards.
const WEAK_HAND: [&str; 10] = ["2C", "3C", "4C", "5C", "6C", "7C", "8C", "9C", "2D", "3D"];

#[test]
fn highest_bidder_becomes_declarer_after_four_passes() {
    let mut state = fresh(1);
    drive(
        &mut state,
        &[
            bid(SPADES, 13),
            bid(Trump::NoTrump, 14),
            Action::Pass,
            Action::Pass,
            Action::Pass,
            Action::Pass,
        ],
    );

    let contract = state.contract.unwrap();
    assert_eq!(contract.declarer, 1);
    assert_eq!(contract.trump, Trump::NoTrump);
    assert_eq!(contract.target, 14);
    assert_eq!(state.phase, Phase::Exchange);
    assert_eq!(state.turn, Some(1));
    assert_eq!(state.hands[1].len(), 13);
    assert!(state.kitty.is_empty());
}

#[test]
fn all_pass_is_a_redeal_not_an_error() {
    let mut state = fresh(2);
    drive(&mut state, &[Action::Pass; 5]);

    assert!(is_terminal(&state));
    assert_eq!(state.outcome, Some(Outcome::Redeal(RedealReason::AllPass)));
    assert_eq!(score_of(&state).unwrap(), [0; 5]);
    assert!(state.legal_actions().is_empty());
    assert_eq!(state.card_count(), 53);
}

#[test]
fn equal_or_lower_priority_bid_does_not_override() {
    let mut state = fresh(3);
    drive(&mut state, &[bid(SPADES, 13)]);

    let err = state.apply(&bid(SPADES, 13)).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::InvalidBid));
    let err = state.apply(&bid(DIAMONDS, 13)).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::InvalidBid));

    // No-trump outranks spades at the same target
    assert!(state.apply(&bid(Trump::NoTrump, 13)).is_ok());
    assert_eq!(state.auction.highest.unwrap().seat, 1);
}

#[test]
fn no_trump_may_bid_one_under_the_floor() {
    let state = fresh(4);
    let legal = state.legal_actions();
    assert!(legal.contains(&bid(Trump::NoTrump, 12)));
    assert!(!legal.contains(&bid(SPADES, 12)));
    assert!(legal.contains(&bid(SPADES, 13)));
    assert!(legal.contains(&bid(SPADES, 20)));
    assert!(!legal.contains(&bid(SPADES, 21)));
}

#[test]
fn passed_seats_are_skipped() {
    let mut state = fresh(5);
    drive(
        &mut state,
        &[
            bid(SPADES, 13),
            Action::Pass,
            Action::Pass,
            Action::Pass,
            bid(SPADES, 14),
        ],
    );
    // Seats 1-3 are out; seat 0 is next, not seat 1
    assert_eq!(state.turn, Some(0));
    drive(&mut state, &[Action::Pass]);
    assert_eq!(state.contract.unwrap().declarer, 4);
}

#[test]
fn out_of_phase_action_is_rejected_and_state_untouched() {
    let mut state = fresh(6);
    let before = state.clone();
    let card = state.hands[0][0];
    let err = state.apply(&Action::play(card)).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::PhaseMismatch));
    assert_eq!(state, before);
}

#[test]
fn weak_hand_may_call_miss_deal() {
    let mut state = make_game_state(deal_with_first_hand(&WEAK_HAND), MakeGameStateArgs::default());
    assert!(state.legal_actions().contains(&Action::CallMissDeal));

    drive(&mut state, &[Action::CallMissDeal]);
    assert_eq!(
        state.outcome,
        Some(Outcome::Redeal(RedealReason::MissDeal { seat: 0 }))
    );
    assert!(is_terminal(&state));
}

#[test]
fn strong_hand_may_not_call_miss_deal() {
    let strong = ["AC", "KC", "QC", "JC", "TC", "AD", "KD", "QD", "JD", "TD"];
    let mut state = make_game_state(deal_with_first_hand(&strong), MakeGameStateArgs::default());
    assert!(!state.legal_actions().contains(&Action::CallMissDeal));
    let err = state.apply(&Action::CallMissDeal).unwrap_err();
    assert_eq!(err.illegal_kind(), Some(IllegalKind::MissDealNotAllowed));
}

#[test]
fn miss_deal_can_be_disabled() {
    let args = MakeGameStateArgs {
        config: GameConfig {
            miss_deal_max_points: None,
            ..GameConfig::default()
        },
        ..Default::default()
    };
    let state = make_game_state(deal_with_first_hand(&WEAK_HAND), args);
    assert!(!state.legal_actions().contains(&Action::CallMissDeal));
}

#[test]
fn bidding_is_logged_publicly() {
    let mut state = fresh(7);
    drive(&mut state, &[bid(SPADES, 13), Action::Pass]);
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.history[0].seat, 0);
    assert_eq!(state.history[1].seat, 1);
}
