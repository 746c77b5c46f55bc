use proptest::prelude::*;

use crate::domain::rules::TOTAL_POINTS;
use crate::domain::scoring::compute_result;
use crate::domain::test_gens;
use crate::domain::test_prelude::proptest_config;
use crate::domain::test_state_helpers::{make_game_state, random_playthrough, MakeGameStateArgs};
use crate::domain::{
    deal_hands, is_terminal, score_of, Contract, GameConfig, Outcome, ScoringConfig, Suit, Trump,
};
use crate::errors::domain::RulesError;

const HEARTS: Trump = Trump::Suit(Suit::Hearts);

fn contract(trump: Trump, target: u8) -> Contract {
    Contract {
        declarer: 0,
        trump,
        target,
    }
}

#[test]
fn made_contract_at_the_floor() {
    let r = compute_result(&GameConfig::default(), contract(HEARTS, 13), Some(1), 13);
    assert!(r.made);
    assert_eq!(r.payouts, [2, 1, -1, -1, -1]);
}

#[test]
fn higher_target_and_overtricks_pay_more() {
    // 1 + 2 * (15 - 13) + 1 * (17 - 15)
    let r = compute_result(&GameConfig::default(), contract(HEARTS, 15), Some(2), 17);
    assert_eq!(r.payouts, [14, -7, 7, -7, -7]);
}

#[test]
fn failed_contract_pays_per_undertrick() {
    let r = compute_result(&GameConfig::default(), contract(HEARTS, 15), Some(1), 12);
    assert!(!r.made);
    assert!(!r.back_run);
    assert_eq!(r.payouts, [-6, -3, 3, 3, 3]);
}

#[test]
fn back_run_doubles_the_loss() {
    let r = compute_result(&GameConfig::default(), contract(HEARTS, 13), Some(1), 8);
    assert!(r.back_run);
    // (0 + 5) * 2
    assert_eq!(r.payouts[0], -20);
}

#[test]
fn run_doubles_the_win() {
    let r = compute_result(&GameConfig::default(), contract(HEARTS, 13), Some(1), TOTAL_POINTS);
    assert!(r.run);
    // (1 + 7) * 2
    assert_eq!(r.payouts[1], 16);
}

#[test]
fn no_trump_and_solo_multiply() {
    let cfg = GameConfig::default();
    let nt = compute_result(&cfg, contract(Trump::NoTrump, 13), Some(1), 13);
    assert_eq!(nt.payouts[1], 2);

    let solo = compute_result(&cfg, contract(HEARTS, 13), None, 13);
    assert_eq!(solo.partner, None);
    assert_eq!(solo.payouts, [8, -2, -2, -2, -2]);

    let both = compute_result(&cfg, contract(Trump::NoTrump, 13), None, 13);
    assert_eq!(both.payouts[0], 16);
}

#[test]
fn mighty_suit_trump_multiplier_applies_to_spades() {
    let cfg = GameConfig {
        scoring: ScoringConfig {
            mighty_suit_trump: 3,
            ..ScoringConfig::default()
        },
        ..GameConfig::default()
    };
    let spades = compute_result(&cfg, contract(Trump::Suit(Suit::Spades), 13), Some(1), 13);
    assert_eq!(spades.payouts[1], 3);
    let hearts = compute_result(&cfg, contract(HEARTS, 13), Some(1), 13);
    assert_eq!(hearts.payouts[1], 1);
}

#[test]
fn no_trump_bid_under_the_floor_scores_as_the_floor() {
    let r = compute_result(&GameConfig::default(), contract(Trump::NoTrump, 12), Some(1), 12);
    assert!(r.made);
    assert_eq!(r.payouts[1], 2);
}

#[test]
fn score_before_the_end_is_not_terminal() {
    let state = make_game_state(deal_hands(3), MakeGameStateArgs::default());
    assert!(!is_terminal(&state));
    assert_eq!(score_of(&state), Err(RulesError::NotTerminal));
}

#[test]
fn played_out_game_settles_to_zero_sum() {
    let state = make_game_state(deal_hands(44), MakeGameStateArgs::default());
    let last = random_playthrough(state, 44).pop().unwrap();
    assert!(is_terminal(&last));
    let payouts = score_of(&last).unwrap();
    assert_eq!(payouts.iter().sum::<i32>(), 0);
    if let Some(Outcome::Scored(result)) = last.outcome {
        let captured: u8 = last.points_won.iter().sum();
        assert!(result.declarer_team_points <= captured + 3);
        assert!(last.partner_revealed);
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn prop_payouts_are_zero_sum(
        trump in test_gens::trump(),
        target in 13u8..=20,
        points in 0u8..=20,
        declarer in test_gens::seat(),
        partner in proptest::option::of(test_gens::seat()),
    ) {
        let partner = partner.filter(|p| *p != declarer);
        let c = Contract { declarer, trump, target };
        let r = compute_result(&GameConfig::default(), c, partner, points);
        prop_assert_eq!(r.payouts.iter().sum::<i32>(), 0);
        prop_assert_eq!(r.made, points >= target);
        let sign = if r.made { 1 } else { -1 };
        prop_assert!(r.payouts[declarer as usize] * sign > 0);
        if let Some(p) = partner {
            prop_assert_eq!(r.payouts[declarer as usize], 2 * r.payouts[p as usize]);
        }
    }
}
