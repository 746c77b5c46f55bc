//! Settlement of a finished game.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::cards_logic::count_points;
use crate::domain::config::GameConfig;
use crate::domain::rules::{PLAYERS, TOTAL_POINTS};
use crate::domain::state::{require_contract, Contract, GameState, Phase, Seat};
use crate::domain::Trump;
use crate::errors::domain::RulesError;

/// Why a game ended without being played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedealReason {
    /// Every seat passed.
    AllPass,
    /// A seat with a weak hand called a miss-deal.
    MissDeal { seat: Seat },
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Scored(GameResult),
    Redeal(RedealReason),
}

impl Outcome {
    pub fn payouts(&self) -> [i32; PLAYERS] {
        match self {
            Outcome::Scored(r) => r.payouts,
            Outcome::Redeal(_) => [0; PLAYERS],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub contract: Contract,
    pub partner: Option<Seat>,
    /// Point cards captured by the declarer team.
    pub declarer_team_points: u8,
    pub made: bool,
    pub run: bool,
    pub back_run: bool,
    /// Zero-sum per-seat game points.
    pub payouts: [i32; PLAYERS],
}

/// Score a played-out game.
pub fn compute_result(
    config: &GameConfig,
    contract: Contract,
    partner: Option<Seat>,
    declarer_team_points: u8,
) -> GameResult {
    let sc = &config.scoring;
    let target = contract.target as i32;
    let points = declarer_team_points as i32;
    let made = points >= target;
    let run = made && declarer_team_points == TOTAL_POINTS;
    let back_run = !made && declarer_team_points <= sc.back_run_threshold;
    let solo = partner.is_none();

    let base = if made {
        let steps = (target - config.min_bid as i32).max(0);
        sc.win_base + sc.win_per_target_step * steps + sc.win_per_overtrick * (points - target)
    } else {
        sc.loss_base + sc.loss_per_undertrick * (target - points)
    };

    let mut value = base;
    if contract.trump == Trump::NoTrump {
        value *= sc.no_trump;
    }
    if solo {
        value *= sc.solo;
    }
    if run {
        value *= sc.run;
    }
    if back_run {
        value *= sc.back_run;
    }
    if contract.trump.suit().is_some() && contract.trump.suit() == config.mighty.suit() {
        value *= sc.mighty_suit_trump;
    }
    let signed = if made { value } else { -value };

    let mut payouts = [-signed; PLAYERS];
    let declarer = contract.declarer as usize;
    match partner {
        Some(p) => {
            payouts[declarer] = 2 * signed;
            payouts[p as usize] = signed;
        }
        None => payouts[declarer] = (PLAYERS as i32 - 1) * signed,
    }

    GameResult {
        contract,
        partner,
        declarer_team_points,
        made,
        run,
        back_run,
        payouts,
    }
}

/// Point cards credited to the declarer team so far.
pub fn declarer_team_points(state: &GameState, contract: &Contract) -> u8 {
    let mut points = state.points_won[contract.declarer as usize];
    if let Some(p) = state.partner {
        points += state.points_won[p as usize];
    }
    if state.config.discards_count_for_declarer {
        points += count_points(&state.discards);
    }
    points
}

/// Settle scores and transition Scoring → Finished.
pub fn settle(state: &mut GameState) -> Result<(), RulesError> {
    if state.phase != Phase::Scoring {
        return Err(RulesError::invariant("settle called outside scoring"));
    }
    let contract = require_contract(state, "settle")?;
    let points = declarer_team_points(state, &contract);
    let result = compute_result(&state.config, contract, state.partner, points);
    debug!(
        declarer = contract.declarer,
        partner = ?state.partner,
        points,
        target = contract.target,
        made = result.made,
        "Game scored"
    );
    state.outcome = Some(Outcome::Scored(result));
    state.partner_revealed = true;
    state.phase = Phase::Finished;
    Ok(())
}
