//! The declarer's exchange: discard three from the 13-card hand, optionally
//! change trump at the cost of a higher target.

use tracing::debug;

use crate::domain::actions::Action;
use crate::domain::config::GameConfig;
use crate::domain::rules::{KITTY_SIZE, MAX_TARGET};
use crate::domain::state::{require_contract, Contract, GameState, Phase, Seat};
use crate::domain::{Card, Trump};
use crate::errors::domain::{IllegalKind, RulesError};

/// Target after switching to `trump`, or `None` when the switch would exceed
/// the maximum target.
pub fn target_after_change(config: &GameConfig, contract: &Contract, trump: Trump) -> Option<u8> {
    if trump == contract.trump {
        return Some(contract.target);
    }
    let raised = contract.target.checked_add(config.trump_change_penalty)?;
    (raised <= MAX_TARGET).then_some(raised)
}

/// Trumps the declarer may finish the exchange with.
pub fn trump_options(config: &GameConfig, contract: &Contract) -> Vec<Trump> {
    Trump::ALL
        .into_iter()
        .filter(|t| target_after_change(config, contract, *t).is_some())
        .collect()
}

/// Every legal exchange: each 3-card subset of `hand` (ascending) crossed with
/// each reachable trump.
pub fn exchange_actions(config: &GameConfig, contract: &Contract, hand: &[Card]) -> Vec<Action> {
    let mut sorted = hand.to_vec();
    sorted.sort();
    let trumps = trump_options(config, contract);
    let n = sorted.len();
    let mut out = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for &trump in &trumps {
                    out.push(Action::Exchange {
                        discards: [sorted[i], sorted[j], sorted[k]],
                        trump,
                    });
                }
            }
        }
    }
    out
}

/// Apply the exchange. Discards are stored in ascending order.
pub fn exchange(
    state: &mut GameState,
    who: Seat,
    discards: [Card; KITTY_SIZE],
    trump: Trump,
) -> Result<Phase, RulesError> {
    if state.phase != Phase::Exchange {
        return Err(RulesError::illegal(
            IllegalKind::PhaseMismatch,
            "Not in exchange phase",
        ));
    }
    let contract = require_contract(state, "exchange")?;
    if who != contract.declarer || state.turn != Some(who) {
        return Err(RulesError::illegal(
            IllegalKind::OutOfTurn,
            "Only the declarer exchanges",
        ));
    }

    let mut discards = discards;
    discards.sort();
    if discards.windows(2).any(|w| w[0] == w[1]) {
        return Err(RulesError::illegal(
            IllegalKind::InvalidExchange,
            "Discards must be distinct",
        ));
    }
    let hand = &state.hands[who as usize];
    if let Some(missing) = discards.iter().find(|c| !hand.contains(c)) {
        return Err(RulesError::illegal(
            IllegalKind::CardNotInHand,
            format!("Discard {missing} not in hand"),
        ));
    }
    let Some(new_target) = target_after_change(&state.config, &contract, trump) else {
        return Err(RulesError::illegal(
            IllegalKind::InvalidExchange,
            format!("Changing trump to {trump} would exceed the maximum target"),
        ));
    };

    state.hands[who as usize].retain(|c| !discards.contains(c));
    state.discards = discards.to_vec();
    if trump != contract.trump {
        debug!(from = %contract.trump, to = %trump, new_target, "Trump changed");
    }
    state.contract = Some(Contract {
        trump,
        target: new_target,
        ..contract
    });
    state.phase = Phase::PartnerCall;
    Ok(Phase::PartnerCall)
}
