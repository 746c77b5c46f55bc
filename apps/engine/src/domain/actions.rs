//! Actions and the rules-engine entry points.
//!
//! Every move in the game is an [`Action`]. The four pure functions here
//! (`legal_actions`, `apply_action`, `is_terminal`, `score_of`) are what an
//! outer layer needs to validate or replay a game; [`GameState::apply`] is the
//! in-place variant used by search and simulation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{self, bidding_actions};
use crate::domain::exchange::{self, exchange_actions};
use crate::domain::partner::{self, partner_call_actions, PartnerCall};
use crate::domain::rules::{KITTY_SIZE, PLAYERS};
use crate::domain::state::{GameState, LoggedAction, Phase, Seat};
use crate::domain::tricks::{legal_plays, play_card};
use crate::domain::{Card, Suit, Trump};
use crate::errors::domain::{IllegalKind, RulesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Bid {
        trump: Trump,
        target: u8,
    },
    Pass,
    CallMissDeal,
    Exchange {
        discards: [Card; KITTY_SIZE],
        trump: Trump,
    },
    CallPartner(PartnerCall),
    Play {
        card: Card,
        /// Suit named when leading the Joker.
        lead_suit: Option<Suit>,
        /// Leading the joker-call card and calling the Joker out.
        joker_call: bool,
    },
}

impl Action {
    /// A plain card play with no Joker lead or call.
    pub fn play(card: Card) -> Self {
        Action::Play {
            card,
            lead_suit: None,
            joker_call: false,
        }
    }

    /// Total order used for deterministic tie-breaks.
    pub fn sort_key(&self) -> (u8, u64) {
        match *self {
            Action::Bid { trump, target } => (0, target as u64 * 8 + trump.priority() as u64),
            Action::Pass => (1, 0),
            Action::CallMissDeal => (2, 0),
            Action::Exchange { discards, trump } => {
                let packed = discards
                    .iter()
                    .fold(0u64, |acc, c| acc * 64 + c.index() as u64);
                (3, packed * 8 + trump.priority() as u64)
            }
            Action::CallPartner(call) => {
                let slot = match call {
                    PartnerCall::Card(c) => c.index() as u64,
                    PartnerCall::FirstTrick => 53,
                    PartnerCall::None => 54,
                };
                (4, slot)
            }
            Action::Play {
                card,
                lead_suit,
                joker_call,
            } => {
                let suit_slot = lead_suit.map_or(0, |s| s.index() as u64 + 1);
                (5, (card.index() as u64 * 8 + suit_slot) * 2 + joker_call as u64)
            }
        }
    }
}

/// An action as one observer sees it.
///
/// Everything is public except another seat's discards: an opponent's
/// exchange is seen only as the trump it ends with. Search trees key their
/// edges on this so that hidden information never splits a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKey {
    Visible(Action),
    HiddenExchange { trump: Trump },
}

impl ActionKey {
    /// How `observer` sees `actor` taking `action`.
    pub fn observe(action: &Action, actor: Seat, observer: Seat) -> Self {
        match *action {
            Action::Exchange { trump, .. } if actor != observer => {
                ActionKey::HiddenExchange { trump }
            }
            Action::Exchange {
                mut discards,
                trump,
            } => {
                discards.sort();
                ActionKey::Visible(Action::Exchange { discards, trump })
            }
            other => ActionKey::Visible(other),
        }
    }

    /// Public form, as written to the game log.
    pub fn public(action: &Action) -> Self {
        match *action {
            Action::Exchange { trump, .. } => ActionKey::HiddenExchange { trump },
            other => ActionKey::Visible(other),
        }
    }

    fn sort_key(&self) -> (u8, u64) {
        match self {
            ActionKey::Visible(a) => a.sort_key(),
            ActionKey::HiddenExchange { trump } => (3, trump.priority() as u64),
        }
    }
}

impl Ord for ActionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let hidden = |k: &ActionKey| matches!(k, ActionKey::HiddenExchange { .. });
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| hidden(self).cmp(&hidden(other)))
    }
}

impl PartialOrd for ActionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// What changed when an action was applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionResult {
    /// Whether a trick was completed (5 cards played).
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// The partnership became public with this action.
    pub partner_revealed: bool,
    /// Phase transitioned to, if any.
    pub phase_transitioned: Option<Phase>,
}

impl ActionResult {
    fn transitioned(phase: Option<Phase>) -> Self {
        Self {
            phase_transitioned: phase,
            ..Self::default()
        }
    }
}

impl GameState {
    /// Apply `action` for the seat whose turn it is. The state is left
    /// untouched when the action is rejected.
    pub fn apply(&mut self, action: &Action) -> Result<ActionResult, RulesError> {
        let Some(seat) = self.turn else {
            return Err(RulesError::illegal(
                IllegalKind::PhaseMismatch,
                "Game is finished",
            ));
        };

        let result = match *action {
            Action::Bid { trump, target } => {
                ActionResult::transitioned(bidding::place_bid(self, seat, trump, target)?)
            }
            Action::Pass => ActionResult::transitioned(bidding::pass(self, seat)?),
            Action::CallMissDeal => {
                ActionResult::transitioned(bidding::call_miss_deal(self, seat)?)
            }
            Action::Exchange { discards, trump } => {
                ActionResult::transitioned(Some(exchange::exchange(self, seat, discards, trump)?))
            }
            Action::CallPartner(call) => {
                ActionResult::transitioned(Some(partner::call_partner(self, seat, call)?))
            }
            Action::Play {
                card,
                lead_suit,
                joker_call,
            } => play_card(self, seat, card, lead_suit, joker_call)?,
        };

        self.history.push(LoggedAction {
            seat,
            action: ActionKey::public(action),
        });
        Ok(result)
    }

    /// Legal actions for the seat to act, in a stable order.
    pub fn legal_actions(&self) -> Vec<Action> {
        let Some(seat) = self.turn else {
            return Vec::new();
        };
        let hand = &self.hands[seat as usize];
        match self.phase {
            Phase::Bidding => bidding_actions(&self.config, &self.auction, seat, hand),
            Phase::Exchange => match self.contract {
                Some(c) => exchange_actions(&self.config, &c, hand),
                None => Vec::new(),
            },
            Phase::PartnerCall => partner_call_actions(),
            Phase::Play { .. } => legal_plays(self, seat),
            Phase::Scoring | Phase::Finished => Vec::new(),
        }
    }
}

/// Legal actions for the seat to act. Empty once the game is terminal.
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    state.legal_actions()
}

/// Apply `action` to a copy of `state`.
pub fn apply_action(state: &GameState, action: &Action) -> Result<GameState, RulesError> {
    let mut next = state.clone();
    next.apply(action)?;
    Ok(next)
}

pub fn is_terminal(state: &GameState) -> bool {
    state.phase == Phase::Finished
}

/// Per-seat game points. Only valid on a terminal state; a redeal scores zero.
pub fn score_of(state: &GameState) -> Result<[i32; PLAYERS], RulesError> {
    match (&state.outcome, state.phase) {
        (Some(outcome), Phase::Finished) => Ok(outcome.payouts()),
        _ => Err(RulesError::NotTerminal),
    }
}
