//! Partner ("friend") calls.
//!
//! The declarer names a card; whoever holds it at call time is the partner,
//! but nobody learns who that is until the card hits the table. Calling a
//! card the declarer holds, or one that went into the discards, leaves the
//! declarer solo without anyone knowing until the end (or until the card is
//! played).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::actions::Action;
use crate::domain::config::FirstLead;
use crate::domain::rules::DECK_SIZE;
use crate::domain::state::{require_contract, round_start_seat, GameState, Phase, Seat, Trick};
use crate::domain::Card;
use crate::errors::domain::{IllegalKind, RulesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerCall {
    /// The holder of this card is the partner.
    Card(Card),
    /// The winner of trick 1 is the partner (solo if the declarer wins it).
    FirstTrick,
    /// Declared solo.
    None,
}

impl PartnerCall {
    pub fn card(self) -> Option<Card> {
        match self {
            PartnerCall::Card(c) => Some(c),
            _ => None,
        }
    }
}

/// Every partner call: any of the 53 cards, first-trick, or none.
pub fn partner_call_actions() -> Vec<Action> {
    (0..DECK_SIZE)
        .filter_map(Card::from_index)
        .map(PartnerCall::Card)
        .chain([PartnerCall::FirstTrick, PartnerCall::None])
        .map(Action::CallPartner)
        .collect()
}

/// Partner implied by a card call: the non-declarer holding `card` right now.
pub fn partner_for_card(state: &GameState, declarer: Seat, card: Card) -> Option<Seat> {
    state.holder_of(card).filter(|s| *s != declarer)
}

/// Apply the partner call and open trick 1.
pub fn call_partner(
    state: &mut GameState,
    who: Seat,
    call: PartnerCall,
) -> Result<Phase, RulesError> {
    if state.phase != Phase::PartnerCall {
        return Err(RulesError::illegal(
            IllegalKind::PhaseMismatch,
            "Not in partner-call phase",
        ));
    }
    let contract = require_contract(state, "call_partner")?;
    if who != contract.declarer || state.turn != Some(who) {
        return Err(RulesError::illegal(
            IllegalKind::OutOfTurn,
            "Only the declarer calls a partner",
        ));
    }

    let (partner, revealed) = match call {
        PartnerCall::Card(card) => (partner_for_card(state, contract.declarer, card), false),
        PartnerCall::FirstTrick => (None, false),
        PartnerCall::None => (None, true),
    };
    state.partner_call = Some(call);
    state.partner = partner;
    state.partner_revealed = revealed;
    debug!(declarer = who, ?call, "Partner called");

    let leader = match state.config.first_lead {
        FirstLead::AfterDealer => round_start_seat(state.dealer),
        FirstLead::Declarer => contract.declarer,
    };
    state.current_trick = Some(Trick::new(leader));
    state.turn = Some(leader);
    state.phase = Phase::Play { trick_no: 1 };
    Ok(state.phase)
}
