//! Rules-level error type used by the game engine.
//!
//! This error type is search-agnostic. The decision layer converts it into
//! [`crate::error::EngineError`] via the provided `From` implementation.

use thiserror::Error;

/// Which rule an illegal action broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum IllegalKind {
    PhaseMismatch,
    OutOfTurn,
    InvalidBid,
    MissDealNotAllowed,
    CardNotInHand,
    MustFollowSuit,
    MustPlayJoker,
    InvalidExchange,
    InvalidPartnerCall,
    InvalidJokerLead,
    InvalidJokerCall,
}

/// Central rules error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The action is not in the legal set for the current phase/seat
    #[error("illegal action ({kind:?}): {detail}")]
    IllegalAction { kind: IllegalKind, detail: String },
    /// Scores were requested before the game finished
    #[error("game is not finished")]
    NotTerminal,
    /// Card token could not be parsed
    #[error("parse card: {0}")]
    ParseCard(String),
    /// Internal state broke one of its invariants
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl RulesError {
    pub fn illegal(kind: IllegalKind, detail: impl Into<String>) -> Self {
        Self::IllegalAction {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// The rule broken, when this is an illegal action.
    pub fn illegal_kind(&self) -> Option<IllegalKind> {
        match self {
            RulesError::IllegalAction { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
