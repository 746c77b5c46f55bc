use thiserror::Error;

use crate::errors::domain::RulesError;

/// Errors surfaced by the decision interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid information set: {detail}")]
    InvalidInformationSet { detail: String },
    #[error("Determinization failed: {detail}")]
    Determinization { detail: String },
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),
    #[error("No legal actions available")]
    NoLegalActions,
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl EngineError {
    pub fn invalid_info_set(detail: impl Into<String>) -> Self {
        Self::InvalidInformationSet {
            detail: detail.into(),
        }
    }

    pub fn determinization(detail: impl Into<String>) -> Self {
        Self::Determinization {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code for the external API layer.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidInformationSet { .. } => "INVALID_INFORMATION_SET",
            EngineError::Determinization { .. } => "DETERMINIZATION_FAILED",
            EngineError::Rules(RulesError::IllegalAction { .. }) => "ILLEGAL_ACTION",
            EngineError::Rules(_) => "RULES_ERROR",
            EngineError::NoLegalActions => "NO_LEGAL_ACTIONS",
            EngineError::Internal { .. } => "INTERNAL",
        }
    }

    /// Errors the search loop may recover from by falling back to the playout policy.
    pub fn is_search_internal(&self) -> bool {
        matches!(
            self,
            EngineError::Determinization { .. } | EngineError::Internal { .. }
        )
    }
}
