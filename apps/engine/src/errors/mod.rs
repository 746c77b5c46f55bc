//! Error handling for the Mighty engine.

pub mod domain;

pub use domain::{IllegalKind, RulesError};
