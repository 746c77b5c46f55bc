//! Shared test support for the Mighty engine crates.
//!
//! Unit tests (through a `ctor` hook) and integration tests call
//! [`test_logging::init`] so that `tracing` output from the engine lands in
//! the test harness's captured output.

pub mod test_logging;
