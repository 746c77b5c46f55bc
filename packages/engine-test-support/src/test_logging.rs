//! One-time `tracing` subscriber for tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Level used when neither variable is set. Search workers log at debug, so
/// the default stays quiet.
pub const DEFAULT_FILTER: &str = "warn";

/// Filter directives, in order of precedence: `TEST_LOG`, `RUST_LOG`,
/// [`DEFAULT_FILTER`].
pub fn filter_directives() -> String {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_FILTER.to_string())
}

/// Install the test subscriber. Idempotent and safe to race.
///
/// ```bash
/// TEST_LOG=mighty_engine=debug cargo test -p mighty-engine search
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_new(filter_directives())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_thread_names(true)
            .try_init()
            .ok(); // another subscriber may already be installed
    });
}
