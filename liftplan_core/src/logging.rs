//! Tracing setup for liftplan binaries.
//!
//! Log lines always go to stderr. Stdout belongs to the plan itself: the
//! human-readable listing, or the JSON document under `--json`, which must
//! stay parseable when piped into another tool.
//!
//! Generation logs the request and the assembled title at info, and the split
//! and the selector's fallback stages at debug. The plan library logs saves and
//! deletes at info and warns when it finds a corrupted file.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber at info, unless RUST_LOG says otherwise
pub fn init() {
    init_with_level("info")
}

/// Install the stderr subscriber with `default_level` as the fallback filter
///
/// RUST_LOG still wins, e.g. `RUST_LOG=liftplan_core::selector=debug` to
/// see which fallback stage picked each exercise.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route debug output into the test harness; safe to call from every test
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
