use std::io;

use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "TEXTTOOLS_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. Logs go to stderr since stdout carries the protocol.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let format = fmt::format().without_time().with_target(false);

    // try_init: a second call (e.g. from tests) must not panic
    let _ = fmt()
        .with_env_filter(filter)
        .event_format(format)
        .with_writer(io::stderr)
        .try_init();
}
