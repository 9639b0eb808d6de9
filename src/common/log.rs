//! Logging setup emitting JSON lines through `tracing`.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `level` accepts any `EnvFilter` directive
/// (`info`, `riskdash=debug,tower_http=info`, ...); an unparsable one falls back to `info`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_current_span(false)
        .try_init();
}
