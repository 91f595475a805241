//! Diagnostics for the binary itself (level parsing, reconfiguration),
//! routed through tracing so they stay separate from envlog output.

use tracing_subscriber::fmt::time::UtcTime;

/// Map a numeric verbosity (0..2) to a filter directive for envlog's target.
pub fn level_from_verbosity(v: u8) -> &'static str {
    match v {
        0 => "envlog=warn",
        1 => "envlog=info",
        _ => "envlog=debug",
    }
}

/// Install the diagnostics subscriber on stderr with RFC3339 timestamps.
pub fn init(directive: &str) {
    // A subscriber installed by an embedding process takes precedence.
    let _ = tracing_subscriber::fmt()
        .with_timer(UtcTime::rfc_3339())
        .with_env_filter(directive)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false)
        .with_level(true)
        .try_init();
}
