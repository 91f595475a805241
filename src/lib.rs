//! Per-module leveled logging to stderr, configured from one environment
//! variable.
//!
//! Each [`Logger`] is bound to an identifier when it is created (usually the
//! name of the enclosing module or type). Whether a call is written depends on
//! the [`LevelTable`] parsed from `ENVLOG`:
//!
//! ```text
//! ENVLOG=info                 # INFO and above from everyone
//! ENVLOG=client=debug         # DEBUG and above from `client`, ERROR elsewhere
//! ENVLOG=warn,client=trace    # both
//! ```
//!
//! A call is emitted if the default level permits it, or failing that if the
//! logger's own entry does. Lines look like
//!
//! ```text
//! INFO: 2024-03-05T14:07:09Z: client: connected to 10.0.0.2
//! ```
//!
//! ```
//! use std::sync::Arc;
//! use envlog::{Config, ColorChoice, EnvLog, LevelTable, MemoryBuffer, Sink};
//!
//! let buffer = MemoryBuffer::new();
//! let env = Arc::new(EnvLog::with_sink(
//!     Config::default().with_color(ColorChoice::Never),
//!     Sink::Memory(buffer.clone()),
//!     LevelTable::parse("client=info"),
//! ));
//!
//! let client = env.logger("client");
//! envlog::info!(client, "connected to {0}", "10.0.0.2");
//! envlog::debug!(client, "not shown");
//!
//! let out = buffer.contents();
//! assert!(out.starts_with("INFO: "));
//! assert!(out.ends_with(": client: connected to 10.0.0.2\n"));
//! ```

mod config;
mod dispatch;
mod level;
mod logger;
mod output;
mod table;

pub use config::{ColorChoice, Config, DEFAULT_ENV_VAR, TimestampFormat};
pub use dispatch::{EnvLog, configure_levels};
pub use level::{LogLevel, ParseLevelError};
pub use logger::Logger;
#[doc(hidden)]
pub use logger::module_leaf;
pub use output::{MemoryBuffer, Sink};
pub use table::{FALLBACK_DEFAULT, FALLBACK_NAMED, LevelTable};

/// Logger on the global handle, named after the calling module.
///
/// The identifier is the last segment of `module_path!()` at the call site,
/// so a logger created in `my_app::net::client` answers to `client`.
#[macro_export]
macro_rules! logger {
    () => {
        $crate::Logger::new($crate::module_leaf(::core::module_path!()))
    };
}

/// Log at an explicit level; arguments are only formatted when enabled.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.emit(level, ::core::format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
