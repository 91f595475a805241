//! The level table: which minimum level applies to which identifier.
//!
//! Grammar of the environment value:
//!
//! ```text
//! spec  := entry (',' entry)*
//! entry := LEVEL | NAME '=' LEVEL
//! ```
//!
//! A bare `LEVEL` replaces the default (last one wins, unknown names fall back
//! to `ERROR`). `NAME=LEVEL` sets a per-identifier minimum (last one wins,
//! unknown names fall back to `TRACE`). Entries with more than one `=` are
//! dropped. Nothing in here can fail.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::level::LogLevel;

/// Level used for the default entry when nothing (valid) configures it.
pub const FALLBACK_DEFAULT: LogLevel = LogLevel::Error;

/// Level used for a named entry whose level token is not recognized.
pub const FALLBACK_NAMED: LogLevel = LogLevel::Trace;

/// Immutable snapshot of resolved minimum levels.
///
/// The default entry lives in its own field, so a table always has exactly
/// one default. Named entries are exact, case-sensitive identifier matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    default: LogLevel,
    named: BTreeMap<String, LogLevel>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            default: FALLBACK_DEFAULT,
            named: BTreeMap::new(),
        }
    }
}

impl LevelTable {
    /// Build a table from an environment-style specification.
    pub fn parse(spec: &str) -> Self {
        let mut table = Self::default();

        for token in spec.split(',') {
            let parts: Vec<&str> = token.split('=').collect();
            match parts.as_slice() {
                [""] => {}
                [bare] => {
                    table.default = LogLevel::parse_lenient(bare).unwrap_or_else(|| {
                        debug!(token = *bare, "unrecognized default level, using ERROR");
                        FALLBACK_DEFAULT
                    });
                }
                [name, level] => {
                    let level = LogLevel::parse_lenient(level).unwrap_or_else(|| {
                        debug!(name = *name, token = *level, "unrecognized level, using TRACE");
                        FALLBACK_NAMED
                    });
                    table.named.insert((*name).to_owned(), level);
                }
                _ => trace!(token, "dropping malformed level entry"),
            }
        }

        table
    }

    /// Build a table from the named environment variable.
    ///
    /// An unset variable, or one that is not valid unicode, reads as empty.
    pub fn from_env(var: &str) -> Self {
        let spec = std::env::var(var).unwrap_or_default();
        Self::parse(&spec)
    }

    /// Minimum level of the default entry.
    pub fn default_level(&self) -> LogLevel {
        self.default
    }

    /// Minimum level configured for `identifier`, if it has its own entry.
    pub fn get(&self, identifier: &str) -> Option<LogLevel> {
        self.named.get(identifier).copied()
    }

    /// Number of named (non-default) entries.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// True when only the default entry exists.
    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// Named entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LogLevel)> {
        self.named.iter().map(|(name, level)| (name.as_str(), *level))
    }

    /// Whether a call at `level` from `identifier` is emitted.
    ///
    /// The default entry is consulted first and unconditionally; the named
    /// entry only gets a say when the default rejects the call. Either one
    /// permitting the level is enough, so a stricter named entry never
    /// silences what the default allows.
    pub fn permits(&self, identifier: &str, level: LogLevel) -> bool {
        if self.default <= level {
            return true;
        }
        matches!(self.get(identifier), Some(min) if min <= level)
    }
}

/// Renders the table back in the environment grammar.
impl fmt::Display for LevelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default.as_str().to_ascii_lowercase())?;
        for (name, level) in self.iter() {
            write!(f, ",{name}={}", level.as_str().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
