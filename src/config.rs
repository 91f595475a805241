//! Settings for an [`EnvLog`](crate::EnvLog) handle.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Environment variable read by [`Config::default`].
pub const DEFAULT_ENV_VAR: &str = "ENVLOG";

/// Handle settings. Everything has a default, so partial documents
/// deserialize fine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Variable holding the level specification.
    pub env_var: String,
    /// When to emit ANSI colors.
    pub color: ColorChoice,
    /// How the timestamp segment is rendered.
    pub timestamp: TimestampFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_owned(),
            color: ColorChoice::Auto,
            timestamp: TimestampFormat::Corrected,
        }
    }
}

impl Config {
    pub fn with_env_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = var.into();
        self
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    pub fn with_timestamp(mut self, timestamp: TimestampFormat) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stderr is a terminal and `NO_COLOR` is unset or empty.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve against the current process. `terminal` says whether the
    /// destination is an interactive terminal.
    pub fn resolve(self, terminal: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                terminal && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
            }
        }
    }
}

/// Shape of the timestamp segment. Both render UTC with a literal `Z`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampFormat {
    /// `YYYY-MM-DDTHH:MM:SSZ` with hour, minute and second.
    #[default]
    Corrected,
    /// Byte-compatible with older consumers: the minutes slot carries the
    /// month number (`2024-03-05T14:03:09Z` for 14:07:09 on March 5th).
    Legacy,
}

const CORRECTED: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

const LEGACY: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[month]:[second]Z");

impl TimestampFormat {
    pub(crate) fn items(self) -> &'static [FormatItem<'static>] {
        match self {
            TimestampFormat::Corrected => CORRECTED,
            TimestampFormat::Legacy => LEGACY,
        }
    }

    /// Render `at` (converted to UTC first).
    pub fn format(self, at: OffsetDateTime) -> Result<String, time::error::Format> {
        at.to_offset(time::UtcOffset::UTC).format(self.items())
    }
}
