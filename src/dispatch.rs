//! The shared handle every [`Logger`] consults.

use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use time::OffsetDateTime;
use tracing::debug;

use crate::config::Config;
use crate::level::LogLevel;
use crate::logger::Logger;
use crate::output::{self, Palette, Record, Sink};
use crate::table::LevelTable;

static GLOBAL: LazyLock<Arc<EnvLog>> = LazyLock::new(|| Arc::new(EnvLog::new(Config::default())));

/// Level table, output settings and destination shared by a set of loggers.
///
/// The table is an immutable snapshot behind an [`ArcSwap`]: reconfiguring
/// builds a whole new table and swaps it in, so readers on the logging path
/// never take a lock and never see a half-built table.
pub struct EnvLog {
    config: Config,
    sink: Sink,
    color: bool,
    table: ArcSwap<LevelTable>,
}

impl EnvLog {
    /// Handle writing to stderr, with levels read from `config.env_var`.
    pub fn new(config: Config) -> Self {
        let table = LevelTable::from_env(&config.env_var);
        Self::with_table(config, table)
    }

    /// Handle writing to stderr with an explicit table. The environment is
    /// not read until [`configure_levels`](Self::configure_levels) is called.
    pub fn with_table(config: Config, table: LevelTable) -> Self {
        Self::assemble(config, Sink::Stderr, table)
    }

    /// Handle writing to `sink` with an explicit table.
    pub fn with_sink(config: Config, sink: Sink, table: LevelTable) -> Self {
        Self::assemble(config, sink, table)
    }

    fn assemble(config: Config, sink: Sink, table: LevelTable) -> Self {
        let color = config.color.resolve(sink.is_terminal());
        Self {
            config,
            sink,
            color,
            table: ArcSwap::from_pointee(table),
        }
    }

    /// The process-wide handle, built from [`Config::default`] on first use.
    pub fn global() -> &'static Arc<EnvLog> {
        &GLOBAL
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Re-read the environment variable and replace the table.
    pub fn configure_levels(&self) {
        self.set_table(LevelTable::from_env(&self.config.env_var));
    }

    /// Replace the table with one parsed from `spec`.
    pub fn configure_from(&self, spec: &str) {
        self.set_table(LevelTable::parse(spec));
    }

    /// Replace the table wholesale. Existing loggers see it on their next call.
    pub fn set_table(&self, table: LevelTable) {
        debug!(
            default = %table.default_level(),
            named = table.len(),
            "log levels configured"
        );
        self.table.store(Arc::new(table));
    }

    /// Snapshot of the current table.
    pub fn levels(&self) -> Arc<LevelTable> {
        self.table.load_full()
    }

    /// Logger bound to `identifier` on this handle.
    pub fn logger(self: &Arc<Self>, identifier: impl Into<String>) -> Logger {
        Logger::with_handle(Arc::clone(self), identifier)
    }

    pub(crate) fn enabled(&self, identifier: &str, level: LogLevel) -> bool {
        self.table.load().permits(identifier, level)
    }

    pub(crate) fn emit(&self, level: LogLevel, identifier: &str, message: fmt::Arguments<'_>) {
        let record = Record {
            level,
            at: OffsetDateTime::now_utc(),
            identifier,
            message,
        };
        let mut line = Vec::with_capacity(128);
        let palette = Palette::for_level(level, self.color);
        // A failed stderr write has nowhere better to be reported.
        if output::render(&mut line, &record, palette, self.config.timestamp).is_ok() {
            let _ = self.sink.write_line(&line);
        }
    }
}

impl fmt::Debug for EnvLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLog")
            .field("config", &self.config)
            .field("sink", &self.sink)
            .field("color", &self.color)
            .field("table", &*self.table.load())
            .finish()
    }
}

/// Re-read the environment into the process-wide handle.
pub fn configure_levels() {
    EnvLog::global().configure_levels();
}
