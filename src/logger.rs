//! Loggers bound to a caller identifier.

use std::fmt;
use std::sync::Arc;

use crate::dispatch::EnvLog;
use crate::level::LogLevel;

/// A logger bound, at construction, to the identifier of the code that
/// created it.
///
/// The identifier never changes afterwards, whichever code later calls the
/// logging methods. Level decisions always use the handle's current table,
/// so reconfiguration reaches loggers that already exist.
#[derive(Clone, Debug)]
pub struct Logger {
    handle: Arc<EnvLog>,
    identifier: Arc<str>,
}

impl Logger {
    /// Logger on the process-wide handle.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self::with_handle(Arc::clone(EnvLog::global()), identifier)
    }

    /// Logger on an explicit handle.
    pub fn with_handle(handle: Arc<EnvLog>, identifier: impl Into<String>) -> Self {
        Self {
            handle,
            identifier: Arc::from(identifier.into()),
        }
    }

    /// Logger on the process-wide handle, named after the type `T`.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::new(short_type_name(std::any::type_name::<T>()))
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether a call at `level` would be written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.handle.enabled(&self.identifier, level)
    }

    pub fn log(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.emit(level, message);
        }
    }

    /// Write without consulting the table. The logging macros call this
    /// after their own `enabled` check, so each call reads one snapshot.
    #[doc(hidden)]
    pub fn emit(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        self.handle.emit(level, &self.identifier, message);
    }

    pub fn trace(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Trace, message);
    }

    pub fn debug(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, message);
    }
}

/// `alloc::vec::Vec<my_app::Job>` -> `Vec`, `my_app::net::Client` -> `Client`.
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Last segment of a `module_path!()` value.
#[doc(hidden)]
pub fn module_leaf(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}
