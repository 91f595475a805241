//! Line rendering and the destinations lines are written to.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use anstyle::{AnsiColor, Color, Style};
use time::OffsetDateTime;

use crate::config::TimestampFormat;
use crate::level::LogLevel;

/// Where rendered lines go. Output always means stderr; `Memory` only
/// captures what would have been written there, so tests can inspect it.
#[derive(Clone, Debug, Default)]
pub enum Sink {
    /// The process error stream.
    #[default]
    Stderr,
    /// Capture for tests and doctests. Never auto-colored.
    Memory(MemoryBuffer),
}

impl Sink {
    /// Write one complete line. The line is handed over in a single
    /// `write_all` while holding the stream lock, so lines from different
    /// threads never interleave.
    pub(crate) fn write_line(&self, line: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stderr => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(line)?;
                stderr.flush()
            }
            Sink::Memory(buffer) => {
                buffer.lock().extend_from_slice(line);
                Ok(())
            }
        }
    }

    pub(crate) fn is_terminal(&self) -> bool {
        match self {
            Sink::Stderr => io::IsTerminal::is_terminal(&io::stderr()),
            Sink::Memory(_) => false,
        }
    }
}

/// Capture buffer behind [`Sink::Memory`]. Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Drain the buffer, returning what it held.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Styles for the three segments of a line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Palette {
    label: Style,
    context: Style,
}

impl Palette {
    pub(crate) fn for_level(level: LogLevel, color: bool) -> Self {
        if !color {
            return Self {
                label: Style::new(),
                context: Style::new(),
            };
        }
        Self {
            label: label_style(level),
            context: Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))),
        }
    }
}

fn label_style(level: LogLevel) -> Style {
    let color = match level {
        LogLevel::Debug => AnsiColor::Blue,
        LogLevel::Info => AnsiColor::Green,
        LogLevel::Warn => AnsiColor::Yellow,
        LogLevel::Error => AnsiColor::Red,
        LogLevel::Trace => return Style::new(),
    };
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// One line's worth of data.
pub(crate) struct Record<'a> {
    pub level: LogLevel,
    pub at: OffsetDateTime,
    pub identifier: &'a str,
    pub message: fmt::Arguments<'a>,
}

/// Render `LEVEL: timestamp: identifier: message\n` into `out`.
///
/// Styled segments are each followed by their reset sequence, so the stream
/// is back at its default color before the message and at end of line.
/// Unstyled segments emit no escape sequences at all.
pub(crate) fn render(
    out: &mut Vec<u8>,
    record: &Record<'_>,
    palette: Palette,
    timestamp: TimestampFormat,
) -> io::Result<()> {
    let label = palette.label;
    write!(
        out,
        "{}{}: {}",
        label.render(),
        record.level,
        label.render_reset()
    )?;

    let context = palette.context;
    write!(out, "{}", context.render())?;
    record
        .at
        .to_offset(time::UtcOffset::UTC)
        .format_into(out, timestamp.items())
        .map_err(io::Error::other)?;
    write!(out, ": {}: {}", record.identifier, context.render_reset())?;

    out.write_fmt(record.message)?;
    out.push(b'\n');
    Ok(())
}
