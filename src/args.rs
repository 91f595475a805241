use clap::{ArgAction, Parser, ValueEnum};
use envlog::{ColorChoice, LogLevel, TimestampFormat};

/// envlog: write a message through an envlog logger.
///
/// The message is emitted by a logger bound to --id at --level, and only
/// appears on stderr when the ENVLOG variable allows it, e.g.
/// `ENVLOG=info` or `ENVLOG=warn,worker=debug`.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Message to log (a plain string, no placeholders)
    #[arg(default_value = "hello from envlog")]
    pub message: String,

    /// Identifier the logger is bound to
    #[arg(long = "id", default_value = "envlog")]
    pub id: String,

    /// Level to log at: trace, debug, info, warn or error
    #[arg(long = "level", default_value = "error")]
    pub level: LogLevel,

    /// When to color the output
    #[arg(long = "color", value_enum, default_value_t = ColorArg::Auto)]
    pub color: ColorArg,

    /// Put the month in the minutes slot, as older log consumers expect
    #[arg(long = "legacy-timestamp", action = ArgAction::SetTrue)]
    pub legacy_timestamp: bool,

    /// Number of parallel worker threads emitting the message (must be > 0)
    #[arg(long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// How many times each thread emits the message (must be > 0)
    #[arg(long = "repeat", default_value_t = 1)]
    pub repeat: usize,

    /// Print the active config and level table as JSON to stdout and exit
    #[arg(long = "dump-levels", action = ArgAction::SetTrue)]
    pub dump_levels: bool,

    /// Diagnostics verbosity: 0=warn, 1=info, 2=debug
    #[arg(long = "verbosity", default_value_t = 0)]
    pub verbosity: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

impl Args {
    pub fn timestamp_format(&self) -> TimestampFormat {
        if self.legacy_timestamp {
            TimestampFormat::Legacy
        } else {
            TimestampFormat::Corrected
        }
    }

    /// Validate numeric constraints that clap doesn't enforce here.
    fn validate(&self) -> anyhow::Result<()> {
        if self.threads == 0 {
            anyhow::bail!("--threads must be > 0");
        }
        if self.repeat == 0 {
            anyhow::bail!("--repeat must be > 0");
        }
        if self.verbosity > 2 {
            anyhow::bail!("--verbosity must be in 0..=2");
        }
        Ok(())
    }
}

/// Parse CLI args in one place so main.rs does not need clap in scope.
pub fn parse() -> Args {
    let args = Args::parse();
    if let Err(e) = args.validate() {
        eprintln!("error: {}", e);
        std::process::exit(2);
    }
    args
}
