use std::sync::Arc;

use envlog::{Config, EnvLog};
use rayon::prelude::*;
use tracing::{debug, info};

mod args;
mod log;

fn main() -> anyhow::Result<()> {
    let args = args::parse();

    log::init(log::level_from_verbosity(args.verbosity));

    let config = Config::default()
        .with_color(args.color.into())
        .with_timestamp(args.timestamp_format());
    let env = Arc::new(EnvLog::new(config));
    let levels = env.levels();
    info!(var = %env.config().env_var, levels = %levels, "levels loaded");

    if args.dump_levels {
        let dump = serde_json::json!({
            "config": env.config(),
            "levels": &*levels,
        });
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    let logger = env.logger(args.id.as_str());
    debug!(
        id = logger.identifier(),
        level = %args.level,
        enabled = logger.enabled(args.level),
        "emitting"
    );

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build()?
        .install(|| {
            (0..args.threads * args.repeat)
                .into_par_iter()
                .for_each(|_| envlog::log!(logger, args.level, "{}", args.message));
        });

    Ok(())
}
