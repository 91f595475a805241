//! Emission policy and line shape, driven through explicit handles.

use std::sync::Arc;

use envlog::{
    ColorChoice, Config, EnvLog, LevelTable, LogLevel, Logger, MemoryBuffer, Sink,
    TimestampFormat,
};
use regex::Regex;

fn handle(spec: &str) -> (Arc<EnvLog>, MemoryBuffer) {
    handle_with(spec, TimestampFormat::Corrected)
}

fn handle_with(spec: &str, timestamp: TimestampFormat) -> (Arc<EnvLog>, MemoryBuffer) {
    let buffer = MemoryBuffer::new();
    let config = Config::default()
        .with_color(ColorChoice::Never)
        .with_timestamp(timestamp);
    let env = EnvLog::with_sink(config, Sink::Memory(buffer.clone()), LevelTable::parse(spec));
    (Arc::new(env), buffer)
}

fn emit_all(logger: &Logger) {
    envlog::trace!(logger, "at trace");
    envlog::debug!(logger, "at debug");
    envlog::info!(logger, "at info");
    envlog::warn!(logger, "at warn");
    envlog::error!(logger, "at error");
}

fn emitted_levels(buffer: &MemoryBuffer) -> Vec<String> {
    buffer
        .take()
        .lines()
        .map(|line| line.split(':').next().unwrap_or_default().to_owned())
        .collect()
}

// ============================================================================
// Level resolution
// ============================================================================

#[test]
fn default_level_permits_itself_and_everything_above() {
    for min in LogLevel::ALL {
        let (env, _) = handle(&min.to_string());
        let logger = env.logger("any");
        for level in LogLevel::ALL {
            assert_eq!(logger.enabled(level), min <= level, "min={min} level={level}");
        }
    }
}

#[test]
fn empty_spec_emits_errors_only() {
    let (env, buffer) = handle("");
    emit_all(&env.logger("any"));
    assert_eq!(emitted_levels(&buffer), ["ERROR"]);
}

#[test]
fn bare_info_applies_to_every_identifier() {
    let (env, buffer) = handle("info");
    emit_all(&env.logger("first"));
    emit_all(&env.logger("second"));
    assert_eq!(
        emitted_levels(&buffer),
        ["INFO", "WARN", "ERROR", "INFO", "WARN", "ERROR"]
    );
}

#[test]
fn named_entry_only_loosens_its_own_identifier() {
    let (env, buffer) = handle("MyModule=info");

    emit_all(&env.logger("MyModule"));
    assert_eq!(emitted_levels(&buffer), ["INFO", "WARN", "ERROR"]);

    emit_all(&env.logger("Other"));
    assert_eq!(emitted_levels(&buffer), ["ERROR"]);

    emit_all(&env.logger("mymodule"));
    assert_eq!(emitted_levels(&buffer), ["ERROR"]);
}

#[test]
fn unknown_bare_level_means_error() {
    let (env, buffer) = handle("bogus");
    emit_all(&env.logger("any"));
    assert_eq!(emitted_levels(&buffer), ["ERROR"]);
}

#[test]
fn unknown_named_level_means_trace() {
    let (env, buffer) = handle("MyModule=bogus");
    emit_all(&env.logger("MyModule"));
    assert_eq!(
        emitted_levels(&buffer),
        ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"]
    );
}

#[test]
fn repeated_name_uses_last_occurrence() {
    let (env, buffer) = handle("MyModule=trace,MyModule=warn");
    emit_all(&env.logger("MyModule"));
    assert_eq!(emitted_levels(&buffer), ["WARN", "ERROR"]);
}

#[test]
fn either_entry_permitting_is_enough() {
    let (env, _) = handle("warn,noisy=trace,quiet=error");
    let noisy = env.logger("noisy");
    let quiet = env.logger("quiet");

    assert!(noisy.enabled(LogLevel::Trace));
    assert!(quiet.enabled(LogLevel::Warn));
    assert!(!quiet.enabled(LogLevel::Info));
}

#[test]
fn never_emits_below_both_minimums() {
    let (env, _) = handle("warn,net=info");
    let net = env.logger("net");
    assert!(!net.enabled(LogLevel::Debug));
    assert!(!net.enabled(LogLevel::Trace));
}

// ============================================================================
// Reconfiguration
// ============================================================================

#[test]
fn existing_loggers_observe_reconfiguration() {
    let (env, buffer) = handle("");
    let logger = env.logger("worker");
    envlog::info!(logger, "before");
    assert!(buffer.is_empty());

    env.configure_from("worker=info");
    envlog::info!(logger, "after");
    assert!(buffer.take().ends_with(": worker: after\n"));

    env.configure_from("");
    envlog::info!(logger, "again");
    assert!(buffer.is_empty());
}

#[test]
fn reconfiguring_with_the_same_value_is_idempotent() {
    let (env, _) = handle("");
    env.configure_from("warn,db=debug");
    let first = env.levels();
    env.configure_from("warn,db=debug");
    let second = env.levels();
    assert_eq!(*first, *second);

    let logger = env.logger("db");
    for level in LogLevel::ALL {
        assert_eq!(logger.enabled(level), first.permits("db", level));
    }
}

#[test]
fn identifier_is_frozen_at_construction() {
    let (env, buffer) = handle("");
    let logger = env.logger("Origin");
    let moved = logger.clone();
    std::thread::spawn(move || envlog::error!(moved, "from elsewhere"))
        .join()
        .unwrap();
    assert!(buffer.contents().contains(": Origin: from elsewhere"));
}

// ============================================================================
// Line shape
// ============================================================================

#[test]
fn line_has_level_timestamp_identifier_and_message_in_order() {
    let (env, buffer) = handle("");
    let logger = env.logger("MyModule");
    envlog::error!(logger, "test {0} of {1}", 1, 2);

    let line_re =
        Regex::new(r"^ERROR: \d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z: MyModule: test 1 of 2\n$").unwrap();
    let out = buffer.contents();
    assert!(line_re.is_match(&out), "unexpected line: {out:?}");
}

#[test]
fn legacy_timestamp_carries_the_month_in_the_minutes_slot() {
    let (env, buffer) = handle_with("", TimestampFormat::Legacy);
    envlog::error!(env.logger("x"), "m");

    let re = Regex::new(r"^ERROR: (\d{4})-(\d{2})-\d{2}T\d{2}:(\d{2}):\d{2}Z: x: m\n$").unwrap();
    let out = buffer.contents();
    let caps = re.captures(&out).expect("line shape");
    assert_eq!(&caps[2], &caps[3]);
}

#[test]
fn disabled_calls_do_not_evaluate_arguments() {
    let (env, buffer) = handle("");
    let logger = env.logger("lazy");
    let mut evaluated = false;
    envlog::debug!(logger, "{}", {
        evaluated = true;
        "expensive"
    });
    assert!(!evaluated);
    assert!(buffer.is_empty());
}

#[test]
fn colored_output_resets_after_the_line() {
    let buffer = MemoryBuffer::new();
    let config = Config::default().with_color(ColorChoice::Always);
    let env = Arc::new(EnvLog::with_sink(
        config,
        Sink::Memory(buffer.clone()),
        LevelTable::parse("info"),
    ));
    envlog::info!(env.logger("c"), "colored");

    let out = buffer.contents();
    assert!(out.starts_with("\x1b[32mINFO: \x1b[0m\x1b[37m"));
    assert!(out.ends_with(": c: \x1b[0mcolored\n"));
}
