#![warn(missing_docs)]

//! Shared logging helpers and tracing utilities for the i3flash workspace.
//!
//! Verbosity is controlled from the environment only:
//! - `LOGLEVEL`: a single level applied to our crates (`DEBUG`, `info`, `WARNING`, ...)
//! - `RUST_LOG`: an explicit tracing filter directive
//! - neither: crate-scoped `info`

use std::{env, io};

use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

/// Environment variable carrying a single global log level.
pub const LOGLEVEL_ENV: &str = "LOGLEVEL";

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &["i3flash", "flash_engine", "i3_ipc", "x11_winops", "logging"]
}

/// Map a level name onto a tracing level directive.
///
/// Accepts tracing names as well as the Python-style `WARNING` and `CRITICAL`
/// spellings. Returns `None` for anything unrecognised.
pub fn normalize_level(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" | "warning" => Some("warn"),
        "error" | "critical" | "fatal" => Some("error"),
        "off" | "none" => Some("off"),
        _ => None,
    }
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `loglevel` (crate-scoped), when it names a known level
/// - `rust_log`
/// - default to crate-scoped `info`
pub fn compute_spec(loglevel: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(lvl) = loglevel.and_then(normalize_level) {
        return level_spec_for(lvl);
    }
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => level_spec_for("info"),
    }
}

/// Compute the filter spec from `LOGLEVEL` and `RUST_LOG`.
pub fn spec_from_env() -> String {
    let loglevel = env::var(LOGLEVEL_ENV).ok();
    let rust_log = env::var("RUST_LOG").ok();
    compute_spec(loglevel.as_deref(), rust_log.as_deref())
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

/// Install the global subscriber: env-derived filter plus a stderr fmt layer.
///
/// Returns the spec that was applied. Installing twice is a no-op.
pub fn init() -> String {
    let spec = spec_from_env();
    registry()
        .with(env_filter_from_spec(&spec))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init()
        .ok();
    spec
}
