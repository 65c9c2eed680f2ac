//! Logging setup for the mind map pipeline
//!
//! Structured logging goes through `tracing`; this module only decides how
//! the subscriber is built. Output always goes to stderr so that SVG written
//! to stdout stays clean.
//!
//! # Usage
//!
//! ```rust,no_run
//! use mindstem::core::logging::init_logging;
//!
//! // Level and format from the environment, or info/compact
//! init_logging(None, None).ok();
//! ```
//!
//! # Environment Variables
//!
//! - `MINDSTEM_LOG_LEVEL`: any `EnvFilter` directive (`debug`,
//!   `mindstem::mindmap::parser=trace`, ...)
//! - `RUST_LOG`: used when `MINDSTEM_LOG_LEVEL` is unset
//! - `MINDSTEM_LOG_FORMAT`: `compact`, `pretty` or `json`
//!
//! # Filtering
//!
//! ```bash
//! # Show which outline lines the parser dropped
//! MINDSTEM_LOG_LEVEL="mindstem::mindmap::parser=debug" mindstem render -i notes.txt
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self as tfmt, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "MINDSTEM_LOG_LEVEL";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "MINDSTEM_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line events
    #[default]
    Compact,
    /// Multi-line events with source locations
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// All accepted format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Unknown log format: {} (expected one of {})",
                s,
                LogFormat::variants().join(", ")
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// Resolve the filter directive: argument, then env vars, then `info`
fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string())
}

/// Resolve the output format: argument, then env var, then compact
fn resolve_format(format: Option<&str>) -> Result<LogFormat, String> {
    match format
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
    {
        Some(name) => name.parse(),
        None => Ok(LogFormat::default()),
    }
}

fn build_filter(level: &str) -> EnvFilter {
    if level.eq_ignore_ascii_case("off") {
        return EnvFilter::new("off");
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber.
///
/// Fails when the format name is unknown or a global subscriber is already
/// installed. An unparsable level falls back to `info`.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = resolve_format(format).map_err(|e| format!("Invalid log format: {}", e))?;
    let filter = build_filter(&resolve_level(level));

    let base = tfmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_level(true);

    match format {
        LogFormat::Compact => Registry::default()
            .with(filter)
            .with(
                base.with_target(false)
                    .with_span_events(FmtSpan::NONE)
                    .compact(),
            )
            .try_init()?,
        LogFormat::Pretty => Registry::default()
            .with(filter)
            .with(
                base.with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .pretty(),
            )
            .try_init()?,
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(
                base.with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_ansi(false)
                    .json(),
            )
            .try_init()?,
    }

    Ok(())
}
