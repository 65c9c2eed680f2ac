//! Tests for logging initialization

use mindstem::core::logging::{init_logging, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("PRETTY").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_variants_listed() {
    let variants = LogFormat::variants();
    assert_eq!(variants, &["compact", "pretty", "json"]);
}

#[test]
fn test_init_logging_does_not_panic() {
    // Only the first call can install the global subscriber
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_logging(None, None);
}

#[test]
fn test_invalid_format_is_error() {
    assert!(init_logging(Some("info"), Some("yaml")).is_err());
}

#[test]
fn test_pipeline_runs_with_logging_enabled() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let svg = mindstem::render_svg("Root\n  - Orphan\n- A\n  - A1").unwrap();
    assert!(svg.contains(">A1</tspan>"));
}
