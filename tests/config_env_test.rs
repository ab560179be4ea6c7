//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use clear_reasoning::config::{Config, LogFormat};
use serial_test::serial;
use std::env;

const VARS: [&str; 5] = [
    "LOG_LEVEL",
    "LOG_FORMAT",
    "ENGINE_STRICT_THOUGHT_REFERENCES",
    "COUNCIL_RECOMMENDATION_LIMIT",
    "SERVER_NAME",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_vars();

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(!config.engine.strict_thought_references);
    assert_eq!(config.engine.recommendation_limit, 3);
    assert_eq!(config.server.name, "clear-reasoning");
}

#[test]
#[serial]
fn test_config_from_env_overrides() {
    clear_vars();
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENGINE_STRICT_THOUGHT_REFERENCES", "true");
    env::set_var("COUNCIL_RECOMMENDATION_LIMIT", "5");
    env::set_var("SERVER_NAME", "reasoning-dev");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.engine.strict_thought_references);
    assert_eq!(config.engine.recommendation_limit, 5);
    assert_eq!(config.server.name, "reasoning-dev");

    clear_vars();
}

#[test]
#[serial]
fn test_config_unknown_log_format_falls_back_to_pretty() {
    clear_vars();
    env::set_var("LOG_FORMAT", "yaml");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Pretty);

    clear_vars();
}

#[test]
#[serial]
fn test_config_invalid_strict_flag_is_error() {
    clear_vars();
    env::set_var("ENGINE_STRICT_THOUGHT_REFERENCES", "sometimes");

    let err = Config::from_env().unwrap_err();
    assert!(err.to_string().contains("ENGINE_STRICT_THOUGHT_REFERENCES"));

    clear_vars();
}

#[test]
#[serial]
fn test_config_zero_recommendation_limit_is_error() {
    clear_vars();
    env::set_var("COUNCIL_RECOMMENDATION_LIMIT", "0");

    assert!(Config::from_env().is_err());

    env::set_var("COUNCIL_RECOMMENDATION_LIMIT", "many");
    assert!(Config::from_env().is_err());

    clear_vars();
}
