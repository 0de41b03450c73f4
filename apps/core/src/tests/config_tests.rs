//! Configuration Tests
//!
//! Environment parsing for `ClientConfig`, isolated with `temp_env`.

use crate::config::{ClientConfig, DEFAULT_API_URL};
use crate::error::AppError;
use std::time::Duration;

const VARS: [&str; 5] = [
    "RESEARCH_API_URL",
    "RESEARCH_TIMEOUT_SECS",
    "REQUEST_TIMEOUT_SECS",
    "RESEARCH_FAST_MODE",
    "FOLLOW_UP_SEED",
];

fn with_env<F: FnOnce()>(values: &[(&str, &str)], f: F) {
    let vars: Vec<(&str, Option<&str>)> = VARS
        .iter()
        .map(|name| {
            let value = values.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
            (*name, value)
        })
        .collect();
    temp_env::with_vars(vars, f);
}

#[test]
fn test_defaults_when_unset() {
    with_env(&[], || {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.research_timeout(), Duration::from_secs(180));
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    });
}

#[test]
fn test_overrides() {
    with_env(
        &[
            ("RESEARCH_API_URL", "https://research.example.com/"),
            ("RESEARCH_TIMEOUT_SECS", "300"),
            ("REQUEST_TIMEOUT_SECS", "15"),
            ("RESEARCH_FAST_MODE", "true"),
            ("FOLLOW_UP_SEED", "42"),
        ],
        || {
            let config = ClientConfig::from_env().unwrap();
            assert_eq!(config.api_url, "https://research.example.com");
            assert_eq!(config.research_timeout_secs, 300);
            assert_eq!(config.request_timeout_secs, 15);
            assert!(config.fast_mode);
            assert_eq!(config.follow_up_seed, Some(42));
        },
    );
}

#[test]
fn test_unparseable_number_is_config_error() {
    with_env(&[("RESEARCH_TIMEOUT_SECS", "soon")], || {
        assert!(matches!(ClientConfig::from_env(), Err(AppError::Config(_))));
    });
}

#[test]
fn test_bad_flag_is_config_error() {
    with_env(&[("RESEARCH_FAST_MODE", "maybe")], || {
        assert!(matches!(ClientConfig::from_env(), Err(AppError::Config(_))));
    });
}

#[test]
fn test_out_of_range_timeout_fails_validation() {
    with_env(&[("REQUEST_TIMEOUT_SECS", "0")], || {
        assert!(matches!(ClientConfig::from_env(), Err(AppError::Validation(_))));
    });
}

#[test]
fn test_invalid_url_fails_validation() {
    with_env(&[("RESEARCH_API_URL", "localhost without scheme")], || {
        assert!(matches!(ClientConfig::from_env(), Err(AppError::Validation(_))));
    });
}

#[test]
fn test_blank_values_fall_back() {
    with_env(&[("FOLLOW_UP_SEED", "  "), ("RESEARCH_FAST_MODE", "")], || {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.follow_up_seed, None);
        assert!(!config.fast_mode);
    });
}
