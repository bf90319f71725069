// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and a sane dispatch batch cap.

use crate::model::CasareachConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<String>)` with all
/// collected validation errors (does not fail fast).
pub fn validate_config(config: &CasareachConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push("agent.name must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(format!(
            "agent.log_level `{}` is not one of {LOG_LEVELS:?}",
            config.agent.log_level
        ));
    }

    if config.store.data_dir.trim().is_empty() {
        errors.push("store.data_dir must not be empty".to_string());
    }

    if config.router.max_per_run == 0 {
        errors.push("router.max_per_run must be at least 1".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = CasareachConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_batch_cap_fails_validation() {
        let mut config = CasareachConfig::default();
        config.router.max_per_run = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("max_per_run")));
    }

    #[test]
    fn empty_data_dir_fails_validation() {
        let mut config = CasareachConfig::default();
        config.store.data_dir = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("data_dir")));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = CasareachConfig::default();
        config.agent.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("log_level")));
    }
}
