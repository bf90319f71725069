// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for casareach.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use casareach_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("data dir: {}", config.store.data_dir);
//! ```

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::CasareachConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid [`CasareachConfig`] or the list of config errors.
pub fn load_and_validate() -> Result<CasareachConfig, Vec<String>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.to_string()]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<CasareachConfig, Vec<String>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.to_string()]),
    }
}

/// Print config errors to stderr, one per line.
pub fn render_errors(errors: &[String]) {
    for error in errors {
        eprintln!("casareach: config error: {error}");
    }
}
