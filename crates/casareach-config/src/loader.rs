// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./casareach.toml` >
//! `~/.config/casareach/casareach.toml` > `/etc/casareach/casareach.toml`
//! with environment variable overrides via the `CASAREACH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CasareachConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/casareach/casareach.toml` (system-wide)
/// 3. `~/.config/casareach/casareach.toml` (user XDG config)
/// 4. `./casareach.toml` (local directory)
/// 5. `CASAREACH_*` environment variables
pub fn load_config() -> Result<CasareachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CasareachConfig::default()))
        .merge(Toml::file("/etc/casareach/casareach.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("casareach/casareach.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("casareach.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for callers that already hold the config text.
pub fn load_config_from_str(toml_content: &str) -> Result<CasareachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CasareachConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CasareachConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CasareachConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CASAREACH_ROUTER_MAX_PER_RUN` must map
/// to `router.max_per_run`, not `router.max.per.run`.
fn env_provider() -> Env {
    Env::prefixed("CASAREACH_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("store_", "store.", 1)
            .replacen("router_", "router.", 1)
            .replacen("ingest_", "ingest.", 1);
        mapped.into()
    })
}
