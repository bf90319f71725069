// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for casareach.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level casareach configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CasareachConfig {
    /// Operator identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Table file storage settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Dispatch pass settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// Inbound message ingestion settings.
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// Operator identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name recorded as `approved_by` when none is given on the CLI.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "casareach".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Table file storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding the delimited table files.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("casareach").join("tables"))
        .unwrap_or_else(|| std::path::PathBuf::from("tables"))
        .to_string_lossy()
        .into_owned()
}

/// Dispatch pass configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Maximum approvals processed per router pass. Bounds the blast
    /// radius of any single invocation.
    #[serde(default = "default_max_per_run")]
    pub max_per_run: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_per_run: default_max_per_run(),
        }
    }
}

fn default_max_per_run() -> usize {
    10
}

/// Inbound message ingestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Default draft body for system-generated reply approvals.
    #[serde(default = "default_reply_template")]
    pub reply_template: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            reply_template: default_reply_template(),
        }
    }
}

fn default_reply_template() -> String {
    "Thanks for getting in touch! I'd love to help with your property search. \
     When would be a good time for a quick call?"
        .to_string()
}
