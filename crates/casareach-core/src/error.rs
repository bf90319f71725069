// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the casareach outreach pipeline.

use thiserror::Error;

use crate::types::{ApprovalStatus, Channel};

/// The primary error type used across all casareach crates.
#[derive(Debug, Error)]
pub enum CasareachError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Table storage errors (read/write failure, atomic replace failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema errors (header drift, invalid enum value, malformed row).
    /// Fatal for the operation touching the table; never auto-migrated.
    #[error("schema error in `{table}`: {message}")]
    Schema { table: &'static str, message: String },

    /// Channel adapter errors (connection failure, send rejection, rate limiting).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No adapter is registered for the requested channel.
    #[error("no adapter registered for channel `{channel}`")]
    AdapterNotFound { channel: Channel },

    /// An approval record was not found by id.
    #[error("approval not found: {approval_id}")]
    ApprovalNotFound { approval_id: String },

    /// Disallowed approval state transition (terminal states are frozen).
    #[error("invalid approval transition: {from} -> {to}")]
    InvalidTransition {
        from: ApprovalStatus,
        to: ApprovalStatus,
    },

    /// The recipient value is on the do-not-contact list.
    #[error("recipient `{value}` is on the do-not-contact list")]
    DncBlocked { value: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CasareachError {
    /// Wrap an arbitrary error as a storage error.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CasareachError::Storage {
            source: Box::new(source),
        }
    }
}
