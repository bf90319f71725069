// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Id and timestamp generation shared by the services.

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Generate a new record id (UUID v4).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current UTC time as an RFC 3339 string with second precision.
pub fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
