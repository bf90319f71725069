// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for stored records.
//!
//! The canonical types are defined in `casareach-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within the
//! store crate and its callers.

pub use casareach_core::types::{Approval, ContactEntry, DncEntry, EventRecord, Lead};
