// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed record store for the casareach outreach pipeline.
//!
//! Five delimited tables (leads, approvals, events, contacts, dnc) live in
//! one data directory. All writes are atomic replaces (temp sibling +
//! rename); headers are validated on every read against the canonical
//! column order and drift is fatal, never auto-migrated.

pub mod models;
pub mod schema;
pub mod store;
pub mod tablefile;

pub use schema::{SchemaError, Table};
pub use store::RecordStore;
