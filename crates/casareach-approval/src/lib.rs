// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Approval service for the casareach outreach pipeline.
//!
//! Nothing leaves the system without an explicit `approved` status. This
//! crate owns draft creation and the approval state machine; the router
//! consumes whatever ends up `approved`.

pub mod service;

pub use service::{ApprovalService, DraftRequest, push_note};
