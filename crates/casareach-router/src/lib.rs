// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router for the casareach outreach pipeline.
//!
//! Reads `approved` records, dispatches each through the matching channel
//! adapter, updates statuses, and appends audit events. Semi-automatic
//! channels (LinkedIn, Facebook) are opened for a human to finish; all
//! others are fire-and-forget sends.

pub mod console;
pub mod dispatcher;
pub mod registry;

pub use console::ConsoleAdapter;
pub use dispatcher::{Dispatcher, RunSummary};
pub use registry::AdapterRegistry;
