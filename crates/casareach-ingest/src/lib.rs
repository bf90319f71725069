// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion service for the casareach outreach pipeline.
//!
//! Channel-specific sources hand this crate a uniform inbound message shape;
//! everything channel-aware beyond email-vs-chat identity lives upstream.

pub mod service;

pub use service::{EVENT_INGESTED, IngestOutcome, IngestService};
