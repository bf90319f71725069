// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the casareach outreach pipeline.
//!
//! Provides the shared error type, the closed domain enums and record types
//! for the file-backed store, and the [`ChannelAdapter`] trait implemented
//! once per outbound channel.

pub mod error;
pub mod traits;
pub mod types;
pub mod util;

// Re-export key items at crate root for ergonomic imports.
pub use error::CasareachError;
pub use traits::ChannelAdapter;
pub use types::{
    ActionType, Approval, ApprovalStatus, Channel, ContactEntry, DispatchMode, DncEntry,
    EventRecord, InboundMessage, Lead, LeadStatus, MessageId, SendReceipt,
};
