// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for channel integrations.
//!
//! All adapters use `#[async_trait]` for dynamic dispatch compatibility.

pub mod channel;

pub use channel::ChannelAdapter;
