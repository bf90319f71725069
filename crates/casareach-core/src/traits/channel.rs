// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for outbound platform integrations.

use async_trait::async_trait;

use crate::error::CasareachError;
use crate::types::{Approval, Channel, DispatchMode, SendReceipt};

/// Adapter for one outbound channel (email, WhatsApp, Telegram, LinkedIn,
/// Facebook).
///
/// The router never inspects channel-specific protocol details; it sees only
/// this uniform contract. For semi-automatic channels `send` means "open a
/// composition surface for a human to finish" and its return value does not
/// decide the approval's terminal status.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Short adapter name used in logs.
    fn name(&self) -> &str;

    /// The channel this adapter serves.
    fn channel(&self) -> Channel;

    /// Reported dispatch mode. Advisory: the channel's intrinsic mode
    /// ([`Channel::dispatch_mode`]) is authoritative for routing policy.
    fn dispatch_mode(&self) -> DispatchMode {
        self.channel().dispatch_mode()
    }

    /// Attempt the outbound action described by an approved record.
    ///
    /// Callers must guarantee `approval.status == approved`; the router is
    /// the only production caller and enforces this before dispatch.
    async fn send(&self, approval: &Approval) -> Result<SendReceipt, CasareachError>;
}
