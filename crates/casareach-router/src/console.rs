// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console adapter for local operation and demos.
//!
//! Real channel adapters live outside this workspace; the console adapter
//! logs the outbound action and reports success so the pipeline can be run
//! end to end without live credentials.

use async_trait::async_trait;
use tracing::info;

use casareach_core::CasareachError;
use casareach_core::types::{Approval, Channel, DispatchMode, MessageId, SendReceipt};
use casareach_core::util::new_id;
use casareach_core::ChannelAdapter;

/// Logs sends instead of performing them. One instance per channel.
#[derive(Debug, Clone)]
pub struct ConsoleAdapter {
    channel: Channel,
}

impl ConsoleAdapter {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ChannelAdapter for ConsoleAdapter {
    fn name(&self) -> &str {
        "console"
    }

    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, approval: &Approval) -> Result<SendReceipt, CasareachError> {
        match self.channel.dispatch_mode() {
            DispatchMode::SemiAutomatic => info!(
                channel = %self.channel,
                to = %approval.draft_to,
                "console: would open composition surface"
            ),
            DispatchMode::Automatic => info!(
                channel = %self.channel,
                to = %approval.draft_to,
                subject = %approval.draft_subject,
                "console: would send message"
            ),
        }
        Ok(SendReceipt {
            message_id: Some(MessageId(format!("console-{}", new_id()))),
        })
    }
}
