// SPDX-FileCopyrightText: 2026 Casareach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter registry keyed by the closed [`Channel`] enum.
//!
//! One adapter per channel; lookup is a typed map, not a string-keyed cast.
//! A channel with no registered adapter is a per-record dispatch failure,
//! never a crash.

use std::collections::HashMap;
use std::sync::Arc;

use casareach_core::types::Channel;
use casareach_core::ChannelAdapter;

/// Capability-set lookup for channel adapters.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<Channel, Arc<dyn ChannelAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under the channel it reports. Replaces any
    /// previous adapter for that channel.
    pub fn register(&mut self, adapter: Arc<dyn ChannelAdapter>) {
        self.adapters.insert(adapter.channel(), adapter);
    }

    pub fn get(&self, channel: Channel) -> Option<Arc<dyn ChannelAdapter>> {
        self.adapters.get(&channel).cloned()
    }

    /// Channels with a configured adapter.
    pub fn channels(&self) -> Vec<Channel> {
        self.adapters.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("channels", &self.channels())
            .finish()
    }
}
