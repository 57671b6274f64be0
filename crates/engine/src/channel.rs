// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery channel declaration

use rmd_adapters::{NotificationPlatform, PlatformError};
use rmd_core::ChannelConfig;
use std::collections::HashSet;
use std::sync::Mutex;

/// Declares delivery channels on platforms that require them
pub struct ChannelConfigurator<P> {
    platform: P,
    /// Channel ids declared by this process
    declared: Mutex<HashSet<String>>,
}

impl<P: NotificationPlatform> ChannelConfigurator<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            declared: Mutex::new(HashSet::new()),
        }
    }

    /// Declare `channel` unless the platform has no channels or it is
    /// already declared
    pub async fn ensure_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        if !self.platform.kind().requires_channels() {
            return Ok(());
        }
        if self.is_declared(&channel.id) {
            return Ok(());
        }

        self.platform.set_channel(channel).await?;
        self.declared
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(channel.id.clone());
        tracing::debug!(channel = %channel.id, "channel ready");
        Ok(())
    }

    pub fn is_declared(&self, id: &str) -> bool {
        self.declared
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(id)
    }
}
