// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced platform wrapper for consistent observability

use crate::events::EventReceiver;
use crate::platform::{NotificationPlatform, PlatformError};
use async_trait::async_trait;
use rmd_core::{
    ChannelConfig, NotificationContent, NotificationHandle, PermissionStatus, PlatformKind,
    ScheduledEntry, Trigger,
};
use tracing::Instrument;

/// Wrapper that adds tracing to any NotificationPlatform
#[derive(Clone)]
pub struct TracedPlatform<P> {
    inner: P,
}

impl<P> TracedPlatform<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: NotificationPlatform> NotificationPlatform for TracedPlatform<P> {
    fn kind(&self) -> PlatformKind {
        self.inner.kind()
    }

    async fn permission_status(&self) -> Result<PermissionStatus, PlatformError> {
        let result = self.inner.permission_status().await;
        tracing::trace!(status = ?result.as_ref().ok(), "permission checked");
        result
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PlatformError> {
        let span = tracing::info_span!("platform.request_permission");
        async {
            tracing::info!("prompting");
            let start = std::time::Instant::now();
            let result = self.inner.request_permission().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(status) => tracing::info!(?status, elapsed_ms, "answered"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "prompt failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn set_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        let span = tracing::info_span!("platform.set_channel", id = %channel.id);
        async {
            let result = self.inner.set_channel(channel).await;
            match &result {
                Ok(()) => tracing::info!(importance = ?channel.importance, "channel declared"),
                Err(e) => tracing::error!(error = %e, "declare failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn schedule(
        &self,
        content: &NotificationContent,
        trigger: &Trigger,
    ) -> Result<NotificationHandle, PlatformError> {
        let span = tracing::info_span!("platform.schedule", title = %content.title);
        async {
            tracing::debug!(?trigger, body = %content.body, "submitting");
            let start = std::time::Instant::now();
            let result = self.inner.schedule(content, trigger).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(handle) => tracing::info!(%handle, elapsed_ms, "scheduled"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "schedule failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn cancel(&self, handle: &NotificationHandle) -> Result<(), PlatformError> {
        let span = tracing::info_span!("platform.cancel", %handle);
        async {
            let result = self.inner.cancel(handle).await;
            match &result {
                Ok(()) => tracing::info!("cancelled"),
                Err(e) => tracing::warn!(error = %e, "cancel failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn cancel_all(&self) -> Result<(), PlatformError> {
        let span = tracing::info_span!("platform.cancel_all");
        async {
            let result = self.inner.cancel_all().await;
            match &result {
                Ok(()) => tracing::info!("cancelled all"),
                Err(e) => tracing::warn!(error = %e, "cancel all failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn list_scheduled(&self) -> Result<Vec<ScheduledEntry>, PlatformError> {
        let result = self.inner.list_scheduled().await;
        tracing::trace!(count = result.as_ref().map(|v| v.len()).ok(), "listed pending");
        result
    }

    fn subscribe(&self) -> EventReceiver {
        self.inner.subscribe()
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
