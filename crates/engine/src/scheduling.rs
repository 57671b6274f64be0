// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Submission and cancellation against the platform queue

use crate::error::ServiceError;
use rmd_adapters::{NotificationPlatform, PlatformError};
use rmd_core::{NotificationContent, NotificationHandle, ScheduledEntry, Trigger};

/// Thin client over the platform's pending queue.
///
/// Submission failures propagate. Cancellation failures are logged and
/// swallowed, since cancelling is cleanup rather than a guarantee.
pub struct SchedulingClient<P> {
    platform: P,
}

impl<P: NotificationPlatform> SchedulingClient<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub async fn schedule(
        &self,
        content: &NotificationContent,
        trigger: &Trigger,
    ) -> Result<NotificationHandle, ServiceError> {
        self.platform
            .schedule(content, trigger)
            .await
            .map_err(ServiceError::Scheduling)
    }

    pub async fn cancel(&self, handle: &NotificationHandle) {
        match self.platform.cancel(handle).await {
            Ok(()) => tracing::info!(%handle, "cancelled notification"),
            Err(e) => tracing::error!(%handle, error = %e, "failed to cancel notification"),
        }
    }

    /// Remove every pending entry, including ones the caller never scheduled
    pub async fn cancel_all(&self) {
        match self.platform.cancel_all().await {
            Ok(()) => tracing::info!("cancelled all scheduled notifications"),
            Err(e) => tracing::error!(error = %e, "failed to cancel all notifications"),
        }
    }

    /// Fresh snapshot of the pending queue
    pub async fn list_pending(&self) -> Result<Vec<ScheduledEntry>, PlatformError> {
        self.platform.list_scheduled().await
    }
}
