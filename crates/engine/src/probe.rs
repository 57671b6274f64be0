// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Post-schedule read-back of the pending queue

use rmd_adapters::{NotificationPlatform, PlatformError};
use rmd_core::{NotificationHandle, ScheduledEntry};

/// Confirms a handle is present in the platform's pending queue.
///
/// Observational only: a failed or negative probe never undoes a schedule.
pub struct VerificationProbe<P> {
    platform: P,
}

impl<P: NotificationPlatform> VerificationProbe<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    /// The pending entry for `handle`, if present
    pub async fn find(
        &self,
        handle: &NotificationHandle,
    ) -> Result<Option<ScheduledEntry>, PlatformError> {
        let pending = self.platform.list_scheduled().await?;
        tracing::debug!(count = pending.len(), "pending notifications");
        Ok(pending.into_iter().find(|e| &e.handle == handle))
    }

    /// Whether `handle` is pending; a failed read counts as absent
    pub async fn verify(&self, handle: &NotificationHandle) -> bool {
        match self.find(handle).await {
            Ok(entry) => entry.is_some(),
            Err(e) => {
                tracing::warn!(%handle, error = %e, "could not read pending notifications");
                false
            }
        }
    }
}
