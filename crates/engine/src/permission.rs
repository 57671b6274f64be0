// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification authorization

use rmd_adapters::{NotificationPlatform, PlatformError};
use std::sync::atomic::{AtomicBool, Ordering};

/// Obtains authorization once and remembers a grant for the process
pub struct PermissionGate<P> {
    platform: P,
    granted: AtomicBool,
}

impl<P: NotificationPlatform> PermissionGate<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            granted: AtomicBool::new(false),
        }
    }

    /// Whether a grant has been observed in this process
    pub fn is_granted(&self) -> bool {
        self.granted.load(Ordering::Acquire)
    }

    /// Check authorization, prompting only if it is not already granted.
    ///
    /// Returns `Ok(false)` on denial; errors are platform failures only.
    pub async fn ensure_authorized(&self) -> Result<bool, PlatformError> {
        if self.is_granted() {
            return Ok(true);
        }

        let mut status = self.platform.permission_status().await?;
        if !status.is_granted() {
            status = self.platform.request_permission().await?;
        }

        if status.is_granted() {
            self.granted.store(true, Ordering::Release);
            Ok(true)
        } else {
            tracing::warn!(?status, "notification permission not granted");
            Ok(false)
        }
    }
}
