// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification platform adapters

mod local;

pub use local::LocalPlatform;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePlatform, PlatformCall};

use crate::events::EventReceiver;
use async_trait::async_trait;
use rmd_core::{
    ChannelConfig, NotificationContent, NotificationHandle, PermissionStatus, PlatformKind,
    ScheduledEntry, Trigger,
};
use thiserror::Error;

/// Errors from platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("notification permission not granted")]
    PermissionDenied,
    #[error("pending notification quota reached ({0})")]
    QuotaExceeded(usize),
    #[error("channel not declared: {0}")]
    UnknownChannel(String),
    #[error("trigger does not resolve to a point in time: {0}")]
    InvalidTrigger(String),
    #[error("no delivered notification with handle {0}")]
    NotDelivered(NotificationHandle),
    #[error("platform call failed: {0}")]
    Failed(String),
}

/// Adapter for an operating-system notification facility.
///
/// The platform owns the pending queue and the authorization record; both
/// outlive any one process.
#[async_trait]
pub trait NotificationPlatform: Clone + Send + Sync + 'static {
    /// Which platform family this is
    fn kind(&self) -> PlatformKind;

    /// Current authorization, without prompting
    async fn permission_status(&self) -> Result<PermissionStatus, PlatformError>;

    /// Ask the user for authorization; returns the resulting status
    async fn request_permission(&self) -> Result<PermissionStatus, PlatformError>;

    /// Declare a delivery channel; re-declaring is a no-op
    async fn set_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError>;

    /// Submit a notification; returns its handle
    async fn schedule(
        &self,
        content: &NotificationContent,
        trigger: &Trigger,
    ) -> Result<NotificationHandle, PlatformError>;

    /// Remove a pending notification; unknown handles are not an error
    async fn cancel(&self, handle: &NotificationHandle) -> Result<(), PlatformError>;

    /// Remove every pending notification
    async fn cancel_all(&self) -> Result<(), PlatformError>;

    /// Snapshot of the pending queue
    async fn list_scheduled(&self) -> Result<Vec<ScheduledEntry>, PlatformError>;

    /// Stream of delivery and interaction events
    fn subscribe(&self) -> EventReceiver;
}
