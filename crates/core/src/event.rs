// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending entries and delivery events reported by a platform

use crate::content::NotificationContent;
use crate::id::NotificationHandle;
use crate::trigger::Trigger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action identifier reported when the user taps the notification itself
pub const DEFAULT_ACTION: &str = "default";

/// An entry in the platform's pending queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub handle: NotificationHandle,
    pub content: NotificationContent,
    pub trigger: Trigger,
}

/// A notification the platform delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub handle: NotificationHandle,
    pub content: NotificationContent,
    pub delivered_at: DateTime<Utc>,
}

/// The user interacted with a delivered notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub notification: Notification,
    pub action: String,
}

impl NotificationResponse {
    /// A plain tap on the notification
    pub fn tapped(notification: Notification) -> Self {
        Self {
            notification,
            action: DEFAULT_ACTION.to_string(),
        }
    }
}

/// Events a platform pushes to its subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Delivered while the app was in the foreground
    Received(Notification),
    /// User interaction, foreground or background
    Response(NotificationResponse),
}

impl PlatformEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PlatformEvent::Received(_) => "notification:received",
            PlatformEvent::Response(_) => "notification:response",
        }
    }

    pub fn handle(&self) -> &NotificationHandle {
        match self {
            PlatformEvent::Received(n) => &n.handle,
            PlatformEvent::Response(r) => &r.notification.handle,
        }
    }
}
