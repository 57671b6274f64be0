// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rmd-core: Core types for reminder notifications
//!
//! This crate provides:
//! - Reminder requests and the notification content derived from them
//! - Trigger construction with past-date validation
//! - Delivery channel and platform descriptions
//! - Clock and handle-generation abstractions for testable time and ids
//! - Service configuration

pub mod channel;
pub mod clock;
pub mod config;
pub mod content;
pub mod event;
pub mod id;
pub mod platform;
pub mod reminder;
pub mod trigger;

// Re-exports
pub use channel::{ChannelConfig, Importance, REMINDERS_CHANNEL_ID};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, LocalConfig, ServiceConfig};
pub use content::{NotificationContent, Priority, ReminderPayload, Sound, FALLBACK_BODY};
pub use event::{
    Notification, NotificationResponse, PlatformEvent, ScheduledEntry, DEFAULT_ACTION,
};
pub use id::{HandleGen, NotificationHandle, SequentialHandleGen, UuidHandleGen};
pub use platform::{PermissionStatus, PlatformKind};
pub use reminder::{parse_scheduled_for, ReminderError, ReminderId, ReminderRequest};
pub use trigger::{
    CalendarTrigger, CalendarZone, PastDateError, Trigger, TriggerBuilder, TriggerMode,
};
