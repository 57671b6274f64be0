// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification content derived from a reminder
//!
//! The payload always carries the originating reminder id so a delivered or
//! tapped notification can be correlated back without a lookup table.

use crate::reminder::{ReminderId, ReminderRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body used when a reminder has neither a description nor a subject
pub const FALLBACK_BODY: &str = "You have a reminder";

/// Payload discriminator for reminder notifications
pub const REMINDER_PAYLOAD_TYPE: &str = "reminder";

/// Notification sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    /// The platform default alert sound
    Default,
    None,
}

/// Presentation priority on platforms that support it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Default,
    High,
}

/// What the platform shows, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub payload: Map<String, Value>,
    pub sound: Sound,
    pub priority: Priority,
}

impl NotificationContent {
    /// Build the content for a reminder.
    ///
    /// Body precedence: non-empty description, then `Reminder about {subject}`,
    /// then `fallback_body`.
    pub fn for_reminder(reminder: &ReminderRequest, fallback_body: &str) -> Self {
        let body = match (&reminder.description, &reminder.subject_name) {
            (Some(description), _) if !description.is_empty() => description.clone(),
            (_, Some(subject)) if !subject.is_empty() => format!("Reminder about {}", subject),
            _ => fallback_body.to_string(),
        };

        Self {
            title: reminder.title.clone(),
            body,
            payload: ReminderPayload::new(reminder.id).into_map(),
            sound: Sound::Default,
            priority: Priority::High,
        }
    }
}

/// Typed view of the reminder payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub reminder_id: ReminderId,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ReminderPayload {
    pub fn new(reminder_id: ReminderId) -> Self {
        Self {
            reminder_id,
            kind: REMINDER_PAYLOAD_TYPE.to_string(),
        }
    }

    /// Decode the payload of a notification, if it belongs to a reminder
    pub fn from_content(content: &NotificationContent) -> Option<Self> {
        let payload: Self = serde_json::from_value(Value::Object(content.payload.clone())).ok()?;
        (payload.kind == REMINDER_PAYLOAD_TYPE).then_some(payload)
    }

    fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("reminderId".to_string(), Value::from(self.reminder_id.0));
        map.insert("type".to_string(), Value::from(self.kind));
        map
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
