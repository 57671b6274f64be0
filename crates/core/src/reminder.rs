// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-owned reminder records

use crate::trigger::CalendarZone;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-assigned reminder id, unique per reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(pub i64);

impl std::fmt::Display for ReminderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from validating a reminder request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("reminder {0} has an empty title")]
    EmptyTitle(ReminderId),
    #[error("invalid scheduled time '{input}': {reason}")]
    InvalidTime { input: String, reason: String },
}

/// A future alert the caller wants delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRequest {
    pub id: ReminderId,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_for: DateTime<Utc>,
    /// Who the reminder is about; used for the body when there is no description
    pub subject_name: Option<String>,
}

impl ReminderRequest {
    pub fn new(id: i64, title: impl Into<String>, scheduled_for: DateTime<Utc>) -> Self {
        Self {
            id: ReminderId(id),
            title: title.into(),
            description: None,
            scheduled_for,
            subject_name: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_subject(mut self, subject_name: impl Into<String>) -> Self {
        self.subject_name = Some(subject_name.into());
        self
    }

    /// Check the fields the platform cannot be trusted to reject
    pub fn validate(&self) -> Result<(), ReminderError> {
        if self.title.trim().is_empty() {
            return Err(ReminderError::EmptyTitle(self.id));
        }
        Ok(())
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a scheduled time.
///
/// RFC 3339 input carries its own offset. Input without an offset is a
/// wall-clock time in `zone`.
pub fn parse_scheduled_for(
    input: &str,
    zone: &CalendarZone,
) -> Result<DateTime<Utc>, ReminderError> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| ReminderError::InvalidTime {
            input: input.to_string(),
            reason: "expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]".to_string(),
        })?;

    zone.resolve(&naive).ok_or_else(|| ReminderError::InvalidTime {
        input: input.to_string(),
        reason: format!("does not exist in {}", zone),
    })
}

#[cfg(test)]
#[path = "reminder_tests.rs"]
mod tests;
