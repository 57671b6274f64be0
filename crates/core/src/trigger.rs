// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger construction
//!
//! A trigger tells the platform *when* to fire. Two encodings exist:
//! calendar components read on the device's wall clock, and an absolute
//! epoch timestamp. They agree until the device changes time zone between
//! scheduling and firing; calendar triggers then follow the new wall clock.

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, SubsecRound, TimeZone,
    Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The target time is not strictly after now
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot schedule notification for past date {scheduled_for} (now {now})")]
pub struct PastDateError {
    pub scheduled_for: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

/// Which trigger encoding a service instance submits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Wall-clock components in the calendar zone
    #[default]
    Calendar,
    /// Milliseconds since the Unix epoch
    Epoch,
}

/// Zone used to read and write wall-clock calendar components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    /// The device's local zone, read at each conversion
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl CalendarZone {
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(CalendarZone::Fixed)
    }

    /// Wall-clock reading of an instant
    pub fn wall_clock(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            CalendarZone::Local => instant.with_timezone(&Local).naive_local(),
            CalendarZone::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Instant of a wall-clock reading.
    ///
    /// Ambiguous readings (clocks turned back) resolve to the earliest
    /// instant; readings inside a gap (clocks turned forward) do not exist.
    pub fn resolve(&self, wall_clock: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            CalendarZone::Local => Local
                .from_local_datetime(wall_clock)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
            CalendarZone::Fixed(offset) => offset
                .from_local_datetime(wall_clock)
                .earliest()
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}

impl std::fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarZone::Local => f.write_str("local time"),
            CalendarZone::Fixed(offset) => write!(f, "UTC{}", offset),
        }
    }
}

/// Wall-clock components of a calendar trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarTrigger {
    pub year: i32,
    /// Zero-based: January is 0
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl CalendarTrigger {
    fn from_wall_clock(wall_clock: &NaiveDateTime, channel_id: Option<String>) -> Self {
        Self {
            year: wall_clock.year(),
            month: wall_clock.month0(),
            day: wall_clock.day(),
            hour: wall_clock.hour(),
            minute: wall_clock.minute(),
            second: wall_clock.second(),
            channel_id,
        }
    }

    /// Components as a wall-clock reading, if they name a real date
    pub fn wall_clock(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month.checked_add(1)?, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

/// OS-facing encoding of when a notification fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trigger {
    Calendar(CalendarTrigger),
    #[serde(rename_all = "camelCase")]
    Date {
        epoch_millis: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel_id: Option<String>,
    },
}

impl Trigger {
    pub fn channel_id(&self) -> Option<&str> {
        match self {
            Trigger::Calendar(calendar) => calendar.channel_id.as_deref(),
            Trigger::Date { channel_id, .. } => channel_id.as_deref(),
        }
    }

    /// Absolute instant this trigger fires at, reading calendar
    /// components in `zone`
    pub fn fire_time(&self, zone: &CalendarZone) -> Option<DateTime<Utc>> {
        match self {
            Trigger::Calendar(calendar) => zone.resolve(&calendar.wall_clock()?),
            Trigger::Date { epoch_millis, .. } => DateTime::from_timestamp_millis(*epoch_millis),
        }
    }
}

/// Validates target times and encodes them as triggers
#[derive(Debug, Clone, Default)]
pub struct TriggerBuilder {
    mode: TriggerMode,
    zone: CalendarZone,
    channel_id: Option<String>,
}

impl TriggerBuilder {
    pub fn new(mode: TriggerMode, zone: CalendarZone) -> Self {
        Self {
            mode,
            zone,
            channel_id: None,
        }
    }

    /// Route triggers to a named channel (platforms that require one)
    pub fn with_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    pub fn zone(&self) -> &CalendarZone {
        &self.zone
    }

    /// The instant a trigger for `scheduled_for` actually carries.
    ///
    /// Calendar components hold whole seconds and epoch triggers whole
    /// milliseconds.
    fn encoded_instant(&self, scheduled_for: DateTime<Utc>) -> DateTime<Utc> {
        match self.mode {
            TriggerMode::Calendar => scheduled_for.trunc_subsecs(0),
            TriggerMode::Epoch => scheduled_for.trunc_subsecs(3),
        }
    }

    /// Encode `scheduled_for`, whose encoded instant must be strictly
    /// after `now`
    pub fn build(
        &self,
        scheduled_for: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Trigger, PastDateError> {
        if self.encoded_instant(scheduled_for) <= now {
            return Err(PastDateError { scheduled_for, now });
        }

        let trigger = match self.mode {
            TriggerMode::Calendar => Trigger::Calendar(CalendarTrigger::from_wall_clock(
                &self.zone.wall_clock(&scheduled_for),
                self.channel_id.clone(),
            )),
            TriggerMode::Epoch => Trigger::Date {
                epoch_millis: scheduled_for.timestamp_millis(),
                channel_id: self.channel_id.clone(),
            },
        };
        Ok(trigger)
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
