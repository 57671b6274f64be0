// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reminders file parsing
//!
//! ```toml
//! [[reminder]]
//! id = 7
//! title = "Call Maya"
//! description = "Discuss project"
//! scheduled_for = "2026-06-01T17:30"
//! ```

use anyhow::{Context, Result};
use rmd_core::{parse_scheduled_for, CalendarZone, ReminderRequest};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RemindersFile {
    #[serde(default)]
    reminder: Vec<ReminderEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReminderEntry {
    id: i64,
    title: String,
    description: Option<String>,
    /// RFC 3339, or a wall-clock time in the configured zone
    scheduled_for: String,
    subject_name: Option<String>,
}

/// Load reminders in file order
pub fn load(path: &Path, zone: &CalendarZone) -> Result<Vec<ReminderRequest>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading reminders {}", path.display()))?;
    parse(&text, zone).with_context(|| format!("in {}", path.display()))
}

fn parse(text: &str, zone: &CalendarZone) -> Result<Vec<ReminderRequest>> {
    let file: RemindersFile = toml::from_str(text)?;
    file.reminder
        .into_iter()
        .map(|entry| {
            let scheduled_for = parse_scheduled_for(&entry.scheduled_for, zone)
                .with_context(|| format!("reminder {}", entry.id))?;
            Ok(ReminderRequest {
                id: rmd_core::ReminderId(entry.id),
                title: entry.title,
                description: entry.description,
                scheduled_for,
                subject_name: entry.subject_name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::{TimeZone, Utc};

    fn utc() -> CalendarZone {
        CalendarZone::from_offset_minutes(0).unwrap()
    }

    #[test]
    fn parses_entries_in_order() {
        let text = r#"
[[reminder]]
id = 7
title = "Call Maya"
description = "Discuss project"
scheduled_for = "2026-06-01T17:30:00Z"

[[reminder]]
id = 8
title = "Birthday"
subject_name = "Sam"
scheduled_for = "2026-06-02 09:00"
"#;
        let reminders = parse(text, &utc()).unwrap();

        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].id.0, 7);
        assert_eq!(reminders[0].description.as_deref(), Some("Discuss project"));
        assert_eq!(
            reminders[1].scheduled_for,
            Utc.with_ymd_and_hms(2026, 6, 2, 9, 0, 0).unwrap()
        );
        assert_eq!(reminders[1].subject_name.as_deref(), Some("Sam"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders.toml");
        std::fs::write(
            &path,
            "[[reminder]]\nid = 42\ntitle = \"Pay rent\"\nscheduled_for = \"2026-06-01T08:00\"\n",
        )
        .unwrap();

        let reminders = load(&path, &utc()).unwrap();
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].title, "Pay rent");
        assert_eq!(
            reminders[0].scheduled_for,
            Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn load_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[[reminder]]\nid = \"seven\"\n").unwrap();

        let err = load(&path, &utc()).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.toml"));

        let missing = dir.path().join("missing.toml");
        let err = load(&missing, &utc()).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.toml"));
    }

    #[test]
    fn empty_file_has_no_reminders() {
        assert!(parse("", &utc()).unwrap().is_empty());
    }

    #[test]
    fn bad_time_names_the_reminder() {
        let text = r#"
[[reminder]]
id = 3
title = "Oops"
scheduled_for = "next tuesday"
"#;
        let err = parse(text, &utc()).unwrap_err();
        assert!(format!("{:#}", err).contains("reminder 3"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let text = r#"
[[reminder]]
id = 1
title = "x"
scheduled_for = "2026-06-01T17:30:00Z"
repeat = "daily"
"#;
        assert!(parse(text, &utc()).is_err());
    }
}
