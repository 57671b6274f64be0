// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rmd check <file>` - Report what scheduling would do, without scheduling

use crate::output::{self, OutputFormat};
use crate::reminders;
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use rmd_core::{Clock, ReminderId, ReminderRequest, ServiceConfig, SystemClock, TriggerBuilder};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckArgs {
    /// Reminders file (TOML, `[[reminder]]` tables)
    pub file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Schedule,
    Past,
    Invalid,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verdict::Schedule => "schedule",
            Verdict::Past => "past",
            Verdict::Invalid => "invalid",
        };
        f.pad(s)
    }
}

#[derive(Debug, Serialize)]
pub struct CheckRow {
    pub id: ReminderId,
    pub title: String,
    pub scheduled_for: DateTime<Utc>,
    pub verdict: Verdict,
}

impl std::fmt::Display for CheckRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<6} {:<9} {} {}",
            self.id.to_string(),
            self.verdict,
            self.scheduled_for.to_rfc3339(),
            self.title
        )
    }
}

pub fn check(args: CheckArgs, config: &ServiceConfig, format: OutputFormat) -> Result<()> {
    let zone = config.calendar_zone()?;
    let reminders = reminders::load(&args.file, &zone)?;
    let triggers = TriggerBuilder::new(config.trigger_mode, zone);

    let rows = assess(&reminders, &triggers, SystemClock.now());
    output::print_list(&rows, format);

    let invalid = rows.iter().filter(|r| r.verdict == Verdict::Invalid).count();
    if invalid > 0 {
        anyhow::bail!("{} invalid reminder(s)", invalid);
    }
    Ok(())
}

fn assess(
    reminders: &[ReminderRequest],
    triggers: &TriggerBuilder,
    now: DateTime<Utc>,
) -> Vec<CheckRow> {
    reminders
        .iter()
        .map(|reminder| {
            let verdict = if reminder.validate().is_err() {
                Verdict::Invalid
            } else if triggers.build(reminder.scheduled_for, now).is_err() {
                Verdict::Past
            } else {
                Verdict::Schedule
            };
            CheckRow {
                id: reminder.id,
                title: reminder.title.clone(),
                scheduled_for: reminder.scheduled_for,
                verdict,
            }
        })
        .collect()
}
