// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rmd run <file>` - Schedule reminders and watch them fire

use crate::output::{self, OutputFormat};
use crate::reminders;
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use rmd_adapters::{LocalPlatform, TracedPlatform};
use rmd_core::{
    Notification, NotificationHandle, ReminderId, ReminderPayload, ServiceConfig, SystemClock,
};
use rmd_engine::NotificationService;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Args)]
pub struct RunArgs {
    /// Reminders file (TOML, `[[reminder]]` tables)
    pub file: PathBuf,

    /// Treat the app as backgrounded: deliveries raise no received events
    #[arg(long)]
    pub background: bool,
}

#[derive(Debug, Serialize)]
pub struct ScheduleRow {
    pub id: ReminderId,
    pub title: String,
    /// None when the reminder was not in the future
    pub handle: Option<NotificationHandle>,
    pub verified: bool,
}

impl std::fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.handle {
            Some(handle) if self.verified => {
                write!(f, "scheduled {} {} ({})", self.id, self.title, handle)
            }
            Some(handle) => write!(
                f,
                "scheduled {} {} ({}, not found in queue)",
                self.id, self.title, handle
            ),
            None => write!(f, "skipped   {} {} (past)", self.id, self.title),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeliveryRow {
    pub handle: NotificationHandle,
    pub reminder_id: Option<ReminderId>,
    pub title: String,
    pub body: String,
    pub delivered_at: DateTime<Utc>,
    pub foreground: bool,
}

impl DeliveryRow {
    fn new(notification: &Notification, foreground: bool) -> Self {
        Self {
            handle: notification.handle.clone(),
            reminder_id: ReminderPayload::from_content(&notification.content)
                .map(|p| p.reminder_id),
            title: notification.content.title.clone(),
            body: notification.content.body.clone(),
            delivered_at: notification.delivered_at,
            foreground,
        }
    }
}

impl std::fmt::Display for DeliveryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "delivered {}: {}", self.title, self.body)?;
        if !self.foreground {
            write!(f, " (background)")?;
        }
        Ok(())
    }
}

pub async fn run(args: RunArgs, config: ServiceConfig, format: OutputFormat) -> Result<()> {
    let zone = config.calendar_zone()?;
    let reminders = reminders::load(&args.file, &zone)?;

    let local = LocalPlatform::new(config.platform, zone, &config.local);
    if args.background {
        local.set_foreground(false);
    }
    let service = Arc::new(NotificationService::new(
        TracedPlatform::new(local.clone()),
        SystemClock,
        config,
    )?);

    let (tx, mut received) = mpsc::unbounded_channel();
    let _subscription = service.add_notification_received_listener(move |n| {
        let _ = tx.send(n.clone());
    });
    let pump = service.spawn_event_pump();

    if !service.init().await {
        anyhow::bail!("notification permission not granted");
    }

    let mut rows = Vec::with_capacity(reminders.len());
    for reminder in &reminders {
        let handle = service.schedule_reminder_notification(reminder).await?;
        let verified = match &handle {
            Some(handle) => service.verify(handle).await,
            None => false,
        };
        rows.push(ScheduleRow {
            id: reminder.id,
            title: reminder.title.clone(),
            handle,
            verified,
        });
    }
    output::print_list(&rows, format);

    let expected = rows.iter().filter(|r| r.handle.is_some()).count();
    let mut reported = 0;
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while reported < expected {
        tokio::select! {
            Some(notification) = received.recv(), if !args.background => {
                output::print(&DeliveryRow::new(&notification, true), format);
                reported += 1;
            }
            _ = ticker.tick(), if args.background => {
                for notification in local.take_delivered() {
                    output::print(&DeliveryRow::new(&notification, false), format);
                    reported += 1;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!(remaining = expected - reported, "interrupted");
                service.cancel_all_notifications().await;
                break;
            }
        }
    }

    pump.abort();
    Ok(())
}
