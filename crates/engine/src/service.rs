// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reminder notification service
//!
//! One instance per process, constructed by the application and shared by
//! `Arc`. Initialization (permission, then channel) runs lazily on the first
//! schedule and is single-flight: callers that arrive while an attempt is in
//! progress wait for it and share its outcome.

use crate::channel::ChannelConfigurator;
use crate::error::ServiceError;
use crate::listeners::{ListenerRegistry, Subscription};
use crate::permission::PermissionGate;
use crate::probe::VerificationProbe;
use crate::scheduling::SchedulingClient;
use rmd_adapters::{EventReceiver, NotificationPlatform, PlatformError};
use rmd_core::{
    Clock, Notification, NotificationContent, NotificationHandle, NotificationResponse,
    ReminderRequest, ScheduledEntry, ServiceConfig, SystemClock, TriggerBuilder,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

/// Schedules, verifies and cancels reminder notifications
pub struct NotificationService<P, C = SystemClock> {
    platform: P,
    clock: C,
    config: ServiceConfig,
    triggers: TriggerBuilder,
    gate: PermissionGate<P>,
    channels: ChannelConfigurator<P>,
    client: SchedulingClient<P>,
    probe: VerificationProbe<P>,
    listeners: ListenerRegistry,
    initialized: AtomicBool,
    /// Completed init attempts; lets waiters tell whether they joined one
    init_attempts: AtomicU64,
    /// Held for the duration of an attempt; holds that attempt's outcome
    init_flight: tokio::sync::Mutex<bool>,
    events: Mutex<Option<EventReceiver>>,
}

impl<P, C> NotificationService<P, C>
where
    P: NotificationPlatform,
    C: Clock,
{
    /// Create a service over `platform`.
    ///
    /// Subscribes to platform events immediately; they are dispatched to
    /// listeners once the event pump runs.
    pub fn new(platform: P, clock: C, config: ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;

        let mut triggers = TriggerBuilder::new(config.trigger_mode, config.calendar_zone()?);
        if platform.kind().requires_channels() {
            triggers = triggers.with_channel(config.channel.id.clone());
        }

        Ok(Self {
            gate: PermissionGate::new(platform.clone()),
            channels: ChannelConfigurator::new(platform.clone()),
            client: SchedulingClient::new(platform.clone()),
            probe: VerificationProbe::new(platform.clone()),
            events: Mutex::new(Some(platform.subscribe())),
            listeners: ListenerRegistry::new(),
            initialized: AtomicBool::new(false),
            init_attempts: AtomicU64::new(0),
            init_flight: tokio::sync::Mutex::new(false),
            platform,
            clock,
            config,
            triggers,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Acquire permission and declare the reminders channel.
    ///
    /// Idempotent once it succeeds. Returns the final authorization state;
    /// platform failures are logged and reported as `false` so a later call
    /// can retry.
    pub async fn init(&self) -> bool {
        if self.is_initialized() {
            return true;
        }

        let seen = self.init_attempts.load(Ordering::Acquire);
        let mut outcome = self.init_flight.lock().await;
        if self.init_attempts.load(Ordering::Acquire) != seen {
            // An attempt finished while we waited; share its outcome
            return *outcome || self.is_initialized();
        }

        let ok = match self.initialize().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize notifications");
                false
            }
        };
        if ok {
            self.initialized.store(true, Ordering::Release);
            tracing::info!(platform = %self.platform.kind(), "notification service initialized");
        }
        *outcome = ok;
        self.init_attempts.fetch_add(1, Ordering::AcqRel);
        ok
    }

    async fn initialize(&self) -> Result<bool, PlatformError> {
        if !self.gate.ensure_authorized().await? {
            return Ok(false);
        }
        self.channels.ensure_channel(&self.config.channel).await?;
        Ok(true)
    }

    /// Schedule a notification for `reminder`.
    ///
    /// Returns `Ok(None)` when the reminder is not strictly in the future;
    /// nothing is submitted in that case.
    pub async fn schedule_reminder_notification(
        &self,
        reminder: &ReminderRequest,
    ) -> Result<Option<NotificationHandle>, ServiceError> {
        reminder.validate()?;
        if !self.init().await {
            return Err(ServiceError::NotInitialized);
        }

        let trigger = match self.triggers.build(reminder.scheduled_for, self.clock.now()) {
            Ok(trigger) => trigger,
            Err(e) => {
                tracing::warn!(
                    reminder_id = %reminder.id,
                    scheduled_for = %e.scheduled_for,
                    now = %e.now,
                    "cannot schedule notification for past date"
                );
                return Ok(None);
            }
        };

        let content = NotificationContent::for_reminder(reminder, &self.config.fallback_body);
        tracing::debug!(reminder_id = %reminder.id, ?content, ?trigger, "built notification");

        let handle = self.client.schedule(&content, &trigger).await?;
        tracing::info!(
            %handle,
            reminder_id = %reminder.id,
            scheduled_for = %reminder.scheduled_for,
            "scheduled reminder notification"
        );

        if self.config.verify_after_schedule {
            self.log_verification(&handle).await;
        }
        Ok(Some(handle))
    }

    async fn log_verification(&self, handle: &NotificationHandle) {
        match self.probe.find(handle).await {
            Ok(Some(entry)) => tracing::debug!(
                %handle,
                trigger = ?entry.trigger,
                "notification verified in schedule"
            ),
            Ok(None) => tracing::warn!(%handle, "notification not found in schedule"),
            Err(e) => tracing::warn!(%handle, error = %e, "could not verify notification"),
        }
    }

    /// Whether `handle` is currently pending
    pub async fn verify(&self, handle: &NotificationHandle) -> bool {
        self.probe.verify(handle).await
    }

    /// Cancel one pending notification; never fails
    pub async fn cancel_notification(&self, handle: &NotificationHandle) {
        self.client.cancel(handle).await;
    }

    /// Cancel every pending notification, including ones this process did
    /// not schedule
    pub async fn cancel_all_notifications(&self) {
        self.client.cancel_all().await;
    }

    /// The platform's pending queue; empty if it cannot be read
    pub async fn get_scheduled_notifications(&self) -> Vec<ScheduledEntry> {
        match self.client.list_pending().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "failed to get scheduled notifications");
                Vec::new()
            }
        }
    }

    /// Register a callback for user interaction with a notification
    pub fn add_notification_response_listener<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&NotificationResponse) + Send + Sync + 'static,
    {
        self.listeners.on_response(callback)
    }

    /// Register a callback for notifications delivered while foregrounded
    pub fn add_notification_received_listener<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.listeners.on_received(callback)
    }

    /// Forward platform events to listeners until the platform goes away.
    ///
    /// Only the first call pumps; later calls return immediately.
    pub async fn run_event_pump(&self) {
        let receiver = self
            .events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        let Some(mut receiver) = receiver else {
            tracing::warn!("event pump already started");
            return;
        };

        while let Some(event) = receiver.recv().await {
            tracing::debug!(event = event.name(), handle = %event.handle(), "dispatching");
            self.listeners.dispatch(&event);
        }
        tracing::debug!("platform event stream closed");
    }

    /// Run the event pump on a background task
    pub fn spawn_event_pump(self: &Arc<Self>) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.run_event_pump().await })
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
