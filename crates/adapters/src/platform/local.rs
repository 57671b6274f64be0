// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process notification platform driven by tokio timers.
//!
//! Each pending entry owns a timer task. When the timer fires the entry
//! leaves the pending queue, is recorded as delivered, and is reported as
//! `Received` if the app is foregrounded.

use super::{NotificationPlatform, PlatformError};
use crate::events::{EventFanout, EventReceiver};
use async_trait::async_trait;
use chrono::Utc;
use rmd_core::{
    CalendarZone, ChannelConfig, HandleGen, LocalConfig, Notification, NotificationContent,
    NotificationHandle, NotificationResponse, PermissionStatus, PlatformEvent, PlatformKind,
    ScheduledEntry, Trigger, UuidHandleGen,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delivered notifications kept for `respond`; older ones are dropped
const DELIVERED_HISTORY: usize = 128;

struct PendingEntry {
    entry: ScheduledEntry,
    timer: JoinHandle<()>,
}

struct LocalState {
    permission: PermissionStatus,
    channels: HashMap<String, ChannelConfig>,
    /// Insertion order is listing order
    pending: Vec<PendingEntry>,
    delivered: Vec<Notification>,
}

struct LocalInner<G> {
    kind: PlatformKind,
    zone: CalendarZone,
    max_pending: usize,
    id_gen: G,
    foreground: AtomicBool,
    state: Mutex<LocalState>,
    events: EventFanout,
}

/// Timer-backed platform for desktops and for running without a device
#[derive(Clone)]
pub struct LocalPlatform<G: HandleGen = UuidHandleGen> {
    inner: Arc<LocalInner<G>>,
}

impl LocalPlatform<UuidHandleGen> {
    pub fn new(kind: PlatformKind, zone: CalendarZone, config: &LocalConfig) -> Self {
        Self::with_handle_gen(kind, zone, config, UuidHandleGen)
    }
}

impl<G: HandleGen> LocalPlatform<G> {
    pub fn with_handle_gen(
        kind: PlatformKind,
        zone: CalendarZone,
        config: &LocalConfig,
        id_gen: G,
    ) -> Self {
        Self {
            inner: Arc::new(LocalInner {
                kind,
                zone,
                max_pending: config.max_pending,
                id_gen,
                foreground: AtomicBool::new(config.foreground),
                state: Mutex::new(LocalState {
                    permission: config.permission,
                    channels: HashMap::new(),
                    pending: Vec::new(),
                    delivered: Vec::new(),
                }),
                events: EventFanout::new(),
            }),
        }
    }

    /// Mark the app as foregrounded (or not) for future deliveries
    pub fn set_foreground(&self, foreground: bool) {
        self.inner.foreground.store(foreground, Ordering::SeqCst);
    }

    /// Change authorization out from under the service (e.g. revoked in settings)
    pub fn set_permission(&self, status: PermissionStatus) {
        self.inner.lock().permission = status;
    }

    /// Declared channel, if any
    pub fn channel(&self, id: &str) -> Option<ChannelConfig> {
        self.inner.lock().channels.get(id).cloned()
    }

    /// Recently delivered notifications, oldest first
    pub fn delivered(&self) -> Vec<Notification> {
        self.inner.lock().delivered.clone()
    }

    /// Remove and return the delivery history, oldest first
    pub fn take_delivered(&self) -> Vec<Notification> {
        std::mem::take(&mut self.inner.lock().delivered)
    }

    /// Simulate the user acting on a delivered notification
    pub fn respond(
        &self,
        handle: &NotificationHandle,
        action: impl Into<String>,
    ) -> Result<(), PlatformError> {
        let notification = self
            .inner
            .lock()
            .delivered
            .iter()
            .find(|n| &n.handle == handle)
            .cloned()
            .ok_or_else(|| PlatformError::NotDelivered(handle.clone()))?;

        let mut response = NotificationResponse::tapped(notification);
        response.action = action.into();
        self.inner.events.publish(PlatformEvent::Response(response));
        Ok(())
    }
}

impl<G> LocalInner<G> {
    fn lock(&self) -> std::sync::MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fire(&self, handle: &NotificationHandle) {
        let notification = {
            let mut state = self.lock();
            let Some(index) = state.pending.iter().position(|p| &p.entry.handle == handle) else {
                // Cancelled after the timer woke
                return;
            };
            let pending = state.pending.remove(index);
            let notification = Notification {
                handle: pending.entry.handle,
                content: pending.entry.content,
                delivered_at: Utc::now(),
            };
            if state.delivered.len() >= DELIVERED_HISTORY {
                state.delivered.remove(0);
            }
            state.delivered.push(notification.clone());
            notification
        };

        let foreground = self.foreground.load(Ordering::SeqCst);
        tracing::info!(handle = %notification.handle, foreground, "delivered");
        if foreground {
            self.events.publish(PlatformEvent::Received(notification));
        }
    }
}

fn spawn_timer<G: HandleGen>(
    inner: Weak<LocalInner<G>>,
    handle: NotificationHandle,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(inner) = inner.upgrade() {
            inner.fire(&handle);
        }
    })
}

#[async_trait]
impl<G: HandleGen> NotificationPlatform for LocalPlatform<G> {
    fn kind(&self) -> PlatformKind {
        self.inner.kind
    }

    async fn permission_status(&self) -> Result<PermissionStatus, PlatformError> {
        Ok(self.inner.lock().permission)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PlatformError> {
        let mut state = self.inner.lock();
        // An undecided user accepts; an earlier decision is remembered
        if state.permission == PermissionStatus::Undetermined {
            state.permission = PermissionStatus::Granted;
        }
        Ok(state.permission)
    }

    async fn set_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        if !self.inner.kind.requires_channels() {
            return Ok(());
        }
        self.inner
            .lock()
            .channels
            .insert(channel.id.clone(), channel.clone());
        Ok(())
    }

    async fn schedule(
        &self,
        content: &NotificationContent,
        trigger: &Trigger,
    ) -> Result<NotificationHandle, PlatformError> {
        let fire_time = trigger
            .fire_time(&self.inner.zone)
            .ok_or_else(|| PlatformError::InvalidTrigger(format!("{:?}", trigger)))?;

        let mut state = self.inner.lock();
        if !state.permission.is_granted() {
            return Err(PlatformError::PermissionDenied);
        }
        if self.inner.kind.requires_channels() {
            if let Some(channel_id) = trigger.channel_id() {
                if !state.channels.contains_key(channel_id) {
                    return Err(PlatformError::UnknownChannel(channel_id.to_string()));
                }
            }
        }
        if state.pending.len() >= self.inner.max_pending {
            return Err(PlatformError::QuotaExceeded(self.inner.max_pending));
        }

        let handle = self.inner.id_gen.next();
        // A fire time already behind us fires immediately
        let delay = (fire_time - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        let timer = spawn_timer(Arc::downgrade(&self.inner), handle.clone(), delay);
        state.pending.push(PendingEntry {
            entry: ScheduledEntry {
                handle: handle.clone(),
                content: content.clone(),
                trigger: trigger.clone(),
            },
            timer,
        });

        tracing::debug!(%handle, delay_ms = delay.as_millis() as u64, "timer armed");
        Ok(handle)
    }

    async fn cancel(&self, handle: &NotificationHandle) -> Result<(), PlatformError> {
        let mut state = self.inner.lock();
        if let Some(index) = state.pending.iter().position(|p| &p.entry.handle == handle) {
            state.pending.remove(index).timer.abort();
        }
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), PlatformError> {
        let mut state = self.inner.lock();
        for pending in state.pending.drain(..) {
            pending.timer.abort();
        }
        Ok(())
    }

    async fn list_scheduled(&self) -> Result<Vec<ScheduledEntry>, PlatformError> {
        Ok(self
            .inner
            .lock()
            .pending
            .iter()
            .map(|p| p.entry.clone())
            .collect())
    }

    fn subscribe(&self) -> EventReceiver {
        self.inner.events.subscribe()
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
