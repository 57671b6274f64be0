// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification platform for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{NotificationPlatform, PlatformError};
use crate::events::{EventFanout, EventReceiver};
use async_trait::async_trait;
use chrono::Utc;
use rmd_core::{
    ChannelConfig, HandleGen, Notification, NotificationContent, NotificationHandle,
    NotificationResponse, PermissionStatus, PlatformEvent, PlatformKind, ScheduledEntry,
    SequentialHandleGen, Trigger,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded platform call
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCall {
    PermissionStatus,
    RequestPermission,
    SetChannel { id: String },
    Schedule {
        content: NotificationContent,
        trigger: Trigger,
    },
    Cancel { handle: NotificationHandle },
    CancelAll,
    ListScheduled,
}

#[derive(Default)]
struct Failures {
    permission: Option<String>,
    set_channel: Option<String>,
    schedule: Option<String>,
    cancel: Option<String>,
    list: Option<String>,
}

struct FakeState {
    permission: PermissionStatus,
    /// Status a request moves to
    request_result: PermissionStatus,
    permission_delay: Option<Duration>,
    pending: Vec<ScheduledEntry>,
    calls: Vec<PlatformCall>,
    failures: Failures,
}

/// Fake platform with an in-memory queue and scripted permission answers
#[derive(Clone)]
pub struct FakePlatform {
    kind: PlatformKind,
    state: Arc<Mutex<FakeState>>,
    id_gen: SequentialHandleGen,
    events: EventFanout,
}

impl FakePlatform {
    /// Undetermined permission that the user grants on request
    pub fn new(kind: PlatformKind) -> Self {
        Self {
            kind,
            state: Arc::new(Mutex::new(FakeState {
                permission: PermissionStatus::Undetermined,
                request_result: PermissionStatus::Granted,
                permission_delay: None,
                pending: Vec::new(),
                calls: Vec::new(),
                failures: Failures::default(),
            })),
            id_gen: SequentialHandleGen::new("notif"),
            events: EventFanout::new(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: PlatformCall) {
        self.lock().calls.push(call);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.lock().calls.clone()
    }

    /// Count recorded calls matching a predicate
    pub fn count(&self, pred: impl Fn(&PlatformCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn set_permission(&self, status: PermissionStatus) {
        self.lock().permission = status;
    }

    /// What the user answers when prompted
    pub fn set_request_result(&self, status: PermissionStatus) {
        self.lock().request_result = status;
    }

    /// Hold the permission prompt open for a while
    pub fn set_permission_delay(&self, delay: Duration) {
        self.lock().permission_delay = Some(delay);
    }

    pub fn fail_permission(&self, message: &str) {
        self.lock().failures.permission = Some(message.to_string());
    }

    pub fn fail_set_channel(&self, message: &str) {
        self.lock().failures.set_channel = Some(message.to_string());
    }

    pub fn fail_schedule(&self, message: &str) {
        self.lock().failures.schedule = Some(message.to_string());
    }

    pub fn fail_cancel(&self, message: &str) {
        self.lock().failures.cancel = Some(message.to_string());
    }

    pub fn fail_list(&self, message: &str) {
        self.lock().failures.list = Some(message.to_string());
    }

    /// Clear all injected failures
    pub fn heal(&self) {
        self.lock().failures = Failures::default();
    }

    /// Fire a pending entry now, as the OS would at its trigger time
    pub fn deliver(&self, handle: &NotificationHandle, foreground: bool) -> Option<Notification> {
        let entry = {
            let mut state = self.lock();
            let index = state.pending.iter().position(|e| &e.handle == handle)?;
            state.pending.remove(index)
        };
        let notification = Notification {
            handle: entry.handle,
            content: entry.content,
            delivered_at: Utc::now(),
        };
        if foreground {
            self.events
                .publish(PlatformEvent::Received(notification.clone()));
        }
        Some(notification)
    }

    /// Simulate the user tapping a delivered notification
    pub fn tap(&self, notification: Notification) {
        self.events
            .publish(PlatformEvent::Response(NotificationResponse::tapped(notification)));
    }
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new(PlatformKind::Android)
    }
}

fn failure(injected: &Option<String>) -> Result<(), PlatformError> {
    match injected {
        Some(message) => Err(PlatformError::Failed(message.clone())),
        None => Ok(()),
    }
}

#[async_trait]
impl NotificationPlatform for FakePlatform {
    fn kind(&self) -> PlatformKind {
        self.kind
    }

    async fn permission_status(&self) -> Result<PermissionStatus, PlatformError> {
        self.record(PlatformCall::PermissionStatus);
        let state = self.lock();
        failure(&state.failures.permission)?;
        Ok(state.permission)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, PlatformError> {
        self.record(PlatformCall::RequestPermission);
        let delay = self.lock().permission_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        failure(&state.failures.permission)?;
        state.permission = state.request_result;
        Ok(state.permission)
    }

    async fn set_channel(&self, channel: &ChannelConfig) -> Result<(), PlatformError> {
        self.record(PlatformCall::SetChannel {
            id: channel.id.clone(),
        });
        failure(&self.lock().failures.set_channel)
    }

    async fn schedule(
        &self,
        content: &NotificationContent,
        trigger: &Trigger,
    ) -> Result<NotificationHandle, PlatformError> {
        self.record(PlatformCall::Schedule {
            content: content.clone(),
            trigger: trigger.clone(),
        });

        let mut state = self.lock();
        failure(&state.failures.schedule)?;
        if !state.permission.is_granted() {
            return Err(PlatformError::PermissionDenied);
        }

        let handle = self.id_gen.next();
        state.pending.push(ScheduledEntry {
            handle: handle.clone(),
            content: content.clone(),
            trigger: trigger.clone(),
        });
        Ok(handle)
    }

    async fn cancel(&self, handle: &NotificationHandle) -> Result<(), PlatformError> {
        self.record(PlatformCall::Cancel {
            handle: handle.clone(),
        });

        let mut state = self.lock();
        failure(&state.failures.cancel)?;
        state.pending.retain(|e| &e.handle != handle);
        Ok(())
    }

    async fn cancel_all(&self) -> Result<(), PlatformError> {
        self.record(PlatformCall::CancelAll);

        let mut state = self.lock();
        failure(&state.failures.cancel)?;
        state.pending.clear();
        Ok(())
    }

    async fn list_scheduled(&self) -> Result<Vec<ScheduledEntry>, PlatformError> {
        self.record(PlatformCall::ListScheduled);

        let state = self.lock();
        failure(&state.failures.list)?;
        Ok(state.pending.clone())
    }

    fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
