// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callbacks for delivered and interacted-with notifications

use rmd_core::{Notification, NotificationResponse, PlatformEvent};
use std::sync::{Arc, RwLock, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerKind {
    Received,
    Response,
}

struct Listeners<T> {
    next_id: u64,
    /// Registration order is invocation order
    entries: Vec<(u64, Callback<T>)>,
}

impl<T> Listeners<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn add(&mut self, callback: Callback<T>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    fn snapshot(&self) -> Vec<Callback<T>> {
        self.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }
}

struct RegistryInner {
    received: RwLock<Listeners<Notification>>,
    response: RwLock<Listeners<NotificationResponse>>,
}

impl RegistryInner {
    fn remove(&self, kind: ListenerKind, id: u64) {
        match kind {
            ListenerKind::Received => self
                .received
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .remove(id),
            ListenerKind::Response => self
                .response
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .remove(id),
        }
    }
}

/// Registered notification callbacks
#[derive(Clone)]
pub struct ListenerRegistry {
    inner: Arc<RegistryInner>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                received: RwLock::new(Listeners::new()),
                response: RwLock::new(Listeners::new()),
            }),
        }
    }

    /// Called for each notification delivered while the app is foregrounded
    pub fn on_received<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let id = self
            .inner
            .received
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .add(Arc::new(callback));
        self.subscription(ListenerKind::Received, id)
    }

    /// Called each time the user interacts with a delivered notification
    pub fn on_response<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&NotificationResponse) + Send + Sync + 'static,
    {
        let id = self
            .inner
            .response
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .add(Arc::new(callback));
        self.subscription(ListenerKind::Response, id)
    }

    fn subscription(&self, kind: ListenerKind, id: u64) -> Subscription {
        Subscription {
            kind,
            id,
            registry: Arc::downgrade(&self.inner),
            detached: false,
        }
    }

    /// Invoke every callback registered for the event's type.
    ///
    /// Callbacks run outside the registry lock, so they may subscribe or
    /// unsubscribe.
    pub fn dispatch(&self, event: &PlatformEvent) {
        match event {
            PlatformEvent::Received(notification) => {
                let callbacks = self
                    .inner
                    .received
                    .read()
                    .unwrap_or_else(|e| e.into_inner())
                    .snapshot();
                for callback in callbacks {
                    callback(notification);
                }
            }
            PlatformEvent::Response(response) => {
                let callbacks = self
                    .inner
                    .response
                    .read()
                    .unwrap_or_else(|e| e.into_inner())
                    .snapshot();
                for callback in callbacks {
                    callback(response);
                }
            }
        }
    }

    /// Number of live (received, response) callbacks
    pub fn listener_counts(&self) -> (usize, usize) {
        let received = self
            .inner
            .received
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len();
        let response = self
            .inner
            .response
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .entries
            .len();
        (received, response)
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a callback registered; dropping it unregisters the callback
#[must_use = "dropping a Subscription unregisters its callback"]
pub struct Subscription {
    kind: ListenerKind,
    id: u64,
    registry: Weak<RegistryInner>,
    detached: bool,
}

impl Subscription {
    /// Unregister the callback now
    pub fn remove(self) {}

    /// Keep the callback registered for the registry's lifetime
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.detached {
            return;
        }
        if let Some(inner) = self.registry.upgrade() {
            inner.remove(self.kind, self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
#[path = "listeners_tests.rs"]
mod tests;
