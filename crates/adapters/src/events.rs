// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out of platform events to subscribers

use rmd_core::PlatformEvent;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Receiver for platform events
pub type EventReceiver = mpsc::UnboundedReceiver<PlatformEvent>;

/// Delivers every published event to every live subscriber
#[derive(Clone, Default)]
pub struct EventFanout {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<PlatformEvent>>>>,
}

impl EventFanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tx);
        rx
    }

    /// Publish to all subscribers, dropping those whose receiver is gone
    pub fn publish(&self, event: PlatformEvent) {
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.retain(|tx| tx.send(event.clone()).is_ok());
        tracing::trace!(event = event.name(), subscribers = subs.len(), "published");
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}
