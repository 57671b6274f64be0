// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification handles and their generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque identifier issued by a platform for a scheduled notification.
///
/// Owned by the caller for the lifetime of the reminder. The service never
/// stores it; a lost handle can only be cleared by bulk cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationHandle(pub String);

impl NotificationHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues fresh notification handles
pub trait HandleGen: Clone + Send + Sync + 'static {
    fn next(&self) -> NotificationHandle;
}

/// UUID-based generator for production use
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidHandleGen;

impl HandleGen for UuidHandleGen {
    fn next(&self) -> NotificationHandle {
        NotificationHandle(uuid::Uuid::new_v4().to_string())
    }
}

/// Sequential generator for testing
#[derive(Clone, Debug)]
pub struct SequentialHandleGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialHandleGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialHandleGen {
    fn default() -> Self {
        Self::new("notif")
    }
}

impl HandleGen for SequentialHandleGen {
    fn next(&self) -> NotificationHandle {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        NotificationHandle(format!("{}-{}", self.prefix, n))
    }
}
