// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the notification service

use rmd_adapters::PlatformError;
use rmd_core::{ConfigError, ReminderError};
use thiserror::Error;

/// Errors propagated to callers of the service.
///
/// Denied permission and past dates are not errors: they surface as
/// `false` and `None` respectively.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("notifications not initialized")]
    NotInitialized,
    #[error("failed to schedule notification: {0}")]
    Scheduling(#[source] PlatformError),
    #[error(transparent)]
    InvalidReminder(#[from] ReminderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
