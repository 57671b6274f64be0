// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Reminder notification service

mod channel;
mod error;
mod listeners;
mod permission;
mod probe;
mod scheduling;
mod service;

pub use channel::ChannelConfigurator;
pub use error::ServiceError;
pub use listeners::{ListenerRegistry, Subscription};
pub use permission::PermissionGate;
pub use probe::VerificationProbe;
pub use scheduling::SchedulingClient;
pub use service::NotificationService;
