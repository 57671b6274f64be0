// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration for the current platform.

use crate::channel::ChannelConfig;
use crate::content::FALLBACK_BODY;
use crate::platform::{PermissionStatus, PlatformKind};
use crate::trigger::{CalendarZone, TriggerMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("utc_offset_minutes out of range: {0}")]
    InvalidOffset(i32),
    #[error("channel id must not be empty")]
    EmptyChannelId,
}

/// Configuration for the notification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub platform: PlatformKind,
    pub trigger_mode: TriggerMode,
    /// Read the pending queue back after each schedule
    pub verify_after_schedule: bool,
    /// Fixed calendar zone; the device's local zone when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
    pub fallback_body: String,
    pub channel: ChannelConfig,
    pub local: LocalConfig,
}

/// Settings for the in-process local platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalConfig {
    /// Pending-queue quota; schedules beyond it are rejected
    pub max_pending: usize,
    /// Authorization state before the first request
    pub permission: PermissionStatus,
    /// Whether the app counts as foregrounded for delivery events
    pub foreground: bool,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            max_pending: 64,
            permission: PermissionStatus::Undetermined,
            foreground: true,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            platform: PlatformKind::current(),
            trigger_mode: TriggerMode::Calendar,
            verify_after_schedule: true,
            utc_offset_minutes: None,
            fallback_body: FALLBACK_BODY.to_string(),
            channel: ChannelConfig::reminders(),
            local: LocalConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse and validate TOML config text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar_zone()?;
        if self.channel.id.trim().is_empty() {
            return Err(ConfigError::EmptyChannelId);
        }
        Ok(())
    }

    /// Zone used for calendar triggers and naive input times
    pub fn calendar_zone(&self) -> Result<CalendarZone, ConfigError> {
        match self.utc_offset_minutes {
            None => Ok(CalendarZone::Local),
            Some(minutes) => CalendarZone::from_offset_minutes(minutes)
                .ok_or(ConfigError::InvalidOffset(minutes)),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
