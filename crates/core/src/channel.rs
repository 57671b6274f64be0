// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named delivery channels

use crate::content::Sound;
use serde::{Deserialize, Serialize};

/// Channel id every reminder notification is delivered on
pub const REMINDERS_CHANNEL_ID: &str = "reminders";

/// How intrusively the platform presents notifications on a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    /// Shown silently in the tray
    Low,
    /// Plays sound
    Default,
    /// Plays sound and peeks on screen
    High,
}

/// Delivery configuration declared once before notifications use it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub id: String,
    pub name: String,
    pub importance: Importance,
    /// Alternating off/on durations in milliseconds
    pub vibration_pattern: Vec<u64>,
    /// ARGB hex color for the notification light
    pub light_color: String,
    pub sound: Sound,
}

impl ChannelConfig {
    /// The channel reminders are delivered on
    pub fn reminders() -> Self {
        Self {
            id: REMINDERS_CHANNEL_ID.to_string(),
            name: "Reminders".to_string(),
            importance: Importance::High,
            vibration_pattern: vec![0, 250, 250, 250],
            light_color: "#FF231F7C".to_string(),
            sound: Sound::Default,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::reminders()
    }
}
