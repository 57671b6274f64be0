// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform descriptions shared by adapters and the service

use serde::{Deserialize, Serialize};

/// Which notification facility the service is talking to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Android,
    Ios,
    Desktop,
}

impl PlatformKind {
    /// The platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            PlatformKind::Android
        } else if cfg!(target_os = "ios") {
            PlatformKind::Ios
        } else {
            PlatformKind::Desktop
        }
    }

    /// Whether notifications must name a declared delivery channel
    pub fn requires_channels(self) -> bool {
        matches!(self, PlatformKind::Android)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformKind::Android => "android",
            PlatformKind::Ios => "ios",
            PlatformKind::Desktop => "desktop",
        }
    }
}

impl Default for PlatformKind {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization state for showing notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}
