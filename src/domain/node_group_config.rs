// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per node group topology reporting settings
//!
//! The resolver does not interpret these settings; they travel with their node
//! group into the resolved [`crate::Tree`] so that placement can apply them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether pod fingerprints are reported for machines of a node group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodsFingerprintingMode {
    Disabled,
    Enabled,
    /// Fingerprint only pods with exclusive resources assigned
    EnabledExclusiveResources,
}

/// How topology info is refreshed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoRefreshMode {
    Periodic,
    Events,
    PeriodicAndEvents,
}

/// Whether topology info updates are paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoRefreshPauseMode {
    Disabled,
    Enabled,
}

macro_rules! display_as_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        })*
    };
}

display_as_debug!(PodsFingerprintingMode, InfoRefreshMode, InfoRefreshPauseMode);

/// Topology reporting settings for one node group
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeGroupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods_fingerprinting: Option<PodsFingerprintingMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_refresh_mode: Option<InfoRefreshMode>,

    /// Refresh period in seconds; an explicit 0 disables periodic refresh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_refresh_period_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_refresh_pause: Option<InfoRefreshPauseMode>,
}

impl NodeGroupConfig {
    pub const DEFAULT_INFO_REFRESH_PERIOD_SECS: u64 = 10;

    /// Fill every unset field with its default, keeping explicit values
    pub fn with_defaults(mut self) -> Self {
        self.pods_fingerprinting = self
            .pods_fingerprinting
            .or(Some(PodsFingerprintingMode::Enabled));
        self.info_refresh_mode = self.info_refresh_mode.or(Some(InfoRefreshMode::Periodic));
        self.info_refresh_period_secs = self
            .info_refresh_period_secs
            .or(Some(Self::DEFAULT_INFO_REFRESH_PERIOD_SECS));
        self.info_refresh_pause = self
            .info_refresh_pause
            .or(Some(InfoRefreshPauseMode::Disabled));
        self
    }
}

impl fmt::Display for NodeGroupConfig {
    /// Renders the effective settings, defaults included
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let effective = self.clone().with_defaults();
        write!(
            f,
            "PodsFingerprinting mode: {} InfoRefreshMode: {} InfoRefreshPeriod: {}s InfoRefreshPause: {}",
            effective.pods_fingerprinting.unwrap_or(PodsFingerprintingMode::Enabled),
            effective.info_refresh_mode.unwrap_or(InfoRefreshMode::Periodic),
            effective
                .info_refresh_period_secs
                .unwrap_or(Self::DEFAULT_INFO_REFRESH_PERIOD_SECS),
            effective.info_refresh_pause.unwrap_or(InfoRefreshPauseMode::Disabled),
        )
    }
}
