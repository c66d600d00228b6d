//! Device — the values describing an addressable unit and what it reports.
//!
//! The capability itself (`handle(message)`) is the `Device` port trait in
//! `iothub-app`; this module only holds the data that crosses that port.

use serde::{Deserialize, Serialize};

use crate::power::PowerState;

/// Capability tag of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Speaker,
    Toilet,
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Speaker => f.write_str("speaker"),
            Self::Toilet => f.write_str("toilet"),
        }
    }
}

/// Outcome of a successfully handled message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceResponse {
    /// Power state after a switch command.
    Power { state: PowerState },
    /// Confirmation that a song started playing.
    Playing { title: String },
    Flushed,
    Cleaned,
}

impl std::fmt::Display for DeviceResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Power { state } => write!(f, "power {state}"),
            Self::Playing { title } => write!(f, "playing {title:?}"),
            Self::Flushed => f.write_str("flushed"),
            Self::Cleaned => f.write_str("cleaned"),
        }
    }
}

/// Read-only snapshot of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub kind: DeviceKind,
    pub name: String,
    /// `None` for devices without a power switch.
    pub power: Option<PowerState>,
    pub now_playing: Option<String>,
}

impl DeviceStatus {
    /// Snapshot of a device that has no mutable state.
    #[must_use]
    pub fn stateless(kind: DeviceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            power: None,
            now_playing: None,
        }
    }

    /// Snapshot of a switchable device.
    #[must_use]
    pub fn switchable(kind: DeviceKind, name: impl Into<String>, power: PowerState) -> Self {
        Self {
            power: Some(power),
            ..Self::stateless(kind, name)
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_some_and(PowerState::is_on)
    }
}
