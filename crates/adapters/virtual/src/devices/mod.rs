//! Virtual device implementations — light, speaker, toilet.
//!
//! [`VirtualDevice`] is the closed set of variants the registry dispatches
//! to. Adding a device kind means adding a variant, and every `match` below
//! fails to compile until it is handled.

mod light;
mod speaker;
mod toilet;

pub use light::VirtualLight;
pub use speaker::VirtualSpeaker;
pub use toilet::VirtualToilet;

use iothub_app::ports::Device;
use iothub_domain::device::{DeviceKind, DeviceResponse, DeviceStatus};
use iothub_domain::error::IotHubError;
use iothub_domain::message::Message;

/// Wrapper enum for the concrete virtual device types.
pub enum VirtualDevice {
    Light(VirtualLight),
    Speaker(VirtualSpeaker),
    Toilet(VirtualToilet),
}

impl Device for VirtualDevice {
    fn kind(&self) -> DeviceKind {
        match self {
            Self::Light(_) => DeviceKind::Light,
            Self::Speaker(_) => DeviceKind::Speaker,
            Self::Toilet(_) => DeviceKind::Toilet,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Light(d) => d.name(),
            Self::Speaker(d) => d.name(),
            Self::Toilet(d) => d.name(),
        }
    }

    fn handle(&self, message: &Message) -> Result<DeviceResponse, IotHubError> {
        match self {
            Self::Light(d) => d.handle(message),
            Self::Speaker(d) => d.handle(message),
            Self::Toilet(d) => d.handle(message),
        }
    }

    fn status(&self) -> DeviceStatus {
        match self {
            Self::Light(d) => d.status(),
            Self::Speaker(d) => d.status(),
            Self::Toilet(d) => d.status(),
        }
    }

    fn teardown(&self) {
        match self {
            Self::Speaker(d) => d.stop(),
            Self::Light(_) | Self::Toilet(_) => {}
        }
        tracing::debug!(kind = %self.kind(), name = self.name(), "device released");
    }
}

impl From<VirtualLight> for VirtualDevice {
    fn from(device: VirtualLight) -> Self {
        Self::Light(device)
    }
}

impl From<VirtualSpeaker> for VirtualDevice {
    fn from(device: VirtualSpeaker) -> Self {
        Self::Speaker(device)
    }
}

impl From<VirtualToilet> for VirtualDevice {
    fn from(device: VirtualToilet) -> Self {
        Self::Toilet(device)
    }
}
