//! Virtual toilet — responds to `FLUSH` and `CLEAN`.

use iothub_domain::device::{DeviceKind, DeviceResponse, DeviceStatus};
use iothub_domain::error::{IotHubError, UnsupportedOperationError};
use iothub_domain::message::{Message, MessageKind};

/// A simulated toilet. Flushing and cleaning are independent one-shot
/// actions with no precondition.
pub struct VirtualToilet {
    name: String,
}

impl Default for VirtualToilet {
    fn default() -> Self {
        Self::new("Smart Toilet")
    }
}

impl VirtualToilet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle a message.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::UnsupportedOperation`] for anything but
    /// `FLUSH` / `CLEAN`.
    pub fn handle(&self, message: &Message) -> Result<DeviceResponse, IotHubError> {
        match message.kind() {
            MessageKind::Flush => {
                tracing::info!(toilet = %self.name, "flushing");
                Ok(DeviceResponse::Flushed)
            }
            MessageKind::Clean => {
                tracing::info!(toilet = %self.name, "cleaning");
                Ok(DeviceResponse::Cleaned)
            }
            kind => Err(UnsupportedOperationError {
                device: DeviceKind::Toilet,
                kind,
            }
            .into()),
        }
    }

    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        DeviceStatus::stateless(DeviceKind::Toilet, &self.name)
    }
}
