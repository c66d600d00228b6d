//! Virtual light — responds to `SWITCH_ON` and `SWITCH_OFF`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use iothub_domain::device::{DeviceKind, DeviceResponse, DeviceStatus};
use iothub_domain::error::{IotHubError, UnsupportedOperationError};
use iothub_domain::message::{Message, MessageKind};
use iothub_domain::power::PowerState;

/// A simulated light that can be switched on and off.
pub struct VirtualLight {
    name: String,
    power: Mutex<PowerState>,
}

impl Default for VirtualLight {
    fn default() -> Self {
        Self::new("Hue Light")
    }
}

impl VirtualLight {
    /// Create a light that starts switched off.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            power: Mutex::new(PowerState::Off),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        *self.lock_power()
    }

    /// Handle a message, returning the resulting power state.
    ///
    /// Switching to the state the light is already in is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::UnsupportedOperation`] for anything but
    /// `SWITCH_ON` / `SWITCH_OFF`.
    pub fn handle(&self, message: &Message) -> Result<DeviceResponse, IotHubError> {
        let mut power = self.lock_power();
        match message.kind() {
            MessageKind::SwitchOn => *power = PowerState::On,
            MessageKind::SwitchOff => *power = PowerState::Off,
            kind => {
                return Err(UnsupportedOperationError {
                    device: DeviceKind::Light,
                    kind,
                }
                .into());
            }
        }
        tracing::info!(light = %self.name, state = %*power, "light switched");
        Ok(DeviceResponse::Power { state: *power })
    }

    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        DeviceStatus::switchable(DeviceKind::Light, &self.name, self.power())
    }

    fn lock_power(&self) -> MutexGuard<'_, PowerState> {
        self.power.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
