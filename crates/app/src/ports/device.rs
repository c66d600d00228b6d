//! Device port — the capability every registrable device exposes.
//!
//! Implementations live in adapter crates (e.g. `adapter_virtual`). The
//! registry only ever talks to devices through this trait.

use iothub_domain::device::{DeviceKind, DeviceResponse, DeviceStatus};
use iothub_domain::error::{IotHubError, ValidationError};
use iothub_domain::message::Message;

/// A controllable unit that reacts to [`Message`]s.
///
/// `handle` is synchronous in-memory work: it must apply the whole reaction
/// or fail without side effect. Implementations guard their own state, so
/// concurrent calls on the same device are serialized per mutation.
pub trait Device: Send + Sync {
    /// Capability tag of this device.
    fn kind(&self) -> DeviceKind;

    /// Human-readable name, used in logs and status snapshots.
    fn name(&self) -> &str;

    /// Check invariants before the device is accepted by a registry.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::InvalidArgument`] when `name` is empty.
    fn validate(&self) -> Result<(), IotHubError> {
        if self.name().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// React to a message addressed to this device.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::UnsupportedOperation`] for message kinds the
    /// device does not handle, and [`IotHubError::InvalidState`] when the
    /// device's current state forbids the command.
    fn handle(&self, message: &Message) -> Result<DeviceResponse, IotHubError>;

    /// Current state snapshot.
    fn status(&self) -> DeviceStatus;

    /// Called by the registry when the device is unregistered, before the
    /// registry drops its reference.
    fn teardown(&self) {}
}
