//! Scoped registrations — every device registered through a [`DeviceScope`]
//! is unregistered exactly once when the scope ends.

use iothub_domain::error::IotHubError;
use iothub_domain::id::DeviceId;

use crate::ports::Device;
use crate::registry::DeviceRegistry;

/// Guard owning a set of registrations in a [`DeviceRegistry`].
///
/// Call [`release`](Self::release) to unregister everything and observe
/// failures. If the scope is dropped without being released (early return,
/// `?`, panic), the remaining registrations are unregistered on drop and
/// failures are logged.
pub struct DeviceScope<'r, D: Device> {
    registry: &'r DeviceRegistry<D>,
    ids: Vec<DeviceId>,
}

impl<'r, D: Device> DeviceScope<'r, D> {
    #[must_use]
    pub fn new(registry: &'r DeviceRegistry<D>) -> Self {
        Self {
            registry,
            ids: Vec::new(),
        }
    }

    /// Register `device` and remember its id for release.
    ///
    /// # Errors
    ///
    /// Propagates [`DeviceRegistry::register`] errors; nothing is
    /// remembered in that case.
    pub async fn register(&mut self, device: D) -> Result<DeviceId, IotHubError> {
        let id = self.registry.register(device).await?;
        self.ids.push(id);
        Ok(id)
    }

    /// Ids registered through this scope and not yet released.
    #[must_use]
    pub fn ids(&self) -> &[DeviceId] {
        &self.ids
    }

    /// Unregister every device of this scope, in registration order.
    ///
    /// All ids are attempted even if some fail.
    ///
    /// # Errors
    ///
    /// Returns the first unregistration error, typically
    /// [`IotHubError::NotFound`] when a device was already unregistered
    /// behind the scope's back.
    pub async fn release(mut self) -> Result<(), IotHubError> {
        let mut first_error = None;
        for id in std::mem::take(&mut self.ids) {
            if let Err(err) = self.registry.unregister(id).await {
                tracing::warn!(%id, error = %err, "failed to release device");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl<D: Device> Drop for DeviceScope<'_, D> {
    fn drop(&mut self) {
        if self.ids.is_empty() {
            return;
        }
        tracing::debug!(count = self.ids.len(), "releasing devices on drop");
        for id in self.ids.drain(..) {
            if let Err(err) = self.registry.remove(id) {
                tracing::warn!(%id, error = %err, "failed to release device");
            }
        }
    }
}
