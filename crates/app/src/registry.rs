//! Device registry — assigns identities to devices and routes messages to them.
//!
//! The registry owns every registered device behind an [`Arc`]. The map is
//! the only shared mutable resource: lookups take a read lock, registration
//! and unregistration take the write lock, and no lock is held while a
//! device handles a message.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use iothub_domain::device::{DeviceResponse, DeviceStatus};
use iothub_domain::error::{IotHubError, NotFoundError};
use iothub_domain::id::DeviceId;
use iothub_domain::message::Message;

use crate::ports::Device;

/// Registry and dispatcher for devices implementing the [`Device`] port.
///
/// Dispatch is a direct, at-most-once call: no retries, no queueing, no
/// reordering. Sequencing several sends is up to the caller.
pub struct DeviceRegistry<D> {
    devices: RwLock<HashMap<DeviceId, Arc<D>>>,
}

impl<D> Default for DeviceRegistry<D> {
    fn default() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
        }
    }
}

impl<D: Device> DeviceRegistry<D> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `device` and issue a fresh identifier for it.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::InvalidArgument`] if the device fails
    /// [`Device::validate`].
    #[tracing::instrument(skip(self, device), fields(kind = %device.kind(), name = device.name()))]
    pub async fn register(&self, device: D) -> Result<DeviceId, IotHubError> {
        device.validate()?;
        let mut devices = self.write();
        let id = loop {
            let candidate = DeviceId::new();
            if !devices.contains_key(&candidate) {
                break candidate;
            }
        };
        devices.insert(id, Arc::new(device));
        tracing::debug!(%id, "device registered");
        Ok(id)
    }

    /// Remove the device registered under `id`, run its teardown hook and
    /// hand the reference back to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::NotFound`] if `id` is not registered,
    /// including when it was already unregistered.
    #[tracing::instrument(skip(self))]
    pub async fn unregister(&self, id: DeviceId) -> Result<Arc<D>, IotHubError> {
        self.remove(id)
    }

    /// Route `message` to its target device and return the device's response.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::NotFound`] if the target is not registered, or
    /// whatever error the device's [`Device::handle`] produced.
    #[tracing::instrument(skip(self, message), fields(target = %message.target(), kind = %message.kind()))]
    pub async fn send(&self, message: Message) -> Result<DeviceResponse, IotHubError> {
        let device = self.lookup(message.target())?;
        match device.handle(&message) {
            Ok(response) => {
                tracing::debug!(%response, "message handled");
                Ok(response)
            }
            Err(err) => {
                tracing::debug!(error = %err, "message rejected");
                Err(err)
            }
        }
    }

    /// Snapshot of the device registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::NotFound`] if `id` is not registered.
    pub async fn status(&self, id: DeviceId) -> Result<DeviceStatus, IotHubError> {
        Ok(self.lookup(id)?.status())
    }

    /// Whether `id` currently refers to a registered device.
    #[must_use]
    pub fn contains(&self, id: DeviceId) -> bool {
        self.read().contains_key(&id)
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Identifiers of all registered devices, in no particular order.
    #[must_use]
    pub fn ids(&self) -> Vec<DeviceId> {
        self.read().keys().copied().collect()
    }

    /// Synchronous removal shared by [`unregister`](Self::unregister) and
    /// the drop path of [`DeviceScope`](crate::scope::DeviceScope).
    pub(crate) fn remove(&self, id: DeviceId) -> Result<Arc<D>, IotHubError> {
        let device = self.write().remove(&id).ok_or_else(|| not_found(id))?;
        device.teardown();
        tracing::debug!(%id, kind = %device.kind(), "device unregistered");
        Ok(device)
    }

    fn lookup(&self, id: DeviceId) -> Result<Arc<D>, IotHubError> {
        self.read().get(&id).cloned().ok_or_else(|| not_found(id))
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<DeviceId, Arc<D>>> {
        self.devices.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<DeviceId, Arc<D>>> {
        self.devices.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn not_found(id: DeviceId) -> IotHubError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}
