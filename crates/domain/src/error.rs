//! Common error types used across the workspace.
//!
//! Each failure category carries a typed source error and converts into
//! [`IotHubError`] through `#[from]`, so callers can match on the category
//! and still inspect the details.

use crate::device::DeviceKind;
use crate::message::MessageKind;
use crate::power::PowerState;

/// Top-level error returned by every fallible operation in iothub.
#[derive(Debug, thiserror::Error)]
pub enum IotHubError {
    /// Malformed message or invalid device, caught at construction or
    /// registration time.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Unknown or stale device identifier.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The device does not accept this message kind.
    #[error(transparent)]
    UnsupportedOperation(#[from] UnsupportedOperationError),

    /// The device accepts this message kind, but not in its current state.
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("{0} requires a payload")]
    MissingPayload(MessageKind),
    #[error("{0} does not accept a payload")]
    UnexpectedPayload(MessageKind),
    #[error("{0} payload must not be empty")]
    EmptyPayload(MessageKind),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A device received a message kind it does not handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device} does not support {kind}")]
pub struct UnsupportedOperationError {
    pub device: DeviceKind,
    pub kind: MessageKind,
}

/// A device received a message kind it handles, but its precondition failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device} cannot handle {kind} while {state}")]
pub struct InvalidStateError {
    pub device: DeviceKind,
    pub kind: MessageKind,
    pub state: PowerState,
}
