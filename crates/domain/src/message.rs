//! Message — an immutable instruction addressed to a registered device.
//!
//! A message is validated once, when it is built: the payload must be
//! present exactly when the [`MessageKind`] requires one. Devices can
//! therefore rely on [`Message::payload`] being consistent with
//! [`Message::kind`].

use serde::{Deserialize, Serialize};

use crate::error::{IotHubError, ValidationError};
use crate::id::DeviceId;

/// Closed set of commands a device may receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKind {
    SwitchOn,
    SwitchOff,
    /// Payload: the song title.
    PlaySong,
    Flush,
    Clean,
}

impl MessageKind {
    /// Whether messages of this kind carry a payload.
    #[must_use]
    pub fn requires_payload(self) -> bool {
        match self {
            Self::PlaySong => true,
            Self::SwitchOn | Self::SwitchOff | Self::Flush | Self::Clean => false,
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SwitchOn => f.write_str("SWITCH_ON"),
            Self::SwitchOff => f.write_str("SWITCH_OFF"),
            Self::PlaySong => f.write_str("PLAY_SONG"),
            Self::Flush => f.write_str("FLUSH"),
            Self::Clean => f.write_str("CLEAN"),
        }
    }
}

/// An instruction for the device identified by `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    target: DeviceId,
    kind: MessageKind,
    payload: Option<String>,
}

impl Message {
    /// Build a message, checking that `payload` agrees with `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::InvalidArgument`] when the kind requires a
    /// payload and none (or an empty one) is given, or when the kind takes
    /// no payload and one is given.
    pub fn new(
        target: DeviceId,
        kind: MessageKind,
        payload: Option<String>,
    ) -> Result<Self, IotHubError> {
        match (kind.requires_payload(), payload.as_deref()) {
            (true, None) => return Err(ValidationError::MissingPayload(kind).into()),
            (true, Some("")) => return Err(ValidationError::EmptyPayload(kind).into()),
            (false, Some(_)) => return Err(ValidationError::UnexpectedPayload(kind).into()),
            _ => {}
        }
        Ok(Self {
            target,
            kind,
            payload,
        })
    }

    /// Build a payload-less message.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::InvalidArgument`] if `kind` requires a payload.
    pub fn command(target: DeviceId, kind: MessageKind) -> Result<Self, IotHubError> {
        Self::new(target, kind, None)
    }

    /// Build a [`MessageKind::PlaySong`] message.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::InvalidArgument`] if `title` is empty.
    pub fn play_song(target: DeviceId, title: impl Into<String>) -> Result<Self, IotHubError> {
        Self::new(target, MessageKind::PlaySong, Some(title.into()))
    }

    #[must_use]
    pub fn target(&self) -> DeviceId {
        self.target
    }

    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.payload {
            Some(payload) => write!(f, "{}({payload:?}) -> {}", self.kind, self.target),
            None => write!(f, "{} -> {}", self.kind, self.target),
        }
    }
}
