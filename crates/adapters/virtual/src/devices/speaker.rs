//! Virtual speaker — responds to `SWITCH_ON`, `SWITCH_OFF` and `PLAY_SONG`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use iothub_domain::device::{DeviceKind, DeviceResponse, DeviceStatus};
use iothub_domain::error::{
    InvalidStateError, IotHubError, UnsupportedOperationError, ValidationError,
};
use iothub_domain::message::{Message, MessageKind};
use iothub_domain::power::PowerState;

#[derive(Debug, Default)]
struct SpeakerState {
    power: PowerState,
    now_playing: Option<String>,
}

/// A simulated speaker. It only plays while switched on; switching it off
/// stops playback.
pub struct VirtualSpeaker {
    name: String,
    state: Mutex<SpeakerState>,
}

impl Default for VirtualSpeaker {
    fn default() -> Self {
        Self::new("Smart Speaker")
    }
}

impl VirtualSpeaker {
    /// Create a speaker that starts switched off and silent.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(SpeakerState::default()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn power(&self) -> PowerState {
        self.lock_state().power
    }

    /// Title of the song currently playing, if any.
    #[must_use]
    pub fn now_playing(&self) -> Option<String> {
        self.lock_state().now_playing.clone()
    }

    /// Handle a message.
    ///
    /// # Errors
    ///
    /// Returns [`IotHubError::InvalidState`] for `PLAY_SONG` while the
    /// speaker is off, and [`IotHubError::UnsupportedOperation`] for
    /// toilet commands.
    pub fn handle(&self, message: &Message) -> Result<DeviceResponse, IotHubError> {
        let mut state = self.lock_state();
        match message.kind() {
            MessageKind::SwitchOn => state.power = PowerState::On,
            MessageKind::SwitchOff => {
                state.power = PowerState::Off;
                state.now_playing = None;
            }
            MessageKind::PlaySong => {
                if !state.power.is_on() {
                    return Err(InvalidStateError {
                        device: DeviceKind::Speaker,
                        kind: MessageKind::PlaySong,
                        state: state.power,
                    }
                    .into());
                }
                let title = message
                    .payload()
                    .ok_or(ValidationError::MissingPayload(MessageKind::PlaySong))?
                    .to_string();
                tracing::info!(speaker = %self.name, %title, "playing song");
                state.now_playing = Some(title.clone());
                return Ok(DeviceResponse::Playing { title });
            }
            kind => {
                return Err(UnsupportedOperationError {
                    device: DeviceKind::Speaker,
                    kind,
                }
                .into());
            }
        }
        tracing::info!(speaker = %self.name, state = %state.power, "speaker switched");
        Ok(DeviceResponse::Power { state: state.power })
    }

    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        let state = self.lock_state();
        DeviceStatus {
            now_playing: state.now_playing.clone(),
            ..DeviceStatus::switchable(DeviceKind::Speaker, &self.name, state.power)
        }
    }

    /// Stop playback, leaving the power state untouched.
    pub fn stop(&self) {
        if let Some(title) = self.lock_state().now_playing.take() {
            tracing::info!(speaker = %self.name, %title, "playback stopped");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SpeakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
