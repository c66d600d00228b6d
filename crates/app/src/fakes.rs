//! In-memory device double shared by the unit tests of this crate.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use iothub_domain::device::{DeviceKind, DeviceResponse, DeviceStatus};
use iothub_domain::error::{InvalidStateError, IotHubError, UnsupportedOperationError};
use iothub_domain::message::{Message, MessageKind};
use iothub_domain::power::PowerState;

/// Behaves like a speaker for switch and play messages, like a toilet for
/// flush and clean, and counts teardowns through a shared counter.
pub struct FakeDevice {
    name: String,
    power: Mutex<PowerState>,
    playing: Mutex<Option<String>>,
    teardowns: Arc<AtomicUsize>,
}

impl FakeDevice {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            power: Mutex::new(PowerState::Off),
            playing: Mutex::new(None),
            teardowns: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn teardown_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.teardowns)
    }
}

impl Default for FakeDevice {
    fn default() -> Self {
        Self::named("fake")
    }
}

impl crate::ports::Device for FakeDevice {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Speaker
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, message: &Message) -> Result<DeviceResponse, IotHubError> {
        let mut power = self.power.lock().unwrap();
        match message.kind() {
            MessageKind::SwitchOn => *power = PowerState::On,
            MessageKind::SwitchOff => *power = PowerState::Off,
            MessageKind::PlaySong if power.is_on() => {
                let title = message.payload().unwrap().to_string();
                *self.playing.lock().unwrap() = Some(title.clone());
                return Ok(DeviceResponse::Playing { title });
            }
            MessageKind::PlaySong => {
                return Err(InvalidStateError {
                    device: DeviceKind::Speaker,
                    kind: MessageKind::PlaySong,
                    state: *power,
                }
                .into());
            }
            MessageKind::Flush => return Ok(DeviceResponse::Flushed),
            MessageKind::Clean => {
                return Err(UnsupportedOperationError {
                    device: DeviceKind::Speaker,
                    kind: MessageKind::Clean,
                }
                .into());
            }
        }
        Ok(DeviceResponse::Power { state: *power })
    }

    fn status(&self) -> DeviceStatus {
        let mut status =
            DeviceStatus::switchable(DeviceKind::Speaker, &self.name, *self.power.lock().unwrap());
        status.now_playing = self.playing.lock().unwrap().clone();
        status
    }

    fn teardown(&self) {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
    }
}
