//! Scenes — named routines composing several dispatches.
//!
//! Steps inside a scene run concurrently when they are independent and are
//! awaited in sequence when one depends on another (the speaker must be on
//! before it can play). The first failing dispatch aborts the scene.

use iothub_domain::device::DeviceResponse;
use iothub_domain::error::IotHubError;
use iothub_domain::id::DeviceId;
use iothub_domain::message::{Message, MessageKind};

use crate::ports::Device;
use crate::registry::DeviceRegistry;

/// Switch on the light and the speaker together, then start `song`.
///
/// Returns the speaker's play confirmation.
///
/// # Errors
///
/// Returns the first error produced by any dispatch, or
/// [`IotHubError::InvalidArgument`] if `song` is empty.
#[tracing::instrument(skip(registry))]
pub async fn wake_up<D: Device>(
    registry: &DeviceRegistry<D>,
    light: DeviceId,
    speaker: DeviceId,
    song: &str,
) -> Result<DeviceResponse, IotHubError> {
    let play = Message::play_song(speaker, song)?;
    let light_on = Message::command(light, MessageKind::SwitchOn)?;
    let speaker_on = Message::command(speaker, MessageKind::SwitchOn)?;
    tokio::try_join!(registry.send(light_on), registry.send(speaker_on))?;
    let response = registry.send(play).await?;
    tracing::info!(%response, "wake up scene done");
    Ok(response)
}

/// Switch off the light and the speaker together, then flush and clean the
/// toilet together.
///
/// # Errors
///
/// Returns the first error produced by any dispatch.
#[tracing::instrument(skip(registry))]
pub async fn sleep<D: Device>(
    registry: &DeviceRegistry<D>,
    light: DeviceId,
    speaker: DeviceId,
    toilet: DeviceId,
) -> Result<(), IotHubError> {
    let light_off = Message::command(light, MessageKind::SwitchOff)?;
    let speaker_off = Message::command(speaker, MessageKind::SwitchOff)?;
    tokio::try_join!(registry.send(light_off), registry.send(speaker_off))?;

    let flush = Message::command(toilet, MessageKind::Flush)?;
    let clean = Message::command(toilet, MessageKind::Clean)?;
    tokio::try_join!(registry.send(flush), registry.send(clean))?;
    tracing::info!("sleep scene done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeDevice;
    use iothub_domain::error::ValidationError;
    use iothub_domain::power::PowerState;

    async fn setup() -> (DeviceRegistry<FakeDevice>, DeviceId, DeviceId) {
        let registry = DeviceRegistry::new();
        let light = registry.register(FakeDevice::named("light")).await.unwrap();
        let speaker = registry.register(FakeDevice::named("speaker")).await.unwrap();
        (registry, light, speaker)
    }

    #[tokio::test]
    async fn should_switch_on_both_and_play_song_on_wake_up() {
        let (registry, light, speaker) = setup().await;

        let response = wake_up(&registry, light, speaker, "X").await.unwrap();
        assert_eq!(
            response,
            DeviceResponse::Playing {
                title: "X".to_string()
            }
        );
        assert!(registry.status(light).await.unwrap().is_on());
        let speaker_status = registry.status(speaker).await.unwrap();
        assert!(speaker_status.is_on());
        assert_eq!(speaker_status.now_playing.as_deref(), Some("X"));
    }

    #[tokio::test]
    async fn should_reject_empty_song_before_dispatching() {
        let (registry, light, speaker) = setup().await;

        let result = wake_up(&registry, light, speaker, "").await;
        assert!(matches!(
            result,
            Err(IotHubError::InvalidArgument(ValidationError::EmptyPayload(_)))
        ));
        assert!(!registry.status(light).await.unwrap().is_on());
    }

    #[tokio::test]
    async fn should_fail_wake_up_when_a_device_is_missing() {
        let (registry, light, speaker) = setup().await;
        registry.unregister(speaker).await.unwrap();

        let result = wake_up(&registry, light, speaker, "X").await;
        assert!(matches!(result, Err(IotHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_switch_off_both_and_surface_toilet_errors_on_sleep() {
        let (registry, light, speaker) = setup().await;
        wake_up(&registry, light, speaker, "X").await.unwrap();
        let toilet = registry.register(FakeDevice::named("toilet")).await.unwrap();

        // the fake rejects CLEAN, which must surface as the scene's error
        let result = sleep(&registry, light, speaker, toilet).await;
        assert!(matches!(result, Err(IotHubError::UnsupportedOperation(_))));

        assert_eq!(
            registry.status(light).await.unwrap().power,
            Some(PowerState::Off)
        );
        assert_eq!(
            registry.status(speaker).await.unwrap().power,
            Some(PowerState::Off)
        );
    }
}
