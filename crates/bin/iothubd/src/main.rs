//! # iothubd — iothub daemon
//!
//! Composition root that wires the registry and the virtual devices together
//! and runs the scenes.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Register the virtual light, speaker and toilet inside a `DeviceScope`
//! - Run the wake up scene, then the sleep scene
//! - Release every registration whether or not the scenes succeeded
//! - Report the elapsed time
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::time::Instant;

use iothub_adapter_virtual::{VirtualDevice, VirtualLight, VirtualSpeaker, VirtualToilet};
use iothub_app::registry::DeviceRegistry;
use iothub_app::scenes;
use iothub_app::scope::DeviceScope;
use iothub_domain::error::IotHubError;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let start = Instant::now();
    let registry = DeviceRegistry::new();
    let mut scope = DeviceScope::new(&registry);

    let outcome = run(&registry, &mut scope, &config).await;
    let released = scope.release().await;

    tracing::info!(elapsed = ?start.elapsed(), "programs finished");
    outcome?;
    released?;
    Ok(())
}

async fn run<'r>(
    registry: &'r DeviceRegistry<VirtualDevice>,
    scope: &mut DeviceScope<'r, VirtualDevice>,
    config: &Config,
) -> Result<(), IotHubError> {
    let light = scope
        .register(VirtualLight::new(&config.devices.light).into())
        .await?;
    let speaker = scope
        .register(VirtualSpeaker::new(&config.devices.speaker).into())
        .await?;
    let toilet = scope
        .register(VirtualToilet::new(&config.devices.toilet).into())
        .await?;
    tracing::info!(devices = registry.len(), "devices registered");

    scenes::wake_up(registry, light, speaker, &config.scenes.wake_song).await?;
    scenes::sleep(registry, light, speaker, toilet).await?;
    Ok(())
}
