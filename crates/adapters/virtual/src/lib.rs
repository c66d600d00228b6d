//! # iothub-adapter-virtual
//!
//! Virtual devices implementing the [`Device`](iothub_app::ports::Device) port,
//! for demonstration and testing.
//!
//! ## Provided devices
//!
//! | Device | Kind | Accepts |
//! |--------|------|---------|
//! | [`VirtualLight`] | `light` | `SWITCH_ON` / `SWITCH_OFF` |
//! | [`VirtualSpeaker`] | `speaker` | `SWITCH_ON` / `SWITCH_OFF` / `PLAY_SONG` (only while on) |
//! | [`VirtualToilet`] | `toilet` | `FLUSH` / `CLEAN` |
//!
//! Any other message kind fails with `UnsupportedOperation`.
//!
//! ## Dependency rule
//!
//! Depends on `iothub-app` (port traits) and `iothub-domain` only.

mod devices;

pub use devices::{VirtualDevice, VirtualLight, VirtualSpeaker, VirtualToilet};
