//! # iothub-app
//!
//! Application layer — the registry/dispatcher and the **device port**.
//!
//! ## Responsibilities
//! - Define the [`Device`](ports::Device) port trait that device adapters implement
//! - Provide the [`DeviceRegistry`](registry::DeviceRegistry): identity assignment,
//!   ownership of registered devices, and message dispatch
//! - Provide [`DeviceScope`](scope::DeviceScope), which guarantees that every
//!   registration made through it is released on all exit paths
//! - Provide the **scenes** (wake up, sleep) that compose dispatches into
//!   concurrent and sequenced steps
//!
//! ## Dependency rule
//! Depends on `iothub-domain` only (plus `tokio` for joining futures).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod registry;
pub mod scenes;
pub mod scope;

#[cfg(test)]
mod fakes;
