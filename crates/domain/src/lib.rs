//! # iothub-domain
//!
//! Pure domain model for the iothub home automation controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Messages** (typed, immutable instructions addressed to a device)
//! - Define **Device kinds** and the values a device reports back
//!   (power state, dispatch responses, status snapshots)
//! - Enforce the message payload invariant at construction time
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! The device capability itself is a port trait in the `app` crate.

pub mod error;
pub mod id;

pub mod device;
pub mod message;
pub mod power;
