//! SoilGuard firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host-side
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pins;
pub mod policy;

// Hardware-facing modules; the actual peripheral access is guarded by
// cfg attributes inside, so these compile on the host as well.
pub mod adapters;
pub mod drivers;
pub mod sensors;
