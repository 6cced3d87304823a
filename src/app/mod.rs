//! Application layer — the hexagonal core.
//!
//! Port traits, outbound events, and the [`service::AppService`] that
//! orchestrates one acquire→decide→actuate→report cycle.

pub mod events;
pub mod ports;
pub mod service;
