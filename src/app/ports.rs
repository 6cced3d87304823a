//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the sensor hub, the relay driver, event sinks)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and the whole control cycle runs under test with mocks.

use crate::policy::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Take one instantaneous reading of every sensor.
    ///
    /// No caching or smoothing — every call hits the hardware. A DHT
    /// communication failure surfaces as NaN humidity/temperature in
    /// the snapshot, never as a panic.
    fn read_snapshot(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the pump relay.
pub trait ActuatorPort {
    /// Drive the relay (true = pump running).
    fn set_pump(&mut self, on: bool);

    /// Force the relay to the safe off state.
    fn pump_off(&mut self);

    /// Whether the relay is currently energised.
    fn is_pump_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go — serial log,
/// structured record stream, or a test buffer.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
