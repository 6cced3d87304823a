//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the relay driver, exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. This is the only module in the
//! system that touches actual hardware; on non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::policy::SensorSnapshot;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    relay: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub, relay: RelayDriver) -> Self {
        Self { sensor_hub, relay }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_snapshot(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_pump(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn pump_off(&mut self) {
        self.relay.off();
    }

    fn is_pump_on(&self) -> bool {
        self.relay.is_on()
    }
}
