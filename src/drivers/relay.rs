//! Pump relay driver.
//!
//! Single digital output driving the pump relay coil, active high.
//! The relay is a dumb actuator: the decision of *when* to run belongs
//! to the policy, and the fail-safe off on sensor failure is enforced
//! by the application service.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Off,
    On,
}

pub struct RelayDriver {
    state: RelayState,
}

impl RelayDriver {
    /// Construct the driver with the coil de-energised.
    pub fn new() -> Self {
        let mut relay = Self {
            state: RelayState::On, // force the initial write through
        };
        relay.set(false);
        relay
    }

    /// Drive the relay. Writes the pin on every call — the physical
    /// output is re-asserted once per cycle even when unchanged.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::PUMP_RELAY_GPIO, on);
        self.state = if on { RelayState::On } else { RelayState::Off };
    }

    /// Force the safe off state.
    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == RelayState::On
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_off() {
        let relay = RelayDriver::new();
        assert_eq!(relay.state(), RelayState::Off);
        assert!(!relay.is_on());
    }

    #[test]
    fn tracks_commanded_state() {
        let mut relay = RelayDriver::new();
        relay.set(true);
        assert!(relay.is_on());
        relay.off();
        assert_eq!(relay.state(), RelayState::Off);
    }
}
