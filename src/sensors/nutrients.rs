//! Nutrient presence inputs — phosphorus and potassium contacts.
//!
//! Each sensor is a momentary contact wired to a GPIO with the internal
//! pull-up enabled: the line idles high and a closed contact pulls it
//! low, so presence corresponds to a LOW read.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real GPIO levels via hw_init helpers.
//! On host/test: reads simulated line levels from atomics.

use core::sync::atomic::AtomicBool;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

// Simulated line levels. Default high = pulled up = nothing present.
static SIM_P_LEVEL: AtomicBool = AtomicBool::new(true);
static SIM_K_LEVEL: AtomicBool = AtomicBool::new(true);

/// Simulate the phosphorus contact (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_phosphorus(present: bool) {
    SIM_P_LEVEL.store(!present, Ordering::Relaxed);
}

/// Simulate the potassium contact (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_potassium(present: bool) {
    SIM_K_LEVEL.store(!present, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Phosphorus,
    Potassium,
}

#[derive(Debug, Clone, Copy)]
pub struct NutrientReading {
    pub nutrient: Nutrient,
    pub present: bool,
}

pub struct NutrientButtons {
    gpio_p: i32,
    gpio_k: i32,
}

impl NutrientButtons {
    pub fn new(phosphorus_gpio: i32, potassium_gpio: i32) -> Self {
        Self {
            gpio_p: phosphorus_gpio,
            gpio_k: potassium_gpio,
        }
    }

    /// Read both contacts. Active-low: a LOW line means present.
    pub fn read(&mut self) -> (NutrientReading, NutrientReading) {
        (
            NutrientReading {
                nutrient: Nutrient::Phosphorus,
                present: level_to_presence(self.read_level(self.gpio_p, &SIM_P_LEVEL)),
            },
            NutrientReading {
                nutrient: Nutrient::Potassium,
                present: level_to_presence(self.read_level(self.gpio_k, &SIM_K_LEVEL)),
            },
        )
    }

    #[cfg(target_os = "espidf")]
    fn read_level(&self, gpio: i32, _sim: &AtomicBool) -> bool {
        hw_init::gpio_read(gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_level(&self, _gpio: i32, sim: &AtomicBool) -> bool {
        sim.load(Ordering::Relaxed)
    }
}

/// Pull-up semantics: the contact closing drives the line low.
fn level_to_presence(line_high: bool) -> bool {
    !line_high
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_contact_means_present() {
        assert!(level_to_presence(false));
        assert!(!level_to_presence(true));
    }
}
