//! Soil pH estimate via LDR proxy.
//!
//! The reference hardware has no real pH probe: an LDR in a voltage
//! divider stands in for one, and the raw 12-bit ADC value is linearly
//! rescaled onto the 0–14 pH scale. Calibration is acknowledged as
//! approximate; adjust [`adc_to_ph`] when the probe is characterised.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 channel 7 via the oneshot API (initialised
//! by hw_init). On host/test: reads from a static AtomicU16.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Full-scale value of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

static SIM_PH_ADC: AtomicU16 = AtomicU16::new(2048);

/// Inject a simulated raw ADC value (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(raw: u16) {
    SIM_PH_ADC.store(raw, Ordering::Relaxed);
}

/// One pH estimate with the raw reading it came from.
#[derive(Debug, Clone, Copy)]
pub struct PhReading {
    pub raw: u16,
    pub ph: f32,
}

pub struct PhProbe {
    _adc_gpio: i32,
}

impl PhProbe {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&mut self) -> PhReading {
        let raw = self.read_adc();
        PhReading {
            raw,
            ph: adc_to_ph(raw),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(pins::PH_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_PH_ADC.load(Ordering::Relaxed)
    }
}

/// Linear map from the 12-bit ADC domain onto the 0–14 pH scale.
/// The clamp keeps the invariant `0.0 <= ph <= 14.0` even for an
/// out-of-spec raw value.
pub fn adc_to_ph(raw: u16) -> f32 {
    f32::from(raw.min(ADC_MAX)) * 14.0 / f32::from(ADC_MAX)
}
