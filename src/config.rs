//! System configuration parameters.
//!
//! All tunable parameters for the SoilGuard controller. Fixed at build
//! time — there is no provisioning or persistence path; `Default` is
//! the single source of truth for the deployed values.

use serde::{Deserialize, Serialize};

/// Decision thresholds for the irrigation policy.
///
/// The gap between `humidity_min_to_irrigate` and `humidity_high_stop`
/// is a deliberate dead-band that keeps the relay from cycling rapidly
/// around a single setpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IrrigationThresholds {
    /// Below this humidity (%) irrigation is forced on, regardless of pH.
    pub humidity_critical_low: f32,
    /// Below this humidity (%) the pump is a candidate for normal irrigation.
    pub humidity_min_to_irrigate: f32,
    /// Above this humidity (%) irrigation is forced off.
    pub humidity_high_stop: f32,
    /// Lower bound of the ideal pH band.
    pub ph_ideal_min: f32,
    /// Upper bound of the ideal pH band.
    pub ph_ideal_max: f32,
    /// Below this pH the soil is chemically unsafe to irrigate.
    pub ph_critical_min: f32,
    /// Above this pH the soil is chemically unsafe to irrigate.
    pub ph_critical_max: f32,
}

impl Default for IrrigationThresholds {
    fn default() -> Self {
        Self {
            humidity_critical_low: 15.0,
            humidity_min_to_irrigate: 20.0,
            humidity_high_stop: 30.0,
            ph_ideal_min: 5.5,
            ph_ideal_max: 6.5,
            ph_critical_min: 4.5,
            ph_critical_max: 7.5,
        }
    }
}

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Irrigation policy thresholds.
    pub thresholds: IrrigationThresholds,

    // --- Timing ---
    /// Steady-state delay between decision cycles (milliseconds).
    pub control_loop_interval_ms: u32,
    /// One-time settle delay after peripheral init (milliseconds).
    pub startup_settle_ms: u32,
    /// Delay before retrying after a DHT read failure (milliseconds).
    pub sensor_retry_delay_ms: u32,
    /// Runtime metrics are logged every this many cycles.
    pub metrics_interval_cycles: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            thresholds: IrrigationThresholds::default(),
            control_loop_interval_ms: 3000,
            startup_settle_ms: 2000,
            sensor_retry_delay_ms: 2000,
            metrics_interval_cycles: 20, // roughly once a minute
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.startup_settle_ms > 0);
        assert!(c.sensor_retry_delay_ms > 0);
        assert!(c.metrics_interval_cycles > 0);
    }

    #[test]
    fn humidity_bands_are_ordered() {
        let t = IrrigationThresholds::default();
        assert!(
            t.humidity_critical_low < t.humidity_min_to_irrigate,
            "emergency threshold must sit below the normal-irrigation threshold"
        );
        assert!(
            t.humidity_min_to_irrigate < t.humidity_high_stop,
            "dead-band requires a gap between irrigate and stop thresholds"
        );
    }

    #[test]
    fn ph_ideal_band_nested_in_critical_band() {
        let t = IrrigationThresholds::default();
        assert!(t.ph_critical_min < t.ph_ideal_min);
        assert!(t.ph_ideal_max < t.ph_critical_max);
        assert!(t.ph_ideal_min < t.ph_ideal_max);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert!((c.thresholds.humidity_critical_low - c2.thresholds.humidity_critical_low).abs() < 0.001);
        assert!((c.thresholds.ph_critical_max - c2.thresholds.ph_critical_max).abs() < 0.001);
        assert_eq!(c.control_loop_interval_ms, c2.control_loop_interval_ms);
        assert_eq!(c.sensor_retry_delay_ms, c2.sensor_retry_delay_ms);
    }
}
