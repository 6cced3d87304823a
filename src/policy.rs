//! Irrigation decision policy.
//!
//! The heart of the firmware: a pure, stateless mapping from one sensor
//! snapshot to a pump command plus a human-readable reason. No I/O, no
//! retained state between cycles — the snapshot fully determines the
//! decision, so the whole module tests on the host.

use core::fmt;

use serde::Serialize;

use crate::config::IrrigationThresholds;

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every sensor, valid for one cycle.
#[derive(Debug, Clone, Copy)]
pub struct SensorSnapshot {
    /// Relative humidity (0–100 %). `NAN` when the DHT read failed.
    pub humidity_percent: f32,
    /// Air temperature (°C). Informative only; `NAN` on read failure.
    pub temperature_celsius: f32,
    /// pH estimate derived from the LDR proxy (always 0.0–14.0).
    pub estimated_ph: f32,
    /// Phosphorus sensor contact closed (input read low).
    pub phosphorus_present: bool,
    /// Potassium sensor contact closed (input read low).
    pub potassium_present: bool,
}

impl SensorSnapshot {
    /// A snapshot is usable only when the DHT produced real numbers.
    /// Callers must check this before handing the snapshot to [`decide`].
    pub fn is_valid(&self) -> bool {
        !self.humidity_percent.is_nan() && !self.temperature_celsius.is_nan()
    }
}

// ---------------------------------------------------------------------------
// Decision output
// ---------------------------------------------------------------------------

/// Why the policy chose to run or hold the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reason {
    /// Humidity below the critical threshold; irrigate unconditionally.
    EmergencyLowHumidity,
    /// pH outside the critical band; irrigating would be chemically unsafe.
    CriticalPh,
    /// Humidity low, pH ideal, both nutrients present.
    NormalIrrigation,
    /// Humidity low, pH ideal, exactly one nutrient present.
    ReducedIrrigation,
    /// Humidity low, pH ideal, no nutrients detected.
    MinimalIrrigation,
    /// Humidity low but pH between the critical and ideal bounds.
    PhOutsideIdealBand,
    /// Humidity above the stop threshold.
    HighHumidity,
    /// Humidity inside the dead-band; nothing to do.
    NominalHumidity,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmergencyLowHumidity => write!(f, "emergency: critically low humidity"),
            Self::CriticalPh => write!(f, "critical pH out of range"),
            Self::NormalIrrigation => {
                write!(f, "normal irrigation: humidity low, pH ideal, P & K present")
            }
            Self::ReducedIrrigation => {
                write!(f, "reduced irrigation: humidity low, pH ideal, one of P/K present")
            }
            Self::MinimalIrrigation => {
                write!(f, "minimal irrigation: humidity low, pH ideal, P & K absent")
            }
            Self::PhOutsideIdealBand => write!(f, "humidity low but pH outside ideal band"),
            Self::HighHumidity => write!(f, "humidity high, stopping"),
            Self::NominalHumidity => write!(f, "humidity nominal, pump idle"),
        }
    }
}

/// The policy's verdict for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpDecision {
    /// Whether the pump relay should be energised.
    pub activate: bool,
    /// Justification, rendered in the status line.
    pub reason: Reason,
}

// ---------------------------------------------------------------------------
// Rule cascade
// ---------------------------------------------------------------------------

/// Evaluate the prioritised rule cascade for one snapshot.
///
/// First matching rule wins; later rules are not evaluated. Ordering:
/// emergency survival > chemical safety > nutrient-aware irrigation >
/// over-watering stop > idle. The caller must have validated the
/// snapshot with [`SensorSnapshot::is_valid`].
pub fn decide(t: &IrrigationThresholds, snap: &SensorSnapshot) -> PumpDecision {
    let humidity = snap.humidity_percent;
    let ph = snap.estimated_ph;

    // 1. Emergency override: crop survival dominates pH and nutrients.
    if humidity < t.humidity_critical_low {
        return PumpDecision {
            activate: true,
            reason: Reason::EmergencyLowHumidity,
        };
    }

    // 2. Critical pH shutoff.
    if ph < t.ph_critical_min || ph > t.ph_critical_max {
        return PumpDecision {
            activate: false,
            reason: Reason::CriticalPh,
        };
    }

    // 3. Low (non-critical) humidity branch.
    if humidity < t.humidity_min_to_irrigate {
        if ph >= t.ph_ideal_min && ph <= t.ph_ideal_max {
            // The relay is binary: all three nutrient cases actuate
            // identically and only the logged reason differs. Variable
            // intensity is an extension point, not current behaviour.
            let reason = match (snap.phosphorus_present, snap.potassium_present) {
                (true, true) => Reason::NormalIrrigation,
                (false, false) => Reason::MinimalIrrigation,
                _ => Reason::ReducedIrrigation,
            };
            return PumpDecision {
                activate: true,
                reason,
            };
        }
        return PumpDecision {
            activate: false,
            reason: Reason::PhOutsideIdealBand,
        };
    }

    // 4. High humidity stop.
    if humidity > t.humidity_high_stop {
        return PumpDecision {
            activate: false,
            reason: Reason::HighHumidity,
        };
    }

    // 5. Dead-band default: humidity between the irrigate and stop
    // thresholds, pH not critical. Hold the relay off.
    PumpDecision {
        activate: false,
        reason: Reason::NominalHumidity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> IrrigationThresholds {
        IrrigationThresholds::default()
    }

    fn snap(humidity: f32, ph: f32, p: bool, k: bool) -> SensorSnapshot {
        SensorSnapshot {
            humidity_percent: humidity,
            temperature_celsius: 24.0,
            estimated_ph: ph,
            phosphorus_present: p,
            potassium_present: k,
        }
    }

    #[test]
    fn emergency_overrides_critical_ph() {
        let d = decide(&thresholds(), &snap(10.0, 13.0, false, false));
        assert!(d.activate);
        assert_eq!(d.reason, Reason::EmergencyLowHumidity);
    }

    #[test]
    fn emergency_overrides_nutrient_state() {
        for (p, k) in [(false, false), (true, false), (false, true), (true, true)] {
            let d = decide(&thresholds(), &snap(14.9, 6.0, p, k));
            assert!(d.activate, "P={p} K={k}");
            assert_eq!(d.reason, Reason::EmergencyLowHumidity);
        }
    }

    #[test]
    fn critical_ph_stops_pump_when_not_emergency() {
        let low = decide(&thresholds(), &snap(18.0, 4.4, true, true));
        assert!(!low.activate);
        assert_eq!(low.reason, Reason::CriticalPh);

        let high = decide(&thresholds(), &snap(18.0, 8.0, true, true));
        assert!(!high.activate);
        assert_eq!(high.reason, Reason::CriticalPh);
    }

    #[test]
    fn low_humidity_ideal_ph_activates_for_every_nutrient_combination() {
        let t = thresholds();
        let cases = [
            (true, true, Reason::NormalIrrigation),
            (true, false, Reason::ReducedIrrigation),
            (false, true, Reason::ReducedIrrigation),
            (false, false, Reason::MinimalIrrigation),
        ];
        for (p, k, reason) in cases {
            let d = decide(&t, &snap(18.0, 6.0, p, k));
            assert!(d.activate, "P={p} K={k}");
            assert_eq!(d.reason, reason);
        }
    }

    #[test]
    fn low_humidity_ph_between_critical_and_ideal_stops() {
        // Acid side: 4.5 <= pH < 5.5
        let d = decide(&thresholds(), &snap(18.0, 5.0, true, true));
        assert!(!d.activate);
        assert_eq!(d.reason, Reason::PhOutsideIdealBand);

        // Alkaline side: 6.5 < pH <= 7.5
        let d = decide(&thresholds(), &snap(18.0, 7.0, true, true));
        assert!(!d.activate);
        assert_eq!(d.reason, Reason::PhOutsideIdealBand);
    }

    #[test]
    fn high_humidity_stops() {
        let d = decide(&thresholds(), &snap(45.0, 6.0, true, true));
        assert!(!d.activate);
        assert_eq!(d.reason, Reason::HighHumidity);
    }

    #[test]
    fn dead_band_holds_pump_off() {
        let d = decide(&thresholds(), &snap(25.0, 6.0, true, true));
        assert!(!d.activate);
        assert_eq!(d.reason, Reason::NominalHumidity);
    }

    // ── Boundary pinning: the exact inequalities matter ──────────

    #[test]
    fn humidity_exactly_critical_low_is_not_emergency() {
        // Strict `<` on the emergency rule.
        let d = decide(&thresholds(), &snap(15.0, 6.0, true, true));
        assert_eq!(d.reason, Reason::NormalIrrigation);
        assert!(d.activate);
    }

    #[test]
    fn humidity_exactly_min_to_irrigate_falls_into_dead_band() {
        let d = decide(&thresholds(), &snap(20.0, 6.0, true, true));
        assert!(!d.activate);
        assert_eq!(d.reason, Reason::NominalHumidity);
    }

    #[test]
    fn humidity_exactly_high_stop_falls_into_dead_band() {
        // Strict `>` on the high-humidity rule.
        let d = decide(&thresholds(), &snap(30.0, 6.0, true, true));
        assert!(!d.activate);
        assert_eq!(d.reason, Reason::NominalHumidity);
    }

    #[test]
    fn ph_critical_bounds_are_inclusive_safe() {
        // pH exactly 4.5 / 7.5 is not critical.
        let d = decide(&thresholds(), &snap(18.0, 4.5, true, true));
        assert_eq!(d.reason, Reason::PhOutsideIdealBand);

        let d = decide(&thresholds(), &snap(18.0, 7.5, true, true));
        assert_eq!(d.reason, Reason::PhOutsideIdealBand);
    }

    #[test]
    fn ph_ideal_bounds_are_inclusive() {
        for ph in [5.5, 6.5] {
            let d = decide(&thresholds(), &snap(18.0, ph, true, true));
            assert!(d.activate, "pH {ph} is inside the ideal band");
            assert_eq!(d.reason, Reason::NormalIrrigation);
        }
    }

    #[test]
    fn decision_is_idempotent() {
        let s = snap(17.3, 5.9, true, false);
        let t = thresholds();
        assert_eq!(decide(&t, &s), decide(&t, &s));
    }

    #[test]
    fn reason_strings_match_status_line_vocabulary() {
        assert!(Reason::EmergencyLowHumidity.to_string().contains("emergency"));
        assert!(Reason::CriticalPh.to_string().contains("critical pH"));
        assert!(Reason::MinimalIrrigation.to_string().contains("minimal"));
        assert!(Reason::ReducedIrrigation.to_string().contains("reduced"));
        assert!(Reason::NominalHumidity.to_string().contains("idle"));
    }

    #[test]
    fn nan_humidity_is_invalid() {
        let mut s = snap(18.0, 6.0, true, true);
        assert!(s.is_valid());
        s.humidity_percent = f32::NAN;
        assert!(!s.is_valid());
    }

    #[test]
    fn nan_temperature_is_invalid() {
        let mut s = snap(18.0, 6.0, true, true);
        s.temperature_celsius = f32::NAN;
        assert!(!s.is_valid());
    }
}
