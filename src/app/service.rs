//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the decision policy configuration and the
//! diagnostics trace. It exposes a clean, hardware-agnostic API; all
//! I/O flows through port traits injected at call sites, making the
//! entire cycle testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                 │      AppService       │
//! ActuatorPort ◀──│  validate · decide    │
//!                 └──────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::diagnostics::{DecisionTrace, RuntimeMetrics};
use crate::error::SensorError;
use crate::policy::{self, PumpDecision};

use super::events::{AppEvent, CycleReport};
use super::ports::{ActuatorPort, EventSink, SensorPort};

/// Result of one pass through the control cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// A valid snapshot was acquired and the policy ran.
    Decided(PumpDecision),
    /// The DHT read failed; the relay was forced off and the policy
    /// was not evaluated.
    SensorFailure,
}

/// Orchestrates acquire → validate → decide → actuate → report.
pub struct AppService {
    config: SystemConfig,
    trace: DecisionTrace,
    cycle_count: u64,
    sensor_failures: u32,
    pump_on_cycles: u64,
}

impl AppService {
    /// Construct the service from configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            trace: DecisionTrace::new(),
            cycle_count: 0,
            sensor_failures: 0,
            pump_on_cycles: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the actuator in its defined startup state (relay off) and
    /// announce the loop start.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.pump_off();
        sink.emit(&AppEvent::Started);
        info!("AppService started, relay initialised off");
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.cycle_count += 1;

        // 1. Acquire one snapshot via SensorPort.
        let snapshot = hw.read_snapshot();

        // 2. Validate. On DHT failure the relay goes to the safe off
        //    state *before* the early return, then the loop retries.
        if !snapshot.is_valid() {
            self.sensor_failures += 1;
            hw.pump_off();
            warn!("DHT read failed — relay forced off, skipping this cycle");
            sink.emit(&AppEvent::SensorFailure(SensorError::DhtReadFailed));
            return CycleOutcome::SensorFailure;
        }

        // 3. Evaluate the pure policy.
        let decision = policy::decide(&self.config.thresholds, &snapshot);

        // 4. Apply the command via ActuatorPort.
        hw.set_pump(decision.activate);
        if decision.activate {
            self.pump_on_cycles += 1;
        }
        self.trace.record(self.cycle_count, decision);

        // 5. Report.
        sink.emit(&AppEvent::CycleReport(CycleReport {
            humidity_percent: snapshot.humidity_percent,
            temperature_celsius: snapshot.temperature_celsius,
            estimated_ph: snapshot.estimated_ph,
            phosphorus_present: snapshot.phosphorus_present,
            potassium_present: snapshot.potassium_present,
            reason: decision.reason,
            pump_on: decision.activate,
        }));

        CycleOutcome::Decided(decision)
    }

    /// How long the loop should sleep after `outcome`, in milliseconds.
    pub fn delay_after_ms(&self, outcome: &CycleOutcome) -> u32 {
        match outcome {
            CycleOutcome::Decided(_) => self.config.control_loop_interval_ms,
            CycleOutcome::SensorFailure => self.config.sensor_retry_delay_ms,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Total control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// DHT read failures seen since startup.
    pub fn sensor_failures(&self) -> u32 {
        self.sensor_failures
    }

    /// The live configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Recent-decision ring buffer.
    pub fn trace(&self) -> &DecisionTrace {
        &self.trace
    }

    /// Collect a runtime metrics snapshot for periodic logging.
    pub fn metrics(&self, uptime_secs: u64) -> RuntimeMetrics {
        RuntimeMetrics::collect(
            uptime_secs,
            self.cycle_count,
            self.sensor_failures,
            self.pump_on_cycles,
        )
    }
}
