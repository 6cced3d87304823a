//! Runtime diagnostics.
//!
//! Keeps an in-memory ring of the most recent pump decisions plus a
//! handful of counters, collected on demand for the periodic metrics
//! log line. Nothing here is persisted — the controller runs unattended
//! and the trace only has to survive until someone attaches a serial
//! console.

use heapless::HistoryBuffer;

use crate::policy::{PumpDecision, Reason};

/// How many recent decisions the trace retains.
const TRACE_SLOTS: usize = 16;

/// One traced control cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleRecord {
    /// Monotonic cycle number (1-based).
    pub cycle: u64,
    pub activate: bool,
    pub reason: Reason,
}

/// Fixed-capacity ring of the last [`TRACE_SLOTS`] decisions.
#[derive(Default)]
pub struct DecisionTrace {
    ring: HistoryBuffer<CycleRecord, TRACE_SLOTS>,
}

impl DecisionTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decision, evicting the oldest once full.
    pub fn record(&mut self, cycle: u64, decision: PumpDecision) {
        self.ring.write(CycleRecord {
            cycle,
            activate: decision.activate,
            reason: decision.reason,
        });
    }

    /// Records from oldest to newest.
    pub fn recent(&self) -> impl Iterator<Item = &CycleRecord> {
        self.ring.oldest_ordered()
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }
}

/// Runtime metrics snapshot collected on-demand.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeMetrics {
    pub uptime_secs: u64,
    pub control_cycles: u64,
    pub sensor_failures: u32,
    pub pump_on_cycles: u64,
    pub heap_free: u32,
}

impl RuntimeMetrics {
    #[cfg(target_os = "espidf")]
    pub fn collect(
        uptime_secs: u64,
        control_cycles: u64,
        sensor_failures: u32,
        pump_on_cycles: u64,
    ) -> Self {
        let heap_free = unsafe { esp_idf_svc::sys::esp_get_free_heap_size() };
        Self {
            uptime_secs,
            control_cycles,
            sensor_failures,
            pump_on_cycles,
            heap_free,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn collect(
        uptime_secs: u64,
        control_cycles: u64,
        sensor_failures: u32,
        pump_on_cycles: u64,
    ) -> Self {
        // Synthetic heap figure so simulation exercises the same log path.
        Self {
            uptime_secs,
            control_cycles,
            sensor_failures,
            pump_on_cycles,
            heap_free: 262_144,
        }
    }
}

/// Log the panic before the default handler aborts (which resets the
/// chip on target). Installed once from `main()`.
pub fn install_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log::error!("PANIC: {info}");
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(activate: bool) -> PumpDecision {
        PumpDecision {
            activate,
            reason: if activate {
                Reason::NormalIrrigation
            } else {
                Reason::NominalHumidity
            },
        }
    }

    #[test]
    fn trace_keeps_newest_records() {
        let mut trace = DecisionTrace::new();
        for cycle in 1..=(TRACE_SLOTS as u64 + 4) {
            trace.record(cycle, decision(cycle % 2 == 0));
        }
        assert_eq!(trace.len(), TRACE_SLOTS);

        let oldest = trace.recent().next().unwrap();
        assert_eq!(oldest.cycle, 5); // cycles 1–4 evicted
        let newest = trace.recent().last().unwrap();
        assert_eq!(newest.cycle, TRACE_SLOTS as u64 + 4);
    }

    #[test]
    fn empty_trace() {
        let trace = DecisionTrace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.recent().count(), 0);
    }
}
