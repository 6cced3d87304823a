//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by rendering each cycle as the two-line
//! human-readable status report on the ESP-IDF logger (UART / USB-CDC
//! in production). Informational only — the host-side tooling consumes
//! the JSON record stream instead.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn yes_no(present: bool) -> &'static str {
    if present {
        "yes"
    } else {
        "no"
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::CycleReport(r) => {
                info!(
                    "humidity={:.1}% | pH={:.1} | P={} | K={} | T={:.1}C",
                    r.humidity_percent,
                    r.estimated_ph,
                    yes_no(r.phosphorus_present),
                    yes_no(r.potassium_present),
                    r.temperature_celsius,
                );
                info!(
                    "decision: {} | pump: {}",
                    r.reason,
                    if r.pump_on { "on" } else { "off" },
                );
            }
            AppEvent::SensorFailure(e) => {
                warn!("{e} — irrigation paused for this cycle");
            }
            AppEvent::Started => {
                info!("control loop started, pump off");
            }
        }
    }
}
