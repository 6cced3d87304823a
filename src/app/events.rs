//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through
//! the [`EventSink`](super::ports::EventSink) port once per cycle.
//! Adapters on the other side decide what to do with them — render the
//! human status line, print a JSON record for the ingestion scripts, or
//! collect them in a test buffer.

use serde::Serialize;

use crate::error::SensorError;
use crate::policy::Reason;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The control loop has started; the relay was initialised off.
    Started,

    /// One decision cycle completed normally.
    CycleReport(CycleReport),

    /// Snapshot acquisition failed; the relay was forced off and the
    /// cycle skipped.
    SensorFailure(SensorError),
}

/// Everything one completed cycle produced, suitable for logging or
/// transmission. Field layout matches the host-side record schema.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CycleReport {
    pub humidity_percent: f32,
    pub temperature_celsius: f32,
    pub estimated_ph: f32,
    pub phosphorus_present: bool,
    pub potassium_present: bool,
    /// The rule that fired, serialised by variant name.
    pub reason: Reason,
    /// Relay state resulting from this cycle.
    pub pump_on: bool,
}
