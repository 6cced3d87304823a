//! JSON record sink adapter.
//!
//! Emits one JSON object per completed cycle under the `record` log
//! target. The host-side ingestion scripts tail the serial console and
//! load these lines into the measurement database; the firmware itself
//! never parses them back.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that serialises every [`CycleReport`](crate::app::events::CycleReport)
/// as a single JSON line.
pub struct JsonLineSink;

impl JsonLineSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for JsonLineSink {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::CycleReport(r) = event {
            match serde_json::to_string(r) {
                Ok(line) => info!(target: "record", "{line}"),
                Err(e) => warn!("record serialisation failed: {e}"),
            }
        }
    }
}
