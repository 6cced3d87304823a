//! Adapters — concrete implementations of the port traits.

pub mod hardware;
pub mod json_sink;
pub mod log_sink;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Fans one event stream out to two sinks (e.g. human log + JSON record).
pub struct TeeSink<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> TeeSink<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: EventSink, B: EventSink> EventSink for TeeSink<A, B> {
    fn emit(&mut self, event: &AppEvent) {
        self.first.emit(event);
        self.second.emit(event);
    }
}
