//! Integration tests: AppService → policy → actuator, through mock ports.

use soilguard::app::events::AppEvent;
use soilguard::app::ports::{ActuatorPort, EventSink, SensorPort};
use soilguard::app::service::{AppService, CycleOutcome};
use soilguard::config::SystemConfig;
use soilguard::error::SensorError;
use soilguard::policy::SensorSnapshot;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActCall {
    SetPump(bool),
    PumpOff,
}

struct MockHw {
    snapshot: SensorSnapshot,
    pump_on: bool,
    calls: Vec<ActCall>,
}

impl MockHw {
    fn new(snapshot: SensorSnapshot) -> Self {
        Self {
            snapshot,
            pump_on: false,
            calls: Vec::new(),
        }
    }
}

impl SensorPort for MockHw {
    fn read_snapshot(&mut self) -> SensorSnapshot {
        self.snapshot
    }
}

impl ActuatorPort for MockHw {
    fn set_pump(&mut self, on: bool) {
        self.pump_on = on;
        self.calls.push(ActCall::SetPump(on));
    }
    fn pump_off(&mut self) {
        self.pump_on = false;
        self.calls.push(ActCall::PumpOff);
    }
    fn is_pump_on(&self) -> bool {
        self.pump_on
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

fn snapshot(humidity: f32, ph: f32, p: bool, k: bool) -> SensorSnapshot {
    SensorSnapshot {
        humidity_percent: humidity,
        temperature_celsius: 24.0,
        estimated_ph: ph,
        phosphorus_present: p,
        potassium_present: k,
    }
}

fn run_one(snapshot: SensorSnapshot) -> (MockHw, RecordingSink, CycleOutcome) {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new(snapshot);
    let mut sink = RecordingSink::default();
    let outcome = app.run_cycle(&mut hw, &mut sink);
    (hw, sink, outcome)
}

fn report_of(sink: &RecordingSink) -> &soilguard::app::events::CycleReport {
    match &sink.events[..] {
        [AppEvent::CycleReport(r)] => r,
        other => panic!("expected exactly one CycleReport, got {other:?}"),
    }
}

// ── End-to-end scenarios ──────────────────────────────────────

#[test]
fn scenario_emergency_irrigation() {
    let (hw, sink, _) = run_one(snapshot(10.0, 6.0, true, true));
    assert!(hw.is_pump_on());
    let r = report_of(&sink);
    assert!(r.pump_on);
    assert!(r.reason.to_string().contains("emergency"));
}

#[test]
fn scenario_nominal_humidity_idles() {
    let (hw, sink, _) = run_one(snapshot(25.0, 6.0, true, true));
    assert!(!hw.is_pump_on());
    assert!(report_of(&sink).reason.to_string().contains("idle"));
}

#[test]
fn scenario_minimal_irrigation_without_nutrients() {
    let (hw, sink, _) = run_one(snapshot(18.0, 6.0, false, false));
    assert!(hw.is_pump_on());
    assert!(report_of(&sink).reason.to_string().contains("minimal"));
}

#[test]
fn scenario_critical_ph_blocks_irrigation() {
    let (hw, sink, _) = run_one(snapshot(18.0, 8.0, true, true));
    assert!(!hw.is_pump_on());
    assert!(report_of(&sink).reason.to_string().contains("critical pH"));
}

#[test]
fn scenario_sensor_failure_forces_pump_off_and_skips_decision() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new(snapshot(f32::NAN, 6.0, true, true));
    hw.pump_on = true; // left running by an earlier cycle
    let mut sink = RecordingSink::default();

    let outcome = app.run_cycle(&mut hw, &mut sink);

    assert_eq!(outcome, CycleOutcome::SensorFailure);
    assert!(!hw.is_pump_on());
    // The fail-safe write happened, and no pump command followed it.
    assert_eq!(hw.calls, vec![ActCall::PumpOff]);
    match &sink.events[..] {
        [AppEvent::SensorFailure(SensorError::DhtReadFailed)] => {}
        other => panic!("expected one SensorFailure event, got {other:?}"),
    }
}

// ── Loop behaviour across cycles ──────────────────────────────

#[test]
fn start_initialises_relay_off() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new(snapshot(25.0, 6.0, false, false));
    hw.pump_on = true;
    let mut sink = RecordingSink::default();

    app.start(&mut hw, &mut sink);

    assert!(!hw.is_pump_on());
    assert!(matches!(&sink.events[..], [AppEvent::Started]));
}

#[test]
fn relay_is_rewritten_every_cycle() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new(snapshot(10.0, 6.0, true, true));
    let mut sink = RecordingSink::default();

    app.run_cycle(&mut hw, &mut sink);
    app.run_cycle(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![ActCall::SetPump(true), ActCall::SetPump(true)]
    );
    assert_eq!(app.cycle_count(), 2);
}

#[test]
fn recovery_after_sensor_failure() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new(snapshot(f32::NAN, 6.0, true, true));
    let mut sink = RecordingSink::default();

    let failed = app.run_cycle(&mut hw, &mut sink);
    assert_eq!(app.delay_after_ms(&failed), 2000);

    // Sensor comes back with dry soil: the next cycle irrigates.
    hw.snapshot = snapshot(18.0, 6.0, true, true);
    let recovered = app.run_cycle(&mut hw, &mut sink);
    assert!(hw.is_pump_on());
    assert_eq!(app.delay_after_ms(&recovered), 3000);
    assert_eq!(app.sensor_failures(), 1);
}

#[test]
fn trace_records_decided_cycles_only() {
    let mut app = AppService::new(SystemConfig::default());
    let mut sink = RecordingSink::default();

    let mut hw = MockHw::new(snapshot(f32::NAN, 6.0, true, true));
    app.run_cycle(&mut hw, &mut sink);
    hw.snapshot = snapshot(25.0, 6.0, true, true);
    app.run_cycle(&mut hw, &mut sink);

    assert_eq!(app.trace().len(), 1);
    let record = app.trace().recent().next().unwrap();
    assert_eq!(record.cycle, 2);
    assert!(!record.activate);
}
