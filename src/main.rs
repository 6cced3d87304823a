//! SoilGuard firmware — main entry point.
//!
//! Hexagonal architecture with a fixed-period blocking control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                │
//! │                                                      │
//! │  HardwareAdapter      LogEventSink    JsonLineSink   │
//! │  (Sensor+Actuator)    (status line)   (record line)  │
//! │                                                      │
//! │  ───────────── Port Trait Boundary ─────────────     │
//! │                                                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │           AppService (pure logic)              │  │
//! │  │  snapshot validation · decision policy         │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The loop is strictly sequential — acquire, validate, decide,
//! actuate, report, sleep. The device has no other work, so the
//! blocking delay is the only suspension point and there is no
//! shutdown path: the controller runs until power-off.

#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::info;

use soilguard::adapters::hardware::HardwareAdapter;
use soilguard::adapters::json_sink::JsonLineSink;
use soilguard::adapters::log_sink::LogEventSink;
use soilguard::adapters::TeeSink;
use soilguard::app::service::AppService;
use soilguard::config::SystemConfig;
use soilguard::diagnostics;
use soilguard::drivers::{hw_init, relay::RelayDriver};
use soilguard::pins;
use soilguard::sensors::{dht::DhtSensor, nutrients::NutrientButtons, ph::PhProbe, SensorHub};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SoilGuard v{}", env!("CARGO_PKG_VERSION"));
    diagnostics::install_panic_handler();

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(|e| anyhow!("HAL init failed: {e}"))?;

    let config = SystemConfig::default();

    // ── 3. Adapters ───────────────────────────────────────────
    let sensor_hub = SensorHub::new(
        DhtSensor::new(pins::DHT_DATA_GPIO),
        PhProbe::new(pins::PH_LDR_ADC_GPIO),
        NutrientButtons::new(pins::PHOSPHORUS_BTN_GPIO, pins::POTASSIUM_BTN_GPIO),
    );
    let mut hw = HardwareAdapter::new(sensor_hub, RelayDriver::new());
    let mut sink = TeeSink::new(LogEventSink::new(), JsonLineSink::new());

    // ── 4. App service ────────────────────────────────────────
    let mut app = AppService::new(config.clone());
    app.start(&mut hw, &mut sink);

    // Let the DHT settle before the first read.
    thread::sleep(Duration::from_millis(u64::from(config.startup_settle_ms)));

    info!("Entering control loop");

    // ── 5. Control loop ───────────────────────────────────────
    let mut uptime_ms: u64 = u64::from(config.startup_settle_ms);
    loop {
        let outcome = app.run_cycle(&mut hw, &mut sink);

        if app.cycle_count() % u64::from(config.metrics_interval_cycles) == 0 {
            let m = app.metrics(uptime_ms / 1000);
            info!(
                "METRICS | up={}s | cycles={} | pump_on={} | dht_failures={} | heap_free={}",
                m.uptime_secs, m.control_cycles, m.pump_on_cycles, m.sensor_failures, m.heap_free,
            );
        }

        let delay_ms = app.delay_after_ms(&outcome);
        uptime_ms += u64::from(delay_ms);
        thread::sleep(Duration::from_millis(u64::from(delay_ms)));
    }
}
