//! GPIO / peripheral pin assignments for the SoilGuard board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers. Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// Nutrient presence inputs (momentary contacts, active-low)
// ---------------------------------------------------------------------------

/// Phosphorus sensor contact. Internal pull-up; LOW = present.
pub const PHOSPHORUS_BTN_GPIO: i32 = 23;
/// Potassium sensor contact. Internal pull-up; LOW = present.
pub const POTASSIUM_BTN_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// pH estimate — LDR proxy (ADC1)
// ---------------------------------------------------------------------------

/// LDR voltage-divider output, ADC1 channel 7 (GPIO 35 on ESP32).
pub const PH_LDR_ADC_GPIO: i32 = 35;
/// ADC1 channel number for the LDR input.
pub const PH_ADC_CHANNEL: u32 = 7;
/// ADC attenuation for the LDR input (11 dB → 0 – 3.1 V range).
pub const PH_ADC_ATTEN: u32 = 3; // ADC_ATTEN_DB_11

// ---------------------------------------------------------------------------
// Humidity / temperature sensor (DHT22, single-wire)
// ---------------------------------------------------------------------------

/// DHT22 data line. Open-drain with pull-up.
pub const DHT_DATA_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Pump relay
// ---------------------------------------------------------------------------

/// Digital output driving the pump relay coil. HIGH = pump on.
/// Initialised LOW at boot so the pump starts off.
pub const PUMP_RELAY_GPIO: i32 = 22;
