//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces one
//! [`SensorSnapshot`](crate::policy::SensorSnapshot) per control cycle.
//! Readings are instantaneous: no caching, no smoothing — a DHT failure
//! propagates as NaN so the service can apply its fail-safe.

pub mod dht;
pub mod nutrients;
pub mod ph;

use crate::policy::SensorSnapshot;
use dht::DhtSensor;
use nutrients::NutrientButtons;
use ph::PhProbe;

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub dht: DhtSensor,
    pub ph: PhProbe,
    pub nutrients: NutrientButtons,
}

impl SensorHub {
    /// Construct a new hub. Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(dht: DhtSensor, ph: PhProbe, nutrients: NutrientButtons) -> Self {
        Self { dht, ph, nutrients }
    }

    /// Read every sensor once and return a unified snapshot.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let climate = self.dht.read();
        let ph = self.ph.read();
        let (phosphorus, potassium) = self.nutrients.read();

        SensorSnapshot {
            humidity_percent: climate.humidity_percent,
            temperature_celsius: climate.temperature_celsius,
            estimated_ph: ph.ph,
            phosphorus_present: phosphorus.present,
            potassium_present: potassium.present,
        }
    }
}
