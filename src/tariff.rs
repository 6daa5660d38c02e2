//! Toll tariffs per vehicle class, and their expansion across day pairs and
//! half-hour slots.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calendar::{TimeOfDay, TimeSlot, Weekday};
use crate::traits::Id;
use crate::unroll::EdgeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Moto,
    Car,
    Rv,
    Bus,
    Truck,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Moto,
        VehicleClass::Car,
        VehicleClass::Rv,
        VehicleClass::Bus,
        VehicleClass::Truck,
    ];
}

/// Per-unit-distance rate coefficient for each vehicle class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub moto: f64,
    pub car: f64,
    pub rv: f64,
    pub bus: f64,
    pub truck: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            moto: 0.8,
            car: 1.2,
            rv: 1.5,
            bus: 2.2,
            truck: 3.6,
        }
    }
}

impl RateTable {
    pub fn rate(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::Moto => self.moto,
            VehicleClass::Car => self.car,
            VehicleClass::Rv => self.rv,
            VehicleClass::Bus => self.bus,
            VehicleClass::Truck => self.truck,
        }
    }

    /// Unrounded tariffs for one distance.
    pub fn tariffs_for(&self, distance: f64) -> Tariffs {
        Tariffs {
            moto: distance * self.moto,
            car: distance * self.car,
            rv: distance * self.rv,
            bus: distance * self.bus,
            truck: distance * self.truck,
        }
    }
}

/// One tariff per vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tariffs {
    pub moto: f64,
    pub car: f64,
    pub rv: f64,
    pub bus: f64,
    pub truck: f64,
}

impl Tariffs {
    pub fn get(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::Moto => self.moto,
            VehicleClass::Car => self.car,
            VehicleClass::Rv => self.rv,
            VehicleClass::Bus => self.bus,
            VehicleClass::Truck => self.truck,
        }
    }

    pub fn scaled(&self, factor: f64) -> Tariffs {
        Tariffs {
            moto: self.moto * factor,
            car: self.car * factor,
            rv: self.rv * factor,
            bus: self.bus * factor,
            truck: self.truck * factor,
        }
    }
}

/// An edge with its base tariffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffRow<I> {
    pub origin: I,
    pub destination: I,
    pub distance: f64,
    #[serde(flatten)]
    pub tariffs: Tariffs,
}

/// A tariff row scoped to one day pair and one half-hour slot.
///
/// Serializes to a flat record: ids, distance, the five class tariffs, then
/// the four timing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedTariffRow<I> {
    pub origin: I,
    pub destination: I,
    pub distance: f64,
    #[serde(flatten)]
    pub tariffs: Tariffs,
    pub start_day: Weekday,
    pub end_day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Multipliers applied to base tariffs depending on day and time.
///
/// A pair with any weekend day uses `weekend`. Between weekdays a slot is
/// off-peak when it starts before `peak_start` or ends after `peak_end`;
/// that check runs first, so every remaining slot lies inside
/// `[peak_start, peak_end]` and is peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountSchedule {
    pub weekday_off_peak: f64,
    pub weekday_peak: f64,
    pub weekend: f64,
    pub peak_start: TimeOfDay,
    pub peak_end: TimeOfDay,
}

impl Default for DiscountSchedule {
    fn default() -> Self {
        Self {
            weekday_off_peak: 0.8,
            weekday_peak: 1.2,
            weekend: 0.7,
            peak_start: TimeOfDay::from_index(20), // 10:00
            peak_end: TimeOfDay::from_index(36),   // 18:00
        }
    }
}

impl DiscountSchedule {
    pub fn factor(&self, start_day: Weekday, end_day: Weekday, slot: TimeSlot) -> f64 {
        if start_day.is_weekend() || end_day.is_weekend() {
            self.weekend
        } else if slot.start() < self.peak_start || slot.end() > self.peak_end {
            self.weekday_off_peak
        } else {
            self.weekday_peak
        }
    }
}

/// Applies `rates` to every edge. All five classes are always filled.
pub fn base_tariff<I: Id>(edges: &[EdgeRecord<I>], rates: &RateTable) -> Vec<TariffRow<I>> {
    edges
        .iter()
        .map(|edge| TariffRow {
            origin: edge.origin.clone(),
            destination: edge.destination.clone(),
            distance: edge.distance,
            tariffs: rates.tariffs_for(edge.distance),
        })
        .collect()
}

/// Static tariff table generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffEngine {
    pub rates: RateTable,
    pub discounts: DiscountSchedule,
}

/// One (start_day, end_day, slot) combination with its resolved factor.
#[derive(Debug, Clone, Copy)]
struct Window {
    start_day: Weekday,
    end_day: Weekday,
    slot: TimeSlot,
    factor: f64,
}

impl TariffEngine {
    pub fn new(rates: RateTable, discounts: DiscountSchedule) -> Self {
        Self { rates, discounts }
    }

    pub fn base_tariff<I: Id>(&self, edges: &[EdgeRecord<I>]) -> Vec<TariffRow<I>> {
        base_tariff(edges, &self.rates)
    }

    /// Expands every row across all 7×7 day pairs and 47 slots.
    ///
    /// Rows are expanded in parallel; output stays in input row order, then
    /// start day, end day and slot ascending.
    pub fn expand_timed<I>(&self, rows: &[TariffRow<I>]) -> Vec<TimedTariffRow<I>>
    where
        I: Id + Send + Sync,
    {
        let windows = self.windows();
        let expanded: Vec<Vec<TimedTariffRow<I>>> = rows
            .par_iter()
            .map(|row| {
                windows
                    .iter()
                    .map(|window| TimedTariffRow {
                        origin: row.origin.clone(),
                        destination: row.destination.clone(),
                        distance: row.distance,
                        tariffs: row.tariffs.scaled(window.factor),
                        start_day: window.start_day,
                        end_day: window.end_day,
                        start_time: window.slot.start(),
                        end_time: window.slot.end(),
                    })
                    .collect()
            })
            .collect();

        let timed: Vec<TimedTariffRow<I>> = expanded.into_iter().flatten().collect();
        tracing::debug!(
            rows = rows.len(),
            windows = windows.len(),
            timed = timed.len(),
            "timed tariffs expanded"
        );
        timed
    }

    fn windows(&self) -> Vec<Window> {
        let mut windows = Vec::with_capacity(7 * 7 * 47);
        for start_day in Weekday::ALL {
            for end_day in Weekday::ALL {
                for slot in TimeSlot::all() {
                    windows.push(Window {
                        start_day,
                        end_day,
                        slot,
                        factor: self.discounts.factor(start_day, end_day, slot),
                    });
                }
            }
        }
        windows
    }
}
