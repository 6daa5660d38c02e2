//! Tariff engine tests: base rates, timed expansion and flat serialization.

mod fixtures;

use approx::assert_relative_eq;

use toll_matrix::calendar::{TimeOfDay, TimeSlot, Weekday};
use toll_matrix::matrix::complete;
use toll_matrix::tariff::{
    DiscountSchedule, RateTable, TariffEngine, TimedTariffRow, VehicleClass, base_tariff,
};
use toll_matrix::unroll::{EdgeRecord, unroll};

fn time(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).expect("on grid")
}

fn find_row<'a, I>(
    timed: &'a [TimedTariffRow<I>],
    start_day: Weekday,
    end_day: Weekday,
    start_time: TimeOfDay,
) -> &'a TimedTariffRow<I> {
    timed
        .iter()
        .find(|row| row.start_day == start_day && row.end_day == end_day && row.start_time == start_time)
        .expect("row for window")
}

#[test]
fn base_tariffs_scale_with_distance() {
    let matrix = complete(fixtures::segment_observations()).expect("complete");
    let edges = unroll(&matrix);
    let rates = RateTable::default();
    let rows = base_tariff(&edges, &rates);

    assert_eq!(rows.len(), edges.len());
    for (row, edge) in rows.iter().zip(&edges) {
        assert_eq!(row.origin, edge.origin);
        assert_eq!(row.destination, edge.destination);
        for class in VehicleClass::ALL {
            assert_relative_eq!(row.tariffs.get(class) / edge.distance, rates.rate(class), epsilon = 1e-12);
        }
    }
}

#[test]
fn one_row_expands_to_full_grid() {
    let engine = TariffEngine::default();
    let rows = engine.base_tariff(&[EdgeRecord::new(1001400, 1001402, 9.7)]);
    let timed = engine.expand_timed(&rows);
    assert_eq!(timed.len(), 7 * 7 * 47);

    let mut windows: Vec<_> = timed
        .iter()
        .map(|row| (row.start_day, row.end_day, row.start_time))
        .collect();
    windows.sort();
    windows.dedup();
    assert_eq!(windows.len(), timed.len());
}

#[test]
fn weekend_rows_use_uniform_discount() {
    let engine = TariffEngine::default();
    let rows = engine.base_tariff(&[EdgeRecord::new(1, 2, 10.0)]);
    let base = rows[0].tariffs;
    let timed = engine.expand_timed(&rows);

    let weekend: Vec<_> = timed
        .iter()
        .filter(|row| row.start_day.is_weekend() || row.end_day.is_weekend())
        .collect();
    // 49 day pairs minus 25 weekday-only pairs
    assert_eq!(weekend.len(), 24 * 47);
    for row in weekend {
        for class in VehicleClass::ALL {
            assert_relative_eq!(row.tariffs.get(class), base.get(class) * 0.7);
        }
    }
}

#[test]
fn monday_peak_and_off_peak() {
    let engine = TariffEngine::default();
    let rows = engine.base_tariff(&[EdgeRecord::new(1, 2, 10.0)]);
    let base = rows[0].tariffs;
    let timed = engine.expand_timed(&rows);

    let peak = find_row(&timed, Weekday::Monday, Weekday::Monday, time(11, 0));
    assert_eq!(peak.end_time, time(11, 30));
    assert_relative_eq!(peak.tariffs.car, base.car * 1.2);

    let early = find_row(&timed, Weekday::Monday, Weekday::Monday, time(6, 0));
    assert_eq!(early.end_time, time(6, 30));
    assert_relative_eq!(early.tariffs.truck, base.truck * 0.8);

    let late = find_row(&timed, Weekday::Tuesday, Weekday::Friday, time(18, 0));
    assert_relative_eq!(late.tariffs.bus, base.bus * 0.8);
}

#[test]
fn weekday_factors_only_take_two_values() {
    let schedule = DiscountSchedule::default();
    let weekdays = &Weekday::ALL[..5];
    for &start_day in weekdays {
        for &end_day in weekdays {
            let peak = TimeSlot::all()
                .filter(|&slot| schedule.factor(start_day, end_day, slot) == 1.2)
                .count();
            let off_peak = TimeSlot::all()
                .filter(|&slot| schedule.factor(start_day, end_day, slot) == 0.8)
                .count();
            // 10:00 .. 18:00 holds 16 half-hour slots
            assert_eq!(peak, 16);
            assert_eq!(off_peak, 47 - 16);
        }
    }
}

#[test]
fn expansion_keeps_row_order() {
    let engine = TariffEngine::default();
    let edges: Vec<_> = (0..50).map(|i| EdgeRecord::new(i, i + 1, i as f64 + 1.0)).collect();
    let rows = engine.base_tariff(&edges);
    let timed = engine.expand_timed(&rows);

    assert_eq!(timed.len(), 50 * 2303);
    for (chunk, row) in timed.chunks(2303).zip(&rows) {
        assert!(chunk.iter().all(|t| t.origin == row.origin && t.distance == row.distance));
    }
}

#[test]
fn timed_row_serializes_flat() {
    let engine = TariffEngine::default();
    let rows = engine.base_tariff(&[EdgeRecord::new(1001400, 1001402, 10.0)]);
    let timed = engine.expand_timed(&rows);
    let value = serde_json::to_value(&timed[0]).expect("serialize");

    let object = value.as_object().expect("flat object");
    for key in [
        "origin", "destination", "distance", "moto", "car", "rv", "bus", "truck", "start_day",
        "end_day", "start_time", "end_time",
    ] {
        assert!(object.contains_key(key), "missing {}", key);
    }
    assert_eq!(object["start_day"], "Monday");
    assert_eq!(object["start_time"], "00:00:00");
    assert_eq!(object["end_time"], "00:30:00");
    assert_eq!(object["origin"], 1001400);

    let back: TimedTariffRow<u32> = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, timed[0]);
}

#[test]
fn engine_config_from_json() {
    let engine: TariffEngine = serde_json::from_str(
        r#"{"rates": {"truck": 4.0}, "discounts": {"peak_start": "09:00", "weekend": 0.6}}"#,
    )
    .expect("json");
    assert_eq!(engine.rates.truck, 4.0);
    assert_eq!(engine.rates.car, 1.2);
    assert_eq!(engine.discounts.peak_start, time(9, 0));
    assert_eq!(engine.discounts.peak_end, time(18, 0));
    assert_eq!(engine.discounts.weekend, 0.6);
}
