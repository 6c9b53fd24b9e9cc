//! Per-reading helpers for history tables and the glucose chart.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Measurement, MeasurementKind};

use super::summary::window_start;

/// Readings above this show a rising indicator.
const INDICATOR_HIGH_ABOVE: f64 = 180.0;

/// Readings below this show a falling indicator.
const INDICATOR_LOW_BELOW: f64 = 70.0;

/// Arrow shown next to a reading in the history table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadingIndicator {
    Rising,
    Steady,
    Falling,
}

impl ReadingIndicator {
    pub fn for_value(value: f64) -> Self {
        if value > INDICATOR_HIGH_ABOVE {
            ReadingIndicator::Rising
        } else if value < INDICATOR_LOW_BELOW {
            ReadingIndicator::Falling
        } else {
            ReadingIndicator::Steady
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingIndicator::Rising => "rising",
            ReadingIndicator::Steady => "steady",
            ReadingIndicator::Falling => "falling",
        }
    }
}

/// One point on the glucose chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Axis label, `dd/MM`
    pub label: String,
    pub value: f64,
    pub kind: MeasurementKind,
    pub time: String,
}

/// Chart points for readings dated within `window_days` of `today`, oldest first.
///
/// Readings sharing a date keep their input order.
pub fn glucose_series(
    measurements: &[Measurement],
    today: NaiveDate,
    window_days: u32,
) -> Vec<ChartPoint> {
    let start = window_start(today, window_days);
    let mut points: Vec<ChartPoint> = measurements
        .iter()
        .filter(|m| m.date >= start)
        .map(|m| ChartPoint {
            date: m.date,
            label: m.date.format("%d/%m").to_string(),
            value: m.value,
            kind: m.kind,
            time: m.time.clone(),
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// `"sys/dia"` when both pressures were recorded, `"-"` otherwise.
pub fn blood_pressure_label(measurement: &Measurement) -> String {
    match measurement.blood_pressure() {
        Some((sys, dia)) => format!("{}/{}", sys, dia),
        None => "-".to_string(),
    }
}

/// `"N min"` when exercise was recorded, `"No"` otherwise.
pub fn exercise_label(measurement: &Measurement) -> String {
    if measurement.did_exercise() {
        format!("{} min", measurement.counted_exercise_minutes())
    } else {
        "No".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_indicator_thresholds() {
        assert_eq!(ReadingIndicator::for_value(181.0), ReadingIndicator::Rising);
        assert_eq!(ReadingIndicator::for_value(180.0), ReadingIndicator::Steady);
        assert_eq!(ReadingIndicator::for_value(70.0), ReadingIndicator::Steady);
        assert_eq!(ReadingIndicator::for_value(69.0), ReadingIndicator::Falling);
        assert_eq!(ReadingIndicator::Falling.as_str(), "falling");
    }

    #[test]
    fn test_series_filters_and_sorts_oldest_first() {
        let today = day(2024, 3, 31);
        let ms = vec![
            Measurement::new(140.0, day(2024, 3, 30), "20:00", MeasurementKind::AfterMeal),
            Measurement::new(90.0, day(2024, 2, 1), "07:00", MeasurementKind::Fasting),
            Measurement::new(110.0, day(2024, 3, 2), "07:00", MeasurementKind::Fasting),
            Measurement::new(120.0, day(2024, 3, 30), "07:00", MeasurementKind::Fasting),
        ];

        let series = glucose_series(&ms, today, 30);
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![110.0, 140.0, 120.0]);
        assert_eq!(series[0].label, "02/03");
        assert_eq!(series[1].time, "20:00");
    }

    #[test]
    fn test_series_empty_when_nothing_recent() {
        let ms = vec![Measurement::new(90.0, day(2023, 1, 1), "", MeasurementKind::Other)];
        assert!(glucose_series(&ms, day(2024, 3, 31), 30).is_empty());
    }

    #[test]
    fn test_row_labels() {
        let mut m = Measurement::new(100.0, day(2024, 3, 1), "", MeasurementKind::Other);
        assert_eq!(blood_pressure_label(&m), "-");
        assert_eq!(exercise_label(&m), "No");

        m.systolic = Some(122);
        m.diastolic = Some(78);
        m.exercised = Some(true);
        assert_eq!(blood_pressure_label(&m), "122/78");
        assert_eq!(exercise_label(&m), "0 min");
    }
}
