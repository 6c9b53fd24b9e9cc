//! Aggregate statistics over a measurement list.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::models::{Measurement, MeasurementKind, Profile, Statistics, Trend};

use super::classify::body_mass_index;
use super::config::MetricsConfig;

/// Round half-up to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor + 0.5).floor() / factor
}

/// First day inside a window of `days` ending today (inclusive).
pub(crate) fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Mean of the values, 0 when there are none.
fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Mean over the readings where an optional metric was recorded and non-zero.
fn mean_recorded<F>(measurements: &[Measurement], field: F) -> f64
where
    F: Fn(&Measurement) -> Option<f64>,
{
    mean(measurements.iter().filter_map(|m| field(m).filter(|v| *v != 0.0)))
}

fn mean_of_kind(measurements: &[Measurement], kind: MeasurementKind) -> f64 {
    mean(measurements.iter().filter(|m| m.kind == kind).map(|m| m.value))
}

/// Summarize `measurements` as of `today`.
pub fn summarize_with(
    measurements: &[Measurement],
    profile: Option<&Profile>,
    today: NaiveDate,
    config: &MetricsConfig,
) -> Statistics {
    if measurements.is_empty() {
        return Statistics::default();
    }

    let count = measurements.len();
    let average = mean(measurements.iter().map(|m| m.value));
    let max = measurements.iter().map(|m| m.value).fold(f64::MIN, f64::max);
    let min = measurements.iter().map(|m| m.value).fold(f64::MAX, f64::min);

    let recent_start = window_start(today, config.recent_window_days);
    let monthly_start = window_start(today, config.monthly_window_days);
    let count_last_7_days = measurements.iter().filter(|m| m.date >= recent_start).count();
    let count_last_30_days = measurements.iter().filter(|m| m.date >= monthly_start).count();

    let avg_fasting = mean_of_kind(measurements, MeasurementKind::Fasting);
    let avg_postprandial = mean_of_kind(measurements, MeasurementKind::Postprandial);

    let count_in_range = measurements
        .iter()
        .filter(|m| config.in_range.contains(m.value))
        .count();
    let count_out_of_range = count - count_in_range;
    let percent_in_range = count_in_range as f64 / count as f64 * 100.0;

    let exercise_minutes: Vec<u32> = measurements
        .iter()
        .filter(|m| m.did_exercise())
        .map(Measurement::counted_exercise_minutes)
        .collect();
    let days_with_exercise = exercise_minutes.len();
    let total_exercise_minutes = exercise_minutes
        .iter()
        .fold(0u32, |total, minutes| total.saturating_add(*minutes));
    let avg_exercise_minutes = mean(exercise_minutes.iter().map(|m| f64::from(*m)));

    let avg_weight = mean_recorded(measurements, |m| m.weight);
    let avg_systolic = mean_recorded(measurements, |m| m.systolic.map(f64::from));
    let avg_diastolic = mean_recorded(measurements, |m| m.diastolic.map(f64::from));
    let avg_waist = mean_recorded(measurements, |m| m.waist);
    let avg_hip = mean_recorded(measurements, |m| m.hip);

    let avg_bmi = profile
        .and_then(Profile::known_height_cm)
        .filter(|_| avg_weight > 0.0)
        .and_then(|height| body_mass_index(avg_weight, height))
        .unwrap_or(0.0);

    let waist_hip_ratio = if avg_hip > 0.0 { avg_waist / avg_hip } else { 0.0 };

    debug!(
        count,
        count_in_range,
        days_with_exercise,
        has_profile = profile.is_some(),
        %today,
        "summarized measurements"
    );

    Statistics {
        average: round_to(average, 1),
        max,
        min,
        count,
        count_last_7_days,
        count_last_30_days,
        avg_fasting: round_to(avg_fasting, 1),
        avg_postprandial: round_to(avg_postprandial, 1),
        count_in_range,
        count_out_of_range,
        percent_in_range: round_to(percent_in_range, 1),
        trend: Trend::Stable,
        avg_exercise_minutes: round_to(avg_exercise_minutes, 1),
        total_exercise_minutes,
        days_with_exercise,
        avg_weight: round_to(avg_weight, 1),
        avg_bmi: round_to(avg_bmi, 1),
        avg_systolic: round_to(avg_systolic, 0) as u32,
        avg_diastolic: round_to(avg_diastolic, 0) as u32,
        avg_waist: round_to(avg_waist, 1),
        avg_hip: round_to(avg_hip, 1),
        waist_hip_ratio: round_to(waist_hip_ratio, 2),
    }
}
