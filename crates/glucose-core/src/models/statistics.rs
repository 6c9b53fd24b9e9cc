//! Aggregate statistics produced by the metrics engine.

use serde::{Deserialize, Serialize};

/// Direction of glucose control over time.
///
/// Only `Stable` is produced today; no slope is computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Worsening,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Worsening => "worsening",
        }
    }
}

/// Summary over a list of measurements.
///
/// Averages are rounded to one decimal, `waist_hip_ratio` to two, and the
/// blood-pressure averages to whole mmHg. `max` and `min` are reported as
/// recorded. An empty input produces `Statistics::default()`: every number
/// zero and a stable trend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Mean glucose over all readings
    pub average: f64,
    /// Highest glucose reading
    pub max: f64,
    /// Lowest glucose reading
    pub min: f64,
    /// Number of readings
    pub count: usize,
    /// Readings dated within the last 7 days (inclusive)
    pub count_last_7_days: usize,
    /// Readings dated within the last 30 days (inclusive)
    pub count_last_30_days: usize,
    /// Mean of fasting readings
    pub avg_fasting: f64,
    /// Mean of postprandial readings
    pub avg_postprandial: f64,
    /// Readings inside the global 80–180 band
    pub count_in_range: usize,
    /// Readings outside the global band
    pub count_out_of_range: usize,
    /// Share of readings in range, 0–100
    pub percent_in_range: f64,
    /// Control trend
    pub trend: Trend,
    /// Mean exercise minutes over readings with exercise
    pub avg_exercise_minutes: f64,
    /// Total exercise minutes
    pub total_exercise_minutes: u32,
    /// Readings with exercise recorded
    pub days_with_exercise: usize,
    /// Mean body weight in kg
    pub avg_weight: f64,
    /// BMI from the mean weight and profile height
    pub avg_bmi: f64,
    /// Mean systolic pressure in mmHg
    pub avg_systolic: u32,
    /// Mean diastolic pressure in mmHg
    pub avg_diastolic: u32,
    /// Mean waist circumference in cm
    pub avg_waist: f64,
    /// Mean hip circumference in cm
    pub avg_hip: f64,
    /// Waist divided by hip
    pub waist_hip_ratio: f64,
}

impl Statistics {
    /// True when no readings contributed.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
