//! Metrics engine: statistics, classification and recommendations.
//!
//! Pipeline: Measurements (+ Profile) → Summary → Recommendation rules
//!
//! Every function here is pure over the slice it is given. The only
//! time-dependent input is "today", which pins the recency windows; the
//! `*_at` variants take it explicitly.

mod classify;
mod config;
mod history;
mod recommend;
mod summary;
mod thresholds;

pub use classify::*;
pub use config::*;
pub use history::*;
pub use recommend::*;
pub use summary::{round_to, summarize_with};
pub use thresholds::*;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Measurement, MeasurementKind, Profile, Statistics};

/// Today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Metrics engine bound to one configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsEngine {
    config: MetricsConfig,
}

impl MetricsEngine {
    /// Create an engine with the default ADA thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: MetricsConfig) -> Self {
        Self { config }
    }

    /// Get the configuration for direct access.
    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Classify one glucose reading.
    pub fn classify(&self, value: f64, kind: MeasurementKind) -> GlucoseAssessment {
        classify_glucose_with(value, kind, &self.config.glucose)
    }

    /// Summarize as of today.
    pub fn summarize(&self, measurements: &[Measurement], profile: Option<&Profile>) -> Statistics {
        self.summarize_at(measurements, profile, local_today())
    }

    /// Summarize as of `today`.
    pub fn summarize_at(
        &self,
        measurements: &[Measurement],
        profile: Option<&Profile>,
        today: NaiveDate,
    ) -> Statistics {
        summarize_with(measurements, profile, today, &self.config)
    }

    /// Recommendations as of `today`, in rule order.
    pub fn recommendations_at(
        &self,
        measurements: &[Measurement],
        profile: Option<&Profile>,
        today: NaiveDate,
    ) -> Vec<Recommendation> {
        let stats = self.summarize_at(measurements, profile, today);
        let recommendations = evaluate_rules(&stats, &self.config);
        debug!(fired = recommendations.len(), "evaluated recommendation rules");
        recommendations
    }

    /// Recommendation messages as of `today`.
    pub fn recommend_at(
        &self,
        measurements: &[Measurement],
        profile: Option<&Profile>,
        today: NaiveDate,
    ) -> Vec<String> {
        self.recommendations_at(measurements, profile, today)
            .iter()
            .map(|r| r.message().to_string())
            .collect()
    }

    /// Recommendation messages as of today.
    pub fn recommend(&self, measurements: &[Measurement], profile: Option<&Profile>) -> Vec<String> {
        self.recommend_at(measurements, profile, local_today())
    }

    /// Chart points over the configured chart window ending `today`.
    pub fn chart_series_at(&self, measurements: &[Measurement], today: NaiveDate) -> Vec<ChartPoint> {
        glucose_series(measurements, today, self.config.chart_window_days)
    }
}

/// Summarize with default thresholds as of today.
pub fn summarize(measurements: &[Measurement], profile: Option<&Profile>) -> Statistics {
    MetricsEngine::new().summarize(measurements, profile)
}

/// Recommendation messages with default thresholds as of today.
pub fn recommend(measurements: &[Measurement], profile: Option<&Profile>) -> Vec<String> {
    MetricsEngine::new().recommend(measurements, profile)
}
