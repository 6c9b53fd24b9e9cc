//! Glucose Core Library
//!
//! Metrics engine for a single-user glucose tracker: summary statistics,
//! single-reading classification and rule-based recommendations.
//!
//! # Architecture
//!
//! ```text
//!   Hosted storage (snake_case rows)
//!            │
//!     [models::row mapping]
//!            │
//!   Measurements + optional Profile
//!            │
//!   ┌────────▼─────────────────────────────┐
//!   │            Metrics Engine            │
//!   │  summarize → Statistics              │
//!   │  classify  → GlucoseAssessment       │
//!   │  rules     → Recommendations         │
//!   └────────┬─────────────────────────────┘
//!            │
//!   Presentation (FFI records, plain data)
//! ```
//!
//! # Core Principle
//!
//! **The engine is total.** Empty lists and missing optional fields yield
//! zero-valued aggregates, never errors. Errors only arise at the row and FFI
//! boundaries.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Measurement, Profile, Statistics, storage rows)
//! - [`metrics`]: Thresholds, classification, statistics and recommendation rules

pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use metrics::{
    body_mass_index, classify_blood_pressure, classify_bmi, classify_glucose, recommend,
    summarize, BloodPressureCategory, BmiCategory, GlucoseAssessment, GlucoseLevel,
    MetricsConfig, MetricsEngine, Recommendation,
};
pub use models::{Measurement, MeasurementKind, Profile, ProfileUpdate, Statistics, Trend};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum GlucoseError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<models::RowError> for GlucoseError {
    fn from(e: models::RowError) -> Self {
        GlucoseError::InvalidInput(e.to_string())
    }
}

impl From<models::UnknownKindError> for GlucoseError {
    fn from(e: models::UnknownKindError) -> Self {
        GlucoseError::InvalidInput(e.to_string())
    }
}

impl From<metrics::ConfigError> for GlucoseError {
    fn from(e: metrics::ConfigError) -> Self {
        GlucoseError::InvalidConfig(e.to_string())
    }
}

impl From<serde_json::Error> for GlucoseError {
    fn from(e: serde_json::Error) -> Self {
        GlucoseError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Stateless Functions (exported to FFI)
// =========================================================================

/// Classify one glucose reading against the ADA targets.
#[uniffi::export]
pub fn classify_glucose_reading(
    value: f64,
    kind: String,
) -> Result<FfiGlucoseAssessment, GlucoseError> {
    let kind: MeasurementKind = kind.parse()?;
    Ok(classify_glucose(value, kind).into())
}

/// Body mass index, or 0 when height is not positive.
#[uniffi::export]
pub fn compute_body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    body_mass_index(weight_kg, height_cm).unwrap_or(0.0)
}

/// BMI category label.
#[uniffi::export]
pub fn classify_bmi_value(bmi: f64) -> String {
    classify_bmi(bmi).label().to_string()
}

/// Blood-pressure category label.
#[uniffi::export]
pub fn classify_blood_pressure_reading(systolic: u32, diastolic: u32) -> String {
    classify_blood_pressure(systolic, diastolic).label().to_string()
}

/// Summary statistics with default thresholds as of today.
#[uniffi::export]
pub fn summarize_measurements(
    measurements: Vec<FfiMeasurement>,
    profile: Option<FfiProfile>,
) -> Result<FfiStatistics, GlucoseError> {
    GlucoseEngine::default().summarize(measurements, profile)
}

/// Recommendation messages with default thresholds as of today.
#[uniffi::export]
pub fn recommend_for_measurements(
    measurements: Vec<FfiMeasurement>,
    profile: Option<FfiProfile>,
) -> Result<Vec<String>, GlucoseError> {
    GlucoseEngine::default().recommend(measurements, profile)
}

/// Chart points for the last 30 days, oldest first.
#[uniffi::export]
pub fn glucose_chart_series(
    measurements: Vec<FfiMeasurement>,
) -> Result<Vec<FfiChartPoint>, GlucoseError> {
    GlucoseEngine::default().chart_series(measurements)
}

/// History table rows, one per measurement, in input order.
#[uniffi::export]
pub fn history_rows(measurements: Vec<FfiMeasurement>) -> Result<Vec<FfiHistoryRow>, GlucoseError> {
    let measurements = convert_measurements(measurements)?;
    Ok(measurements.iter().map(FfiHistoryRow::from).collect())
}

/// Map a JSON array of storage rows into records, newest first.
#[uniffi::export]
pub fn parse_measurement_rows(rows_json: String) -> Result<Vec<FfiMeasurement>, GlucoseError> {
    let rows: Vec<models::MeasurementRow> = serde_json::from_str(&rows_json)?;
    let measurements = models::load_measurements(rows)?;
    Ok(measurements.into_iter().map(|m| m.into()).collect())
}

/// Create an engine, optionally from a JSON configuration document.
#[uniffi::export]
pub fn new_glucose_engine(config_json: Option<String>) -> Result<Arc<GlucoseEngine>, GlucoseError> {
    let config = match config_json {
        Some(json) => MetricsConfig::from_json_str(&json)?,
        None => MetricsConfig::default(),
    };
    Ok(Arc::new(GlucoseEngine {
        engine: MetricsEngine::with_config(config),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Configured metrics engine for FFI.
#[derive(Default, uniffi::Object)]
pub struct GlucoseEngine {
    engine: MetricsEngine,
}

#[uniffi::export]
impl GlucoseEngine {
    /// Classify one glucose reading.
    pub fn classify(&self, value: f64, kind: String) -> Result<FfiGlucoseAssessment, GlucoseError> {
        let kind: MeasurementKind = kind.parse()?;
        Ok(self.engine.classify(value, kind).into())
    }

    /// Summary statistics as of today.
    pub fn summarize(
        &self,
        measurements: Vec<FfiMeasurement>,
        profile: Option<FfiProfile>,
    ) -> Result<FfiStatistics, GlucoseError> {
        let measurements = convert_measurements(measurements)?;
        let profile = convert_profile(profile)?;
        Ok(self.engine.summarize(&measurements, profile.as_ref()).into())
    }

    /// Recommendation messages as of today.
    pub fn recommend(
        &self,
        measurements: Vec<FfiMeasurement>,
        profile: Option<FfiProfile>,
    ) -> Result<Vec<String>, GlucoseError> {
        let measurements = convert_measurements(measurements)?;
        let profile = convert_profile(profile)?;
        Ok(self.engine.recommend(&measurements, profile.as_ref()))
    }

    /// Chart points over the configured window, oldest first.
    pub fn chart_series(
        &self,
        measurements: Vec<FfiMeasurement>,
    ) -> Result<Vec<FfiChartPoint>, GlucoseError> {
        let measurements = convert_measurements(measurements)?;
        let points = self
            .engine
            .chart_series_at(&measurements, metrics::local_today());
        Ok(points.into_iter().map(|p| p.into()).collect())
    }

    /// The active configuration as JSON.
    pub fn config_json(&self) -> Result<String, GlucoseError> {
        Ok(self.engine.config().to_json()?)
    }
}

fn convert_measurements(measurements: Vec<FfiMeasurement>) -> Result<Vec<Measurement>, GlucoseError> {
    measurements.into_iter().map(Measurement::try_from).collect()
}

fn convert_profile(profile: Option<FfiProfile>) -> Result<Option<Profile>, GlucoseError> {
    profile.map(Profile::try_from).transpose()
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe measurement. Dates are `YYYY-MM-DD`, kinds use their wire names.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMeasurement {
    pub id: String,
    pub value: f64,
    pub date: String,
    pub time: String,
    pub kind: String,
    pub notes: Option<String>,
    pub medication: Option<String>,
    pub exercised: Option<bool>,
    pub exercise_minutes: Option<u32>,
    pub symptoms: Vec<String>,
    pub weight: Option<f64>,
    pub systolic: Option<u32>,
    pub diastolic: Option<u32>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
}

impl From<Measurement> for FfiMeasurement {
    fn from(m: Measurement) -> Self {
        Self {
            id: m.id,
            value: m.value,
            date: m.date.format("%Y-%m-%d").to_string(),
            time: m.time,
            kind: m.kind.as_str().to_string(),
            notes: m.notes,
            medication: m.medication,
            exercised: m.exercised,
            exercise_minutes: m.exercise_minutes,
            symptoms: m.symptoms,
            weight: m.weight,
            systolic: m.systolic,
            diastolic: m.diastolic,
            waist: m.waist,
            hip: m.hip,
        }
    }
}

impl TryFrom<FfiMeasurement> for Measurement {
    type Error = GlucoseError;

    fn try_from(m: FfiMeasurement) -> Result<Self, Self::Error> {
        let row = models::MeasurementRow {
            id: Some(m.id),
            value: m.value,
            date: m.date,
            time: m.time,
            kind: m.kind,
            notes: m.notes,
            medication: m.medication,
            exercised: m.exercised,
            exercise_minutes: m.exercise_minutes,
            symptoms: Some(m.symptoms),
            weight: m.weight,
            systolic: m.systolic,
            diastolic: m.diastolic,
            waist: m.waist,
            hip: m.hip,
        };
        Ok(Measurement::try_from(row)?)
    }
}

/// FFI-safe profile.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProfile {
    pub id: String,
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub birth_date: Option<String>,
    pub age: u32,
    pub email: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub years_since_diagnosis: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Profile> for FfiProfile {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            first_name: p.first_name,
            paternal_surname: p.paternal_surname,
            maternal_surname: p.maternal_surname,
            birth_date: p.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
            age: p.age,
            email: p.email,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            years_since_diagnosis: p.years_since_diagnosis,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl TryFrom<FfiProfile> for Profile {
    type Error = GlucoseError;

    fn try_from(p: FfiProfile) -> Result<Self, Self::Error> {
        let row = models::ProfileRow {
            id: Some(p.id),
            first_name: p.first_name,
            paternal_surname: p.paternal_surname,
            maternal_surname: p.maternal_surname,
            birth_date: p.birth_date,
            age: Some(p.age),
            email: p.email,
            height: p.height_cm,
            weight: p.weight_kg,
            years_since_diagnosis: p.years_since_diagnosis,
            created_at: Some(p.created_at),
            updated_at: Some(p.updated_at),
        };
        Ok(Profile::try_from(row)?)
    }
}

/// FFI-safe glucose classification.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiGlucoseAssessment {
    pub level: String,
    pub color: String,
    pub description: String,
    pub band_min: f64,
    pub band_max: f64,
}

impl From<GlucoseAssessment> for FfiGlucoseAssessment {
    fn from(a: GlucoseAssessment) -> Self {
        Self {
            level: a.level.label().to_string(),
            color: a.color_token().to_string(),
            description: a.description().to_string(),
            band_min: a.band.min,
            band_max: a.band.max,
        }
    }
}

/// FFI-safe statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStatistics {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub count: u32,
    pub count_last_7_days: u32,
    pub count_last_30_days: u32,
    pub avg_fasting: f64,
    pub avg_postprandial: f64,
    pub count_in_range: u32,
    pub count_out_of_range: u32,
    pub percent_in_range: f64,
    pub trend: String,
    pub avg_exercise_minutes: f64,
    pub total_exercise_minutes: u32,
    pub days_with_exercise: u32,
    pub avg_weight: f64,
    pub avg_bmi: f64,
    pub avg_systolic: u32,
    pub avg_diastolic: u32,
    pub avg_waist: f64,
    pub avg_hip: f64,
    pub waist_hip_ratio: f64,
}

impl From<Statistics> for FfiStatistics {
    fn from(s: Statistics) -> Self {
        Self {
            average: s.average,
            max: s.max,
            min: s.min,
            count: saturating_u32(s.count),
            count_last_7_days: saturating_u32(s.count_last_7_days),
            count_last_30_days: saturating_u32(s.count_last_30_days),
            avg_fasting: s.avg_fasting,
            avg_postprandial: s.avg_postprandial,
            count_in_range: saturating_u32(s.count_in_range),
            count_out_of_range: saturating_u32(s.count_out_of_range),
            percent_in_range: s.percent_in_range,
            trend: s.trend.as_str().to_string(),
            avg_exercise_minutes: s.avg_exercise_minutes,
            total_exercise_minutes: s.total_exercise_minutes,
            days_with_exercise: saturating_u32(s.days_with_exercise),
            avg_weight: s.avg_weight,
            avg_bmi: s.avg_bmi,
            avg_systolic: s.avg_systolic,
            avg_diastolic: s.avg_diastolic,
            avg_waist: s.avg_waist,
            avg_hip: s.avg_hip,
            waist_hip_ratio: s.waist_hip_ratio,
        }
    }
}

/// FFI-safe history table row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHistoryRow {
    pub id: String,
    pub date: String,
    pub time: String,
    pub kind_label: String,
    pub value: f64,
    pub indicator: String,
    pub blood_pressure: String,
    pub exercise: String,
}

impl From<&Measurement> for FfiHistoryRow {
    fn from(m: &Measurement) -> Self {
        Self {
            id: m.id.clone(),
            date: m.date.format("%Y-%m-%d").to_string(),
            time: m.time.clone(),
            kind_label: m.kind.label().to_string(),
            value: m.value,
            indicator: metrics::ReadingIndicator::for_value(m.value).as_str().to_string(),
            blood_pressure: metrics::blood_pressure_label(m),
            exercise: metrics::exercise_label(m),
        }
    }
}

/// Counts cross the FFI as `u32`, clamped at `u32::MAX`.
fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// FFI-safe chart point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChartPoint {
    pub date: String,
    pub label: String,
    pub value: f64,
    pub kind: String,
    pub time: String,
}

impl From<metrics::ChartPoint> for FfiChartPoint {
    fn from(p: metrics::ChartPoint) -> Self {
        Self {
            date: p.date.format("%Y-%m-%d").to_string(),
            label: p.label,
            value: p.value,
            kind: p.kind.as_str().to_string(),
            time: p.time,
        }
    }
}
