//! Engine configuration.
//!
//! Defaults follow the ADA targets for type 2 diabetes. A JSON document may
//! override any subset of keys; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::MeasurementKind;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid band {name}: min {min} is above max {max}")]
    InvalidBand { name: &'static str, min: f64, max: f64 },

    #[error("Window {0} must be at least one day")]
    InvalidWindow(&'static str),

    #[error("Configuration must be a JSON object")]
    NotAnObject,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Inclusive glucose band in mg/dL.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GlucoseBand {
    pub min: f64,
    pub max: f64,
}

impl GlucoseBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both edges are inclusive.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-kind target bands plus the hypo/hyper cut-offs used by classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GlucoseTargets {
    pub fasting: GlucoseBand,
    pub postprandial: GlucoseBand,
    /// Band for every other kind
    pub general: GlucoseBand,
    /// Readings strictly below this are hypoglycemic
    pub hypoglycemia_below: f64,
    /// Readings strictly above this are very elevated
    pub very_elevated_above: f64,
}

impl GlucoseTargets {
    /// ADA targets for type 2 diabetes.
    pub const ADA: GlucoseTargets = GlucoseTargets {
        fasting: GlucoseBand::new(80.0, 130.0),
        postprandial: GlucoseBand::new(80.0, 180.0),
        general: GlucoseBand::new(80.0, 180.0),
        hypoglycemia_below: 70.0,
        very_elevated_above: 250.0,
    };

    /// Target band for a reading kind.
    pub fn band_for(&self, kind: MeasurementKind) -> &GlucoseBand {
        match kind {
            MeasurementKind::Fasting => &self.fasting,
            MeasurementKind::Postprandial => &self.postprandial,
            _ => &self.general,
        }
    }
}

impl Default for GlucoseTargets {
    fn default() -> Self {
        Self::ADA
    }
}

/// Cut-offs for the recommendation rules.
///
/// The fasting and postprandial rules reuse the target band maxima.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommendationLimits {
    /// Percent of readings in range below which a physician visit is advised
    pub min_percent_in_range: f64,
    /// Average daily exercise minutes below which more activity is advised
    pub min_exercise_minutes: f64,
    /// BMI above which weight management is advised
    pub max_bmi: f64,
    /// Average systolic pressure above which sodium reduction is advised
    pub max_systolic: u32,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            min_percent_in_range: 70.0,
            min_exercise_minutes: 30.0,
            max_bmi: 25.0,
            max_systolic: 130,
        }
    }
}

/// Everything the metrics engine needs to know about thresholds and windows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricsConfig {
    /// Bands used by single-reading classification
    pub glucose: GlucoseTargets,
    /// Global band for time-in-range, independent of reading kind
    pub in_range: GlucoseBand,
    /// Short recency window in days
    pub recent_window_days: u32,
    /// Long recency window in days
    pub monthly_window_days: u32,
    /// Days of history shown on the glucose chart
    pub chart_window_days: u32,
    pub recommendations: RecommendationLimits,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            glucose: GlucoseTargets::ADA,
            in_range: GlucoseBand::new(80.0, 180.0),
            recent_window_days: 7,
            monthly_window_days: 30,
            chart_window_days: 30,
            recommendations: RecommendationLimits::default(),
        }
    }
}

impl MetricsConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        let config: MetricsConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check band ordering and window lengths.
    pub fn validate(&self) -> ConfigResult<()> {
        let bands = [
            ("glucose.fasting", self.glucose.fasting),
            ("glucose.postprandial", self.glucose.postprandial),
            ("glucose.general", self.glucose.general),
            ("in_range", self.in_range),
        ];
        for (name, band) in bands {
            if band.min > band.max {
                return Err(ConfigError::InvalidBand {
                    name,
                    min: band.min,
                    max: band.max,
                });
            }
        }

        let windows = [
            ("recent_window_days", self.recent_window_days),
            ("monthly_window_days", self.monthly_window_days),
            ("chart_window_days", self.chart_window_days),
        ];
        for (name, days) in windows {
            if days == 0 {
                return Err(ConfigError::InvalidWindow(name));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_for_kind() {
        let targets = GlucoseTargets::default();
        assert_eq!(targets.band_for(MeasurementKind::Fasting).max, 130.0);
        assert_eq!(targets.band_for(MeasurementKind::Postprandial).max, 180.0);
        assert_eq!(targets.band_for(MeasurementKind::BeforeMeal).max, 180.0);
        assert_eq!(targets.band_for(MeasurementKind::Other).min, 80.0);
    }

    #[test]
    fn test_band_edges_inclusive() {
        let band = GlucoseBand::new(80.0, 130.0);
        assert!(band.contains(80.0));
        assert!(band.contains(130.0));
        assert!(!band.contains(79.9));
        assert!(!band.contains(130.1));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = MetricsConfig::from_json_str(
            r#"{ "recent_window_days": 14, "glucose": { "fasting": { "min": 70, "max": 120 } } }"#,
        )
        .unwrap();

        assert_eq!(config.recent_window_days, 14);
        assert_eq!(config.monthly_window_days, 30);
        assert_eq!(config.glucose.fasting, GlucoseBand::new(70.0, 120.0));
        assert_eq!(config.glucose.postprandial, GlucoseBand::new(80.0, 180.0));
        assert_eq!(config.recommendations.max_systolic, 130);
    }

    #[test]
    fn test_rejects_inverted_band() {
        let err = MetricsConfig::from_json_str(r#"{ "in_range": { "min": 200, "max": 100 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBand { name: "in_range", .. }));
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = MetricsConfig::from_json_str(r#"{ "chart_window_days": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWindow("chart_window_days")));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = MetricsConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_rejects_non_object_documents() {
        for json in ["[]", "5", "\"fasting\"", "null"] {
            let err = MetricsConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::NotAnObject), "accepted {}", json);
        }
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(MetricsConfig::from_json_str("{}").unwrap(), MetricsConfig::default());
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = MetricsConfig::default().to_json().unwrap();
        assert_eq!(MetricsConfig::from_json_str(&json).unwrap(), MetricsConfig::default());
    }
}
