//! Single-value classification: glucose, BMI and blood pressure.

use serde::{Deserialize, Serialize};

use crate::models::MeasurementKind;

use super::config::{GlucoseBand, GlucoseTargets};
use super::thresholds::{
    BloodPressureCategory, BmiCategory, GlucoseLevel, Severity, BMI_BANDS, BMI_FALLBACK,
    GLUCOSE_FALLBACK, GLUCOSE_RULES, PRESSURE_FALLBACK, PRESSURE_RULES,
};

/// Result of classifying one glucose reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GlucoseAssessment {
    pub level: GlucoseLevel,
    /// Target band that applied to the reading's kind
    pub band: GlucoseBand,
}

impl GlucoseAssessment {
    pub fn severity(&self) -> Severity {
        self.level.severity()
    }

    pub fn color_token(&self) -> &'static str {
        self.level.severity().color_token()
    }

    pub fn description(&self) -> &'static str {
        self.level.description()
    }
}

/// Classify a glucose reading against the given targets.
pub fn classify_glucose_with(
    value: f64,
    kind: MeasurementKind,
    targets: &GlucoseTargets,
) -> GlucoseAssessment {
    let band = *targets.band_for(kind);
    let level = GLUCOSE_RULES
        .iter()
        .find(|rule| (rule.matches)(value, &band, targets))
        .map(|rule| rule.level)
        .unwrap_or(GLUCOSE_FALLBACK);

    GlucoseAssessment { level, band }
}

/// Classify a glucose reading against the ADA targets.
pub fn classify_glucose(value: f64, kind: MeasurementKind) -> GlucoseAssessment {
    classify_glucose_with(value, kind, &GlucoseTargets::ADA)
}

/// Body mass index, `weight / (height in m)^2`, unrounded.
///
/// Returns `None` for a zero or negative height.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

/// BMI category; boundary values belong to the higher category.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    BMI_BANDS
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, category)| *category)
        .unwrap_or(BMI_FALLBACK)
}

/// Blood-pressure category, first matching rule wins.
pub fn classify_blood_pressure(systolic: u32, diastolic: u32) -> BloodPressureCategory {
    PRESSURE_RULES
        .iter()
        .find(|rule| (rule.matches)(systolic, diastolic))
        .map(|rule| rule.category)
        .unwrap_or(PRESSURE_FALLBACK)
}
