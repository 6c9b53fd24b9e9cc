//! Threshold tables for glucose, BMI and blood-pressure classification.
//!
//! Each table is an ordered list of `(predicate, outcome)` rows evaluated top
//! to bottom; the first matching row wins and the table's fallback covers
//! everything else. Boundary inclusivity lives in the predicates below.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{GlucoseBand, GlucoseTargets};

/// Semantic severity of a classification, with a stable color token for UIs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Caution,
    Danger,
    Critical,
}

impl Severity {
    /// Hex color token.
    pub fn color_token(&self) -> &'static str {
        match self {
            Severity::Info => "#3498db",
            Severity::Success => "#27ae60",
            Severity::Warning => "#f39c12",
            Severity::Caution => "#e67e22",
            Severity::Danger => "#e74c3c",
            Severity::Critical => "#c0392b",
        }
    }
}

// =========================================================================
// Glucose
// =========================================================================

/// Classification of a single glucose reading.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseLevel {
    Low,
    InRange,
    Elevated,
    VeryElevated,
}

impl GlucoseLevel {
    pub fn label(&self) -> &'static str {
        match self {
            GlucoseLevel::Low => "Low",
            GlucoseLevel::InRange => "In Range",
            GlucoseLevel::Elevated => "Elevated",
            GlucoseLevel::VeryElevated => "Very Elevated",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            GlucoseLevel::Low => Severity::Danger,
            GlucoseLevel::InRange => Severity::Success,
            GlucoseLevel::Elevated => Severity::Warning,
            GlucoseLevel::VeryElevated => Severity::Danger,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GlucoseLevel::Low => "Hypoglycemia - requires immediate attention",
            GlucoseLevel::InRange => "Value within the target range",
            GlucoseLevel::Elevated => "Value above the target range",
            GlucoseLevel::VeryElevated => "Very high value - consult your physician",
        }
    }
}

impl fmt::Display for GlucoseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicate over (value, band for the reading's kind, targets).
pub type GlucosePredicate = fn(f64, &GlucoseBand, &GlucoseTargets) -> bool;

/// One row of the glucose table.
#[derive(Clone, Copy)]
pub struct GlucoseRule {
    pub level: GlucoseLevel,
    pub matches: GlucosePredicate,
}

fn is_hypoglycemic(value: f64, _band: &GlucoseBand, targets: &GlucoseTargets) -> bool {
    value < targets.hypoglycemia_below
}

fn is_within_band(value: f64, band: &GlucoseBand, _targets: &GlucoseTargets) -> bool {
    band.contains(value)
}

fn is_above_band(value: f64, band: &GlucoseBand, targets: &GlucoseTargets) -> bool {
    value > band.max && value <= targets.very_elevated_above
}

/// Glucose table. Values between the hypoglycemia cut and the band minimum
/// match no row and land on the fallback.
pub const GLUCOSE_RULES: [GlucoseRule; 3] = [
    GlucoseRule { level: GlucoseLevel::Low, matches: is_hypoglycemic },
    GlucoseRule { level: GlucoseLevel::InRange, matches: is_within_band },
    GlucoseRule { level: GlucoseLevel::Elevated, matches: is_above_band },
];

pub const GLUCOSE_FALLBACK: GlucoseLevel = GlucoseLevel::VeryElevated;

// =========================================================================
// BMI
// =========================================================================

/// WHO body-mass-index category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obesity,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            BmiCategory::Underweight => Severity::Info,
            BmiCategory::Normal => Severity::Success,
            BmiCategory::Overweight => Severity::Warning,
            BmiCategory::Obesity => Severity::Danger,
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `(exclusive upper bound, category)`; a boundary value belongs to the next row.
pub const BMI_BANDS: [(f64, BmiCategory); 3] = [
    (18.5, BmiCategory::Underweight),
    (25.0, BmiCategory::Normal),
    (30.0, BmiCategory::Overweight),
];

pub const BMI_FALLBACK: BmiCategory = BmiCategory::Obesity;

// =========================================================================
// Blood pressure
// =========================================================================

/// ACC/AHA blood-pressure category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Normal,
    Elevated,
    HypertensionStage1,
    HypertensionStage2,
    HypertensiveCrisis,
}

impl BloodPressureCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::HypertensionStage1 => "Hypertension Stage 1",
            BloodPressureCategory::HypertensionStage2 => "Hypertension Stage 2",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            BloodPressureCategory::Normal => Severity::Success,
            BloodPressureCategory::Elevated => Severity::Warning,
            BloodPressureCategory::HypertensionStage1 => Severity::Caution,
            BloodPressureCategory::HypertensionStage2 => Severity::Danger,
            BloodPressureCategory::HypertensiveCrisis => Severity::Critical,
        }
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicate over (systolic, diastolic) in mmHg.
pub type PressurePredicate = fn(u32, u32) -> bool;

/// One row of the blood-pressure table.
#[derive(Clone, Copy)]
pub struct PressureRule {
    pub category: BloodPressureCategory,
    pub matches: PressurePredicate,
}

fn is_normal_pressure(systolic: u32, diastolic: u32) -> bool {
    systolic < 120 && diastolic < 80
}

fn is_elevated_pressure(systolic: u32, diastolic: u32) -> bool {
    (120..130).contains(&systolic) && diastolic < 80
}

fn is_stage1_pressure(systolic: u32, diastolic: u32) -> bool {
    (130..140).contains(&systolic) || (80..90).contains(&diastolic)
}

fn is_stage2_pressure(systolic: u32, diastolic: u32) -> bool {
    systolic >= 140 || diastolic >= 90
}

/// Blood-pressure table. The four rows cover every input, so the crisis
/// fallback is never reached.
pub const PRESSURE_RULES: [PressureRule; 4] = [
    PressureRule { category: BloodPressureCategory::Normal, matches: is_normal_pressure },
    PressureRule { category: BloodPressureCategory::Elevated, matches: is_elevated_pressure },
    PressureRule { category: BloodPressureCategory::HypertensionStage1, matches: is_stage1_pressure },
    PressureRule { category: BloodPressureCategory::HypertensionStage2, matches: is_stage2_pressure },
];

pub const PRESSURE_FALLBACK: BloodPressureCategory = BloodPressureCategory::HypertensiveCrisis;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_rules_cover_every_input() {
        for systolic in 0..=300 {
            for diastolic in 0..=200 {
                assert!(
                    PRESSURE_RULES.iter().any(|rule| (rule.matches)(systolic, diastolic)),
                    "{}/{} fell through to the fallback",
                    systolic,
                    diastolic
                );
            }
        }
    }

    #[test]
    fn test_bmi_bands_ascending() {
        assert!(BMI_BANDS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_color_tokens() {
        assert_eq!(GlucoseLevel::InRange.severity().color_token(), "#27ae60");
        assert_eq!(GlucoseLevel::Low.severity().color_token(), "#e74c3c");
        assert_eq!(BloodPressureCategory::HypertensiveCrisis.severity().color_token(), "#c0392b");
        assert_eq!(BmiCategory::Underweight.severity().color_token(), "#3498db");
    }
}
