//! Glucose measurement models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower edge of the plausible glucose domain (mg/dL).
pub const VALUE_DOMAIN_MIN: f64 = 0.0;

/// Upper edge of the plausible glucose domain (mg/dL).
pub const VALUE_DOMAIN_MAX: f64 = 1000.0;

/// A measurement kind string that matched no known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown measurement kind: {0}")]
pub struct UnknownKindError(pub String);

/// When the reading was taken relative to food.
///
/// Governs which target band glucose classification uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Before any food, usually first thing in the morning
    Fasting,
    /// Two hours after a meal
    Postprandial,
    /// Just before a meal
    BeforeMeal,
    /// Shortly after a meal
    AfterMeal,
    /// Anything else (bedtime, random check)
    Other,
}

impl MeasurementKind {
    /// Every kind, in display order.
    pub const ALL: [MeasurementKind; 5] = [
        MeasurementKind::Fasting,
        MeasurementKind::Postprandial,
        MeasurementKind::BeforeMeal,
        MeasurementKind::AfterMeal,
        MeasurementKind::Other,
    ];

    /// Wire name used by storage rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Fasting => "fasting",
            MeasurementKind::Postprandial => "postprandial",
            MeasurementKind::BeforeMeal => "before_meal",
            MeasurementKind::AfterMeal => "after_meal",
            MeasurementKind::Other => "other",
        }
    }

    /// Human-readable label for history tables.
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementKind::Fasting => "Fasting",
            MeasurementKind::Postprandial => "Postprandial",
            MeasurementKind::BeforeMeal => "Before meal",
            MeasurementKind::AfterMeal => "After meal",
            MeasurementKind::Other => "Other",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        MeasurementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}

/// A single glucose reading plus whatever auxiliary metrics were taken with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Storage-assigned identifier (a local UUID until storage assigns one)
    pub id: String,
    /// Glucose concentration in mg/dL
    pub value: f64,
    /// Calendar date of the reading
    pub date: NaiveDate,
    /// Time of day as entered, display only
    pub time: String,
    /// Reading kind
    pub kind: MeasurementKind,
    /// Free-text notes
    pub notes: Option<String>,
    /// Medication taken around the reading
    pub medication: Option<String>,
    /// Whether the user exercised that day
    pub exercised: Option<bool>,
    /// Minutes of exercise, only meaningful when `exercised` is true
    pub exercise_minutes: Option<u32>,
    /// Symptom tags
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Body weight in kg
    pub weight: Option<f64>,
    /// Systolic blood pressure in mmHg
    pub systolic: Option<u32>,
    /// Diastolic blood pressure in mmHg
    pub diastolic: Option<u32>,
    /// Waist circumference in cm
    pub waist: Option<f64>,
    /// Hip circumference in cm
    pub hip: Option<f64>,
}

impl Measurement {
    /// Create a new measurement with required fields.
    pub fn new(value: f64, date: NaiveDate, time: impl Into<String>, kind: MeasurementKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            value,
            date,
            time: time.into(),
            kind,
            notes: None,
            medication: None,
            exercised: None,
            exercise_minutes: None,
            symptoms: Vec::new(),
            weight: None,
            systolic: None,
            diastolic: None,
            waist: None,
            hip: None,
        }
    }

    /// Check whether the glucose value lies in the plausible 0–1000 mg/dL domain.
    pub fn is_in_domain(&self) -> bool {
        (VALUE_DOMAIN_MIN..=VALUE_DOMAIN_MAX).contains(&self.value)
    }

    /// True only when exercise was explicitly recorded.
    pub fn did_exercise(&self) -> bool {
        self.exercised == Some(true)
    }

    /// Exercise minutes counted toward aggregates: zero unless exercise was recorded.
    pub fn counted_exercise_minutes(&self) -> u32 {
        if self.did_exercise() {
            self.exercise_minutes.unwrap_or(0)
        } else {
            0
        }
    }

    /// Systolic/diastolic pair when both were recorded.
    pub fn blood_pressure(&self) -> Option<(u32, u32)> {
        match (self.systolic, self.diastolic) {
            (Some(sys), Some(dia)) if sys > 0 && dia > 0 => Some((sys, dia)),
            _ => None,
        }
    }

    /// Add a symptom tag. Blank and duplicate tags are ignored.
    ///
    /// Returns whether the tag was added.
    pub fn add_symptom(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.symptoms.iter().any(|s| s == tag) {
            return false;
        }
        self.symptoms.push(tag.to_string());
        true
    }

    /// Remove a symptom tag if present.
    pub fn remove_symptom(&mut self, tag: &str) {
        self.symptoms.retain(|s| s != tag);
    }
}
