//! Storage row shapes.
//!
//! The hosted backend stores two collections, `measurements` and `profile`
//! (a single row), with snake_case columns. These types mirror those rows
//! exactly and convert to and from the in-memory models. No I/O happens here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::measurement::{Measurement, MeasurementKind, UnknownKindError};
use super::profile::Profile;

/// Row mapping errors.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("Invalid date in {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error(transparent)]
    UnknownKind(#[from] UnknownKindError),

    #[error("Row has no id: {0}")]
    MissingId(&'static str),
}

pub type RowResult<T> = Result<T, RowError>;

/// A row of the `measurements` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeasurementRow {
    /// Absent on insert; storage assigns it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: f64,
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub kind: String,
    pub notes: Option<String>,
    pub medication: Option<String>,
    pub exercised: Option<bool>,
    pub exercise_minutes: Option<u32>,
    pub symptoms: Option<Vec<String>>,
    pub weight: Option<f64>,
    pub systolic: Option<u32>,
    pub diastolic: Option<u32>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
}

/// The single row of the `profile` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub paternal_surname: String,
    #[serde(default)]
    pub maternal_surname: String,
    pub birth_date: Option<String>,
    pub age: Option<u32>,
    #[serde(default)]
    pub email: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub years_since_diagnosis: Option<f64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Parse an ISO date, tolerating a trailing time component.
pub fn parse_row_date(field: &'static str, value: &str) -> RowResult<NaiveDate> {
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| RowError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn format_row_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl TryFrom<MeasurementRow> for Measurement {
    type Error = RowError;

    fn try_from(row: MeasurementRow) -> RowResult<Self> {
        let id = row.id.ok_or(RowError::MissingId("measurements"))?;
        let date = parse_row_date("date", &row.date)?;
        let kind = row.kind.parse::<MeasurementKind>()?;

        let measurement = Measurement {
            id,
            value: row.value,
            date,
            time: row.time,
            kind,
            notes: row.notes,
            medication: row.medication,
            exercised: row.exercised,
            exercise_minutes: row.exercise_minutes,
            symptoms: row.symptoms.unwrap_or_default(),
            weight: row.weight,
            systolic: row.systolic,
            diastolic: row.diastolic,
            waist: row.waist,
            hip: row.hip,
        };

        if !measurement.is_in_domain() {
            warn!(
                id = %measurement.id,
                value = measurement.value,
                "glucose value outside the 0-1000 mg/dL domain"
            );
        }

        Ok(measurement)
    }
}

impl From<&Measurement> for MeasurementRow {
    fn from(m: &Measurement) -> Self {
        Self {
            id: Some(m.id.clone()),
            value: m.value,
            date: format_row_date(m.date),
            time: m.time.clone(),
            kind: m.kind.as_str().to_string(),
            notes: m.notes.clone(),
            medication: m.medication.clone(),
            exercised: m.exercised,
            exercise_minutes: m.exercise_minutes,
            symptoms: Some(m.symptoms.clone()),
            weight: m.weight,
            systolic: m.systolic,
            diastolic: m.diastolic,
            waist: m.waist,
            hip: m.hip,
        }
    }
}

impl MeasurementRow {
    /// Row for an insert: the local id is dropped so storage assigns its own.
    pub fn for_insert(m: &Measurement) -> Self {
        Self {
            id: None,
            ..Self::from(m)
        }
    }
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RowError;

    fn try_from(row: ProfileRow) -> RowResult<Self> {
        let id = row.id.ok_or(RowError::MissingId("profile"))?;
        let birth_date = row
            .birth_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| parse_row_date("birth_date", s))
            .transpose()?;

        // Age is taken as stored; it is only recomputed on save.
        Ok(Profile {
            id,
            first_name: row.first_name,
            paternal_surname: row.paternal_surname,
            maternal_surname: row.maternal_surname,
            birth_date,
            age: row.age.unwrap_or(0),
            email: row.email,
            height_cm: row.height,
            weight_kg: row.weight,
            years_since_diagnosis: row.years_since_diagnosis,
            created_at: row.created_at.unwrap_or_default(),
            updated_at: row.updated_at.unwrap_or_default(),
        })
    }
}

impl From<&Profile> for ProfileRow {
    fn from(p: &Profile) -> Self {
        Self {
            id: Some(p.id.clone()),
            first_name: p.first_name.clone(),
            paternal_surname: p.paternal_surname.clone(),
            maternal_surname: p.maternal_surname.clone(),
            birth_date: p.birth_date.map(format_row_date),
            age: Some(p.age),
            email: p.email.clone(),
            height: p.height_cm,
            weight: p.weight_kg,
            years_since_diagnosis: p.years_since_diagnosis,
            created_at: Some(p.created_at.clone()),
            updated_at: Some(p.updated_at.clone()),
        }
    }
}

/// Map a batch of storage rows, newest reading first.
///
/// Fails on the first row that cannot be mapped.
pub fn load_measurements(rows: Vec<MeasurementRow>) -> RowResult<Vec<Measurement>> {
    let mut measurements = rows
        .into_iter()
        .map(Measurement::try_from)
        .collect::<RowResult<Vec<_>>>()?;
    measurements.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, date: &str, kind: &str) -> MeasurementRow {
        MeasurementRow {
            id: Some(id.into()),
            value: 120.0,
            date: date.into(),
            time: "08:00".into(),
            kind: kind.into(),
            notes: None,
            medication: None,
            exercised: Some(true),
            exercise_minutes: Some(20),
            symptoms: None,
            weight: Some(80.0),
            systolic: Some(125),
            diastolic: Some(82),
            waist: None,
            hip: None,
        }
    }

    #[test]
    fn test_row_to_measurement() {
        let m = Measurement::try_from(row("m1", "2024-03-10", "postprandial")).unwrap();
        assert_eq!(m.id, "m1");
        assert_eq!(m.kind, MeasurementKind::Postprandial);
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert!(m.symptoms.is_empty());
        assert_eq!(m.exercise_minutes, Some(20));
    }

    #[test]
    fn test_row_date_with_timestamp_suffix() {
        let m = Measurement::try_from(row("m1", "2024-03-10T00:00:00+00:00", "fasting")).unwrap();
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_row_errors() {
        let err = Measurement::try_from(row("m1", "10/03/2024", "fasting")).unwrap_err();
        assert!(matches!(err, RowError::InvalidDate { field: "date", .. }));

        let err = Measurement::try_from(row("m1", "2024-03-10", "snack")).unwrap_err();
        assert!(matches!(err, RowError::UnknownKind(_)));

        let mut missing = row("m1", "2024-03-10", "fasting");
        missing.id = None;
        let err = Measurement::try_from(missing).unwrap_err();
        assert!(matches!(err, RowError::MissingId("measurements")));
    }

    #[test]
    fn test_insert_row_has_no_id_column() {
        let m = Measurement::try_from(row("m1", "2024-03-10", "other")).unwrap();
        let json = serde_json::to_value(MeasurementRow::for_insert(&m)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["exercise_minutes"], 20);
        assert_eq!(json["date"], "2024-03-10");
    }

    #[test]
    fn test_load_orders_newest_first() {
        let rows = vec![
            row("a", "2024-03-01", "fasting"),
            row("b", "2024-03-09", "fasting"),
            row("c", "2024-03-05", "fasting"),
        ];
        let ids: Vec<String> = load_measurements(rows)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_profile_row_keeps_stored_age() {
        let row = ProfileRow {
            id: Some("p1".into()),
            first_name: "Ana".into(),
            paternal_surname: String::new(),
            maternal_surname: String::new(),
            birth_date: Some("1980-01-01".into()),
            age: Some(40),
            email: "ana@example.com".into(),
            height: Some(160.0),
            weight: Some(70.0),
            years_since_diagnosis: Some(3.0),
            created_at: None,
            updated_at: None,
        };

        let profile = Profile::try_from(row).unwrap();
        assert_eq!(profile.age, 40);
        assert_eq!(profile.height_cm, Some(160.0));

        let back = ProfileRow::from(&profile);
        assert_eq!(back.birth_date.as_deref(), Some("1980-01-01"));
    }
}
