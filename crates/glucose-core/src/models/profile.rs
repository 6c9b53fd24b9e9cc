//! User profile models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The single user profile.
///
/// `age` is derived from `birth_date` whenever the profile is saved through
/// [`Profile::apply_update`] or [`Profile::set_birth_date`]; reading a profile
/// never recomputes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Storage identifier
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Paternal surname
    pub paternal_surname: String,
    /// Maternal surname
    pub maternal_surname: String,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Age in completed years as of the last save
    pub age: u32,
    /// Contact email
    pub email: String,
    /// Height in cm (needed for BMI)
    pub height_cm: Option<f64>,
    /// Weight in kg as entered on the profile
    pub weight_kg: Option<f64>,
    /// Years since diagnosis
    pub years_since_diagnosis: Option<f64>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Editable profile fields, as submitted from a profile form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub years_since_diagnosis: Option<f64>,
}

impl Profile {
    /// Create a new profile with required fields.
    pub fn new(first_name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: first_name.into(),
            paternal_surname: String::new(),
            maternal_surname: String::new(),
            birth_date: None,
            age: 0,
            email: String::new(),
            height_cm: None,
            weight_kg: None,
            years_since_diagnosis: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Save a profile form: update the existing profile, or create one if none exists yet.
    pub fn upsert(existing: Option<Profile>, update: ProfileUpdate, today: NaiveDate) -> Profile {
        let mut profile = existing.unwrap_or_else(|| Profile::new(String::new()));
        profile.apply_update(update, today);
        profile
    }

    /// Completed years between `birth_date` and `today`.
    ///
    /// Birthdays later in the year than `today` have not happened yet. Birth
    /// dates in the future yield 0.
    pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
        let mut years = today.year() - birth_date.year();
        if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// Overwrite the editable fields and recompute age.
    pub fn apply_update(&mut self, update: ProfileUpdate, today: NaiveDate) {
        self.first_name = update.first_name;
        self.paternal_surname = update.paternal_surname;
        self.maternal_surname = update.maternal_surname;
        self.email = update.email;
        self.height_cm = update.height_cm;
        self.weight_kg = update.weight_kg;
        self.years_since_diagnosis = update.years_since_diagnosis;
        self.set_birth_date(update.birth_date, today);
    }

    /// Set the birth date, recompute age and touch the update timestamp.
    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>, today: NaiveDate) {
        self.birth_date = birth_date;
        self.age = birth_date.map(|b| Self::age_on(b, today)).unwrap_or(0);
        self.touch();
    }

    /// Height usable for BMI (present and positive).
    pub fn known_height_cm(&self) -> Option<f64> {
        self.height_cm.filter(|h| *h > 0.0)
    }

    /// Given name followed by both surnames, skipping blanks.
    pub fn full_name(&self) -> String {
        [
            self.first_name.as_str(),
            self.paternal_surname.as_str(),
            self.maternal_surname.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
