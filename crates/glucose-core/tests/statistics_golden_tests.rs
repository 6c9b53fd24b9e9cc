//! Golden tests for the metrics engine.
//!
//! These tests verify summaries and recommendations against known cases.

use anyhow::Result;
use chrono::NaiveDate;
use glucose_core::metrics::{glucose_series, MetricsEngine, Recommendation};
use glucose_core::models::{load_measurements, Measurement, MeasurementKind, MeasurementRow, Profile, ProfileRow};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(2024, 3, 31)
}

/// Test case for the summary table.
struct GoldenCase {
    id: &'static str,
    readings: &'static [(f64, MeasurementKind, Option<u32>)],
    expected_average: f64,
    expected_avg_fasting: f64,
    expected_avg_postprandial: f64,
    expected_percent_in_range: f64,
    expected_recommendations: &'static [Recommendation],
}

fn get_golden_cases() -> Vec<GoldenCase> {
    use MeasurementKind::*;
    use Recommendation::*;

    vec![
        GoldenCase {
            id: "fasting-and-postprandial",
            readings: &[(100.0, Fasting, None), (200.0, Postprandial, None)],
            expected_average: 150.0,
            expected_avg_fasting: 100.0,
            expected_avg_postprandial: 200.0,
            expected_percent_in_range: 50.0,
            expected_recommendations: &[ElevatedPostprandial, LowTimeInRange, IncreaseActivity],
        },
        GoldenCase {
            id: "all-in-range-sedentary",
            readings: &[(95.0, Fasting, None), (150.0, Postprandial, None), (110.0, Other, None)],
            expected_average: 118.3,
            expected_avg_fasting: 95.0,
            expected_avg_postprandial: 150.0,
            expected_percent_in_range: 100.0,
            expected_recommendations: &[IncreaseActivity],
        },
        GoldenCase {
            id: "hypoglycemic-mornings",
            readings: &[(60.0, Fasting, None), (65.0, Fasting, None)],
            expected_average: 62.5,
            expected_avg_fasting: 62.5,
            expected_avg_postprandial: 0.0,
            expected_percent_in_range: 0.0,
            expected_recommendations: &[LowTimeInRange, IncreaseActivity],
        },
        GoldenCase {
            id: "high-fasting",
            readings: &[(150.0, Fasting, None), (140.0, Fasting, None), (160.0, Postprandial, None)],
            expected_average: 150.0,
            expected_avg_fasting: 145.0,
            expected_avg_postprandial: 160.0,
            expected_percent_in_range: 100.0,
            expected_recommendations: &[ElevatedFasting, IncreaseActivity],
        },
        GoldenCase {
            id: "upper-edge-of-range",
            readings: &[(180.0, Other, None)],
            expected_average: 180.0,
            expected_avg_fasting: 0.0,
            expected_avg_postprandial: 0.0,
            expected_percent_in_range: 100.0,
            expected_recommendations: &[IncreaseActivity],
        },
        GoldenCase {
            id: "well-controlled-and-active",
            readings: &[(100.0, Fasting, Some(45)), (150.0, Postprandial, Some(30))],
            expected_average: 125.0,
            expected_avg_fasting: 100.0,
            expected_avg_postprandial: 150.0,
            expected_percent_in_range: 100.0,
            expected_recommendations: &[KeepItUp],
        },
    ]
}

#[test]
fn test_golden_cases() {
    let engine = MetricsEngine::new();

    for case in get_golden_cases() {
        let measurements: Vec<Measurement> = case
            .readings
            .iter()
            .map(|(value, kind, exercise)| {
                let mut m = Measurement::new(*value, today(), "08:00", *kind);
                if let Some(minutes) = exercise {
                    m.exercised = Some(true);
                    m.exercise_minutes = Some(*minutes);
                }
                m
            })
            .collect();

        let stats = engine.summarize_at(&measurements, None, today());
        assert_eq!(stats.count, measurements.len(), "Case {}: count mismatch", case.id);
        assert_eq!(stats.average, case.expected_average, "Case {}: average mismatch", case.id);
        assert_eq!(
            stats.avg_fasting, case.expected_avg_fasting,
            "Case {}: fasting average mismatch", case.id
        );
        assert_eq!(
            stats.avg_postprandial, case.expected_avg_postprandial,
            "Case {}: postprandial average mismatch", case.id
        );
        assert_eq!(
            stats.percent_in_range, case.expected_percent_in_range,
            "Case {}: percent in range mismatch", case.id
        );

        let recommendations = engine.recommendations_at(&measurements, None, today());
        assert_eq!(
            recommendations, case.expected_recommendations,
            "Case {}: recommendations mismatch", case.id
        );
    }
}

fn load_fixture() -> Result<(Vec<Measurement>, Profile)> {
    let rows: Vec<MeasurementRow> =
        serde_json::from_str(include_str!("fixtures/measurements.json"))?;
    let profile_row: ProfileRow = serde_json::from_str(include_str!("fixtures/profile.json"))?;
    Ok((load_measurements(rows)?, Profile::try_from(profile_row)?))
}

#[test]
fn test_fixture_loads_newest_first() -> Result<()> {
    let (measurements, profile) = load_fixture()?;

    let ids: Vec<&str> = measurements.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
    assert_eq!(measurements[3].kind, MeasurementKind::AfterMeal);
    assert_eq!(measurements[4].symptoms, vec!["shakiness", "sweating"]);
    assert_eq!(profile.full_name(), "Ana Reyes Ortega");
    assert_eq!(profile.age, 48);
    Ok(())
}

#[test]
fn test_fixture_summary() -> Result<()> {
    let (measurements, profile) = load_fixture()?;
    let stats = MetricsEngine::new().summarize_at(&measurements, Some(&profile), today());

    assert_eq!(stats.count, 6);
    assert_eq!(stats.average, 135.8);
    assert_eq!(stats.max, 195.0);
    assert_eq!(stats.min, 64.0);
    assert_eq!(stats.count_last_7_days, 3);
    assert_eq!(stats.count_last_30_days, 5);
    assert_eq!(stats.avg_fasting, 122.0);
    assert_eq!(stats.avg_postprandial, 172.0);
    assert_eq!(stats.count_in_range, 4);
    assert_eq!(stats.count_out_of_range, 2);
    assert_eq!(stats.percent_in_range, 66.7);

    assert_eq!(stats.days_with_exercise, 2);
    assert_eq!(stats.total_exercise_minutes, 75);
    assert_eq!(stats.avg_exercise_minutes, 37.5);

    assert_eq!(stats.avg_weight, 75.5);
    assert_eq!(stats.avg_bmi, 26.1);
    assert_eq!(stats.avg_systolic, 130);
    assert_eq!(stats.avg_diastolic, 84);
    assert_eq!(stats.avg_waist, 96.0);
    assert_eq!(stats.avg_hip, 104.0);
    assert_eq!(stats.waist_hip_ratio, 0.92);
    Ok(())
}

#[test]
fn test_fixture_recommendations() -> Result<()> {
    let (measurements, profile) = load_fixture()?;
    let engine = MetricsEngine::new();

    assert_eq!(
        engine.recommendations_at(&measurements, Some(&profile), today()),
        vec![Recommendation::LowTimeInRange, Recommendation::WeightManagement]
    );

    // Without a profile there is no BMI to judge.
    assert_eq!(
        engine.recommendations_at(&measurements, None, today()),
        vec![Recommendation::LowTimeInRange]
    );
    Ok(())
}

#[test]
fn test_fixture_chart_series() -> Result<()> {
    let (measurements, _) = load_fixture()?;
    let series = glucose_series(&measurements, today(), 30);

    let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["05/03", "20/03", "27/03", "30/03", "30/03"]);
    assert_eq!(series[3].value, 118.0);
    assert_eq!(series[4].value, 172.0);
    Ok(())
}
