//! Rule-based recommendations.
//!
//! Every rule is evaluated against the summary statistics and all matching
//! rules fire. Output order is table order; it carries no priority.

use serde::{Deserialize, Serialize};

use crate::models::Statistics;

use super::config::MetricsConfig;

/// A recommendation produced by the rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ElevatedFasting,
    ElevatedPostprandial,
    LowTimeInRange,
    IncreaseActivity,
    WeightManagement,
    ReduceSodium,
    /// Emitted alone when no other rule fired
    KeepItUp,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::ElevatedFasting => {
                "Your fasting glucose is elevated. Consider adjusting your medication or diet."
            }
            Recommendation::ElevatedPostprandial => {
                "Your post-meal glucose is high. Review your food choices and meal times."
            }
            Recommendation::LowTimeInRange => {
                "Less than 70% of your readings are in range. Consult your physician."
            }
            Recommendation::IncreaseActivity => {
                "Increase your physical activity. Aim for at least 30 minutes of exercise daily."
            }
            Recommendation::WeightManagement => {
                "Your BMI indicates overweight. Consider working with a nutritionist on your diet."
            }
            Recommendation::ReduceSodium => {
                "Your systolic blood pressure is elevated. Cut back on salt and consult your physician."
            }
            Recommendation::KeepItUp => {
                "Excellent! Your control is in a good range. Keep up your healthy habits."
            }
        }
    }
}

/// Predicate over the summary and configured limits.
pub type RecommendationPredicate = fn(&Statistics, &MetricsConfig) -> bool;

/// One row of the recommendation table.
#[derive(Clone, Copy)]
pub struct RecommendationRule {
    pub recommendation: Recommendation,
    pub fires: RecommendationPredicate,
}

fn fasting_above_target(stats: &Statistics, config: &MetricsConfig) -> bool {
    stats.avg_fasting > config.glucose.fasting.max
}

fn postprandial_above_target(stats: &Statistics, config: &MetricsConfig) -> bool {
    stats.avg_postprandial > config.glucose.postprandial.max
}

fn time_in_range_too_low(stats: &Statistics, config: &MetricsConfig) -> bool {
    stats.percent_in_range < config.recommendations.min_percent_in_range
}

fn too_little_exercise(stats: &Statistics, config: &MetricsConfig) -> bool {
    stats.avg_exercise_minutes < config.recommendations.min_exercise_minutes
}

fn bmi_above_limit(stats: &Statistics, config: &MetricsConfig) -> bool {
    stats.avg_bmi > config.recommendations.max_bmi
}

fn systolic_above_limit(stats: &Statistics, config: &MetricsConfig) -> bool {
    stats.avg_systolic > config.recommendations.max_systolic
}

pub const RECOMMENDATION_RULES: [RecommendationRule; 6] = [
    RecommendationRule { recommendation: Recommendation::ElevatedFasting, fires: fasting_above_target },
    RecommendationRule { recommendation: Recommendation::ElevatedPostprandial, fires: postprandial_above_target },
    RecommendationRule { recommendation: Recommendation::LowTimeInRange, fires: time_in_range_too_low },
    RecommendationRule { recommendation: Recommendation::IncreaseActivity, fires: too_little_exercise },
    RecommendationRule { recommendation: Recommendation::WeightManagement, fires: bmi_above_limit },
    RecommendationRule { recommendation: Recommendation::ReduceSodium, fires: systolic_above_limit },
];

/// Run every rule against `stats`.
///
/// Never empty: `KeepItUp` is returned alone when nothing fired.
pub fn evaluate_rules(stats: &Statistics, config: &MetricsConfig) -> Vec<Recommendation> {
    let fired: Vec<Recommendation> = RECOMMENDATION_RULES
        .iter()
        .filter(|rule| (rule.fires)(stats, config))
        .map(|rule| rule.recommendation)
        .collect();

    if fired.is_empty() {
        vec![Recommendation::KeepItUp]
    } else {
        fired
    }
}
