use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::assistant::ModelMetadata;
use crate::scoring::validation::{FieldError, Fields, RangeStyle};
use crate::scoring::MetricRange;
use crate::workflows::assembly::Sourced;

pub const WORK_PATTERN_BOUNDS: [(&str, MetricRange); 5] = [
    ("averageDailyHours", MetricRange::new(0.0, 24.0)),
    ("breaksFrequency", MetricRange::new(0.0, 60.0)),
    ("nightWorkFrequency", MetricRange::new(0.0, 7.0)),
    ("weekendWorkHours", MetricRange::new(0.0, 48.0)),
    ("longestStretch", MetricRange::new(0.0, 24.0)),
];

pub const RISK_FIELDS: [&str; 5] = [
    "eyeStrain",
    "repetitiveStrain",
    "stressLevel",
    "sleepQuality",
    "posturalIssues",
];

pub const RISK_RANGE: MetricRange = MetricRange::new(0.0, 100.0);

const PREFERENCE_FIELDS: [&str; 5] = [
    "exerciseType",
    "timePreference",
    "intensityPreference",
    "existingConditions",
    "dietaryRestrictions",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPatterns {
    pub average_daily_hours: f64,
    pub breaks_frequency: f64,
    pub night_work_frequency: f64,
    pub weekend_work_hours: f64,
    pub longest_stretch: f64,
}

/// Self-reported risk levels, each on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRisks {
    pub eye_strain: f64,
    pub repetitive_strain: f64,
    pub stress_level: f64,
    pub sleep_quality: f64,
    pub postural_issues: f64,
}

/// Exercise and lifestyle preferences. Only the fields the rules read are typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPreferences {
    pub exercise_type: Vec<String>,
    pub time_preference: String,
    pub intensity_preference: Value,
    pub existing_conditions: Value,
    pub dietary_restrictions: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub work_patterns: WorkPatterns,
    pub health_risks: HealthRisks,
    pub preferences: HealthPreferences,
}

impl HealthData {
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, FieldError> {
        let patterns = Fields::section("work pattern", payload, "workPatterns")?
            .with_range_style(RangeStyle::Invalid);
        let mut pattern_values = [0.0; 5];
        for (slot, (name, range)) in pattern_values.iter_mut().zip(WORK_PATTERN_BOUNDS) {
            *slot = patterns.number(name, range)?;
        }
        let [average_daily_hours, breaks_frequency, night_work_frequency, weekend_work_hours, longest_stretch] =
            pattern_values;

        let risks = Fields::section("health risk", payload, "healthRisks")?
            .with_range_style(RangeStyle::Invalid);
        let mut risk_values = [0.0; 5];
        for (slot, name) in risk_values.iter_mut().zip(RISK_FIELDS) {
            *slot = risks.number(name, RISK_RANGE)?;
        }
        let [eye_strain, repetitive_strain, stress_level, sleep_quality, postural_issues] =
            risk_values;

        let preferences = Fields::section("preference", payload, "preferences")?;
        for name in PREFERENCE_FIELDS {
            preferences.present(name)?;
        }

        Ok(Self {
            work_patterns: WorkPatterns {
                average_daily_hours,
                breaks_frequency,
                night_work_frequency,
                weekend_work_hours,
                longest_stretch,
            },
            health_risks: HealthRisks {
                eye_strain,
                repetitive_strain,
                stress_level,
                sleep_quality,
                postural_issues,
            },
            preferences: HealthPreferences {
                exercise_type: preferences.string_list("exerciseType")?,
                time_preference: preferences.string("timePreference")?,
                intensity_preference: preferences.require("intensityPreference")?.clone(),
                existing_conditions: preferences.require("existingConditions")?.clone(),
                dietary_restrictions: preferences.require("dietaryRestrictions")?.clone(),
            },
        })
    }
}

/// Rule-based advice grouped the same way the model is asked to group it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecommendations {
    pub immediate_actions: Vec<String>,
    pub long_term_strategies: Vec<String>,
    pub exercise_recommendations: Vec<String>,
    pub ergonomic_adjustments: Vec<String>,
    pub lifestyle_modifications: Vec<String>,
}

/// Response body for a health recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub recommendations: Sourced<HealthRecommendations>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::testing::health_payload;
    use serde_json::json;

    #[test]
    fn parses_a_complete_payload() {
        let data = HealthData::from_payload(&health_payload()).expect("valid health data");
        assert_eq!(data.work_patterns.breaks_frequency, 4.0);
        assert_eq!(data.health_risks.eye_strain, 82.0);
        assert_eq!(data.preferences.exercise_type, vec!["yoga", "cycling"]);
        assert_eq!(data.preferences.time_preference, "morning");
    }

    #[test]
    fn missing_section_reports_its_first_field() {
        let mut payload = health_payload();
        payload.remove("healthRisks");
        let err = HealthData::from_payload(&payload).expect_err("risks missing");
        assert_eq!(err.to_string(), "Missing health risk: eyeStrain");
    }

    #[test]
    fn work_pattern_ranges_are_enforced() {
        let mut payload = health_payload();
        payload["workPatterns"]["nightWorkFrequency"] = json!(8);
        let err = HealthData::from_payload(&payload).expect_err("out of range");
        assert_eq!(
            err.to_string(),
            "Invalid nightWorkFrequency: must be between 0 and 7"
        );
    }

    #[test]
    fn risk_ranges_use_the_same_wording() {
        let mut payload = health_payload();
        payload["healthRisks"]["posturalIssues"] = json!(-1);
        let err = HealthData::from_payload(&payload).expect_err("out of range");
        assert_eq!(
            err.to_string(),
            "Invalid posturalIssues: must be between 0 and 100"
        );
    }

    #[test]
    fn risk_values_must_be_numeric() {
        let mut payload = health_payload();
        payload["healthRisks"]["sleepQuality"] = json!("poor");
        let err = HealthData::from_payload(&payload).expect_err("invalid type");
        assert_eq!(err.to_string(), "Invalid type for sleepQuality: expected number");
    }

    #[test]
    fn every_preference_must_be_present() {
        let mut payload = health_payload();
        payload["preferences"]
            .as_object_mut()
            .expect("preferences object")
            .remove("dietaryRestrictions");
        let err = HealthData::from_payload(&payload).expect_err("preference missing");
        assert_eq!(err.to_string(), "Missing preference: dietaryRestrictions");
    }

    #[test]
    fn exercise_types_must_be_text() {
        let mut payload = health_payload();
        payload["preferences"]["exerciseType"] = json!("yoga");
        let err = HealthData::from_payload(&payload).expect_err("not a list");
        assert_eq!(err.field(), "exerciseType");
    }
}
