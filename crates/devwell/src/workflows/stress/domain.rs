use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::assistant::ModelMetadata;
use crate::scoring::validation::{FieldError, Fields};
use crate::scoring::{Category, MetricRange};

/// Accepted input bounds per metric, in declaration order.
pub const METRIC_BOUNDS: [(&str, MetricRange); 6] = [
    ("typingSpeed", MetricRange::new(0.0, 200.0)),
    ("errorRate", MetricRange::new(0.0, 100.0)),
    ("codeComplexity", MetricRange::new(0.0, 100.0)),
    ("timeWithoutBreaks", MetricRange::new(0.0, 480.0)),
    ("keystrokes", MetricRange::new(0.0, 1000.0)),
    ("mouseMovement", MetricRange::new(0.0, 1000.0)),
];

/// Validated developer activity snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StressMetrics {
    pub typing_speed: f64,
    pub error_rate: f64,
    pub code_complexity: f64,
    pub time_without_breaks: f64,
    pub keystrokes: f64,
    pub mouse_movement: f64,
}

impl StressMetrics {
    /// Check presence of every metric first, then type and range in declaration order.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, FieldError> {
        let fields = Fields::new("required metrics", payload);
        fields.present_all(METRIC_BOUNDS.iter().map(|(name, _)| *name))?;

        let mut values = [0.0; 6];
        for (slot, (name, range)) in values.iter_mut().zip(METRIC_BOUNDS) {
            *slot = fields.number(name, range)?;
        }

        let [typing_speed, error_rate, code_complexity, time_without_breaks, keystrokes, mouse_movement] =
            values;
        Ok(Self {
            typing_speed,
            error_rate,
            code_complexity,
            time_without_breaks,
            keystrokes,
            mouse_movement,
        })
    }
}

/// Composite indicators reported alongside the overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StressIndicators {
    pub cognitive_load: f64,
    pub physical_strain: f64,
    pub contributing_factors: Vec<String>,
}

/// Response body for a stress analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StressAnalysis {
    pub stress_level: Category,
    pub stress_score: f64,
    pub metrics: StressIndicators,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
