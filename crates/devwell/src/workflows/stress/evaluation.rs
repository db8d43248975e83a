use crate::scoring::{
    overall_score, round2, Category, CategoryThresholds, CompositeScore, MetricRange, SubFactor,
};

use super::domain::StressMetrics;

// Scoring spans differ from the validation bounds in `METRIC_BOUNDS`.
const TYPING_SPEED_SPAN: MetricRange = MetricRange::new(0.0, 100.0);
const ERROR_RATE_SPAN: MetricRange = MetricRange::new(0.0, 50.0);
const CODE_COMPLEXITY_SPAN: MetricRange = MetricRange::new(0.0, 100.0);
const KEYSTROKES_SPAN: MetricRange = MetricRange::new(0.0, 500.0);
const MOUSE_MOVEMENT_SPAN: MetricRange = MetricRange::new(0.0, 100.0);
const TIME_WITHOUT_BREAKS_SPAN: MetricRange = MetricRange::new(0.0, 120.0);

pub const STRESS_THRESHOLDS: CategoryThresholds = CategoryThresholds {
    moderate: 40.0,
    high: 70.0,
};

/// Deterministic stress scoring for one metrics snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StressAssessment {
    pub cognitive_load: CompositeScore,
    pub physical_strain: CompositeScore,
    pub score: f64,
    pub level: Category,
}

impl StressAssessment {
    pub fn evaluate(metrics: &StressMetrics) -> Self {
        let cognitive_load = cognitive_load(metrics);
        let physical_strain = physical_strain(metrics);
        let score = overall_score(&[cognitive_load.clone(), physical_strain.clone()]);
        let level = STRESS_THRESHOLDS.categorize(score);

        Self {
            cognitive_load,
            physical_strain,
            score,
            level,
        }
    }

    pub fn rounded_score(&self) -> f64 {
        round2(self.score)
    }
}

fn cognitive_load(metrics: &StressMetrics) -> CompositeScore {
    CompositeScore::from_factors(
        "cognitiveLoad",
        vec![
            SubFactor::from_metric("typingSpeed", metrics.typing_speed, TYPING_SPEED_SPAN),
            SubFactor::from_metric("errorRate", metrics.error_rate, ERROR_RATE_SPAN),
            SubFactor::from_metric(
                "codeComplexity",
                metrics.code_complexity,
                CODE_COMPLEXITY_SPAN,
            ),
        ],
    )
}

fn physical_strain(metrics: &StressMetrics) -> CompositeScore {
    CompositeScore::from_factors(
        "physicalStrain",
        vec![
            SubFactor::from_metric("keystrokes", metrics.keystrokes, KEYSTROKES_SPAN),
            SubFactor::from_metric("mouseMovement", metrics.mouse_movement, MOUSE_MOVEMENT_SPAN),
            SubFactor::from_metric(
                "timeWithoutBreaks",
                metrics.time_without_breaks,
                TIME_WITHOUT_BREAKS_SPAN,
            ),
        ],
    )
}
