use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use super::domain::{StressAnalysis, StressIndicators, StressMetrics};
use super::evaluation::StressAssessment;
use super::rules::{contributing_factors, recommendations};
use crate::assistant::{parse_reply, InitError, ModelHandle, ModelProfile, VertexClient};
use crate::config::AssistantConfig;
use crate::scoring::round2;
use crate::scoring::validation::FieldError;
use crate::workflows::assembly::consult;
use crate::workflows::http::Envelope;
use crate::workflows::router::Workflow;

pub const STRESS_MODEL: ModelProfile = ModelProfile::new("gemini-1.5-flash-002", 1.0, 0.95);

/// Scores developer stress and asks the model for tailored recommendations.
#[derive(Debug, Clone)]
pub struct StressAnalyzer {
    model: ModelHandle,
}

impl StressAnalyzer {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn connect(config: &AssistantConfig) -> Result<Self, InitError> {
        Ok(Self::new(ModelHandle::ready(VertexClient::new(config)?)))
    }

    pub fn validate_metrics(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<StressMetrics, FieldError> {
        StressMetrics::from_payload(payload)
    }

    /// Deterministic analysis with rule-based recommendations.
    pub fn fallback(metrics: &StressMetrics) -> StressAnalysis {
        let assessment = StressAssessment::evaluate(metrics);
        let advice = recommendations(assessment.level);
        build_analysis(metrics, &assessment, advice)
    }

    pub async fn analyze(&self, metrics: &StressMetrics) -> StressAnalysis {
        let assessment = StressAssessment::evaluate(metrics);
        let prompt = render_prompt(metrics, &assessment);

        let consultation = consult(
            &self.model,
            &STRESS_MODEL,
            prompt,
            parse_reply::<Vec<String>>,
            || recommendations(assessment.level),
        )
        .await;

        StressAnalysis {
            metadata: consultation.metadata,
            error: consultation.error,
            ..build_analysis(metrics, &assessment, consultation.content)
        }
    }
}

fn build_analysis(
    metrics: &StressMetrics,
    assessment: &StressAssessment,
    recommendations: Vec<String>,
) -> StressAnalysis {
    StressAnalysis {
        stress_level: assessment.level,
        stress_score: assessment.rounded_score(),
        metrics: StressIndicators {
            cognitive_load: round2(assessment.cognitive_load.value),
            physical_strain: round2(assessment.physical_strain.value),
            contributing_factors: contributing_factors(metrics),
        },
        recommendations,
        timestamp: Utc::now(),
        metadata: None,
        error: None,
    }
}

fn render_prompt(metrics: &StressMetrics, assessment: &StressAssessment) -> String {
    let metrics_json = serde_json::to_string_pretty(metrics).unwrap_or_default();
    let factors = contributing_factors(metrics);
    let factors = if factors.is_empty() {
        "none".to_string()
    } else {
        factors.join(", ")
    };

    format!(
        "Based on the following developer activity metrics:\n\
         {metrics_json}\n\n\
         Computed indicators:\n\
         - Stress level: {level} (score {score:.2})\n\
         - Cognitive load: {cognitive:.2}\n\
         - Physical strain: {physical:.2}\n\
         - Contributing factors: {factors}\n\n\
         Suggest three to five short, concrete actions this developer can take to reduce stress.\n\
         Format the response as a JSON array of strings.",
        level = assessment.level.label(),
        score = assessment.score,
        cognitive = assessment.cognitive_load.value,
        physical = assessment.physical_strain.value,
    )
}

#[async_trait]
impl Workflow for StressAnalyzer {
    const NAME: &'static str = "stress";
    const PATH: &'static str = "/api/v1/stress/analyze";
    const ENVELOPE: Envelope = Envelope {
        key: "developerMetrics",
        missing_message: "Missing developer metrics",
    };

    type Input = StressMetrics;
    type Output = StressAnalysis;

    fn validate(&self, payload: &Map<String, Value>) -> Result<StressMetrics, FieldError> {
        self.validate_metrics(payload)
    }

    async fn run(&self, input: StressMetrics) -> StressAnalysis {
        self.analyze(&input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Category;
    use crate::workflows::testing::ScriptedModel;

    fn metrics() -> StressMetrics {
        StressMetrics {
            typing_speed: 50.0,
            error_rate: 15.0,
            code_complexity: 30.0,
            time_without_breaks: 20.0,
            keystrokes: 100.0,
            mouse_movement: 50.0,
        }
    }

    #[test]
    fn fallback_reports_rounded_scores_and_factors() {
        let analysis = StressAnalyzer::fallback(&metrics());

        assert_eq!(analysis.stress_level, Category::Low);
        assert_eq!(analysis.metrics.cognitive_load, 36.67);
        assert_eq!(analysis.metrics.physical_strain, 28.89);
        assert_eq!(analysis.stress_score, 32.78);
        assert_eq!(analysis.metrics.contributing_factors, vec!["High error rate"]);
        assert_eq!(analysis.recommendations[0], "Maintain current work rhythm");
        assert!(analysis.error.is_none());
    }

    #[tokio::test]
    async fn model_recommendations_replace_rule_advice() {
        let model = ScriptedModel::replying("```json\n[\"Walk for ten minutes\"]\n```");
        let analyzer = StressAnalyzer::new(model.handle());

        let analysis = analyzer.analyze(&metrics()).await;

        assert_eq!(analysis.recommendations, vec!["Walk for ten minutes"]);
        assert_eq!(analysis.stress_score, 32.78);
        assert_eq!(
            analysis.metadata.as_ref().map(|meta| meta.model.as_str()),
            Some("gemini-1.5-flash-002")
        );
        assert!(analysis.error.is_none());

        let prompts = model.prompts();
        assert!(prompts[0].contains("\"errorRate\": 15.0"));
        assert!(prompts[0].contains("Contributing factors: High error rate"));
    }

    #[tokio::test]
    async fn failed_model_call_degrades_to_rules() {
        let analyzer = StressAnalyzer::new(ScriptedModel::failing().handle());

        let analysis = analyzer.analyze(&metrics()).await;

        assert_eq!(analysis.recommendations, recommendations(Category::Low));
        assert!(analysis.metadata.is_none());
        assert!(analysis
            .error
            .as_deref()
            .is_some_and(|error| error.contains("503")));
    }

    #[test]
    fn connect_reports_missing_configuration() {
        let err = StressAnalyzer::connect(&AssistantConfig::default()).expect_err("unconfigured");
        assert!(matches!(err, InitError::MissingProject));
    }
}
