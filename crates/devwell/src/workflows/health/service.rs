use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use super::domain::{HealthData, HealthRecommendations, HealthReport};
use super::rules::recommend;
use crate::assistant::{ModelHandle, ModelProfile};
use crate::scoring::validation::FieldError;
use crate::workflows::assembly::{consult, parse_object, pretty_json, Sourced};
use crate::workflows::http::Envelope;
use crate::workflows::router::Workflow;

pub const HEALTH_MODEL: ModelProfile = ModelProfile::new("gemini-1.5-pro-001", 0.8, 0.9);

/// Produces personalized health advice from work patterns, risks and preferences.
#[derive(Debug, Clone)]
pub struct HealthRecommender {
    model: ModelHandle,
}

impl HealthRecommender {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn validate_health_data(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<HealthData, FieldError> {
        HealthData::from_payload(payload)
    }

    /// Report built from the rules alone.
    pub fn fallback(data: &HealthData) -> HealthReport {
        HealthReport {
            recommendations: Sourced::Fallback(recommend(data)),
            timestamp: Utc::now(),
            metadata: None,
            error: None,
        }
    }

    pub async fn generate(&self, data: &HealthData) -> HealthReport {
        let consultation = consult(
            &self.model,
            &HEALTH_MODEL,
            render_prompt(data),
            |reply| parse_object(reply).map(Sourced::Model),
            || Sourced::<HealthRecommendations>::Fallback(recommend(data)),
        )
        .await;

        HealthReport {
            recommendations: consultation.content,
            timestamp: Utc::now(),
            metadata: consultation.metadata,
            error: consultation.error,
        }
    }
}

fn render_prompt(data: &HealthData) -> String {
    format!(
        "Based on the following developer health data:\n\
         Work Patterns: {patterns}\n\
         Health Risks: {risks}\n\
         Preferences: {preferences}\n\n\
         Generate personalized health recommendations in the following categories:\n\
         1. Immediate Actions\n\
         2. Long-term Health Strategies\n\
         3. Exercise Recommendations\n\
         4. Ergonomic Adjustments\n\
         5. Lifestyle Modifications\n\n\
         Format the response as a JSON object with these categories as keys and arrays of \
         recommendations as values.",
        patterns = pretty_json(&data.work_patterns),
        risks = pretty_json(&data.health_risks),
        preferences = pretty_json(&data.preferences),
    )
}

#[async_trait]
impl Workflow for HealthRecommender {
    const NAME: &'static str = "health";
    const PATH: &'static str = "/api/v1/health/recommendations";
    const ENVELOPE: Envelope = Envelope {
        key: "healthData",
        missing_message: "Missing health data",
    };

    type Input = HealthData;
    type Output = HealthReport;

    fn validate(&self, payload: &Map<String, Value>) -> Result<HealthData, FieldError> {
        self.validate_health_data(payload)
    }

    async fn run(&self, input: HealthData) -> HealthReport {
        self.generate(&input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::testing::{health_payload, ScriptedModel};
    use serde_json::json;

    fn data() -> HealthData {
        HealthData::from_payload(&health_payload()).expect("valid health data")
    }

    #[tokio::test]
    async fn model_object_is_returned_as_is() {
        let model = ScriptedModel::replying(
            "```json\n{\"immediateActions\": [\"Look away from the screen\"], \"extra\": 1}\n```",
        );
        let recommender = HealthRecommender::new(model.handle());

        let report = recommender.generate(&data()).await;
        let body = serde_json::to_value(&report).expect("report serializes");

        assert_eq!(
            body["recommendations"],
            json!({ "immediateActions": ["Look away from the screen"], "extra": 1 })
        );
        assert_eq!(
            body["metadata"],
            json!({ "model": "gemini-1.5-pro-001", "version": "1.0" })
        );
        assert!(body.get("error").is_none());
        assert!(model.prompts()[0].contains("\"eyeStrain\": 82.0"));
    }

    #[tokio::test]
    async fn unusable_reply_uses_rule_recommendations() {
        let model = ScriptedModel::replying("Stay hydrated and rest.");
        let recommender = HealthRecommender::new(model.handle());

        let report = recommender.generate(&data()).await;

        let advice = report
            .recommendations
            .fallback()
            .expect("fallback recommendations");
        assert_eq!(
            advice.immediate_actions,
            vec!["Take an immediate eye break using 20-20-20 rule"]
        );
        assert!(report.metadata.is_some());
        assert!(report.error.is_some());
    }

    #[tokio::test]
    async fn unavailable_model_reports_the_reason() {
        let recommender =
            HealthRecommender::new(ModelHandle::unavailable("VERTEX_ACCESS_TOKEN is not configured"));

        let report = recommender.generate(&data()).await;
        let body = serde_json::to_value(&report).expect("report serializes");

        assert_eq!(
            body["recommendations"]["exerciseRecommendations"],
            json!([
                "Schedule yoga sessions during morning hours",
                "Schedule cycling sessions during morning hours"
            ])
        );
        assert!(body.get("metadata").is_none());
        assert_eq!(
            body["error"],
            json!("generative model unavailable: VERTEX_ACCESS_TOKEN is not configured")
        );
    }
}
