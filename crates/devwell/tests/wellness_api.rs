use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use devwell::assistant::{AssistantError, GenerationRequest, GenerativeModel, ModelHandle};
use devwell::workflows::stress::{score_csv, StressAnalyzer, StressMetrics};
use devwell::workflows::WellnessServices;
use serde_json::{json, Value};
use tower::ServiceExt;

struct OfflineModel;

#[async_trait]
impl GenerativeModel for OfflineModel {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, AssistantError> {
        Err(AssistantError::Status {
            status: 500,
            body: "internal".to_string(),
        })
    }
}

struct CannedModel(&'static str);

#[async_trait]
impl GenerativeModel for CannedModel {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, AssistantError> {
        Ok(self.0.to_string())
    }
}

fn reference_metrics() -> Value {
    json!({
        "typingSpeed": 50,
        "errorRate": 5,
        "codeComplexity": 30,
        "timeWithoutBreaks": 20,
        "keystrokes": 100,
        "mouseMovement": 50
    })
}

async fn post(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn reference_metrics_score_low_without_a_model() {
    let router = WellnessServices::new(ModelHandle::ready(OfflineModel)).router();

    let (status, body) = post(
        router,
        "/api/v1/stress/analyze",
        json!({ "developerMetrics": reference_metrics() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stressLevel"], json!("low"));
    assert_eq!(body["stressScore"], json!(29.44));
    assert_eq!(body["metrics"]["cognitiveLoad"], json!(30.0));
    assert_eq!(body["metrics"]["physicalStrain"], json!(28.89));
    assert_eq!(body["metrics"]["contributingFactors"], json!([]));
    assert_eq!(
        body["recommendations"],
        json!([
            "Maintain current work rhythm",
            "Schedule regular breaks",
            "Monitor stress levels"
        ])
    );
    assert_eq!(
        body["error"],
        json!("generative model returned HTTP 500: internal")
    );
}

#[tokio::test]
async fn missing_typing_speed_is_rejected() {
    let mut metrics = reference_metrics();
    metrics
        .as_object_mut()
        .expect("metrics object")
        .remove("typingSpeed");
    let router = WellnessServices::new(ModelHandle::ready(OfflineModel)).router();

    let (status, body) = post(
        router,
        "/api/v1/stress/analyze",
        json!({ "developerMetrics": metrics }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Validation error"));
    assert!(body["message"]
        .as_str()
        .is_some_and(|message| message.contains("typingSpeed")));
}

#[tokio::test]
async fn null_preference_reads_as_missing() {
    let router =
        WellnessServices::new(ModelHandle::unavailable("VERTEX_PROJECT_ID is not configured"))
            .router();

    let (status, body) = post(
        router,
        "/api/v1/health/recommendations",
        json!({ "healthData": {
            "workPatterns": {
                "averageDailyHours": 10, "breaksFrequency": 2, "nightWorkFrequency": 1,
                "weekendWorkHours": 0, "longestStretch": 4
            },
            "healthRisks": {
                "eyeStrain": 20, "repetitiveStrain": 75, "stressLevel": 80,
                "sleepQuality": 40, "posturalIssues": 10
            },
            "preferences": {
                "exerciseType": ["swimming"], "timePreference": "evening",
                "intensityPreference": "low", "existingConditions": null,
                "dietaryRestrictions": []
            }
        }}),
    )
    .await;

    // existingConditions is null, which reads as missing.
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Missing preference: existingConditions")
    );
}

#[tokio::test]
async fn community_route_passes_model_json_through() {
    let model = CannedModel("Sure!\n```json\n{\"potentialProjects\": [{\"name\": \"ripgrep\", \"matchScore\": 77}]}\n```");
    let router = WellnessServices::new(ModelHandle::ready(model)).router();

    let (status, body) = post(
        router,
        "/api/v1/community/matches",
        json!({ "profileData": {
            "skills": { "primary": ["go"], "secondary": [], "interests": [], "proficiency": {} },
            "character": {
                "type": "builder", "level": 3, "experience": 0,
                "specializations": [], "activeTime": "mornings"
            },
            "preferences": {
                "collaborationTypes": [], "timeOverlap": 2, "mentorshipType": "mentee",
                "projectTypes": [], "teamSize": "any"
            }
        }}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matches"]["potentialProjects"][0]["matchScore"], json!(77));
    assert_eq!(body["metadata"]["model"], json!("gemini-1.5-pro-001"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn empty_envelope_is_rejected() {
    let router = WellnessServices::new(ModelHandle::ready(OfflineModel)).router();

    let (status, body) = post(router, "/api/v1/community/matches", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No JSON data provided" }));
}

#[test]
fn deterministic_fallback_matches_the_batch_scorer() {
    let metrics: StressMetrics = {
        let payload = reference_metrics();
        let object = payload.as_object().expect("metrics object");
        StressMetrics::from_payload(object).expect("valid metrics")
    };
    let analysis = StressAnalyzer::fallback(&metrics);

    let input = "typingSpeed,errorRate,codeComplexity,timeWithoutBreaks,keystrokes,mouseMovement\n\
                 50,5,30,20,100,50\n";
    let mut output = Vec::new();
    let summary = score_csv(input.as_bytes(), &mut output).expect("batch runs");

    assert_eq!(summary.scored, 1);
    let written = String::from_utf8(output).expect("utf8 output");
    assert!(written.contains(&format!("{}", analysis.stress_score)));
}
