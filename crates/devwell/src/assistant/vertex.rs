use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AssistantError, GenerationRequest, GenerativeModel, InitError, SAFETY_CATEGORIES};
use crate::config::AssistantConfig;

/// Vertex AI `generateContent` client authenticated with a bearer token.
pub struct VertexClient {
    client: reqwest::Client,
    project_id: String,
    location: String,
    access_token: String,
}

impl VertexClient {
    pub fn new(config: &AssistantConfig) -> Result<Self, InitError> {
        let project_id = config.project_id.clone().ok_or(InitError::MissingProject)?;
        let access_token = config
            .access_token
            .clone()
            .ok_or(InitError::MissingToken)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(InitError::HttpClient)?;

        Ok(Self {
            client,
            project_id,
            location: config.location.clone(),
            access_token,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent",
            location = self.location,
            project = self.project_id,
        )
    }
}

#[async_trait]
impl GenerativeModel for VertexClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
        let body = GenerateContentRequest::from(request);
        let url = self.endpoint(request.profile.model);
        debug!(model = request.profile.model, "calling generateContent");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        payload.text().ok_or(AssistantError::EmptyReply)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        let profile = request.profile;
        Self {
            contents: [Content {
                role: "user",
                parts: [TextPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: profile.max_output_tokens,
                temperature: profile.temperature,
                top_p: profile.top_p,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "OFF",
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}
