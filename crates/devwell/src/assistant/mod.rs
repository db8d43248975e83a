//! Outbound generative-model integration.
//!
//! Workflows only see the [`GenerativeModel`] trait; the Vertex AI adapter is one
//! implementation and tests substitute their own.

mod reply;
mod vertex;

pub use reply::{extract_json, parse_reply, ReplyError};
pub use vertex::VertexClient;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

pub const MAX_OUTPUT_TOKENS: u32 = 8192;
pub const RESULT_VERSION: &str = "1.0";

/// Harm categories whose blocking threshold is sent with every request.
pub const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_HARASSMENT",
];

/// Fixed sampling profile a workflow uses when consulting the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelProfile {
    pub model: &'static str,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl ModelProfile {
    pub const fn new(model: &'static str, temperature: f32, top_p: f32) -> Self {
        Self {
            model,
            temperature,
            top_p,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    pub fn request(&self, prompt: String) -> GenerationRequest {
        GenerationRequest {
            profile: *self,
            prompt,
        }
    }

    pub fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            model: self.model.to_string(),
            version: RESULT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub profile: ModelProfile,
    pub prompt: String,
}

/// Provenance attached to results that came back from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMetadata {
    pub model: String,
    pub version: String,
}

/// Prompt-in, text-out model abstraction.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError>;
}

/// The model a workflow consults, or the reason none could be constructed.
#[derive(Clone)]
pub enum ModelHandle {
    Ready(Arc<dyn GenerativeModel>),
    Unavailable(Arc<str>),
}

impl ModelHandle {
    pub fn ready(model: impl GenerativeModel + 'static) -> Self {
        Self::Ready(Arc::new(model))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(Arc::from(reason.into()))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelHandle::Ready(_))
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
        match self {
            ModelHandle::Ready(model) => model.generate(request).await,
            ModelHandle::Unavailable(reason) => {
                Err(AssistantError::Unavailable(reason.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelHandle::Ready(_) => f.write_str("ModelHandle::Ready"),
            ModelHandle::Unavailable(reason) => {
                f.debug_tuple("ModelHandle::Unavailable").field(reason).finish()
            }
        }
    }
}

/// Failure while calling the model.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("generative model unavailable: {0}")]
    Unavailable(String),
    #[error("request to generative model failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generative model returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generative model returned no text")]
    EmptyReply,
}

/// Failure while constructing a model client.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("VERTEX_PROJECT_ID is not configured")]
    MissingProject,
    #[error("VERTEX_ACCESS_TOKEN is not configured")]
    MissingToken,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
