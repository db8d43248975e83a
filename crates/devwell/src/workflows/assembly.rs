use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::assistant::{ModelHandle, ModelMetadata, ModelProfile, ReplyError};

/// Content produced either by the model or by the deterministic rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sourced<T> {
    Model(Map<String, Value>),
    Fallback(T),
}

impl<T> Sourced<T> {
    pub fn fallback(&self) -> Option<&T> {
        match self {
            Sourced::Fallback(content) => Some(content),
            Sourced::Model(_) => None,
        }
    }
}

/// Outcome of consulting the model for one request.
///
/// `metadata` is present whenever the model answered; `error` is present whenever the
/// content came from the fallback rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Consultation<T> {
    pub content: T,
    pub metadata: Option<ModelMetadata>,
    pub error: Option<String>,
}

/// Ask the model, parse its reply, and fall back to `fallback` on any failure. Never
/// fails itself.
pub async fn consult<T>(
    model: &ModelHandle,
    profile: &ModelProfile,
    prompt: String,
    parse: impl FnOnce(&str) -> Result<T, ReplyError>,
    fallback: impl FnOnce() -> T,
) -> Consultation<T> {
    let request = profile.request(prompt);

    let reply = match model.generate(&request).await {
        Ok(reply) => reply,
        Err(err) => {
            error!(model = profile.model, error = %err, "generative model call failed; using fallback");
            return Consultation {
                content: fallback(),
                metadata: None,
                error: Some(err.to_string()),
            };
        }
    };

    match parse(&reply) {
        Ok(content) => Consultation {
            content,
            metadata: Some(profile.metadata()),
            error: None,
        },
        Err(err) => {
            warn!(model = profile.model, error = %err, "unusable model reply; using fallback");
            Consultation {
                content: fallback(),
                metadata: Some(profile.metadata()),
                error: Some(err.to_string()),
            }
        }
    }
}

/// Pretty-printed JSON for embedding an input section in a prompt.
pub fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Parser for replies that must be a JSON object.
pub fn parse_object(reply: &str) -> Result<Map<String, Value>, ReplyError> {
    crate::assistant::parse_reply(reply)
}
