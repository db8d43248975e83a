use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::assistant::{AssistantError, GenerationRequest, GenerativeModel, ModelHandle};

/// Model double that returns a canned reply (or failure) and records prompts.
#[derive(Clone, Default)]
pub(crate) struct ScriptedModel {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn handle(&self) -> ModelHandle {
        ModelHandle::ready(self.clone())
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(request.prompt.clone());
        self.reply.clone().ok_or(AssistantError::Status {
            status: 503,
            body: "model overloaded".to_string(),
        })
    }
}

pub(crate) fn health_payload() -> Map<String, Value> {
    object(json!({
        "workPatterns": {
            "averageDailyHours": 9,
            "breaksFrequency": 4,
            "nightWorkFrequency": 2,
            "weekendWorkHours": 6,
            "longestStretch": 3.5
        },
        "healthRisks": {
            "eyeStrain": 82,
            "repetitiveStrain": 40,
            "stressLevel": 65,
            "sleepQuality": 50,
            "posturalIssues": 30
        },
        "preferences": {
            "exerciseType": ["yoga", "cycling"],
            "timePreference": "morning",
            "intensityPreference": "moderate",
            "existingConditions": [],
            "dietaryRestrictions": ["vegetarian"]
        }
    }))
}

pub(crate) fn community_payload() -> Map<String, Value> {
    object(json!({
        "skills": {
            "primary": ["rust", "python"],
            "secondary": ["sql"],
            "interests": ["compilers"],
            "proficiency": { "rust": "advanced" }
        },
        "character": {
            "type": "reviewer",
            "level": 5,
            "experience": 1200,
            "specializations": ["backend"],
            "activeTime": "evenings"
        },
        "preferences": {
            "collaborationTypes": ["pairing"],
            "timeOverlap": 4,
            "mentorshipType": "mentor",
            "projectTypes": ["open-source"],
            "teamSize": "small"
        }
    }))
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not an object: {other}"),
    }
}
