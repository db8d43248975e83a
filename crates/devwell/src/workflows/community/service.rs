use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};

use super::domain::{CommunityMatches, CommunityProfile, CommunityReport};
use super::rules::basic_matches;
use crate::assistant::{ModelHandle, ModelProfile};
use crate::scoring::validation::FieldError;
use crate::workflows::assembly::{consult, parse_object, pretty_json, Sourced};
use crate::workflows::http::Envelope;
use crate::workflows::router::Workflow;

pub const COMMUNITY_MODEL: ModelProfile = ModelProfile::new("gemini-1.5-pro-001", 0.7, 0.8);

/// Suggests community members, projects and mentorship for a developer profile.
#[derive(Debug, Clone)]
pub struct CommunityMatcher {
    model: ModelHandle,
}

impl CommunityMatcher {
    pub fn new(model: ModelHandle) -> Self {
        Self { model }
    }

    pub fn validate_profile(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<CommunityProfile, FieldError> {
        CommunityProfile::from_payload(payload)
    }

    pub fn fallback(profile: &CommunityProfile) -> CommunityReport {
        CommunityReport {
            matches: Sourced::Fallback(basic_matches(profile)),
            timestamp: Utc::now(),
            metadata: None,
            error: None,
        }
    }

    pub async fn generate(&self, profile: &CommunityProfile) -> CommunityReport {
        let consultation = consult(
            &self.model,
            &COMMUNITY_MODEL,
            render_prompt(profile),
            |reply| parse_object(reply).map(Sourced::Model),
            || Sourced::<CommunityMatches>::Fallback(basic_matches(profile)),
        )
        .await;

        CommunityReport {
            matches: consultation.content,
            timestamp: Utc::now(),
            metadata: consultation.metadata,
            error: consultation.error,
        }
    }
}

fn render_prompt(profile: &CommunityProfile) -> String {
    format!(
        "Based on the following developer community profile:\n\
         Skills: {skills}\n\
         Character: {character}\n\
         Preferences: {preferences}\n\n\
         Generate personalized community recommendations in these categories:\n\
         1. Recommended Members (based on character type and skills)\n\
         2. Potential Projects (matching their interests and skills)\n\
         3. Learning Opportunities (based on goals and current level)\n\
         4. Mentorship Matches (considering mentorship preferences)\n\
         5. Collaboration Suggestions (based on work style and availability)\n\n\
         Format the response as a JSON object with these categories as keys and arrays of \
         matches as values.\n\
         Each match should include a match score (0-100) and detailed reasoning.",
        skills = pretty_json(&profile.skills),
        character = pretty_json(&profile.character),
        preferences = pretty_json(&profile.preferences),
    )
}

#[async_trait]
impl Workflow for CommunityMatcher {
    const NAME: &'static str = "community";
    const PATH: &'static str = "/api/v1/community/matches";
    const ENVELOPE: Envelope = Envelope {
        key: "profileData",
        missing_message: "Missing profile data",
    };

    type Input = CommunityProfile;
    type Output = CommunityReport;

    fn validate(&self, payload: &Map<String, Value>) -> Result<CommunityProfile, FieldError> {
        self.validate_profile(payload)
    }

    async fn run(&self, input: CommunityProfile) -> CommunityReport {
        self.generate(&input).await
    }
}
