use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::assistant::ModelMetadata;
use crate::scoring::validation::{FieldError, Fields};
use crate::workflows::assembly::Sourced;

pub const SKILL_FIELDS: [&str; 4] = ["primary", "secondary", "interests", "proficiency"];
pub const CHARACTER_FIELDS: [&str; 5] =
    ["type", "level", "experience", "specializations", "activeTime"];
pub const PREFERENCE_FIELDS: [&str; 5] = [
    "collaborationTypes",
    "timeOverlap",
    "mentorshipType",
    "projectTypes",
    "teamSize",
];

pub const MIN_LEVEL: i64 = 1;
pub const MAX_LEVEL: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skills {
    pub primary: Value,
    pub secondary: Value,
    pub interests: Value,
    pub proficiency: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(rename = "type")]
    pub kind: Value,
    pub level: i64,
    pub experience: Value,
    pub specializations: Value,
    pub active_time: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPreferences {
    pub collaboration_types: Value,
    pub time_overlap: Value,
    pub mentorship_type: Value,
    pub project_types: Value,
    pub team_size: Value,
}

/// Validated community profile. Only the level is typed; everything else is kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityProfile {
    pub skills: Skills,
    pub character: Character,
    pub preferences: CommunityPreferences,
}

impl CommunityProfile {
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, FieldError> {
        let skills = Fields::section("skills field", payload, "skills")?;
        for field in SKILL_FIELDS {
            skills.present(field)?;
        }

        let character = Fields::section("character field", payload, "character")?;
        for field in CHARACTER_FIELDS {
            character.present(field)?;
        }
        let level = character.integer("level", MIN_LEVEL, MAX_LEVEL)?;

        let preferences = Fields::section("preference field", payload, "preferences")?;
        for field in PREFERENCE_FIELDS {
            preferences.present(field)?;
        }

        Ok(Self {
            skills: Skills {
                primary: skills.require("primary")?.clone(),
                secondary: skills.require("secondary")?.clone(),
                interests: skills.require("interests")?.clone(),
                proficiency: skills.require("proficiency")?.clone(),
            },
            character: Character {
                kind: character.require("type")?.clone(),
                level,
                experience: character.require("experience")?.clone(),
                specializations: character.require("specializations")?.clone(),
                active_time: character.require("activeTime")?.clone(),
            },
            preferences: CommunityPreferences {
                collaboration_types: preferences.require("collaborationTypes")?.clone(),
                time_overlap: preferences.require("timeOverlap")?.clone(),
                mentorship_type: preferences.require("mentorshipType")?.clone(),
                project_types: preferences.require("projectTypes")?.clone(),
                team_size: preferences.require("teamSize")?.clone(),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMatch {
    #[serde(rename = "type")]
    pub kind: String,
    pub match_score: u8,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipMatch {
    #[serde(rename = "type")]
    pub kind: String,
    pub match_score: u8,
    pub skills: Value,
}

/// Rule-based matches. The rules only ever fill members and mentorship; the remaining
/// groups are present and empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityMatches {
    pub recommended_members: Vec<MemberMatch>,
    pub potential_projects: Vec<Value>,
    pub learning_opportunities: Vec<Value>,
    pub mentorship_matches: Vec<MentorshipMatch>,
    pub collaboration_suggestions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityReport {
    pub matches: Sourced<CommunityMatches>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::testing::community_payload;
    use serde_json::json;

    #[test]
    fn parses_a_complete_profile() {
        let profile = CommunityProfile::from_payload(&community_payload()).expect("valid profile");
        assert_eq!(profile.skills.primary, json!(["rust", "python"]));
        assert_eq!(profile.character.kind, json!("reviewer"));
        assert_eq!(profile.character.level, 5);
        assert_eq!(profile.preferences.mentorship_type, json!("mentor"));
    }

    #[test]
    fn missing_fields_name_their_section() {
        let mut payload = community_payload();
        payload["character"]
            .as_object_mut()
            .expect("character object")
            .remove("activeTime");
        let err = CommunityProfile::from_payload(&payload).expect_err("field missing");
        assert_eq!(err.to_string(), "Missing character field: activeTime");

        let mut payload = community_payload();
        payload.remove("preferences");
        let err = CommunityProfile::from_payload(&payload).expect_err("section missing");
        assert_eq!(err.to_string(), "Missing preference field: collaborationTypes");
    }

    #[test]
    fn level_is_checked_before_preferences() {
        let mut payload = community_payload();
        payload["character"]["level"] = json!(11);
        payload.remove("preferences");
        let err = CommunityProfile::from_payload(&payload).expect_err("level out of range");
        assert_eq!(
            err.to_string(),
            "Invalid value for level: must be between 1 and 10"
        );
    }

    #[test]
    fn level_must_be_an_integer() {
        let mut payload = community_payload();
        payload["character"]["level"] = json!("five");
        let err = CommunityProfile::from_payload(&payload).expect_err("not an integer");
        assert_eq!(err.to_string(), "Invalid type for level: expected integer");
    }

    #[test]
    fn whole_float_level_is_accepted() {
        let mut payload = community_payload();
        payload["character"]["level"] = json!(5.0);
        let profile = CommunityProfile::from_payload(&payload).expect("valid profile");
        assert_eq!(profile.character.level, 5);
    }

    #[test]
    fn fields_other_than_level_are_not_type_checked() {
        let mut payload = community_payload();
        payload["skills"]["primary"] = json!([{ "name": "rust", "years": 4 }]);
        payload["character"]["type"] = json!("builder");
        payload["preferences"]["mentorshipType"] = json!("mentee");

        let profile = CommunityProfile::from_payload(&payload).expect("valid profile");
        assert_eq!(profile.skills.primary, json!([{ "name": "rust", "years": 4 }]));
        assert_eq!(profile.character.kind, json!("builder"));
    }
}
