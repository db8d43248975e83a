use super::domain::{CommunityMatches, CommunityProfile, MemberMatch, MentorshipMatch};

pub const REVIEWER_MATCH_SCORE: u8 = 85;
pub const MENTEE_MATCH_SCORE: u8 = 80;

pub fn basic_matches(profile: &CommunityProfile) -> CommunityMatches {
    let mut matches = CommunityMatches::default();

    if profile.character.kind.as_str() == Some("reviewer") {
        matches.recommended_members.push(MemberMatch {
            kind: "Developer seeking review".to_string(),
            match_score: REVIEWER_MATCH_SCORE,
            reason: "Matching technical stack".to_string(),
        });
    }

    if profile.preferences.mentorship_type.as_str() == Some("mentor") {
        matches.mentorship_matches.push(MentorshipMatch {
            kind: "Mentee seeking guidance".to_string(),
            match_score: MENTEE_MATCH_SCORE,
            skills: profile.skills.primary.clone(),
        });
    }

    matches
}
