mod domain;
mod rules;
mod service;

pub use domain::{
    Character, CommunityMatches, CommunityPreferences, CommunityProfile, CommunityReport,
    MemberMatch, MentorshipMatch, Skills, MAX_LEVEL, MIN_LEVEL,
};
pub use rules::{basic_matches, MENTEE_MATCH_SCORE, REVIEWER_MATCH_SCORE};
pub use service::{CommunityMatcher, COMMUNITY_MODEL};
