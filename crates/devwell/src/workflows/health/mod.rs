mod domain;
mod rules;
mod service;

pub use domain::{
    HealthData, HealthPreferences, HealthRecommendations, HealthReport, HealthRisks,
    WorkPatterns, RISK_FIELDS, WORK_PATTERN_BOUNDS,
};
pub use rules::{recommend, RISK_ALERT_THRESHOLD};
pub use service::{HealthRecommender, HEALTH_MODEL};
