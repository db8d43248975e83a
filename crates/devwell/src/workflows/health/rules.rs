use super::domain::{HealthData, HealthRecommendations};

/// Risk level above which a risk triggers immediate advice.
pub const RISK_ALERT_THRESHOLD: f64 = 70.0;

/// Rule-based recommendations used when the model cannot answer.
pub fn recommend(data: &HealthData) -> HealthRecommendations {
    let risks = &data.health_risks;
    let mut advice = HealthRecommendations::default();

    if risks.eye_strain > RISK_ALERT_THRESHOLD {
        advice
            .immediate_actions
            .push("Take an immediate eye break using 20-20-20 rule".to_string());
        advice
            .ergonomic_adjustments
            .push("Adjust monitor brightness and position".to_string());
    }

    if risks.stress_level > RISK_ALERT_THRESHOLD {
        advice
            .immediate_actions
            .push("Take a 15-minute relaxation break".to_string());
        advice
            .lifestyle_modifications
            .push("Implement regular stress management techniques".to_string());
    }

    if risks.repetitive_strain > RISK_ALERT_THRESHOLD {
        advice
            .immediate_actions
            .push("Perform immediate stretching exercises".to_string());
        advice
            .ergonomic_adjustments
            .push("Review keyboard and mouse positioning".to_string());
    }

    let time = &data.preferences.time_preference;
    advice.exercise_recommendations = data
        .preferences
        .exercise_type
        .iter()
        .map(|exercise| format!("Schedule {exercise} sessions during {time} hours"))
        .collect();

    advice
}
