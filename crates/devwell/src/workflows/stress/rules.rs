use crate::scoring::Category;

use super::domain::StressMetrics;

const BREAK_MINUTES_THRESHOLD: f64 = 45.0;
const ERROR_RATE_THRESHOLD: f64 = 10.0;
const CODE_COMPLEXITY_THRESHOLD: f64 = 70.0;

/// Independent threshold rules over raw metric values; several may fire at once.
pub fn contributing_factors(metrics: &StressMetrics) -> Vec<String> {
    let rules = [
        (
            metrics.time_without_breaks > BREAK_MINUTES_THRESHOLD,
            "Extended period without breaks",
        ),
        (
            metrics.error_rate > ERROR_RATE_THRESHOLD,
            "High error rate",
        ),
        (
            metrics.code_complexity > CODE_COMPLEXITY_THRESHOLD,
            "High code complexity",
        ),
    ];

    rules
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, factor)| factor.to_string())
        .collect()
}

/// Base advice for a stress level.
pub fn recommendations(level: Category) -> Vec<String> {
    let advice: [&str; 3] = match level {
        Category::High => [
            "Take an immediate break of at least 15 minutes",
            "Consider switching to a less complex task",
            "Review your ergonomic setup",
        ],
        Category::Moderate => [
            "Take a short break in the next 30 minutes",
            "Do some quick stretching exercises",
            "Consider breaking down complex tasks",
        ],
        Category::Low => [
            "Maintain current work rhythm",
            "Schedule regular breaks",
            "Monitor stress levels",
        ],
    };

    advice.iter().map(|line| line.to_string()).collect()
}
