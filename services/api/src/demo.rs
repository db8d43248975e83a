use clap::Args;
use devwell::error::AppError;
use devwell::workflows::community::{CommunityMatcher, CommunityProfile};
use devwell::workflows::health::{HealthData, HealthRecommender};
use devwell::workflows::stress::{StressAnalyzer, StressMetrics};
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print single-line JSON instead of pretty-printed output
    #[arg(long)]
    pub(crate) compact: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Developer wellness demo (rule-based results, no model calls)");

    println!("\nStress analysis");
    match StressMetrics::from_payload(&sample(stress_sample())) {
        Ok(metrics) => print_json(&StressAnalyzer::fallback(&metrics), args.compact),
        Err(err) => println!("  Sample rejected: {}", err),
    }

    println!("\nHealth recommendations");
    match HealthData::from_payload(&sample(health_sample())) {
        Ok(data) => print_json(&HealthRecommender::fallback(&data), args.compact),
        Err(err) => println!("  Sample rejected: {}", err),
    }

    println!("\nCommunity matches");
    match CommunityProfile::from_payload(&sample(community_sample())) {
        Ok(profile) => print_json(&CommunityMatcher::fallback(&profile), args.compact),
        Err(err) => println!("  Sample rejected: {}", err),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, compact: bool) {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match rendered {
        Ok(json) => println!("{}", json),
        Err(err) => println!("  Result unavailable: {}", err),
    }
}

fn sample(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn stress_sample() -> Value {
    json!({
        "typingSpeed": 85,
        "errorRate": 12,
        "codeComplexity": 75,
        "timeWithoutBreaks": 95,
        "keystrokes": 420,
        "mouseMovement": 60
    })
}

fn health_sample() -> Value {
    json!({
        "workPatterns": {
            "averageDailyHours": 10,
            "breaksFrequency": 3,
            "nightWorkFrequency": 2,
            "weekendWorkHours": 5,
            "longestStretch": 4
        },
        "healthRisks": {
            "eyeStrain": 78,
            "repetitiveStrain": 72,
            "stressLevel": 64,
            "sleepQuality": 45,
            "posturalIssues": 55
        },
        "preferences": {
            "exerciseType": ["walking", "yoga"],
            "timePreference": "morning",
            "intensityPreference": "moderate",
            "existingConditions": [],
            "dietaryRestrictions": []
        }
    })
}

fn community_sample() -> Value {
    json!({
        "skills": {
            "primary": ["rust", "typescript"],
            "secondary": ["sql"],
            "interests": ["observability"],
            "proficiency": { "rust": "advanced", "typescript": "intermediate" }
        },
        "character": {
            "type": "reviewer",
            "level": 6,
            "experience": 2400,
            "specializations": ["backend"],
            "activeTime": "evenings"
        },
        "preferences": {
            "collaborationTypes": ["code review", "pairing"],
            "timeOverlap": 3,
            "mentorshipType": "mentor",
            "projectTypes": ["open-source"],
            "teamSize": "small"
        }
    })
}
