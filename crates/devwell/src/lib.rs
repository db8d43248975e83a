//! Developer wellness analytics: stress scoring, health recommendations and community
//! matching, each consulting a generative model with a deterministic fallback.

pub mod assistant;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
pub mod workflows;
