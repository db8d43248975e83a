//! Developer stress scoring from typing, error, and break metrics.

pub mod batch;
mod domain;
mod evaluation;
mod rules;
mod service;

pub use batch::{score_csv, BatchError, BatchSummary};
pub use domain::{StressAnalysis, StressIndicators, StressMetrics, METRIC_BOUNDS};
pub use evaluation::{StressAssessment, STRESS_THRESHOLDS};
pub use rules::{contributing_factors, recommendations};
pub use service::{StressAnalyzer, STRESS_MODEL};
