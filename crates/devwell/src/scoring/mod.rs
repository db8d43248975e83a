//! Shared scoring primitives used by every workflow's deterministic fallback.
//!
//! Metrics are rescaled into sub-factors, sub-factors are averaged into composite scores
//! on a 0-100 scale, and composites are averaged into an overall score. Weighting is
//! uniform at every level.

pub mod validation;

use serde::Serialize;

/// Closed interval used both for validation bounds and normalization spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Map `value` into `[0, 1]` against `range`, clamping values outside it.
///
/// `range.min != range.max` is a configuration precondition.
pub fn normalize(value: f64, range: MetricRange) -> f64 {
    if value < range.min {
        return 0.0;
    }
    if value > range.max {
        return 1.0;
    }
    (value - range.min) / (range.max - range.min)
}

/// A single metric rescaled into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubFactor {
    pub name: &'static str,
    pub value: f64,
}

impl SubFactor {
    pub fn from_metric(name: &'static str, raw: f64, range: MetricRange) -> Self {
        Self {
            name,
            value: normalize(raw, range),
        }
    }
}

/// Named 0-100 aggregate over a fixed set of sub-factors.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeScore {
    pub name: &'static str,
    pub factors: Vec<SubFactor>,
    pub value: f64,
}

impl CompositeScore {
    pub fn from_factors(name: &'static str, factors: Vec<SubFactor>) -> Self {
        let value = mean(factors.iter().map(|factor| factor.value)) * 100.0;
        Self {
            name,
            factors,
            value,
        }
    }
}

/// Unweighted mean of the composite scores; zero when there are none.
pub fn overall_score(composites: &[CompositeScore]) -> f64 {
    mean(composites.iter().map(|composite| composite.value))
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Round half away from zero to two decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ordered severity tier derived from an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Low,
    Moderate,
    High,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Low => "low",
            Category::Moderate => "moderate",
            Category::High => "high",
        }
    }
}

/// Lower bounds of the `moderate` and `high` tiers, each inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryThresholds {
    pub moderate: f64,
    pub high: f64,
}

impl CategoryThresholds {
    pub fn categorize(&self, score: f64) -> Category {
        if score >= self.high {
            Category::High
        } else if score >= self.moderate {
            Category::Moderate
        } else {
            Category::Low
        }
    }
}
