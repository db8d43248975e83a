use std::io::{Read, Write};

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::domain::{StressMetrics, METRIC_BOUNDS};
use super::service::StressAnalyzer;

/// Failure that aborts a batch run. Individual invalid rows never do.
#[derive(Debug)]
pub enum BatchError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Io(err) => write!(f, "failed to access metrics file: {}", err),
            BatchError::Csv(err) => write!(f, "invalid metrics CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io(err) => Some(err),
            BatchError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub scored: usize,
    pub rejected: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRow {
    row: usize,
    stress_level: Option<&'static str>,
    stress_score: Option<f64>,
    cognitive_load: Option<f64>,
    physical_strain: Option<f64>,
    contributing_factors: String,
    error: String,
}

/// Score every row of a metrics CSV with the deterministic rules and write one result
/// row per input row.
pub fn score_csv<R: Read, W: Write>(reader: R, writer: W) -> Result<BatchSummary, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let payload = row_payload(&headers, &record);
        summary.rows += 1;

        let row = match StressMetrics::from_payload(&payload) {
            Ok(metrics) => {
                summary.scored += 1;
                let analysis = StressAnalyzer::fallback(&metrics);
                BatchRow {
                    row: index + 1,
                    stress_level: Some(analysis.stress_level.label()),
                    stress_score: Some(analysis.stress_score),
                    cognitive_load: Some(analysis.metrics.cognitive_load),
                    physical_strain: Some(analysis.metrics.physical_strain),
                    contributing_factors: analysis.metrics.contributing_factors.join("; "),
                    error: String::new(),
                }
            }
            Err(err) => {
                summary.rejected += 1;
                BatchRow {
                    row: index + 1,
                    stress_level: None,
                    stress_score: None,
                    cognitive_load: None,
                    physical_strain: None,
                    contributing_factors: String::new(),
                    error: err.to_string(),
                }
            }
        };

        csv_writer.serialize(row)?;
    }

    csv_writer.flush()?;
    Ok(summary)
}

fn row_payload(headers: &csv::StringRecord, record: &csv::StringRecord) -> Map<String, Value> {
    let mut payload = Map::new();
    for (header, cell) in headers.iter().zip(record.iter()) {
        if cell.is_empty() || !METRIC_BOUNDS.iter().any(|(name, _)| *name == header) {
            continue;
        }

        let value = cell
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(cell.to_string()));
        payload.insert(header.to_string(), value);
    }
    payload
}
