// Summary statistics over frame columns
use crate::domain::frame::SensorFrame;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub mean: f64,
    /// Sample standard deviation (n - 1); absent below two values
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Summaries for every metric column; the timestamp column is skipped.
/// Empty frames produce no summaries.
pub fn summarize(frame: &SensorFrame) -> Vec<ColumnSummary> {
    if frame.is_empty() {
        return Vec::new();
    }

    frame
        .metric_columns()
        .iter()
        .map(|column| summarize_values(&column.name, &column.values))
        .collect()
}

fn summarize_values(name: &str, values: &[f64]) -> ColumnSummary {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let std = (values.len() >= 2).then(|| {
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        (sum_sq / (n - 1.0)).sqrt()
    });

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ColumnSummary {
        column: name.to_string(),
        mean,
        std,
        min,
        max,
    }
}
