// Sensor frame domain model - hourly table of readings for all sensors
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const TIMESTAMP_COLUMN: &str = "timestamp";

#[derive(Debug, Clone, PartialEq)]
pub struct MetricColumn {
    pub name: String,
    pub values: Vec<f64>,
}

impl MetricColumn {
    pub fn new(name: String, values: Vec<f64>) -> Self {
        Self { name, values }
    }
}

/// Hourly time series keyed by `timestamps`, one metric column per
/// sensor/variable pair. Every column holds exactly one value per timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorFrame {
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<MetricColumn>,
}

/// Row-oriented slice of a frame, as shown in the dashboard table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSample {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<f64>,
}

impl SensorFrame {
    pub fn new(timestamps: Vec<DateTime<Utc>>, columns: Vec<MetricColumn>) -> anyhow::Result<Self> {
        for column in &columns {
            if column.values.len() != timestamps.len() {
                anyhow::bail!(
                    "column {} has {} values, expected {}",
                    column.name,
                    column.values.len(),
                    timestamps.len()
                );
            }
        }

        if let Some(pair) = timestamps
            .windows(2)
            .find(|pair| pair[1] - pair[0] != Duration::hours(1))
        {
            anyhow::bail!(
                "timestamps must advance by exactly one hour, got {} followed by {}",
                pair[0],
                pair[1]
            );
        }

        Ok(Self { timestamps, columns })
    }

    /// Caller guarantees every column has one value per timestamp
    pub(crate) fn from_aligned(timestamps: Vec<DateTime<Utc>>, columns: Vec<MetricColumn>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == timestamps.len()));
        Self { timestamps, columns }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn metric_columns(&self) -> &[MetricColumn] {
        &self.columns
    }

    /// Header names, timestamp first
    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(TIMESTAMP_COLUMN.to_string())
            .chain(self.columns.iter().map(|c| c.name.clone()))
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&MetricColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of sensors, inferred from the `temp_sN` columns
    pub fn sensor_count(&self) -> u32 {
        self.columns
            .iter()
            .filter(|c| c.name.starts_with("temp_s"))
            .count() as u32
    }

    pub fn head(&self, n: usize) -> TableSample {
        self.sample(0..n.min(self.len()))
    }

    /// Keeps only the last `n` rows
    pub fn tail_rows(&self, n: usize) -> SensorFrame {
        let start = self.len().saturating_sub(n);
        SensorFrame {
            timestamps: self.timestamps[start..].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| MetricColumn::new(c.name.clone(), c.values[start..].to_vec()))
                .collect(),
        }
    }

    fn sample(&self, range: std::ops::Range<usize>) -> TableSample {
        let rows = range
            .map(|i| TableRow {
                timestamp: self.timestamps[i],
                values: self.columns.iter().map(|c| c.values[i]).collect(),
            })
            .collect();

        TableSample {
            columns: self.column_names(),
            rows,
        }
    }
}
