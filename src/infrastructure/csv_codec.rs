// CSV codec for sensor frames
use crate::domain::frame::{MetricColumn, SensorFrame, TIMESTAMP_COLUMN};
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row, then one row per hour. No index column.
pub fn encode_csv(frame: &SensorFrame) -> Result<Bytes, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(frame.column_names())?;

    let columns = frame.metric_columns();
    for (row, timestamp) in frame.timestamps().iter().enumerate() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(timestamp.format(TIMESTAMP_FORMAT).to_string());
        record.extend(columns.iter().map(|c| c.values[row].to_string()));
        writer.write_record(&record)?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(Bytes::from(buffer))
}

/// Parse a document in the layout produced by [`encode_csv`]
pub fn decode_csv(data: &[u8]) -> anyhow::Result<SensorFrame> {
    let mut reader = csv::Reader::from_reader(data);
    let headers = reader.headers().context("Failed to read CSV header")?.clone();

    match headers.get(0) {
        Some(TIMESTAMP_COLUMN) => {}
        other => anyhow::bail!("first CSV column must be {TIMESTAMP_COLUMN}, got {other:?}"),
    }

    let names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let mut timestamps: Vec<DateTime<Utc>> = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV record {}", line + 1))?;

        let raw_timestamp = record.get(0).unwrap_or_default();
        let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT)
            .with_context(|| format!("Invalid timestamp {raw_timestamp:?} in record {}", line + 1))?
            .and_utc();
        timestamps.push(timestamp);

        for (i, column) in values.iter_mut().enumerate() {
            let raw = record.get(i + 1).unwrap_or_default();
            let value = raw
                .parse::<f64>()
                .with_context(|| format!("Invalid value {raw:?} for {} in record {}", names[i], line + 1))?;
            column.push(value);
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| MetricColumn::new(name, values))
        .collect();

    SensorFrame::new(timestamps, columns)
}
