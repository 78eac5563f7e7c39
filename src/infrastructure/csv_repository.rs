// CSV repository - serves recorded readings exported in the download layout
use crate::infrastructure::csv_codec::decode_csv;
use crate::application::telemetry_repository::{FrameRequest, TelemetryRepository};
use crate::domain::frame::SensorFrame;
use crate::domain::generator::{sensor_locations, MapArea, HOURS_PER_DAY};
use crate::domain::sensor::SensorLocation;
use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the file on every load; the frame cache in front of it bounds how
/// often that happens.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
    map_area: MapArea,
    seed: u64,
}

impl CsvRepository {
    pub fn new(path: PathBuf, map_area: MapArea, seed: u64) -> Self {
        Self {
            path,
            map_area,
            seed,
        }
    }
}

#[async_trait]
impl TelemetryRepository for CsvRepository {
    async fn load_frame(&self, request: &FrameRequest) -> anyhow::Result<SensorFrame> {
        let data = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let frame = decode_csv(&data)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        let rows = (request.days * HOURS_PER_DAY) as usize;
        if frame.len() < rows {
            tracing::warn!(
                "{} holds {} rows, fewer than the {} requested",
                self.path.display(),
                frame.len(),
                rows
            );
        }

        Ok(frame.tail_rows(rows))
    }

    async fn sensor_locations(&self, count: u32) -> anyhow::Result<Vec<SensorLocation>> {
        // recorded files carry no coordinates
        Ok(sensor_locations(count, &self.map_area, self.seed))
    }
}
