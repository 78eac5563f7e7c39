// Synthetic repository - generated readings in place of a real plant historian
use crate::application::telemetry_repository::{FrameRequest, TelemetryRepository};
use crate::domain::frame::SensorFrame;
use crate::domain::generator::{generate, sensor_locations, GenerationParams, MapArea};
use crate::domain::sensor::SensorLocation;
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};

#[derive(Debug, Clone)]
pub struct SyntheticRepository {
    map_area: MapArea,
    seed: u64,
}

impl SyntheticRepository {
    pub fn new(map_area: MapArea, seed: u64) -> Self {
        Self { map_area, seed }
    }
}

#[async_trait]
impl TelemetryRepository for SyntheticRepository {
    async fn load_frame(&self, request: &FrameRequest) -> anyhow::Result<SensorFrame> {
        let params = GenerationParams::new(request.days, request.sensors, request.seed);
        let end = Utc::now().trunc_subsecs(0);

        tracing::debug!("Generating synthetic frame ending at {}", end);
        Ok(generate(&params, end))
    }

    async fn sensor_locations(&self, count: u32) -> anyhow::Result<Vec<SensorLocation>> {
        Ok(sensor_locations(count, &self.map_area, self.seed))
    }
}
