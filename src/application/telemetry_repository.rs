// Repository trait for plant telemetry access
use crate::domain::frame::SensorFrame;
use crate::domain::sensor::SensorLocation;
use async_trait::async_trait;

/// Which slice of telemetry to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest {
    pub days: u32,
    pub sensors: u32,
    pub seed: u64,
}

impl FrameRequest {
    pub fn new(days: u32, sensors: u32, seed: u64) -> Self {
        Self { days, sensors, seed }
    }
}

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Load the trailing `days` of hourly readings
    async fn load_frame(&self, request: &FrameRequest) -> anyhow::Result<SensorFrame>;

    /// Positions of the first `count` sensors
    async fn sensor_locations(&self, count: u32) -> anyhow::Result<Vec<SensorLocation>>;
}
