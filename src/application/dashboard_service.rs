// Dashboard service - Use case for building the plant dashboard
use crate::application::error::DashboardError;
use crate::application::frame_cache::FrameCache;
use crate::application::telemetry_repository::{FrameRequest, TelemetryRepository};
use crate::domain::dashboard::{Dashboard, DashboardOptions, SelectedControls};
use crate::domain::frame::SensorFrame;
use crate::domain::sensor::{SensorId, SensorLocation, Variable};
use crate::domain::statistics::summarize;
use crate::domain::telemetry::{downsample_points, ChartData, SeriesData, TimeSeriesPoint};
use crate::infrastructure::config::DashboardConfig;
use std::sync::Arc;
use std::time::Duration;

/// Control values as received from the client; anything missing falls back
/// to the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct DashboardRequest {
    pub days: Option<u32>,
    pub variable: Option<String>,
    pub sensor: Option<String>,
    pub show_map: Option<bool>,
}

pub struct DashboardService {
    repository: Arc<dyn TelemetryRepository>,
    config: DashboardConfig,
    frames: FrameCache<FrameRequest, Arc<SensorFrame>>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, config: DashboardConfig) -> Self {
        let frames = FrameCache::new(Duration::from_secs(config.cache.ttl_secs));
        Self {
            repository,
            config,
            frames,
        }
    }

    pub async fn options(&self) -> Result<DashboardOptions, DashboardError> {
        let sensor_count = self.sensor_count().await?;

        Ok(DashboardOptions {
            min_days: self.config.period.min_days,
            max_days: self.config.period.max_days,
            default_days: self.config.period.default_days,
            variables: Variable::ALL.to_vec(),
            sensors: SensorId::all(sensor_count).collect(),
            show_map_by_default: self.config.map.show_by_default,
        })
    }

    /// Sensors present in the frame served for the default period. Recorded
    /// files may hold fewer sensors than `generator.sensors`.
    async fn sensor_count(&self) -> Result<u32, DashboardError> {
        let frame = self.get_frame(self.config.period.default_days).await?;
        Ok(frame.sensor_count())
    }

    /// Apply the default period and enforce the configured bounds
    pub fn resolve_days(&self, days: Option<u32>) -> Result<u32, DashboardError> {
        let period = &self.config.period;
        let days = days.unwrap_or(period.default_days);

        if (period.min_days..=period.max_days).contains(&days) {
            Ok(days)
        } else {
            Err(DashboardError::PeriodOutOfRange {
                days,
                min: period.min_days,
                max: period.max_days,
            })
        }
    }

    /// The request the frame cache and the export cache are keyed by
    pub fn frame_request(&self, days: u32) -> FrameRequest {
        FrameRequest::new(days, self.config.generator.sensors, self.config.generator.seed)
    }

    pub async fn get_frame(&self, days: u32) -> Result<Arc<SensorFrame>, DashboardError> {
        let request = self.frame_request(days);
        let repository = self.repository.clone();

        self.frames
            .get_or_try_insert_with(request, || async move {
                let frame = repository.load_frame(&request).await?;
                tracing::info!(
                    "Loaded frame for {} days: {} rows x {} columns",
                    request.days,
                    frame.len(),
                    frame.column_names().len()
                );
                Ok::<_, DashboardError>(Arc::new(frame))
            })
            .await
    }

    pub async fn sensor_locations(&self) -> Result<Vec<SensorLocation>, DashboardError> {
        let sensor_count = self.sensor_count().await?;
        Ok(self.repository.sensor_locations(sensor_count).await?)
    }

    pub async fn get_dashboard(&self, request: &DashboardRequest) -> Result<Dashboard, DashboardError> {
        let days = self.resolve_days(request.days)?;

        let variable = match &request.variable {
            Some(name) => name
                .parse::<Variable>()
                .map_err(DashboardError::UnknownVariable)?,
            None => Variable::Temperature,
        };

        let sensor = match &request.sensor {
            Some(name) => name
                .parse::<SensorId>()
                .map_err(DashboardError::UnknownSensor)?,
            None => SensorId::FIRST,
        };

        let show_map = request.show_map.unwrap_or(self.config.map.show_by_default);

        let frame = self.get_frame(days).await?;
        let sensor_count = frame.sensor_count();
        if sensor.index() > sensor_count {
            return Err(DashboardError::UnknownSensor(sensor.to_string()));
        }

        let chart = self.build_chart(&frame, variable, sensor)?;

        let map = if show_map {
            Some(self.repository.sensor_locations(sensor_count).await?)
        } else {
            None
        };

        Ok(Dashboard {
            title: format!("Plant Monitoring (last {} days)", days),
            period_days: days,
            controls: SelectedControls {
                variable,
                sensor,
                show_map,
            },
            table: frame.head(self.config.table.sample_rows),
            summary: summarize(&frame),
            chart,
            map,
        })
    }

    fn build_chart(
        &self,
        frame: &SensorFrame,
        variable: Variable,
        sensor: SensorId,
    ) -> Result<ChartData, DashboardError> {
        let column_name = variable.column_for(sensor);
        let column = frame
            .column(&column_name)
            .ok_or_else(|| DashboardError::UnknownSensor(sensor.to_string()))?;

        let points: Vec<TimeSeriesPoint> = frame
            .timestamps()
            .iter()
            .zip(&column.values)
            .map(|(ts, value)| TimeSeriesPoint::new(ts.timestamp_millis(), *value))
            .collect();

        let points = downsample_points(points, self.config.chart.max_points);
        let title = format!("{} {}", variable.label(), sensor);

        Ok(ChartData::line(
            column_name.clone(),
            title,
            SeriesData::new(column_name, sensor.to_string(), points),
        ))
    }
}
