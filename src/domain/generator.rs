// Synthetic plant telemetry - seeded random walks, noise and a daily cycle
use crate::domain::frame::{MetricColumn, SensorFrame};
use crate::domain::sensor::{SensorId, SensorLocation, Variable};
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

pub const HOURS_PER_DAY: u32 = 24;

/// Consumption cycle advance per day (3.14, not `PI`)
#[allow(clippy::approx_constant)]
const CYCLE_PER_DAY: f64 = 3.14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationParams {
    pub days: u32,
    pub sensors: u32,
    pub seed: u64,
}

impl GenerationParams {
    pub fn new(days: u32, sensors: u32, seed: u64) -> Self {
        Self { days, sensors, seed }
    }

    pub fn periods(&self) -> usize {
        (self.days * HOURS_PER_DAY) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapArea {
    pub center_lat: f64,
    pub center_lon: f64,
    pub spread: f64,
}

/// Build one hourly row per period, ending exactly at `end`.
///
/// Per sensor `s` the draws are consumed in a fixed order (temperature,
/// vibration, consumption), so the same params and `end` always yield the
/// same frame.
pub fn generate(params: &GenerationParams, end: DateTime<Utc>) -> SensorFrame {
    let periods = params.periods();
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

    let timestamps: Vec<DateTime<Utc>> = (0..periods)
        .map(|i| end - Duration::hours((periods - 1 - i) as i64))
        .collect();

    let cycle = linspace(0.0, CYCLE_PER_DAY * params.days as f64, periods);
    let mut columns = Vec::with_capacity(params.sensors as usize * Variable::ALL.len());

    for sensor in SensorId::all(params.sensors) {
        let s = sensor.index() as f64;

        let base_temp = 60.0 + 5.0 * s;
        let mut walk = 0.0;
        let temp = (0..periods)
            .map(|_| {
                walk += normal(&mut rng);
                base_temp + walk * 0.1
            })
            .collect();

        let vib = (0..periods)
            .map(|_| (normal(&mut rng) * (0.02 * s)).abs())
            .collect();

        let cons = cycle
            .iter()
            .map(|x| 100.0 + x.sin() * 10.0 + normal(&mut rng) * 2.0)
            .collect();

        columns.push(MetricColumn::new(Variable::Temperature.column_for(sensor), temp));
        columns.push(MetricColumn::new(Variable::Vibration.column_for(sensor), vib));
        columns.push(MetricColumn::new(Variable::Consumption.column_for(sensor), cons));
    }

    tracing::debug!(
        "Generated {} rows x {} metric columns (seed {})",
        periods,
        columns.len(),
        params.seed
    );

    SensorFrame::from_aligned(timestamps, columns)
}

/// Scatter `count` sensors around the map center. All latitudes are drawn
/// before any longitude.
pub fn sensor_locations(count: u32, area: &MapArea, seed: u64) -> Vec<SensorLocation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lats: Vec<f64> = (0..count)
        .map(|_| area.center_lat + normal(&mut rng) * area.spread)
        .collect();
    let lons: Vec<f64> = (0..count)
        .map(|_| area.center_lon + normal(&mut rng) * area.spread)
        .collect();

    SensorId::all(count)
        .zip(lats.into_iter().zip(lons))
        .map(|(sensor, (lat, lon))| SensorLocation::new(sensor, lat, lon))
        .collect()
}

fn normal(rng: &mut ChaCha8Rng) -> f64 {
    rng.sample(StandardNormal)
}

/// Evenly spaced samples over `[start, stop]`, both ends included
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
