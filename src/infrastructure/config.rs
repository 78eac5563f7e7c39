use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub generator: GeneratorSettings,
    pub period: PeriodSettings,
    pub cache: CacheSettings,
    pub map: MapSettings,
    pub table: TableSettings,
    pub chart: ChartSettings,
    pub export: ExportSettings,
    pub source: SourceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorSettings {
    pub sensors: u32,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PeriodSettings {
    pub min_days: u32,
    pub max_days: u32,
    pub default_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    pub ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapSettings {
    pub center_lat: f64,
    pub center_lon: f64,
    pub spread: f64,
    pub show_by_default: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TableSettings {
    pub sample_rows: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    pub max_points: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    pub file_name: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Synthetic,
    Csv,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub kind: SourceKind,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Built-in defaults, then `config/dashboard.*` if present, then
/// `DASHBOARD__SECTION__KEY` environment overrides.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(builder
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("generator.sensors", 5)?
        .set_default("generator.seed", 42)?
        .set_default("period.min_days", 1)?
        .set_default("period.max_days", 30)?
        .set_default("period.default_days", 7)?
        .set_default("cache.ttl_secs", 300)?
        .set_default("map.center_lat", 6.2442)?
        .set_default("map.center_lon", -75.5812)?
        .set_default("map.spread", 0.01)?
        .set_default("map.show_by_default", true)?
        .set_default("table.sample_rows", 10)?
        .set_default("chart.max_points", 720)?
        .set_default("export.file_name", "datos_demo.csv")?
        .set_default("source.kind", "synthetic")?)
}

fn validate(config: &DashboardConfig) -> anyhow::Result<()> {
    let period = &config.period;
    if period.min_days == 0 || period.min_days > period.max_days {
        anyhow::bail!(
            "invalid period bounds: min_days={} max_days={}",
            period.min_days,
            period.max_days
        );
    }
    if !(period.min_days..=period.max_days).contains(&period.default_days) {
        anyhow::bail!(
            "default_days={} outside {}..={}",
            period.default_days,
            period.min_days,
            period.max_days
        );
    }
    if config.generator.sensors == 0 {
        anyhow::bail!("generator.sensors must be at least 1");
    }
    if config.source.kind == SourceKind::Csv && config.source.path.is_none() {
        anyhow::bail!("source.path is required when source.kind = \"csv\"");
    }
    Ok(())
}
