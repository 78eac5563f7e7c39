// Dashboard domain model
use super::frame::TableSample;
use super::sensor::{SensorId, SensorLocation, Variable};
use super::statistics::ColumnSummary;
use super::telemetry::ChartData;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub period_days: u32,
    pub controls: SelectedControls,
    pub table: TableSample,
    pub summary: Vec<ColumnSummary>,
    pub chart: ChartData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<Vec<SensorLocation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedControls {
    pub variable: Variable,
    pub sensor: SensorId,
    pub show_map: bool,
}

/// Bounds and choices a client needs to render its controls
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOptions {
    pub min_days: u32,
    pub max_days: u32,
    pub default_days: u32,
    pub variables: Vec<Variable>,
    pub sensors: Vec<SensorId>,
    pub show_map_by_default: bool,
}
