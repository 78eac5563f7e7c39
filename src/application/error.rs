// Application errors surfaced to the presentation layer
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("period of {days} days is outside {min}..={max}")]
    PeriodOutOfRange { days: u32, min: u32, max: u32 },

    #[error("unknown sensor: {0}")]
    UnknownSensor(String),

    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl DashboardError {
    /// True for errors caused by the caller's input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DashboardError::PeriodOutOfRange { .. }
                | DashboardError::UnknownSensor(_)
                | DashboardError::UnknownVariable(_)
                | DashboardError::InvalidQuery(_)
        )
    }
}
