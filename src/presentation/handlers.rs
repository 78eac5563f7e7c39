// HTTP request handlers
use crate::application::dashboard_service::DashboardRequest;
use crate::infrastructure::http_response::{accepts_brotli, csv_attachment_response, json_response};
use crate::presentation::app_state::AppState;
use crate::application::error::DashboardError;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<u32>,
    pub variable: Option<String>,
    pub sensor: Option<String>,
    pub map: Option<bool>,
}

impl From<DashboardQuery> for DashboardRequest {
    fn from(query: DashboardQuery) -> Self {
        DashboardRequest {
            days: query.days,
            variable: query.variable,
            sensor: query.sensor,
            show_map: query.map,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub days: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Control bounds and choices (period, variables, sensors)
pub async fn get_options(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard_service.options().await {
        Ok(options) => match json_response(&options, accepts_brotli(&headers)).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => e.into_response(),
    }
}

/// Full dashboard for the selected period, variable and sensor
pub async fn get_dashboard(
    query: Result<Query<DashboardQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return DashboardError::from(rejection).into_response(),
    };
    let request = DashboardRequest::from(query);

    match state.dashboard_service.get_dashboard(&request).await {
        Ok(dashboard) => match json_response(&dashboard, accepts_brotli(&headers)).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => {
            tracing::debug!("Dashboard request {:?} rejected: {}", request, e);
            e.into_response()
        }
    }
}

/// Sensor positions for the map
pub async fn list_sensors(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard_service.sensor_locations().await {
        Ok(locations) => match json_response(&locations, accepts_brotli(&headers)).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => e.into_response(),
    }
}

/// CSV download of every hourly row in the period
pub async fn download_csv(
    query: Result<Query<PeriodQuery>, QueryRejection>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return DashboardError::from(rejection).into_response(),
    };

    match state.export_service.export_csv(query.days).await {
        Ok(export) => {
            match csv_attachment_response(export.bytes, &export.file_name, accepts_brotli(&headers)).await {
                Ok(response) => response,
                Err(status) => status.into_response(),
            }
        }
        Err(e) => e.into_response(),
    }
}
