// Mapping of application errors onto HTTP responses
use crate::application::error::DashboardError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = if self.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {:#}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<QueryRejection> for DashboardError {
    fn from(rejection: QueryRejection) -> Self {
        DashboardError::InvalidQuery(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = DashboardError::UnknownSensor("s9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = DashboardError::PeriodOutOfRange { days: 0, min: 1, max: 30 }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = DashboardError::InvalidQuery("days: invalid digit".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = DashboardError::Repository(anyhow::anyhow!("historian down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
