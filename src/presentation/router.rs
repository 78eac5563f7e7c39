// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{download_csv, get_dashboard, get_options, health_check, list_sensors};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/options", get(get_options))
        .route("/dashboard", get(get_dashboard))
        .route("/sensors", get(list_sensors))
        .route("/data.csv", get(download_csv))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::tests::{test_config, FixedRepository};
    use crate::application::dashboard_service::DashboardService;
    use crate::application::export_service::ExportService;
    use crate::infrastructure::csv_codec::decode_csv;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = test_config();
        let dashboard_service = Arc::new(DashboardService::new(
            Arc::new(FixedRepository::new()),
            config.clone(),
        ));
        let export_service = Arc::new(ExportService::new(
            dashboard_service.clone(),
            config.export.file_name.clone(),
        ));

        build_router(Arc::new(AppState {
            dashboard_service,
            export_service,
        }))
    }

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get("/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_options() {
        let json = body_json(get("/options").await).await;
        assert_eq!(json["default_days"], 7);
        assert_eq!(json["max_days"], 30);
        assert_eq!(json["variables"], serde_json::json!(["temperature", "vibration", "consumption"]));
        assert_eq!(json["sensors"][4], "s5");
    }

    #[tokio::test]
    async fn test_dashboard() {
        let response = get("/dashboard?days=3&variable=vibracion&sensor=s2&map=true").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["period_days"], 3);
        assert_eq!(json["controls"]["variable"], "vibration");
        assert_eq!(json["controls"]["sensor"], "s2");
        assert_eq!(json["chart"]["id"], "vib_s2");
        assert_eq!(json["chart"]["series"][0]["points"].as_array().unwrap().len(), 72);
        assert_eq!(json["table"]["rows"].as_array().unwrap().len(), 10);
        assert_eq!(json["summary"].as_array().unwrap().len(), 15);
        assert_eq!(json["map"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_dashboard_without_map() {
        let json = body_json(get("/dashboard?map=false").await).await;
        assert!(json.get("map").is_none());
    }

    #[tokio::test]
    async fn test_dashboard_rejects_bad_controls() {
        let response = get("/dashboard?days=45").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "period of 45 days is outside 1..=30");

        assert_eq!(get("/dashboard?sensor=s7").await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(get("/dashboard?variable=humidity").await.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_query_returns_json_error() {
        for uri in ["/dashboard?days=abc", "/dashboard?map=1", "/data.csv?days=-1"] {
            let response = get(uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json", "{uri}");

            let json = body_json(response).await;
            let message = json["error"].as_str().unwrap();
            assert!(message.starts_with("invalid query:"), "{uri}: {message}");
        }
    }

    #[tokio::test]
    async fn test_csv_download() {
        let response = get("/data.csv?days=2").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"datos_demo.csv\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let frame = decode_csv(&body).unwrap();
        assert_eq!(frame.len(), 48);
        assert_eq!(frame.column_names().len(), 16);
    }

    #[tokio::test]
    async fn test_sensors() {
        let json = body_json(get("/sensors").await).await;
        let sensors = json.as_array().unwrap();
        assert_eq!(sensors.len(), 5);
        assert_eq!(sensors[0]["sensor"], "s1");
        assert!(sensors[0]["lat"].as_f64().is_some());
    }
}
