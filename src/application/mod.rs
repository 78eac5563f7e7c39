// Application layer - Use cases over the telemetry repository
pub mod dashboard_service;
pub mod error;
pub mod export_service;
pub mod frame_cache;
pub mod telemetry_repository;
