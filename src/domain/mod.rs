// Domain layer - Plant telemetry models and pure computations
pub mod dashboard;
pub mod frame;
pub mod generator;
pub mod sensor;
pub mod statistics;
pub mod telemetry;
