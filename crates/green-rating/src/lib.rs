pub mod config;
pub mod error;
pub mod evaluation;
pub mod storage;
pub mod telemetry;
