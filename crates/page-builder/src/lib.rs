pub mod blocks;
pub mod config;
pub mod error;
pub mod telemetry;
