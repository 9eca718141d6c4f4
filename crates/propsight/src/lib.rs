pub mod config;
pub mod error;
pub mod markets;
pub mod telemetry;
