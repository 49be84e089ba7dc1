pub mod config;
pub mod confidentiality;
pub mod error;
pub mod lending;
pub mod telemetry;
