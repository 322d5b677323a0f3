// Common library shared by the API binary and its tests

pub mod config;
pub mod errors;
pub mod mobilize;
pub mod models;
pub mod poster;
pub mod reddit;
pub mod secrets;
pub mod telemetry;
pub mod window;
