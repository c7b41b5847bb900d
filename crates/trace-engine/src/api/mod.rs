pub mod config;
pub mod estimator;
pub mod types;
