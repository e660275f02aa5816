//! barmon: Templated system monitors for text status bars
//!
//! This library provides the pieces behind the `barmon` binary:
//! - Application configuration (saved monitor arguments and rates)
//! - Run planning that merges saved and command-line settings
//!
//! The monitor runtime lives in `barmon-core`; the built-in monitors in
//! `barmon-sources`.

pub mod app;
pub mod config;

pub use app::RunPlan;
pub use config::{AppConfig, MonitorEntry};
