//! barmon-types: Shared data types for barmon monitors.
//!
//! This crate holds plain data (monitor configuration, threshold bands,
//! export field metadata) shared by the core runtime and the monitor
//! implementations. Nothing in here performs I/O.

pub mod band;
pub mod field;
pub mod monitor_config;

pub use band::Band;
pub use field::{ExportField, FieldKind};
pub use monitor_config::MonitorConfig;
