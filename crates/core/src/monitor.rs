//! Monitor plugin trait and related types

use anyhow::Result;
use barmon_types::{ExportField, FieldKind, MonitorConfig};
use std::time::Duration;

/// How many samples a monitor takes per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// One sample, rendered on its own
    Single,
    /// Two samples a fraction of the interval apart, rendered together
    /// (e.g. counters that only mean something as a difference)
    Dual,
}

/// Metadata about a monitor
#[derive(Debug, Clone)]
pub struct MonitorMetadata {
    /// Unique identifier for this monitor type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of what this monitor reports
    pub description: String,
    /// Template used until the user overrides it with `-t`
    pub default_template: String,
    /// Keys rendered by `render`, in order
    pub export: Vec<String>,
    /// Recommended update interval
    pub default_interval: Duration,
    pub sampling: Sampling,
}

/// Trait for all monitors
///
/// A monitor samples some system metric and renders the samples as one
/// string per export key. Formatting, coloring and templating come from
/// the shared helpers in this crate.
pub trait Monitor: Send + Sync {
    /// Get metadata about this monitor
    fn metadata(&self) -> &MonitorMetadata;

    /// Describe the export keys
    fn fields(&self) -> Vec<ExportField> {
        self.metadata()
            .export
            .iter()
            .map(|key| ExportField::new(key.clone(), key.clone(), FieldKind::Text))
            .collect()
    }

    /// Take one raw sample
    ///
    /// May block on file or process I/O; the runner calls it off the async
    /// executor.
    fn sample(&self) -> Result<Vec<f64>>;

    /// Render samples into one string per export key
    ///
    /// For `Sampling::Single` monitors `second` is empty. For dual-sample
    /// monitors either slice may be empty when that sample had not finished
    /// in time; that is not an error.
    fn render(&self, config: &MonitorConfig, first: &[f64], second: &[f64]) -> Result<Vec<String>>;

    /// Initial configuration for a new instance
    fn default_config(&self) -> MonitorConfig {
        let metadata = self.metadata();
        MonitorConfig::new(metadata.default_template.clone(), &metadata.export)
    }
}

/// Type-erased monitor for dynamic dispatch
pub type BoxedMonitor = Box<dyn Monitor>;
