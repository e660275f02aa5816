//! barmon-core: Shared runtime for barmon monitors.
//!
//! Every monitor relies on the same machinery: a configuration store that
//! option parsing writes into, a template engine that fills `<key>`
//! placeholders, formatting and threshold coloring helpers, and a poller
//! that samples the monitor on a fixed interval and delivers one rendered
//! line per cycle.

pub mod color;
mod error;
pub mod format;
mod monitor;
pub mod options;
pub mod parsing;
pub mod poller;
mod registry;
mod runner;
mod store;
pub mod template;

pub use color::{colorize, show_percents_with_colors, show_with_colors};
pub use error::{OptionError, TemplateError};
pub use format::{
    float_to_percent, format_fixed, pad, round_to_digits, show_digits, show_percent_bar,
    show_with_padding,
};
pub use monitor::{BoxedMonitor, Monitor, MonitorMetadata, Sampling};
pub use options::{parse_options, usage, MonitorOption};
pub use parsing::Cursor;
pub use poller::{tenths, Poller, PollerConfig, SampleCell, SampleState};
pub use registry::{global_registry, MonitorFactory, MonitorInfo, Registry};
pub use runner::MonitorRunner;
pub use store::ConfigStore;
pub use template::{combine, fill_template, parse_template, try_parse_template, Segment};

// Re-export types used in trait signatures for convenience
pub use barmon_types::{Band, ExportField, FieldKind, MonitorConfig};
