//! Run planning and monitor listing

use crate::config::AppConfig;
use barmon_core::{global_registry, tenths, usage, BoxedMonitor};
use std::fmt::Write;
use std::time::Duration;

/// What to run for one monitor after merging saved and command-line settings
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub id: String,
    pub interval: Duration,
    /// Saved arguments followed by command-line arguments
    pub args: Vec<String>,
}

impl RunPlan {
    /// Merge settings for monitor `id`
    ///
    /// Rates are in tenths of a second. A command-line rate beats a saved
    /// one, which beats the monitor's own default. Because options apply
    /// left to right, command-line arguments override saved ones.
    pub fn resolve(
        config: &AppConfig,
        id: &str,
        cli_rate: Option<u64>,
        cli_args: &[String],
        default_interval: Duration,
    ) -> Self {
        let entry = config.entry(id);
        let interval = cli_rate
            .or_else(|| entry.and_then(|e| e.rate))
            .map(tenths)
            .unwrap_or(default_interval);

        let mut args: Vec<String> = entry.map(|e| e.args.clone()).unwrap_or_default();
        args.extend(cli_args.iter().cloned());

        Self {
            id: id.to_string(),
            interval,
            args,
        }
    }
}

/// Create a registered monitor by id
pub fn create_monitor(id: &str) -> anyhow::Result<BoxedMonitor> {
    let registry = global_registry().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.create(id)
}

/// Text for `--list`: every registered monitor with its keys, then the
/// options all monitors accept
pub fn describe_monitors() -> String {
    let registry = global_registry().read().unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut out = String::new();

    for info in registry.list() {
        let monitor = match registry.create(&info.id) {
            Ok(monitor) => monitor,
            Err(e) => {
                log::warn!("Skipping monitor {}: {}", info.id, e);
                continue;
            }
        };
        let metadata = monitor.metadata();
        let _ = writeln!(out, "{} ({}): {}", info.id, info.name, metadata.description);
        let _ = writeln!(out, "  default template: {}", metadata.default_template);
        let _ = writeln!(
            out,
            "  default rate: {} tenths",
            metadata.default_interval.as_millis() / 100
        );
        for field in monitor.fields() {
            let _ = writeln!(out, "  {:<14}{}", field.placeholder(), field.description);
        }
        out.push('\n');
    }

    out.push_str("Monitor options:\n");
    out.push_str(&usage());
    out
}
