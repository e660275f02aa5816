//! Memory (RAM) monitor

use anyhow::{anyhow, Result};
use barmon_core::{
    show_digits, show_percent_bar, show_percents_with_colors, show_with_colors, ExportField,
    FieldKind, Monitor, MonitorConfig, MonitorMetadata, Sampling,
};
use once_cell::sync::Lazy;
use std::sync::Mutex;
use std::time::Duration;
use sysinfo::System;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Shared sysinfo::System instance for all MemoryMonitor instances.
static SHARED_MEMORY_SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| {
    log::info!("Creating shared memory sysinfo::System instance");
    Mutex::new(System::new())
});

/// Memory monitor
///
/// Samples are `[total, used, free, available]` in bytes.
pub struct MemoryMonitor {
    metadata: MonitorMetadata,
}

impl MemoryMonitor {
    pub fn new() -> Self {
        let metadata = MonitorMetadata {
            id: "memory".to_string(),
            name: "Memory".to_string(),
            description: "System memory (RAM) usage".to_string(),
            default_template: "Mem: <usedratio> (<used>M)".to_string(),
            export: [
                "usedratio",
                "freeratio",
                "usedbar",
                "total",
                "used",
                "free",
                "available",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            default_interval: Duration::from_millis(2000),
            sampling: Sampling::Single,
        };

        Self { metadata }
    }
}

impl Default for MemoryMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Monitor for MemoryMonitor {
    fn metadata(&self) -> &MonitorMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<ExportField> {
        vec![
            ExportField::new("usedratio", "Used memory", FieldKind::Percentage),
            ExportField::new("freeratio", "Free memory", FieldKind::Percentage),
            ExportField::new("usedbar", "Used memory as a bar", FieldKind::Text),
            ExportField::new("total", "Total memory in MB", FieldKind::Numerical),
            ExportField::new("used", "Used memory in MB", FieldKind::Numerical),
            ExportField::new("free", "Free memory in MB", FieldKind::Numerical),
            ExportField::new("available", "Available memory in MB", FieldKind::Numerical),
        ]
    }

    fn sample(&self) -> Result<Vec<f64>> {
        let mut system = SHARED_MEMORY_SYSTEM.lock().unwrap_or_else(|poisoned| {
            log::warn!("Shared memory system mutex was poisoned, recovering");
            poisoned.into_inner()
        });
        system.refresh_memory();
        Ok(vec![
            system.total_memory() as f64,
            system.used_memory() as f64,
            system.free_memory() as f64,
            system.available_memory() as f64,
        ])
    }

    fn render(&self, config: &MonitorConfig, first: &[f64], _second: &[f64]) -> Result<Vec<String>> {
        let [total, used, free, available] = match first {
            [total, used, free, available, ..] => [*total, *used, *free, *available],
            _ => return Err(anyhow!("incomplete memory sample")),
        };
        if total <= 0.0 {
            return Err(anyhow!("total memory reported as zero"));
        }

        let used_ratio = used / total;
        let mut values = show_percents_with_colors(config, &[used_ratio, free / total]);
        values.push(show_percent_bar(config, used_ratio * 100.0, used_ratio));
        for bytes in [total, used, free, available] {
            let mb = bytes / BYTES_PER_MB;
            values.push(show_with_colors(config, |v| show_digits(config, v), mb));
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barmon_core::{fill_template, parse_options, ConfigStore};

    const GB: f64 = 1024.0 * BYTES_PER_MB;

    #[test]
    fn test_render_default_template() {
        let monitor = MemoryMonitor::new();
        let config = monitor.default_config();
        let values = monitor
            .render(&config, &[8.0 * GB, 2.0 * GB, 5.0 * GB, 6.0 * GB], &[])
            .unwrap();
        assert_eq!(values.len(), config.export.len());
        assert_eq!(fill_template(&config, &values), "Mem: 25% (2048M)");
    }

    #[test]
    fn test_render_all_keys() {
        let monitor = MemoryMonitor::new();
        let config = MonitorConfig {
            template: "<freeratio>|<usedbar>|<total>|<free>|<available>".to_string(),
            bar_width: 4,
            ..monitor.default_config()
        };
        let values = monitor
            .render(&config, &[4.0 * GB, 3.0 * GB, 1.0 * GB, 1.0 * GB], &[])
            .unwrap();
        assert_eq!(fill_template(&config, &values), "25%|###:|4096|1024|1024");
    }

    #[test]
    fn test_render_with_huge_decimal_digits() {
        let monitor = MemoryMonitor::new();
        let store = ConfigStore::new(monitor.default_config());
        parse_options(&["-d", "70000", "-t", "<used>"], &store).unwrap();
        let values = monitor
            .render(&store.snapshot(), &[8.0 * GB, 2.0 * GB, 5.0 * GB, 6.0 * GB], &[])
            .unwrap();
        let out = fill_template(&store.snapshot(), &values);
        assert!(out.starts_with("2048.000"));
    }

    #[test]
    fn test_render_rejects_bad_samples() {
        let monitor = MemoryMonitor::new();
        let config = monitor.default_config();
        assert!(monitor.render(&config, &[1.0, 2.0], &[]).is_err());
        assert!(monitor.render(&config, &[0.0, 0.0, 0.0, 0.0], &[]).is_err());
    }

    #[test]
    fn test_sample_reports_four_values() {
        let values = MemoryMonitor::new().sample().unwrap();
        assert_eq!(values.len(), 4);
    }
}
