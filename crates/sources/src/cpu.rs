//! CPU usage monitor reading `/proc/stat`

use anyhow::{anyhow, Context, Result};
use barmon_core::{
    show_percent_bar, show_percents_with_colors, Cursor, ExportField, FieldKind, Monitor,
    MonitorConfig, MonitorMetadata, Sampling,
};
use std::path::PathBuf;
use std::time::Duration;

/// Jiffy counters kept from the aggregate `cpu` line: user, nice, system, idle
const COUNTERS: usize = 4;

/// CPU usage monitor
///
/// Usage is the share of jiffies spent in each state between two samples
/// taken a fraction of the interval apart.
pub struct CpuMonitor {
    metadata: MonitorMetadata,
    stat_path: PathBuf,
}

impl CpuMonitor {
    pub fn new() -> Self {
        Self::with_stat_path("/proc/stat")
    }

    /// Read counters from another file (used by tests)
    pub fn with_stat_path(path: impl Into<PathBuf>) -> Self {
        let metadata = MonitorMetadata {
            id: "cpu".to_string(),
            name: "Cpu".to_string(),
            description: "Aggregate CPU usage from /proc/stat".to_string(),
            default_template: "Cpu: <total>".to_string(),
            export: ["total", "bar", "user", "nice", "system", "idle"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            default_interval: Duration::from_millis(1000),
            sampling: Sampling::Dual,
        };

        Self {
            metadata,
            stat_path: path.into(),
        }
    }
}

impl Default for CpuMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters from the aggregate `cpu` line of a stat file
fn parse_stat(text: &str) -> Result<Vec<f64>> {
    let mut cursor = Cursor::new(text);
    if !cursor.skip_till("cpu ") {
        return Err(anyhow!("no aggregate cpu line"));
    }
    let mut counters = cursor.numbers_on_line();
    if counters.len() < COUNTERS {
        return Err(anyhow!(
            "expected {} cpu counters, found {}",
            COUNTERS,
            counters.len()
        ));
    }
    counters.truncate(COUNTERS);
    Ok(counters)
}

/// Share of each counter's growth between two samples
///
/// Missing samples or an idle counter delta of zero give all zeros.
fn usage_ratios(first: &[f64], second: &[f64]) -> [f64; COUNTERS] {
    let mut ratios = [0.0; COUNTERS];
    if first.len() < COUNTERS || second.len() < COUNTERS {
        return ratios;
    }
    let deltas: Vec<f64> = second.iter().zip(first).map(|(b, a)| b - a).collect();
    let total: f64 = deltas[..COUNTERS].iter().sum();
    if total > 0.0 {
        for (ratio, delta) in ratios.iter_mut().zip(&deltas) {
            *ratio = delta / total;
        }
    }
    ratios
}

impl Monitor for CpuMonitor {
    fn metadata(&self) -> &MonitorMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<ExportField> {
        vec![
            ExportField::new("total", "Busy time (user + nice + system)", FieldKind::Percentage),
            ExportField::new("bar", "Busy time as a bar", FieldKind::Text),
            ExportField::new("user", "User time", FieldKind::Percentage),
            ExportField::new("nice", "Niced user time", FieldKind::Percentage),
            ExportField::new("system", "Kernel time", FieldKind::Percentage),
            ExportField::new("idle", "Idle time", FieldKind::Percentage),
        ]
    }

    fn sample(&self) -> Result<Vec<f64>> {
        let text = std::fs::read_to_string(&self.stat_path)
            .with_context(|| format!("reading {}", self.stat_path.display()))?;
        parse_stat(&text)
    }

    fn render(&self, config: &MonitorConfig, first: &[f64], second: &[f64]) -> Result<Vec<String>> {
        let [user, nice, system, idle] = usage_ratios(first, second);
        let total = user + nice + system;

        let mut values = show_percents_with_colors(config, &[total, user, nice, system, idle]);
        values.insert(1, show_percent_bar(config, total * 100.0, total));
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barmon_core::fill_template;
    use std::io::Write;

    const STAT: &str = "cpu  100 0 100 800 5 0 0 0 0 0\ncpu0 50 0 50 400 2 0 0 0 0 0\n";

    #[test]
    fn test_parse_stat() {
        assert_eq!(parse_stat(STAT).unwrap(), vec![100.0, 0.0, 100.0, 800.0]);
        assert!(parse_stat("intr 1 2 3\n").is_err());
        assert!(parse_stat("cpu  1 2\n").is_err());
    }

    #[test]
    fn test_usage_ratios() {
        let ratios = usage_ratios(&[100.0, 0.0, 100.0, 800.0], &[130.0, 0.0, 120.0, 850.0]);
        assert_eq!(ratios, [0.3, 0.0, 0.2, 0.5]);
        assert_eq!(usage_ratios(&[], &[1.0, 2.0, 3.0, 4.0]), [0.0; 4]);
        assert_eq!(usage_ratios(&[1.0, 1.0, 1.0, 1.0], &[1.0, 1.0, 1.0, 1.0]), [0.0; 4]);
    }

    #[test]
    fn test_render_fills_every_export_key() {
        let monitor = CpuMonitor::new();
        let config = MonitorConfig {
            template: "<total> <bar> u<user> s<system> i<idle>".to_string(),
            bar_width: 4,
            ..monitor.default_config()
        };
        let values = monitor
            .render(&config, &[100.0, 0.0, 100.0, 800.0], &[130.0, 0.0, 120.0, 850.0])
            .unwrap();
        assert_eq!(values.len(), config.export.len());
        assert_eq!(fill_template(&config, &values), "50% ##:: u30% s20% i50%");
    }

    #[test]
    fn test_render_with_pending_sample() {
        let monitor = CpuMonitor::new();
        let config = monitor.default_config();
        let values = monitor.render(&config, &[1.0, 2.0, 3.0, 4.0], &[]).unwrap();
        assert_eq!(fill_template(&config, &values), "Cpu: 0%");
    }

    #[test]
    fn test_sample_reads_stat_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STAT.as_bytes()).unwrap();
        let monitor = CpuMonitor::with_stat_path(file.path());
        assert_eq!(monitor.sample().unwrap(), vec![100.0, 0.0, 100.0, 800.0]);
    }

    #[test]
    fn test_sample_missing_file() {
        let monitor = CpuMonitor::with_stat_path("/nonexistent/stat");
        let err = monitor.sample().unwrap_err();
        assert!(format!("{:#}", err).starts_with("reading /nonexistent/stat"));
    }
}
