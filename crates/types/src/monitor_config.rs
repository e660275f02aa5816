//! Per-monitor configuration.

use crate::band::Band;
use serde::{Deserialize, Serialize};

fn default_low() -> i64 {
    33
}

fn default_high() -> i64 {
    66
}

fn default_pad_chars() -> String {
    " ".to_string()
}

fn default_bar_back() -> String {
    ":".to_string()
}

fn default_bar_fore() -> String {
    "#".to_string()
}

fn default_bar_width() -> usize {
    10
}

/// Mutable settings of one monitor instance
///
/// Created once per monitor with its default template and export keys,
/// then mutated by option parsing. Widths of 0 mean "unset".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub normal_color: Option<String>,
    #[serde(default)]
    pub low_color: Option<String>,
    #[serde(default)]
    pub high_color: Option<String>,
    #[serde(default = "default_low")]
    pub low: i64,
    #[serde(default = "default_high")]
    pub high: i64,
    #[serde(default)]
    pub template: String,
    /// Keys the template may reference, in the order the monitor renders values
    #[serde(default)]
    pub export: Vec<String>,
    #[serde(default)]
    pub percent_pad: usize,
    #[serde(default)]
    pub decimal_digits: usize,
    #[serde(default)]
    pub min_width: usize,
    #[serde(default)]
    pub max_width: usize,
    #[serde(default = "default_pad_chars")]
    pub pad_chars: String,
    /// Pad on the right (left-justify) instead of the left
    #[serde(default)]
    pub pad_right: bool,
    #[serde(default = "default_bar_back")]
    pub bar_back: String,
    #[serde(default = "default_bar_fore")]
    pub bar_fore: String,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl MonitorConfig {
    /// Create a configuration with the given default template and export keys
    pub fn new<S: AsRef<str>>(template: impl Into<String>, export: &[S]) -> Self {
        Self {
            template: template.into(),
            export: export.iter().map(|k| k.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Color configured for a band, if any
    pub fn color_for(&self, band: Band) -> Option<&str> {
        match band {
            Band::Low => self.low_color.as_deref(),
            Band::Normal => self.normal_color.as_deref(),
            Band::High => self.high_color.as_deref(),
        }
    }

    /// Band of `x` under this configuration's thresholds
    pub fn band_of(&self, x: f64) -> Band {
        Band::classify(x, self.low, self.high)
    }

    /// Pad sequence, never empty
    pub fn pad_sequence(&self) -> &str {
        if self.pad_chars.is_empty() {
            " "
        } else {
            &self.pad_chars
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            normal_color: None,
            low_color: None,
            high_color: None,
            low: default_low(),
            high: default_high(),
            template: String::new(),
            export: Vec::new(),
            percent_pad: 0,
            decimal_digits: 0,
            min_width: 0,
            max_width: 0,
            pad_chars: default_pad_chars(),
            pad_right: false,
            bar_back: default_bar_back(),
            bar_fore: default_bar_fore(),
            bar_width: default_bar_width(),
        }
    }
}
