//! Threshold-based color selection
//!
//! Colors are applied as `<fc=COLOR>...</fc>` spans before templating; the
//! template parser leaves those tags alone.

use crate::format::{float_to_percent, show_with_padding};
use barmon_types::MonitorConfig;

/// Wrap `s` in the color of the band `x` falls into
///
/// Returns `s` unchanged when that band has no color configured.
pub fn colorize(config: &MonitorConfig, x: f64, s: &str) -> String {
    match config.color_for(config.band_of(x)) {
        Some(color) => format!("<fc={}>{}</fc>", color, s),
        None => s.to_string(),
    }
}

/// Render `x`, pad it, then color it by its band
pub fn show_with_colors<F>(config: &MonitorConfig, render: F, x: f64) -> String
where
    F: FnOnce(f64) -> String,
{
    let padded = show_with_padding(config, &render(x));
    colorize(config, x, &padded)
}

/// Percent strings for each ratio in `values`, colored by `value * 100`
pub fn show_percents_with_colors(config: &MonitorConfig, values: &[f64]) -> Vec<String> {
    values
        .iter()
        .map(|&v| {
            let percent = float_to_percent(config, v);
            show_with_colors(config, |_| percent, v * 100.0)
        })
        .collect()
}
