//! Number formatting and fixed-width padding

use crate::color::colorize;
use barmon_types::MonitorConfig;

/// Upper bound for decimal digits and field widths; `format!` rejects
/// larger precisions
pub const MAX_FIELD_WIDTH: usize = u16::MAX as usize;

/// Round `n` to `digits` decimal places, ties to even
pub fn round_to_digits(n: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (n * scale).round_ties_even() / scale
}

/// Render `n` with exactly `digits` digits after the decimal point
///
/// `digits` is capped at [`MAX_FIELD_WIDTH`].
pub fn format_fixed(n: f64, digits: usize) -> String {
    format!("{:.*}", digits.min(MAX_FIELD_WIDTH), n)
}

/// Fit `s` into a width range, truncating or padding as needed
///
/// A `max_width` of 0 means "as long as the input", a `min_width` of 0
/// means 1. If the bounds end up inverted they are swapped. Strings longer
/// than the range are cut from the right; shorter ones are padded by
/// cycling `pad_chars`, on the right when `pad_right` is set.
pub fn pad(min_width: usize, max_width: usize, pad_chars: &str, pad_right: bool, s: &str) -> String {
    let len = s.chars().count();
    let min = if min_width == 0 { 1 } else { min_width.min(MAX_FIELD_WIDTH) };
    let max = if max_width == 0 { len.max(min) } else { max_width.min(MAX_FIELD_WIDTH) };
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let target = len.clamp(min, max);

    if target < len {
        return s.chars().take(target).collect();
    }

    let pad_chars = if pad_chars.is_empty() { " " } else { pad_chars };
    let padding: String = pad_chars.chars().cycle().take(target - len).collect();
    if pad_right {
        format!("{}{}", s, padding)
    } else {
        format!("{}{}", padding, s)
    }
}

/// Pad `s` with the configuration's width, pad chars and alignment
pub fn show_with_padding(config: &MonitorConfig, s: &str) -> String {
    pad(
        config.min_width,
        config.max_width,
        config.pad_sequence(),
        config.pad_right,
        s,
    )
}

/// `n` with the configured number of decimal digits
pub fn show_digits(config: &MonitorConfig, n: f64) -> String {
    format_fixed(n, config.decimal_digits)
}

/// Render a ratio as a whole percentage, padded to `percent_pad`
pub fn float_to_percent(config: &MonitorConfig, n: f64) -> String {
    let digits = format_fixed(n * 100.0, 0);
    let padded = pad(
        config.percent_pad,
        config.percent_pad,
        config.pad_sequence(),
        config.pad_right,
        &digits,
    );
    format!("{}%", padded)
}

/// Horizontal bar for a ratio `x`, colored by the band of `v`
///
/// The filled part cycles `bar_fore` and carries the band color; the rest
/// cycles `bar_back` uncolored.
pub fn show_percent_bar(config: &MonitorConfig, v: f64, x: f64) -> String {
    let width = config.bar_width.min(MAX_FIELD_WIDTH);
    let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
    let filled = ((width as f64 * x).round_ties_even() as usize).min(width);

    let cycle = |chars: &str, n: usize| -> String {
        if chars.is_empty() {
            " ".repeat(n)
        } else {
            chars.chars().cycle().take(n).collect()
        }
    };

    let fore = colorize(config, v, &cycle(&config.bar_fore, filled));
    format!("{}{}", fore, cycle(&config.bar_back, width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_digits() {
        assert_eq!(round_to_digits(1.2345, 2), 1.23);
        assert_eq!(round_to_digits(0.125, 2), 0.12);
        assert_eq!(round_to_digits(2.5, 0), 2.0);
        assert_eq!(round_to_digits(3.5, 0), 4.0);
        assert_eq!(round_to_digits(-2.5, 0), -2.0);
        assert_eq!(round_to_digits(7.0, 3), 7.0);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(3.14159, 2), "3.14");
        assert_eq!(format_fixed(42.0, 0), "42");
        assert_eq!(format_fixed(1.0, 3), "1.000");
        assert_eq!(format_fixed(-1.26, 1), "-1.3");
    }

    #[test]
    fn test_huge_widths_are_capped() {
        assert_eq!(format_fixed(1.5, 70_000).len(), 2 + MAX_FIELD_WIDTH);
        assert_eq!(pad(usize::MAX, usize::MAX, " ", true, "x").len(), MAX_FIELD_WIDTH);
        let config = MonitorConfig {
            bar_width: usize::MAX,
            ..MonitorConfig::default()
        };
        assert_eq!(show_percent_bar(&config, 0.0, 0.0).len(), MAX_FIELD_WIDTH);
    }

    #[test]
    fn test_pad_fixed_width() {
        assert_eq!(pad(5, 5, "-", false, "3"), "----3");
        assert_eq!(pad(5, 5, "-", true, "3"), "3----");
    }

    #[test]
    fn test_pad_unset_widths_keep_input() {
        for s in ["a", "hello", "12.5%"] {
            assert_eq!(pad(0, 0, "*", false, s), s);
            assert_eq!(pad(0, 0, "*", true, s), s);
        }
    }

    #[test]
    fn test_pad_min_width_only() {
        assert_eq!(pad(3, 0, " ", false, "12345"), "12345");
        assert_eq!(pad(3, 0, " ", false, "12"), " 12");
        assert_eq!(pad(3, 0, " ", true, "12"), "12 ");
    }

    #[test]
    fn test_pad_truncates_from_the_right() {
        assert_eq!(pad(0, 3, " ", false, "abcdef"), "abc");
        assert_eq!(pad(2, 4, " ", true, "abcdef"), "abcd");
    }

    #[test]
    fn test_pad_swaps_inverted_bounds() {
        // min 6, max 2 behaves as min 2, max 6
        assert_eq!(pad(6, 2, ".", false, "a"), ".a");
        assert_eq!(pad(6, 2, ".", false, "abcdefgh"), "abcdef");
    }

    #[test]
    fn test_pad_cycles_pad_chars() {
        assert_eq!(pad(7, 7, "ab", false, "x"), "abababx");
        assert_eq!(pad(4, 4, "-=", true, "x"), "x-=-");
    }

    #[test]
    fn test_pad_counts_chars_not_bytes() {
        assert_eq!(pad(4, 4, " ", false, "°C"), "  °C");
        assert_eq!(pad(0, 1, " ", false, "°C"), "°");
    }

    #[test]
    fn test_float_to_percent() {
        let config = MonitorConfig {
            percent_pad: 3,
            pad_chars: "0".to_string(),
            ..MonitorConfig::default()
        };
        assert_eq!(float_to_percent(&config, 0.5), "050%");

        let config = MonitorConfig {
            percent_pad: 3,
            ..MonitorConfig::default()
        };
        assert_eq!(float_to_percent(&config, 0.07), "  7%");
        assert_eq!(float_to_percent(&MonitorConfig::default(), 0.42), "42%");
        assert_eq!(float_to_percent(&MonitorConfig::default(), 1.0), "100%");
    }

    #[test]
    fn test_show_digits_and_padding() {
        let config = MonitorConfig {
            decimal_digits: 1,
            min_width: 6,
            pad_right: true,
            pad_chars: "_".to_string(),
            ..MonitorConfig::default()
        };
        assert_eq!(show_digits(&config, 12.24), "12.2");
        assert_eq!(show_with_padding(&config, "12.2"), "12.2__");
    }

    #[test]
    fn test_percent_bar() {
        let config = MonitorConfig {
            bar_width: 10,
            ..MonitorConfig::default()
        };
        assert_eq!(show_percent_bar(&config, 30.0, 0.3), "###:::::::");
        assert_eq!(show_percent_bar(&config, 0.0, -1.0), "::::::::::");
        assert_eq!(show_percent_bar(&config, 100.0, 4.0), "##########");
    }

    #[test]
    fn test_percent_bar_colors_only_the_filled_part() {
        let config = MonitorConfig {
            bar_width: 4,
            bar_fore: "=".to_string(),
            bar_back: "-".to_string(),
            high_color: Some("red".to_string()),
            ..MonitorConfig::default()
        };
        assert_eq!(show_percent_bar(&config, 75.0, 0.75), "<fc=red>===</fc>-");
    }
}
