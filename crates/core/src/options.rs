//! Command-line style options shared by every monitor
//!
//! Options are applied to the store left to right as they are parsed. When
//! a token fails to parse, the options before it stay applied and the error
//! is returned.

use crate::error::OptionError;
use crate::format::MAX_FIELD_WIDTH;
use crate::store::ConfigStore;
use barmon_types::MonitorConfig;

/// One parsed monitor option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOption {
    High(i64),
    Low(i64),
    HighColor(String),
    NormalColor(String),
    LowColor(String),
    Template(String),
    PercentPad(usize),
    DecimalDigits(usize),
    MinWidth(usize),
    MaxWidth(usize),
    PadChars(String),
    /// `true` pads on the right
    PadRight(bool),
    BarBack(String),
    BarFore(String),
    BarWidth(usize),
}

impl MonitorOption {
    /// Write this option into a configuration
    pub fn apply(&self, config: &mut MonitorConfig) {
        match self {
            MonitorOption::High(n) => config.high = *n,
            MonitorOption::Low(n) => config.low = *n,
            MonitorOption::HighColor(c) => config.high_color = Some(c.clone()),
            MonitorOption::NormalColor(c) => config.normal_color = Some(c.clone()),
            MonitorOption::LowColor(c) => config.low_color = Some(c.clone()),
            MonitorOption::Template(t) => config.template = t.clone(),
            MonitorOption::PercentPad(n) => config.percent_pad = *n,
            MonitorOption::DecimalDigits(n) => config.decimal_digits = *n,
            MonitorOption::MinWidth(n) => config.min_width = *n,
            MonitorOption::MaxWidth(n) => config.max_width = *n,
            MonitorOption::PadChars(s) => config.pad_chars = s.clone(),
            MonitorOption::PadRight(right) => config.pad_right = *right,
            MonitorOption::BarBack(s) => config.bar_back = s.clone(),
            MonitorOption::BarFore(s) => config.bar_fore = s.clone(),
            MonitorOption::BarWidth(n) => config.bar_width = *n,
        }
    }
}

/// What an option table entry builds from its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKind {
    High,
    Low,
    HighColor,
    NormalColor,
    LowColor,
    Template,
    PercentPad,
    DecimalDigits,
    MinWidth,
    MaxWidth,
    PadChars,
    Align,
    BarBack,
    BarFore,
    BarWidth,
}

impl OptionKind {
    fn build(self, flag: &str, value: &str) -> Result<MonitorOption, OptionError> {
        let option = match self {
            OptionKind::High => MonitorOption::High(parse_int(flag, value)?),
            OptionKind::Low => MonitorOption::Low(parse_int(flag, value)?),
            OptionKind::HighColor => MonitorOption::HighColor(value.to_string()),
            OptionKind::NormalColor => MonitorOption::NormalColor(value.to_string()),
            OptionKind::LowColor => MonitorOption::LowColor(value.to_string()),
            OptionKind::Template => MonitorOption::Template(value.to_string()),
            OptionKind::PercentPad => MonitorOption::PercentPad(parse_width(flag, value)?),
            OptionKind::DecimalDigits => MonitorOption::DecimalDigits(parse_width(flag, value)?),
            OptionKind::MinWidth => MonitorOption::MinWidth(parse_width(flag, value)?),
            OptionKind::MaxWidth => MonitorOption::MaxWidth(parse_width(flag, value)?),
            OptionKind::PadChars => MonitorOption::PadChars(value.to_string()),
            OptionKind::Align => match value {
                "l" => MonitorOption::PadRight(true),
                "r" => MonitorOption::PadRight(false),
                _ => {
                    return Err(OptionError::InvalidAlignment {
                        option: flag.to_string(),
                        value: value.to_string(),
                    })
                }
            },
            OptionKind::BarBack => MonitorOption::BarBack(value.to_string()),
            OptionKind::BarFore => MonitorOption::BarFore(value.to_string()),
            OptionKind::BarWidth => MonitorOption::BarWidth(parse_width(flag, value)?),
        };
        Ok(option)
    }
}

struct OptionSpec {
    short: char,
    long: &'static str,
    arg: &'static str,
    help: &'static str,
    kind: OptionKind,
}

static OPTIONS: &[OptionSpec] = &[
    OptionSpec { short: 'H', long: "High", arg: "N", help: "The high threshold", kind: OptionKind::High },
    OptionSpec { short: 'L', long: "Low", arg: "N", help: "The low threshold", kind: OptionKind::Low },
    OptionSpec { short: 'h', long: "high", arg: "COLOR", help: "Color for the high threshold: ex \"#FF0000\"", kind: OptionKind::HighColor },
    OptionSpec { short: 'n', long: "normal", arg: "COLOR", help: "Color for the normal threshold: ex \"#00FF00\"", kind: OptionKind::NormalColor },
    OptionSpec { short: 'l', long: "low", arg: "COLOR", help: "Color for the low threshold: ex \"#0000FF\"", kind: OptionKind::LowColor },
    OptionSpec { short: 't', long: "template", arg: "OUTPUT TEMPLATE", help: "Output template.", kind: OptionKind::Template },
    OptionSpec { short: 'p', long: "ppad", arg: "PERCENT PADDING", help: "Percentage padding", kind: OptionKind::PercentPad },
    OptionSpec { short: 'd', long: "ddigits", arg: "DECIMAL DIGITS", help: "Number of decimal digits", kind: OptionKind::DecimalDigits },
    OptionSpec { short: 'm', long: "minwidth", arg: "MINWIDTH", help: "Minimum field width", kind: OptionKind::MinWidth },
    OptionSpec { short: 'M', long: "maxwidth", arg: "MAXWIDTH", help: "Maximum field width", kind: OptionKind::MaxWidth },
    OptionSpec { short: 'c', long: "padchars", arg: "PADCHARS", help: "Characters used for padding", kind: OptionKind::PadChars },
    OptionSpec { short: 'a', long: "align", arg: "ALIGN", help: "Field alignment (l or r)", kind: OptionKind::Align },
    OptionSpec { short: 'b', long: "bback", arg: "BAR BACKGROUND", help: "Characters used to draw bar backgrounds", kind: OptionKind::BarBack },
    OptionSpec { short: 'f', long: "bfore", arg: "BAR FOREGROUND", help: "Characters used to draw bar foregrounds", kind: OptionKind::BarFore },
    OptionSpec { short: 'W', long: "bwidth", arg: "BAR WIDTH", help: "Bar width", kind: OptionKind::BarWidth },
];

fn parse_int(flag: &str, value: &str) -> Result<i64, OptionError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| OptionError::InvalidNumber {
            option: flag.to_string(),
            value: value.to_string(),
        })
}

/// Widths are clamped to `0..=MAX_FIELD_WIDTH`
fn parse_width(flag: &str, value: &str) -> Result<usize, OptionError> {
    parse_int(flag, value).map(|n| n.clamp(0, MAX_FIELD_WIDTH as i64) as usize)
}

/// A flag token split into its table entry and an inline argument, if any
fn lookup(token: &str) -> Result<(&'static OptionSpec, Option<String>), OptionError> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline) = match long.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (long, None),
        };
        OPTIONS
            .iter()
            .find(|spec| spec.long == name)
            .map(|spec| (spec, inline))
            .ok_or_else(|| OptionError::Unrecognized(format!("--{}", name)))
    } else {
        let mut chars = token.chars().skip(1);
        let short = chars.next();
        let rest: String = chars.collect();
        OPTIONS
            .iter()
            .find(|spec| Some(spec.short) == short)
            .map(|spec| (spec, if rest.is_empty() { None } else { Some(rest) }))
            .ok_or_else(|| OptionError::Unrecognized(token.to_string()))
    }
}

fn is_flag(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Parse `args` into options without touching any configuration
///
/// Returns the options in order and the non-option arguments. Everything
/// after a bare `--` is a non-option argument.
pub fn parse_tokens<S: AsRef<str>>(
    args: &[S],
) -> Result<(Vec<MonitorOption>, Vec<String>), OptionError> {
    let mut options = Vec::new();
    let mut residual = Vec::new();
    for_each_option(args, &mut residual, |option| options.push(option))?;
    Ok((options, residual))
}

/// Parse `args` and apply each option to `store` as soon as it is parsed
///
/// On success returns the non-option arguments. On failure the options
/// preceding the bad token remain applied.
pub fn parse_options<S: AsRef<str>>(
    args: &[S],
    store: &ConfigStore,
) -> Result<Vec<String>, OptionError> {
    let mut residual = Vec::new();
    for_each_option(args, &mut residual, |option| {
        log::trace!("Applying monitor option {:?}", option);
        store.update(|config| option.apply(config));
    })
    .map_err(|e| {
        log::warn!("Monitor option parsing failed: {}", e);
        e
    })?;
    Ok(residual)
}

fn for_each_option<S, F>(args: &[S], residual: &mut Vec<String>, mut f: F) -> Result<(), OptionError>
where
    S: AsRef<str>,
    F: FnMut(MonitorOption),
{
    let mut tokens = args.iter().map(AsRef::as_ref);
    while let Some(token) = tokens.next() {
        if token == "--" {
            residual.extend(tokens.by_ref().map(str::to_string));
            break;
        }
        if !is_flag(token) {
            residual.push(token.to_string());
            continue;
        }

        let (spec, inline) = lookup(token)?;
        let flag = if token.starts_with("--") {
            format!("--{}", spec.long)
        } else {
            format!("-{}", spec.short)
        };
        let value = match inline {
            Some(value) => value,
            None => tokens
                .next()
                .map(str::to_string)
                .ok_or_else(|| OptionError::MissingArgument {
                    option: flag.clone(),
                    arg: spec.arg,
                })?,
        };
        f(spec.kind.build(&flag, &value)?);
    }
    Ok(())
}

/// Usage text listing every monitor option
pub fn usage() -> String {
    let rows: Vec<(String, &str)> = OPTIONS
        .iter()
        .map(|spec| {
            (
                format!("  -{} {}, --{}={}", spec.short, spec.arg, spec.long, spec.arg),
                spec.help,
            )
        })
        .collect();
    let width = rows.iter().map(|(flags, _)| flags.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(flags, help)| format!("{:<width$}  {}\n", flags, help, width = width))
        .collect()
}
