//! Output template parsing and combination
//!
//! A template is literal text with `<key>` placeholders. Color tags of the
//! form `<fc=COLOR>` and `</fc>` are literal text, not placeholders, so
//! values that were already color-wrapped survive templating untouched.

use crate::error::TemplateError;
use barmon_types::MonitorConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Matches a pass-through color tag at the start of the input
static COLOR_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:</fc>|<fc=[\p{Alphabetic}\p{Nd},#]+>)").expect("Invalid regex"));

/// One `prefix <key> suffix` run of a parsed template
///
/// `key` is `None` only for a template made purely of literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub prefix: String,
    pub key: Option<String>,
    pub suffix: String,
}

/// Split off leading literal text, including any color tags
fn take_literal(input: &str) -> (&str, &str) {
    let mut end = 0;
    loop {
        let rest = &input[end..];
        match rest.find('<') {
            None => return (input, ""),
            Some(0) => match COLOR_TAG.find(rest) {
                Some(tag) => end += tag.end(),
                None => return input.split_at(end),
            },
            Some(pos) => end += pos,
        }
    }
}

/// Parse a template, reporting where it is malformed
pub fn try_parse_template(template: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = template;

    while !rest.is_empty() {
        let offset = template.len() - rest.len();
        let (prefix, after_prefix) = take_literal(rest);
        if after_prefix.is_empty() {
            // Only reachable before the first placeholder; afterwards each
            // suffix swallows the literal text up to the next placeholder.
            segments.push(Segment {
                prefix: prefix.to_string(),
                key: None,
                suffix: String::new(),
            });
            break;
        }

        let open = offset + prefix.len();
        let inner = &after_prefix[1..];
        let close = inner.find('>').ok_or(TemplateError::Unterminated(open))?;
        if close == 0 {
            return Err(TemplateError::EmptyPlaceholder(open));
        }
        let key = &inner[..close];

        let (suffix, remaining) = take_literal(&inner[close + 1..]);
        segments.push(Segment {
            prefix: prefix.to_string(),
            key: Some(key.to_string()),
            suffix: suffix.to_string(),
        });
        rest = remaining;
    }

    Ok(segments)
}

/// Parse a template, treating a malformed one as empty
pub fn parse_template(template: &str) -> Vec<Segment> {
    match try_parse_template(template) {
        Ok(segments) => segments,
        Err(e) => {
            log::debug!("Ignoring malformed template {:?}: {}", template, e);
            Vec::new()
        }
    }
}

/// Concatenate segments, substituting each key from `values`
///
/// Keys missing from `values` render as `<KEY not found!>`.
pub fn combine(values: &HashMap<String, String>, segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str(&segment.prefix);
        if let Some(key) = &segment.key {
            match values.get(key) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('<');
                    out.push_str(key);
                    out.push_str(" not found!>");
                }
            }
        }
        out.push_str(&segment.suffix);
    }
    out
}

/// Render a configuration's template with values in `export` order
///
/// Extra values or extra export keys are ignored.
pub fn fill_template<S: AsRef<str>>(config: &MonitorConfig, values: &[S]) -> String {
    let map: HashMap<String, String> = config
        .export
        .iter()
        .zip(values)
        .map(|(key, value)| (key.clone(), value.as_ref().to_string()))
        .collect();
    combine(&map, &parse_template(&config.template))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn seg(prefix: &str, key: &str, suffix: &str) -> Segment {
        Segment {
            prefix: prefix.to_string(),
            key: Some(key.to_string()),
            suffix: suffix.to_string(),
        }
    }

    #[test]
    fn test_parse_placeholders() {
        let segments = try_parse_template("Cpu: <total>% <user>").unwrap();
        assert_eq!(segments, vec![seg("Cpu: ", "total", "% "), seg("", "user", "")]);
    }

    #[test]
    fn test_color_tags_pass_through() {
        let segments = try_parse_template("<fc=#FF0000,black>hot</fc> <temp>C").unwrap();
        assert_eq!(segments, vec![seg("<fc=#FF0000,black>hot</fc> ", "temp", "C")]);
    }

    #[test]
    fn test_invalid_color_tag_is_a_placeholder() {
        let segments = try_parse_template("<fc=dark red>x").unwrap();
        assert_eq!(segments, vec![seg("", "fc=dark red", "x")]);
    }

    #[test]
    fn test_empty_template() {
        assert!(try_parse_template("").unwrap().is_empty());
        assert_eq!(combine(&values(&[]), &parse_template("")), "");
    }

    #[test]
    fn test_literal_template_round_trips() {
        let m = values(&[("a", "1")]);
        for text in ["plain text", "100% > 50%", "<fc=red>warm</fc>", "a>b"] {
            assert_eq!(combine(&m, &parse_template(text)), text);
        }
    }

    #[test]
    fn test_malformed_templates_are_empty() {
        assert_eq!(try_parse_template("load <one"), Err(TemplateError::Unterminated(5)));
        assert_eq!(try_parse_template("a<>"), Err(TemplateError::EmptyPlaceholder(1)));
        assert!(parse_template("load <one").is_empty());
        assert_eq!(combine(&values(&[("one", "1")]), &parse_template("<x> <")), "");
    }

    #[test]
    fn test_combine_missing_key() {
        let out = combine(&values(&[("cpu", "3")]), &parse_template("<cpu> <mem>"));
        assert_eq!(out, "3 <mem not found!>");
    }

    #[test]
    fn test_combine_is_deterministic() {
        let m = values(&[("a", "x"), ("b", "y")]);
        let segments = parse_template("[<a>|<b>|<a>]");
        let first = combine(&m, &segments);
        assert_eq!(first, "[x|y|x]");
        assert_eq!(combine(&m, &segments), first);
    }

    #[test]
    fn test_fill_template_zips_export() {
        let config = MonitorConfig::new("CPU: <cpu>% <fc=#FF0000>hot</fc>", &["cpu"]);
        assert_eq!(fill_template(&config, &["42"]), "CPU: 42% <fc=#FF0000>hot</fc>");

        let config = MonitorConfig::new("<a> <b>", &["a", "b"]);
        assert_eq!(fill_template(&config, &["1"]), "1 <b not found!>");
        assert_eq!(fill_template(&config, &["1", "2", "3"]), "1 2");
    }

    #[test]
    fn test_multibyte_literals() {
        let segments = try_parse_template("°C <t>°").unwrap();
        assert_eq!(segments, vec![seg("°C ", "t", "°")]);
    }
}
