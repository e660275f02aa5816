//! Metadata for the keys a monitor exports to its template

use serde::{Deserialize, Serialize};

/// Kind of value rendered for an export key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Percentage, rendered with a trailing `%`
    Percentage,
    /// Plain number (e.g. megabytes, load)
    Numerical,
    /// Free text or a pre-rendered bar
    Text,
}

/// Describes one `<key>` a monitor can fill in its template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportField {
    /// Key as written between angle brackets in a template
    pub key: String,
    /// Human-readable description
    pub description: String,
    pub kind: FieldKind,
}

impl ExportField {
    pub fn new(key: impl Into<String>, description: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            kind,
        }
    }

    /// Placeholder text for this key, e.g. `<total>`
    pub fn placeholder(&self) -> String {
        format!("<{}>", self.key)
    }
}
