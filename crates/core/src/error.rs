//! Error types for option parsing and template parsing.

use thiserror::Error;

/// Errors raised while applying monitor options.
///
/// The `Display` text is what a status bar shows when a monitor's argument
/// list cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// Flag not present in the option table.
    #[error("unrecognized option `{0}'")]
    Unrecognized(String),

    /// Flag given as the last token with no argument after it.
    #[error("option `{option}' requires an argument {arg}")]
    MissingArgument { option: String, arg: &'static str },

    /// Numeric argument that does not parse as an integer.
    #[error("option `{option}' expects a number, got `{value}'")]
    InvalidNumber { option: String, value: String },

    /// Alignment other than `l` or `r`.
    #[error("option `{option}' expects `l' or `r', got `{value}'")]
    InvalidAlignment { option: String, value: String },
}

/// Errors found by the strict template parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `<` with no closing `>`.
    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),

    /// A `<>` with nothing inside.
    #[error("empty placeholder at byte {0}")]
    EmptyPlaceholder(usize),
}
