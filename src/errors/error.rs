//! Error types for the adaptation pipeline
//!
//! Provides:
//! - [`SyntaxError`] - a target-shaped parse failure (message + location)
//! - [`Error`] - every way a parse call can fail
//! - [`normalize`] - reshaping a source parser failure into a [`SyntaxError`]

use serde::Serialize;
use smol_str::SmolStr;
use text_size::TextSize;
use thiserror::Error;

use super::codes::FailureCategory;
use super::frame::code_frame;
use crate::base::{Position, SourceText};
use crate::raw::RawSyntaxError;
use crate::scope::ScopeError;

/// A syntax error in the target contract's shape
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct SyntaxError {
    /// Human-readable message, in target wording for known failures
    pub message: String,
    /// Where the failure occurred (1-indexed line, 0-indexed column)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Position>,
    /// Offset of the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<TextSize>,
    /// The matched failure category, if any
    #[serde(skip)]
    pub category: Option<FailureCategory>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            loc: None,
            index: None,
            category: None,
        }
    }

    /// Attach a location
    pub fn with_loc(mut self, loc: Position) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Attach an offset
    pub fn with_index(mut self, index: TextSize) -> Self {
        self.index = Some(index);
        self
    }

    /// 1-indexed line of the failure
    pub fn line_number(&self) -> Option<usize> {
        self.loc.map(|loc| loc.line)
    }

    /// 1-indexed column of the failure, as lint tooling reports it
    pub fn column(&self) -> Option<usize> {
        self.loc.map(|loc| loc.column + 1)
    }
}

/// Errors that can occur while adapting a parse.
#[derive(Debug, Error)]
pub enum Error {
    /// The program text is not valid under the enabled grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A raw node type reached the transformer with no registered rule.
    #[error("no conversion rule for `{kind}` at offset {offset}")]
    UnsupportedConstruct { kind: SmolStr, offset: u32 },

    /// The raw tree is missing data every source parser output carries.
    #[error("malformed raw tree: {0}")]
    MalformedTree(String),

    /// Serialized source parser output could not be decoded.
    #[error("invalid source parser output: {0}")]
    Json(#[from] serde_json::Error),

    /// The scope analyzer rejected the adapted tree.
    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl Error {
    /// Create a malformed tree error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTree(message.into())
    }

    /// Create an unsupported construct error.
    pub fn unsupported(kind: &str, offset: u32) -> Self {
        Self::UnsupportedConstruct {
            kind: SmolStr::new(kind),
            offset,
        }
    }

    /// Check if this is a syntax error in the program text
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }

    /// The syntax error, if this is one
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

/// Reshape a source parser failure into the target error shape.
///
/// Known failure categories get their fixed target message; anything else
/// keeps the source parser's message minus its trailing `(line:column)`.
/// With `with_frame`, the message is prefixed by its line number and
/// followed by a code frame.
pub fn normalize(raw: &RawSyntaxError, source: &SourceText<'_>, with_frame: bool) -> SyntaxError {
    let category = FailureCategory::classify(raw);
    let message = match category {
        Some(category) => category.message().to_string(),
        None => strip_position_suffix(&raw.message).to_string(),
    };

    let index = raw
        .pos
        .map(TextSize::new)
        .or_else(|| raw.loc.and_then(|point| source.offset(point.into())));
    let loc = raw
        .loc
        .map(Position::from)
        .or_else(|| index.map(|offset| source.position(offset)));

    let message = match (with_frame, loc) {
        (true, Some(loc)) => format!(
            "Line {}: {}\n\n{}",
            loc.line,
            message,
            code_frame(source.as_str(), loc)
        ),
        _ => message,
    };

    tracing::debug!(
        category = category.map(|c| c.as_str()),
        "normalized source parser failure: {}",
        raw.message
    );

    SyntaxError {
        message,
        loc,
        index,
        category,
    }
}

/// Remove a trailing ` (line:column)` from a message.
fn strip_position_suffix(message: &str) -> &str {
    let Some(open) = message.rfind(" (") else {
        return message;
    };
    let Some(inner) = message[open + 2..].strip_suffix(')') else {
        return message;
    };
    let is_position = inner
        .split_once(':')
        .is_some_and(|(line, column)| {
            !line.is_empty()
                && !column.is_empty()
                && line.bytes().all(|b| b.is_ascii_digit())
                && column.bytes().all(|b| b.is_ascii_digit())
        });
    if is_position {
        &message[..open]
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawPoint;

    fn raw(message: &str) -> RawSyntaxError {
        RawSyntaxError {
            message: message.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_strip_position_suffix() {
        assert_eq!(strip_position_suffix("Unexpected token (1:5)"), "Unexpected token");
        assert_eq!(strip_position_suffix("Unexpected token"), "Unexpected token");
        assert_eq!(strip_position_suffix("Missing (thing)"), "Missing (thing)");
        assert_eq!(strip_position_suffix("Odd (1:)"), "Odd (1:)");
    }

    #[test]
    fn test_normalize_known_category() {
        let source = SourceText::new("function F() { super(); }");
        let mut err = raw("super is only allowed in object methods and classes (1:15)");
        err.loc = Some(RawPoint { line: 1, column: 15 });
        err.pos = Some(15);

        let normalized = normalize(&err, &source, false);
        assert_eq!(normalized.message, "'super' keyword outside a method");
        assert_eq!(normalized.loc, Some(Position::new(1, 15)));
        assert_eq!(normalized.index, Some(TextSize::new(15)));
        assert_eq!(normalized.column(), Some(16));
        assert_eq!(normalized.category, Some(FailureCategory::SuperOutsideMethod));
    }

    #[test]
    fn test_normalize_unknown_passes_message_through() {
        let source = SourceText::new("var = 1;");
        let mut err = raw("Unexpected token (1:4)");
        err.pos = Some(4);

        let normalized = normalize(&err, &source, false);
        assert_eq!(normalized.message, "Unexpected token");
        assert_eq!(normalized.loc, Some(Position::new(1, 4)));
        assert!(normalized.category.is_none());
    }

    #[test]
    fn test_normalize_without_location() {
        let source = SourceText::new("");
        let normalized = normalize(&raw("Something broke"), &source, true);
        assert_eq!(normalized.message, "Something broke");
        assert!(normalized.loc.is_none());
    }

    #[test]
    fn test_normalize_with_code_frame() {
        let source = SourceText::new("function F() {\n  super();\n}");
        let mut err = raw("x");
        err.reason_code = Some("SuperNotAllowed".to_string());
        err.loc = Some(RawPoint { line: 2, column: 2 });

        let normalized = normalize(&err, &source, true);
        assert!(normalized.message.starts_with("Line 2: 'super' keyword outside a method\n\n"));
        assert!(normalized.message.contains("> 2 |   super();"));
        assert_eq!(normalized.index, Some(TextSize::new(17)));
    }

    #[test]
    fn test_error_helpers() {
        let err = Error::unsupported("Decorator", 3);
        assert!(!err.is_syntax());
        assert_eq!(err.to_string(), "no conversion rule for `Decorator` at offset 3");

        let err: Error = SyntaxError::new("boom").into();
        assert!(err.is_syntax());
        assert_eq!(err.as_syntax().map(|e| e.message.as_str()), Some("boom"));
    }
}
