//! Foundation types for the adapter.
//!
//! This module provides the positional primitives shared by nodes, tokens
//! and comments:
//! - [`TextRange`], [`TextSize`] - Offset pairs (UTF-16 code units)
//! - [`Position`], [`SourceLocation`] - Line/column positions (`loc`)
//! - [`LineIndex`], [`SourceText`] - Offset ⇄ line/column conversion
//!
//! This module has NO dependencies on other modules of the crate.

mod position;
mod source;

pub use position::{Position, SourceLocation};
pub use source::{LineIndex, SourceText, is_identifier_name, is_line_terminator};

// Re-export text-size types for convenience
pub use text_size::{self, TextRange, TextSize};
