//! The target dialect
//!
//! Nodes, tokens and comments in the shape ESLint-style consumers expect:
//! every entity carries a `range` offset pair and a `loc` line/column span.

mod node;
mod token;
mod visitor_keys;

pub use node::{Field, Node};
pub use token::{Comment, CommentKind, RegexInfo, Token, TokenKind};
pub use visitor_keys::VisitorKeys;

use serde::Serializer;
use text_size::TextRange;

/// `range` as a `[start, end]` pair
pub(crate) fn range_pair(range: TextRange) -> [u32; 2] {
    [range.start().into(), range.end().into()]
}

fn serialize_range<S: Serializer>(range: &TextRange, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(range_pair(*range))
}
