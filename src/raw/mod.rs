//! Raw source parser output
//!
//! The source parser hands back a tree, a flat token list and a comment
//! list in its own dialect. This module only reads that output; the
//! `convert`, `tokens` and `comments` modules reshape it.

mod node;
mod output;

pub use node::RawNode;
pub use output::{
    RawLoc, RawParse, RawPoint, RawPositions, RawSyntaxError, RawToken, RawTokenKind,
    RawTokenType,
};
