//! # estree-bridge
//!
//! Adapts a Babel-style source parser's output (tree, tokens, comments)
//! into the ESTree shape ESLint-style tooling consumes.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! batch      → Parallel adaptation of many programs
//!   ↓
//! assemble   → ParseResult, Program span fix-ups, visitor keys, scope
//!   ↓
//! scope      → ScopeAnalyzer seam and the built-in BindingAnalyzer
//!   ↓
//! convert    → Rule table: raw node type → target node
//! tokens     → Token synthesis (template merging, private names)
//! comments   → Comment collection and reshaping
//!   ↓
//! invoke     → Options, the SourceParser seam, error normalization
//!   ↓
//! estree     → Target nodes, tokens, comments, visitor keys
//! raw        → Views over source parser output
//! positions  → Offset range and loc computation
//! errors     → Error, SyntaxError, failure categories, code frames
//!   ↓
//! base       → Primitives (SourceText, LineIndex, TextRange)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use estree_bridge::{JsonSourceParser, ParseOptions, parse_for_lint};
//!
//! let parser = JsonSourceParser::new().with_output("a;", recorded_json);
//! let result = parse_for_lint(&parser, "a;", &ParseOptions::default())?;
//! println!("{}", result.to_json());
//! ```

// ============================================================================
// MODULES (dependency order: base → errors → raw/estree → invoke → convert → assemble)
// ============================================================================

/// Foundation types: SourceText, LineIndex, Position, TextRange
pub mod base;

/// Error types and source parser failure normalization
pub mod errors;

/// Source parser output: raw nodes, tokens, syntax errors
pub mod raw;

/// Offset range and loc computation shared by every entity
pub mod positions;

/// Target dialect: nodes, tokens, comments, visitor keys
pub mod estree;

/// Parse options and the source parser seam
pub mod invoke;

/// Node conversion rules
pub mod convert;

/// Token synthesis
pub mod tokens;

/// Comment collection
pub mod comments;

/// Scope analysis
pub mod scope;

/// Result assembly
pub mod assemble;

/// Parallel batch parsing
pub mod batch;

// Re-export the public surface
pub use assemble::ParseResult;
pub use base::{Position, SourceLocation, SourceText, TextRange, TextSize};
pub use batch::parse_batch;
pub use errors::{Error, SyntaxError};
pub use estree::{Comment, CommentKind, Field, Node, Token, TokenKind, VisitorKeys};
pub use invoke::{
    JsonSourceParser, NormalizedOptions, ParseOptions, PluginSpec, SourceParser,
    SourceParserOptions, SourceType,
};
pub use raw::{RawParse, RawSyntaxError};
pub use scope::{BindingAnalyzer, ScopeAnalyzer, ScopeError, ScopeManager, ScopeOptions};

use errors::normalize;
use positions::Locator;

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parse `text` and adapt the result, with the built-in scope analyzer.
pub fn parse_for_lint<P: SourceParser + ?Sized>(
    parser: &P,
    text: &str,
    options: &ParseOptions,
) -> Result<ParseResult, Error> {
    parse_for_lint_with(parser, text, options, &BindingAnalyzer)
}

/// Parse `text` and adapt the result, with a caller-provided scope analyzer.
pub fn parse_for_lint_with<P, A>(
    parser: &P,
    text: &str,
    options: &ParseOptions,
    analyzer: &A,
) -> Result<ParseResult<A::Output>, Error>
where
    P: SourceParser + ?Sized,
    A: ScopeAnalyzer + ?Sized,
{
    let source = SourceText::new(text);
    let raw = invoke::invoke(parser, &source, options)?;
    adapt(&source, &raw, options, analyzer)
}

/// Tree, tokens and comments only; no visitor keys and no scope analysis.
pub fn parse<P: SourceParser + ?Sized>(
    parser: &P,
    text: &str,
    options: &ParseOptions,
) -> Result<ParseResult, Error> {
    let options = ParseOptions {
        request_scope_manager: false,
        request_visitor_keys: false,
        ..options.clone()
    };
    parse_for_lint(parser, text, &options)
}

/// Adapt an already-serialized source parser output for `text`.
///
/// `raw_json` is a `File`, a bare `Program`, or an `{"error": ...}` object.
pub fn from_raw_json(text: &str, raw_json: &str, options: &ParseOptions) -> Result<ParseResult, Error> {
    let source = SourceText::new(text);
    let raw = RawParse::from_json(raw_json)?
        .map_err(|err| Error::Syntax(normalize(&err, &source, options.code_frame)))?;
    adapt(&source, &raw, options, &BindingAnalyzer)
}

/// Convert one successful raw parse
fn adapt<A: ScopeAnalyzer + ?Sized>(
    source: &SourceText<'_>,
    raw: &RawParse,
    options: &ParseOptions,
    analyzer: &A,
) -> Result<ParseResult<A::Output>, Error> {
    let locator = Locator::new(source);
    let (ast, observed) = convert::convert_program(locator, &raw.program, options.source_type())?;
    let tokens = tokens::convert_tokens(locator, &raw.tokens)?;
    let comments = comments::collect_comments(locator, &raw.comments, observed)?;
    tracing::debug!(
        tokens = tokens.len(),
        comments = comments.len(),
        "adapted program"
    );
    assemble::assemble(ast, tokens, comments, locator, options, analyzer)
}
