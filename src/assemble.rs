//! Result assembly
//!
//! Puts the converted `Program`, its tokens and its comments together,
//! applies the Program span fix-ups lint tooling expects, and attaches the
//! visitor keys and scope manager when requested.

use serde_json::{Map, Value};
use text_size::TextRange;

use crate::errors::Error;
use crate::estree::{Comment, Node, Token, VisitorKeys};
use crate::invoke::ParseOptions;
use crate::positions::Locator;
use crate::scope::{ScopeAnalyzer, ScopeManager, ScopeOptions};

/// The adapted parse of one program
#[derive(Debug, Clone)]
pub struct ParseResult<S = ScopeManager> {
    /// The `Program` node
    pub ast: Node,
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
    pub visitor_keys: Option<VisitorKeys>,
    pub scope_manager: Option<S>,
}

impl<S> ParseResult<S> {
    /// A result with neither visitor keys nor scope manager
    pub fn new(ast: Node, tokens: Vec<Token>, comments: Vec<Comment>) -> Self {
        Self {
            ast,
            tokens,
            comments,
            visitor_keys: None,
            scope_manager: None,
        }
    }

    /// Lint-tooling serialization: the `Program` with `tokens` and
    /// `comments` embedded, plus `visitorKeys` when present
    pub fn to_json(&self) -> Value {
        let mut ast = self.ast.to_json();
        if let Value::Object(program) = &mut ast {
            program.insert("tokens".to_string(), to_value(&self.tokens));
            program.insert("comments".to_string(), to_value(&self.comments));
        }

        let mut result = Map::new();
        result.insert("ast".to_string(), ast);
        if let Some(keys) = &self.visitor_keys {
            result.insert("visitorKeys".to_string(), to_value(keys));
        }
        Value::Object(result)
    }

    /// Replace the scope manager, keeping everything else
    pub fn map_scope<T>(self, f: impl FnOnce(Option<S>) -> Option<T>) -> ParseResult<T> {
        ParseResult {
            ast: self.ast,
            tokens: self.tokens,
            comments: self.comments,
            visitor_keys: self.visitor_keys,
            scope_manager: f(self.scope_manager),
        }
    }
}

fn to_value(value: &impl serde::Serialize) -> Value {
    // Every map key in the output model is a string.
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Adjust the `Program` range to what lint tooling reports.
///
/// - A non-empty body starts the Program at its first statement.
/// - With comments but no tokens, the Program starts after the last comment.
/// - A comment after the last token does not extend the Program.
pub fn fix_program_span(program: &mut Node, tokens: &[Token], comments: &[Comment], locator: Locator<'_>) {
    let mut start = program.range.start();
    let mut end = program.range.end();

    if let Some(first) = program.children("body").next() {
        start = first.range.start();
    } else if tokens.is_empty() {
        if let Some(last) = comments.last() {
            start = last.range.end();
        }
    }

    if let (Some(last_token), Some(last_comment)) = (tokens.last(), comments.last()) {
        if last_comment.range.end() > last_token.range.end() {
            end = last_token.range.end();
        }
    }

    let range = TextRange::new(start, end.max(start));
    if range != program.range {
        tracing::trace!(
            from = ?program.range,
            to = ?range,
            "adjusted program span"
        );
    }
    program.range = range;
    program.loc = locator.locate(range);
}

/// Build the final result, running `analyzer` when a scope manager is
/// requested.
pub fn assemble<A: ScopeAnalyzer + ?Sized>(
    mut ast: Node,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    locator: Locator<'_>,
    options: &ParseOptions,
    analyzer: &A,
) -> Result<ParseResult<A::Output>, Error> {
    fix_program_span(&mut ast, &tokens, &comments, locator);

    let mut result = ParseResult::new(ast, tokens, comments);
    if options.request_visitor_keys {
        result.visitor_keys = Some(VisitorKeys::estree());
    }
    if options.request_scope_manager {
        let scope_options = ScopeOptions::from_parse_options(options);
        result.scope_manager = Some(analyzer.analyze(&result.ast, &scope_options)?);
    }
    Ok(result)
}
