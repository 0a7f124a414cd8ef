//! Scope analysis over the adapted tree
//!
//! Lint tooling consumes a scope manager alongside the tree. The analyzer
//! is a seam: [`ScopeAnalyzer`] takes the finished `Program` and the
//! options derived from the parse call. [`BindingAnalyzer`] is the
//! built-in implementation producing a [`ScopeManager`].

mod analyzer;
mod manager;

pub use analyzer::BindingAnalyzer;
pub use manager::{
    Definition, DefinitionKind, Reference, ReferenceFlag, ReferenceId, Scope, ScopeId, ScopeKind,
    ScopeManager, Variable,
};

use smol_str::SmolStr;
use thiserror::Error;

use crate::estree::{Node, VisitorKeys};
use crate::invoke::{ParseOptions, SourceType};

/// Errors raised while analyzing scopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// A node type has no visitor keys and fallback iteration is off.
    #[error("no visitor keys for `{kind}`")]
    UnknownNodeType { kind: SmolStr },

    /// The tree handed to the analyzer is not a program.
    #[error("invalid tree for scope analysis: {0}")]
    InvalidTree(String),
}

impl ScopeError {
    pub fn unknown(kind: &str) -> Self {
        Self::UnknownNodeType {
            kind: SmolStr::new(kind),
        }
    }
}

/// How node types missing from the visitor keys are traversed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Walk every node-bearing field
    #[default]
    Iteration,
    /// Fail with [`ScopeError::UnknownNodeType`]
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeOptions {
    /// `None` means the built-in ESTree keys
    pub visitor_keys: Option<VisitorKeys>,
    /// Treat direct `eval` calls as ordinary calls
    pub ignore_eval: bool,
    /// Wrap the program in a function scope, as CommonJS modules are
    pub nodejs_scope: bool,
    pub implied_strict: bool,
    pub source_type: SourceType,
    pub ecma_version: u32,
    pub fallback: Fallback,
}

impl Default for ScopeOptions {
    fn default() -> Self {
        Self {
            visitor_keys: None,
            ignore_eval: false,
            nodejs_scope: false,
            implied_strict: false,
            source_type: SourceType::Script,
            ecma_version: 5,
            fallback: Fallback::Iteration,
        }
    }
}

impl ScopeOptions {
    /// The options lint tooling uses for an adapted parse
    pub fn from_parse_options(options: &ParseOptions) -> Self {
        let parser = &options.source_parser_options;
        Self {
            visitor_keys: Some(VisitorKeys::estree()),
            ignore_eval: true,
            nodejs_scope: parser.global_return && !parser.source_type.is_module(),
            implied_strict: parser.strict.unwrap_or(false),
            source_type: parser.source_type,
            ecma_version: options.ecma_version,
            fallback: Fallback::Iteration,
        }
    }

    /// Block-level scopes exist from ES2015 on
    pub fn is_es6(&self) -> bool {
        self.ecma_version >= 6
    }
}

/// Produces scope information for an adapted `Program`
pub trait ScopeAnalyzer {
    type Output;

    fn analyze(&self, program: &Node, options: &ScopeOptions) -> Result<Self::Output, ScopeError>;

    /// Analyze with [`ScopeOptions::default`]
    fn analyze_default(&self, program: &Node) -> Result<Self::Output, ScopeError> {
        self.analyze(program, &ScopeOptions::default())
    }
}
