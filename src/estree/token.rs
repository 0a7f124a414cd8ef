//! Target tokens and comments.

use serde::Serialize;
use text_size::TextRange;

use crate::base::SourceLocation;

/// Token categories of the target contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Boolean,
    Null,
    Identifier,
    Keyword,
    Punctuator,
    #[serde(rename = "JSXIdentifier")]
    JsxIdentifier,
    #[serde(rename = "JSXText")]
    JsxText,
    Numeric,
    String,
    RegularExpression,
    Template,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Null => "Null",
            Self::Identifier => "Identifier",
            Self::Keyword => "Keyword",
            Self::Punctuator => "Punctuator",
            Self::JsxIdentifier => "JSXIdentifier",
            Self::JsxText => "JSXText",
            Self::Numeric => "Numeric",
            Self::String => "String",
            Self::RegularExpression => "RegularExpression",
            Self::Template => "Template",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegexInfo {
    pub pattern: String,
    pub flags: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
    #[serde(serialize_with = "super::serialize_range")]
    pub range: TextRange,
    pub loc: SourceLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegexInfo>,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        value: impl Into<String>,
        range: TextRange,
        loc: SourceLocation,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            range,
            loc,
            regex: None,
        }
    }

    pub fn with_regex(mut self, pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        self.regex = Some(RegexInfo {
            pattern: pattern.into(),
            flags: flags.into(),
        });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    pub value: String,
    #[serde(serialize_with = "super::serialize_range")]
    pub range: TextRange,
    pub loc: SourceLocation,
}
