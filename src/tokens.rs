//! Token synthesis
//!
//! Rewrites the source parser's token list into the target token
//! vocabulary. Most tokens map one to one; template literals and private
//! names do not:
//!
//! ```text
//! source:  `   template   ${   name   }   template   `
//! target:  Template("`a${")   Identifier   Template("}b`")
//!
//! source:  privateName(#x)
//! target:  Punctuator("#")  Identifier("x")
//! ```

use serde_json::Value;
use text_size::{TextRange, TextSize};

use crate::base::is_identifier_name;
use crate::errors::Error;
use crate::estree::{Token, TokenKind};
use crate::positions::Locator;
use crate::raw::{RawToken, RawTokenKind, RawTokenType};

/// Identifier-like words the target always reports as keywords
const CONTEXTUAL_KEYWORDS: &[&str] = &["let", "static", "yield"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
    Block,
    Interpolation,
}

/// Convert a raw token list into target tokens.
pub fn convert_tokens(locator: Locator<'_>, raw: &[RawToken]) -> Result<Vec<Token>, Error> {
    let mut synthesizer = Synthesizer::new(locator);
    for token in raw {
        synthesizer.push(token)?;
    }
    synthesizer.finish()
}

struct Synthesizer<'a> {
    locator: Locator<'a>,
    tokens: Vec<Token>,
    /// Open `{`-like braces, so a `}` can tell whether it resumes a template
    braces: Vec<Brace>,
    /// Start of the template piece being merged, if inside one
    piece_start: Option<TextSize>,
}

impl<'a> Synthesizer<'a> {
    fn new(locator: Locator<'a>) -> Self {
        Self {
            locator,
            tokens: Vec::new(),
            braces: Vec::new(),
            piece_start: None,
        }
    }

    fn push(&mut self, token: &RawToken) -> Result<(), Error> {
        let RawTokenKind::Type(ty) = &token.kind else {
            return Ok(());
        };
        let label = ty.label.as_str();
        if label == "eof" {
            return Ok(());
        }
        let range = self.locator.span(&token.positions)?;

        match label {
            // =================================================================
            // Template pieces
            // =================================================================
            "`" => match self.piece_start.take() {
                Some(start) => self.template(TextRange::new(start, range.end()))?,
                None => self.piece_start = Some(range.start()),
            },
            "template" => {
                if self.piece_start.is_none() {
                    self.piece_start = Some(range.start());
                }
            }
            "${" => {
                let start = self.piece_start.take().unwrap_or(range.start());
                self.template(TextRange::new(start, range.end()))?;
                self.braces.push(Brace::Interpolation);
            }
            "templateNonTail" | "templateTail" => {
                if self.locator.source().char_at(range.start()) == Some('}') {
                    self.braces.pop();
                }
                self.template(range)?;
                if label == "templateNonTail" {
                    self.braces.push(Brace::Interpolation);
                }
            }

            // =================================================================
            // Braces
            // =================================================================
            "{" | "{|" | "#{" => {
                self.braces.push(Brace::Block);
                self.emit(TokenKind::Punctuator, punctuator_value(token, ty), range);
            }
            "}" | "|}" => match self.braces.pop() {
                Some(Brace::Interpolation) => self.piece_start = Some(range.start()),
                _ => self.emit(TokenKind::Punctuator, punctuator_value(token, ty), range),
            },

            _ => self.convert(token, ty, range)?,
        }
        Ok(())
    }

    fn convert(&mut self, token: &RawToken, ty: &RawTokenType, range: TextRange) -> Result<(), Error> {
        let label = ty.label.as_str();
        match label {
            "name" => {
                let value = self.value_or_slice(token, range)?;
                let kind = if CONTEXTUAL_KEYWORDS.contains(&value.as_str()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                self.emit(kind, value, range);
            }
            "privateName" | "#name" => {
                let hash_end = range.start() + TextSize::of('#');
                if hash_end > range.end() {
                    return Err(Error::malformed("private name token without `#`"));
                }
                let name = match token.value_str() {
                    Some(name) => name.to_string(),
                    None => self.slice(TextRange::new(hash_end, range.end()))?,
                };
                if !is_identifier_name(&name) {
                    return Err(Error::malformed(format!("invalid private name `#{name}`")));
                }
                self.emit(TokenKind::Punctuator, "#", TextRange::new(range.start(), hash_end));
                self.emit(TokenKind::Identifier, name, TextRange::new(hash_end, range.end()));
            }
            "jsxName" => {
                let value = self.value_or_slice(token, range)?;
                self.emit(TokenKind::JsxIdentifier, value, range);
            }
            "jsxText" => {
                let value = self.slice(range)?;
                self.emit(TokenKind::JsxText, value, range);
            }
            "jsxTagStart" => self.emit(TokenKind::Punctuator, "<", range),
            "jsxTagEnd" => self.emit(TokenKind::Punctuator, ">", range),
            // Numeric token values are the source text, separators included
            "num" | "decimal" | "bigint" => {
                let value = self.slice(range)?;
                self.emit(TokenKind::Numeric, value, range);
            }
            "string" => {
                let value = self.slice(range)?;
                self.emit(TokenKind::String, value, range);
            }
            "regexp" => {
                let pattern = token
                    .value
                    .get("pattern")
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::malformed("`regexp` token without a pattern"))?;
                let flags = token.value.get("flags").and_then(Value::as_str).unwrap_or_default();
                let token = Token::new(
                    TokenKind::RegularExpression,
                    format!("/{pattern}/{flags}"),
                    range,
                    self.locator.locate(range),
                )
                .with_regex(pattern, flags);
                self.tokens.push(token);
            }
            _ => match ty.keyword.as_deref() {
                Some("null") => self.emit(TokenKind::Null, "null", range),
                Some(word @ ("true" | "false")) => self.emit(TokenKind::Boolean, word, range),
                Some(word) => self.emit(TokenKind::Keyword, word, range),
                None => {
                    if !(ty.is_assign || is_punctuation(label)) {
                        tracing::warn!(
                            label,
                            offset = u32::from(range.start()),
                            "unknown token type, emitting as punctuator"
                        );
                    }
                    self.emit(TokenKind::Punctuator, punctuator_value(token, ty), range);
                }
            },
        }
        Ok(())
    }

    fn template(&mut self, range: TextRange) -> Result<(), Error> {
        let value = self.slice(range)?;
        self.emit(TokenKind::Template, value, range);
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind, value: impl Into<String>, range: TextRange) {
        self.tokens
            .push(Token::new(kind, value, range, self.locator.locate(range)));
    }

    fn slice(&self, range: TextRange) -> Result<String, Error> {
        self.locator
            .slice(range)
            .map(str::to_string)
            .ok_or_else(|| Error::malformed(format!("token range {range:?} is outside the program text")))
    }

    fn value_or_slice(&self, token: &RawToken, range: TextRange) -> Result<String, Error> {
        match token.value_str() {
            Some(value) => Ok(value.to_string()),
            None => self.slice(range),
        }
    }

    fn finish(self) -> Result<Vec<Token>, Error> {
        if let Some(start) = self.piece_start {
            return Err(Error::malformed(format!(
                "template starting at {} never closes in the token list",
                u32::from(start)
            )));
        }
        Ok(self.tokens)
    }
}

/// Operator tokens carry their text as `value`; structural ones only have
/// a label
fn punctuator_value(token: &RawToken, ty: &RawTokenType) -> String {
    token.value_str().unwrap_or(&ty.label).to_string()
}

fn is_punctuation(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SourceText;
    use serde_json::json;

    fn tok(ty: RawTokenType, value: Value, start: u32, end: u32) -> RawToken {
        RawToken::new(ty, value, start, end)
    }

    fn label(l: &str, start: u32, end: u32) -> RawToken {
        tok(RawTokenType::label(l), Value::Null, start, end)
    }

    fn summary(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.value.as_str())).collect()
    }

    #[test]
    fn test_nested_templates_merge() {
        let text = "`${ { a:`${2}` } }`";
        let source = SourceText::new(text);
        let raw = vec![
            label("`", 0, 1),
            tok(RawTokenType::label("template"), json!(""), 1, 1),
            label("${", 1, 3),
            label("{", 4, 5),
            tok(RawTokenType::label("name"), json!("a"), 6, 7),
            label(":", 7, 8),
            label("`", 8, 9),
            tok(RawTokenType::label("template"), json!(""), 9, 9),
            label("${", 9, 11),
            tok(RawTokenType::label("num"), json!(2), 11, 12),
            label("}", 12, 13),
            tok(RawTokenType::label("template"), json!(""), 13, 13),
            label("`", 13, 14),
            label("}", 15, 16),
            label("}", 17, 18),
            tok(RawTokenType::label("template"), json!(""), 18, 18),
            label("`", 18, 19),
            label("eof", 19, 19),
        ];
        let tokens = convert_tokens(Locator::new(&source), &raw).unwrap();
        assert_eq!(
            summary(&tokens),
            [
                (TokenKind::Template, "`${"),
                (TokenKind::Punctuator, "{"),
                (TokenKind::Identifier, "a"),
                (TokenKind::Punctuator, ":"),
                (TokenKind::Template, "`${"),
                (TokenKind::Numeric, "2"),
                (TokenKind::Template, "}`"),
                (TokenKind::Punctuator, "}"),
                (TokenKind::Template, "}`"),
            ]
        );
        assert_eq!(tokens[8].range, TextRange::new(17.into(), 19.into()));
    }

    #[test]
    fn test_template_tail_tokens() {
        let text = "`a${b}c`";
        let source = SourceText::new(text);
        let raw = vec![
            tok(RawTokenType::label("templateNonTail"), json!("a"), 0, 4),
            tok(RawTokenType::label("name"), json!("b"), 4, 5),
            tok(RawTokenType::label("templateTail"), json!("c"), 5, 8),
        ];
        let tokens = convert_tokens(Locator::new(&source), &raw).unwrap();
        assert_eq!(
            summary(&tokens),
            [
                (TokenKind::Template, "`a${"),
                (TokenKind::Identifier, "b"),
                (TokenKind::Template, "}c`"),
            ]
        );
    }

    #[test]
    fn test_private_name_splits() {
        let text = "class A { #x }";
        let source = SourceText::new(text);
        let raw = vec![
            tok(RawTokenType::keyword("class"), json!("class"), 0, 5),
            tok(RawTokenType::label("name"), json!("A"), 6, 7),
            label("{", 8, 9),
            tok(RawTokenType::label("privateName"), json!("x"), 10, 12),
            label("}", 13, 14),
        ];
        let tokens = convert_tokens(Locator::new(&source), &raw).unwrap();
        assert_eq!(
            summary(&tokens),
            [
                (TokenKind::Keyword, "class"),
                (TokenKind::Identifier, "A"),
                (TokenKind::Punctuator, "{"),
                (TokenKind::Punctuator, "#"),
                (TokenKind::Identifier, "x"),
                (TokenKind::Punctuator, "}"),
            ]
        );
        assert_eq!(tokens[3].range, TextRange::new(10.into(), 11.into()));
        assert_eq!(tokens[4].range, TextRange::new(11.into(), 12.into()));
    }

    #[test]
    fn test_comment_entries_and_eof_are_dropped() {
        let text = "a // b";
        let source = SourceText::new(text);
        let comment: RawToken = serde_json::from_value(json!({
            "type": "CommentLine", "value": " b", "start": 2, "end": 6
        }))
        .unwrap();
        let raw = vec![
            tok(RawTokenType::label("name"), json!("a"), 0, 1),
            comment,
            label("eof", 6, 6),
        ];
        let tokens = convert_tokens(Locator::new(&source), &raw).unwrap();
        assert_eq!(summary(&tokens), [(TokenKind::Identifier, "a")]);
    }

    #[test]
    fn test_regexp_token() {
        let text = "/a+/g";
        let source = SourceText::new(text);
        let raw = vec![tok(
            RawTokenType::label("regexp"),
            json!({"pattern": "a+", "flags": "g"}),
            0,
            5,
        )];
        let tokens = convert_tokens(Locator::new(&source), &raw).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::RegularExpression);
        assert_eq!(tokens[0].value, "/a+/g");
        assert_eq!(tokens[0].regex.as_ref().map(|r| r.flags.as_str()), Some("g"));
    }

    #[test]
    fn test_regexp_token_without_pattern_is_malformed() {
        let source = SourceText::new("/a/");
        let raw = vec![tok(RawTokenType::label("regexp"), json!({"flags": ""}), 0, 3)];
        let err = convert_tokens(Locator::new(&source), &raw).unwrap_err();
        assert!(matches!(err, Error::MalformedTree(_)));
    }

    #[test]
    fn test_bigint_token_keeps_separators() {
        let source = SourceText::new("1_000n");
        let raw = vec![tok(RawTokenType::label("bigint"), json!("1000"), 0, 6)];
        let tokens = convert_tokens(Locator::new(&source), &raw).unwrap();
        assert_eq!(summary(&tokens), [(TokenKind::Numeric, "1_000n")]);
    }

    #[test]
    fn test_unterminated_template_is_malformed() {
        let source = SourceText::new("`a");
        let raw = vec![label("`", 0, 1)];
        assert!(convert_tokens(Locator::new(&source), &raw).is_err());
    }
}
