//! Builders for recorded source parser output.
//!
//! Offsets are written out by hand next to the program text in each test;
//! these helpers only cut down on JSON noise.

use estree_bridge::{Error, JsonSourceParser, ParseOptions, ParseResult, from_raw_json, parse_for_lint};
use serde_json::{Value, json};

/// Merge `fields` into a node of `kind` spanning `start..end`
pub fn node(kind: &str, start: u32, end: u32, fields: Value) -> Value {
    let mut node = json!({"type": kind, "start": start, "end": end});
    if let (Some(node), Value::Object(fields)) = (node.as_object_mut(), fields) {
        node.extend(fields);
    }
    node
}

pub fn ident(name: &str, start: u32) -> Value {
    node("Identifier", start, start + name.len() as u32, json!({"name": name}))
}

/// A double-quoted string literal
pub fn string(value: &str, start: u32) -> Value {
    let raw = format!("\"{value}\"");
    let end = start + raw.len() as u32;
    node(
        "StringLiteral",
        start,
        end,
        json!({"value": value, "extra": {"raw": raw, "rawValue": value}}),
    )
}

pub fn number(raw: &str, value: f64, start: u32) -> Value {
    node(
        "NumericLiteral",
        start,
        start + raw.len() as u32,
        json!({"value": value, "extra": {"raw": raw, "rawValue": value}}),
    )
}

pub fn statement(expression: Value, start: u32, end: u32) -> Value {
    node("ExpressionStatement", start, end, json!({"expression": expression}))
}

pub fn program(body: Vec<Value>, end: u32, source_type: &str) -> Value {
    node(
        "Program",
        0,
        end,
        json!({"body": body, "directives": [], "sourceType": source_type}),
    )
}

/// A `File` wrapper as the source parser returns it
pub fn file(program: Value, tokens: Vec<Value>, comments: Vec<Value>) -> Value {
    let end = program["end"].clone();
    json!({
        "type": "File", "start": 0, "end": end,
        "program": program, "tokens": tokens, "comments": comments
    })
}

// ============================================================================
// TOKENS
// ============================================================================

pub fn tok(label: &str, value: Value, start: u32, end: u32) -> Value {
    json!({"type": {"label": label}, "value": value, "start": start, "end": end})
}

/// A punctuation token whose label is its text
pub fn punct(text: &str, start: u32) -> Value {
    json!({"type": {"label": text}, "start": start, "end": start + text.len() as u32})
}

pub fn name(value: &str, start: u32) -> Value {
    tok("name", json!(value), start, start + value.len() as u32)
}

pub fn keyword(word: &str, start: u32) -> Value {
    json!({"type": {"label": word, "keyword": word}, "value": word,
        "start": start, "end": start + word.len() as u32})
}

pub fn string_token(value: &str, start: u32) -> Value {
    tok("string", json!(value), start, start + value.len() as u32 + 2)
}

pub fn eof(at: u32) -> Value {
    tok("eof", Value::Null, at, at)
}

pub fn line_comment(value: &str, start: u32) -> Value {
    let end = start + 2 + value.len() as u32;
    json!({"type": "CommentLine", "value": value, "start": start, "end": end})
}

pub fn block_comment(value: &str, start: u32) -> Value {
    let end = start + 4 + value.len() as u32;
    json!({"type": "CommentBlock", "value": value, "start": start, "end": end})
}

// ============================================================================
// RUNNING
// ============================================================================

/// Adapt a recorded output with default options
pub fn adapt(text: &str, raw: &Value) -> ParseResult {
    try_adapt(text, raw, &ParseOptions::default())
        .unwrap_or_else(|err| panic!("adapting {text:?} failed: {err}"))
}

pub fn try_adapt(text: &str, raw: &Value, options: &ParseOptions) -> Result<ParseResult, Error> {
    from_raw_json(text, &raw.to_string(), options)
}

/// Adapt through the `SourceParser` seam instead of the JSON entry point
pub fn adapt_via_parser(text: &str, raw: &Value, options: &ParseOptions) -> Result<ParseResult, Error> {
    let parser = JsonSourceParser::new().with_output(text, raw.to_string());
    parse_for_lint(&parser, text, options)
}
