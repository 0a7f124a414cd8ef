//! Literal nodes: every source literal type becomes a `Literal`.

use serde_json::{Value, json};

use super::Converter;
use crate::errors::Error;
use crate::estree::Node;
use crate::raw::RawNode;

/// The literal as written: `extra.raw` when the source parser kept it,
/// otherwise the source text under the node.
fn raw_text<'a>(cx: &Converter<'a>, raw: RawNode<'a>) -> Result<String, Error> {
    if let Some(text) = raw.extra("raw").and_then(Value::as_str) {
        return Ok(text.to_string());
    }
    let range = cx.span(raw)?;
    cx.locator()
        .slice(range)
        .map(str::to_string)
        .ok_or_else(|| Error::malformed(format!("`{}` span is outside the program text", raw.kind())))
}

fn literal<'a>(cx: &Converter<'a>, raw: RawNode<'a>, value: Value) -> Result<Node, Error> {
    let text = raw_text(cx, raw)?;
    Ok(cx
        .shell(raw, "Literal")?
        .with("value", value)
        .with("raw", text))
}

pub(super) fn string<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let value = raw.get("value").cloned().unwrap_or(Value::Null);
    literal(cx, raw, value)
}

pub(super) fn numeric<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let value = raw.get("value").cloned().unwrap_or(Value::Null);
    literal(cx, raw, value)
}

pub(super) fn boolean<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    literal(cx, raw, Value::Bool(raw.bool("value")))
}

pub(super) fn null<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    literal(cx, raw, Value::Null)
}

/// A directive's `value` is its text as written; the cooked string, when
/// the source parser computed one, is `extra.expressionValue`.
pub(super) fn directive<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let value = raw
        .extra("expressionValue")
        .or_else(|| raw.get("value"))
        .cloned()
        .unwrap_or(Value::Null);
    literal(cx, raw, value)
}

/// `/a+/gi` → `Literal{value: null, raw, regex: {pattern, flags}}`
pub(super) fn regexp<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let pattern = raw.required_str("pattern")?;
    let flags = raw.str("flags").unwrap_or_default();
    Ok(literal(cx, raw, Value::Null)?.with("regex", json!({ "pattern": pattern, "flags": flags })))
}

/// `1_000n` → `Literal{value: null, raw: "1_000n", bigint: "1000"}`
pub(super) fn bigint<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let text = raw_text(cx, raw)?;
    let digits = raw
        .str("value")
        .unwrap_or_else(|| text.strip_suffix('n').unwrap_or(&text));
    let bigint: String = digits.chars().filter(|c| *c != '_' && *c != 'n').collect();
    Ok(literal(cx, raw, Value::Null)?.with("bigint", bigint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SourceText;
    use crate::positions::Locator;
    use crate::invoke::SourceType;
    use rstest::rstest;

    fn convert_one(text: &str, raw: Value) -> Node {
        let source = SourceText::new(text);
        let mut cx = Converter::new(Locator::new(&source), SourceType::Module);
        cx.convert(RawNode::new(&raw).unwrap()).unwrap()
    }

    #[rstest]
    #[case("'a'", json!({"type": "StringLiteral", "start": 0, "end": 3, "value": "a", "extra": {"raw": "'a'"}}), json!("a"), "'a'")]
    #[case("0x1F", json!({"type": "NumericLiteral", "start": 0, "end": 4, "value": 31}), json!(31), "0x1F")]
    #[case("true", json!({"type": "BooleanLiteral", "start": 0, "end": 4, "value": true}), json!(true), "true")]
    #[case("null", json!({"type": "NullLiteral", "start": 0, "end": 4}), Value::Null, "null")]
    fn test_plain_literals(
        #[case] text: &str,
        #[case] raw: Value,
        #[case] value: Value,
        #[case] raw_text: &str,
    ) {
        let node = convert_one(text, raw);
        assert_eq!(node.kind, "Literal");
        let json = node.to_json();
        assert_eq!(json["value"], value);
        assert_eq!(json["raw"], raw_text);
    }

    #[test]
    fn test_regexp_literal() {
        let node = convert_one(
            "/a+/gi",
            json!({"type": "RegExpLiteral", "start": 0, "end": 6, "pattern": "a+", "flags": "gi",
                "extra": {"raw": "/a+/gi"}}),
        );
        let json = node.to_json();
        assert_eq!(json["value"], Value::Null);
        assert_eq!(json["raw"], "/a+/gi");
        assert_eq!(json["regex"], json!({"pattern": "a+", "flags": "gi"}));
    }

    #[test]
    fn test_bigint_literal_strips_suffix_and_separators() {
        let node = convert_one(
            "1_000n",
            json!({"type": "BigIntLiteral", "start": 0, "end": 6, "extra": {"raw": "1_000n"}}),
        );
        let json = node.to_json();
        assert_eq!(json["value"], Value::Null);
        assert_eq!(json["raw"], "1_000n");
        assert_eq!(json["bigint"], "1000");
    }

    #[test]
    fn test_raw_falls_back_to_source_text() {
        let node = convert_one(
            "\"é\"",
            json!({"type": "StringLiteral", "start": 0, "end": 3, "value": "é"}),
        );
        assert_eq!(node.str_field("raw"), Some("\"é\""));
    }
}
