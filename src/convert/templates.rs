//! Template literals.
//!
//! The source parser spans a template element over its text only; the
//! target spans it over its delimiters too:
//!
//! ```text
//! `a${b}c`
//! ^^^^         first element: "`" + "a" + "${"
//!      ^^^     tail element:  "}" + "c" + "`"
//! ```

use text_size::{TextRange, TextSize};

use super::Converter;
use crate::errors::Error;
use crate::estree::Node;
use crate::raw::RawNode;

pub(super) fn template_literal<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "TemplateLiteral")?
        .list("quasis")?
        .list("expressions")?
        .finish())
}

pub(super) fn template_element<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let tail = raw.bool("tail");
    let range = widen(cx, cx.span(raw)?, tail);
    let value = raw
        .get("value")
        .cloned()
        .ok_or_else(|| Error::malformed("`TemplateElement` without `value`"))?;

    Ok(cx
        .shell_at("TemplateElement", range)
        .with("value", value)
        .with("tail", tail))
}

/// Extend a text-only span over `` ` `` or `}` before it and `` ` `` or
/// `${` after it
fn widen(cx: &Converter<'_>, range: TextRange, tail: bool) -> TextRange {
    let closing = if tail { 1 } else { 2 };
    let start = range.start().checked_sub(TextSize::new(1)).unwrap_or(range.start());
    let end = (range.end() + TextSize::new(closing)).min(cx.source().len());
    TextRange::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SourceText;
    use crate::invoke::SourceType;
    use crate::positions::Locator;
    use serde_json::{Value, json};

    fn quasi(start: u32, end: u32, raw: &str, tail: bool) -> Value {
        json!({"type": "TemplateElement", "start": start, "end": end, "tail": tail,
            "value": {"raw": raw, "cooked": raw}})
    }

    #[test]
    fn test_elements_cover_their_delimiters() {
        let text = "`a${b}c`";
        let source = SourceText::new(text);
        let raw = json!({
            "type": "TemplateLiteral", "start": 0, "end": 8,
            "quasis": [quasi(1, 2, "a", false), quasi(6, 7, "c", true)],
            "expressions": [{"type": "Identifier", "name": "b", "start": 4, "end": 5}]
        });
        let mut cx = Converter::new(Locator::new(&source), SourceType::Module);
        let node = cx.convert(RawNode::new(&raw).unwrap()).unwrap();

        let quasis: Vec<_> = node.children("quasis").collect();
        assert_eq!(source.slice(quasis[0].range), Some("`a${"));
        assert_eq!(source.slice(quasis[1].range), Some("}c`"));
        assert!(!quasis[0].bool_field("tail"));
        assert!(quasis[1].bool_field("tail"));

        let json = quasis[0].to_json();
        assert_eq!(json["value"], json!({"raw": "a", "cooked": "a"}));
        assert_eq!(json["loc"]["start"]["column"], 0);
        assert_eq!(json["loc"]["end"]["column"], 4);
    }

    #[test]
    fn test_empty_template() {
        let text = "``";
        let source = SourceText::new(text);
        let raw = json!({
            "type": "TemplateLiteral", "start": 0, "end": 2,
            "quasis": [quasi(1, 1, "", true)],
            "expressions": []
        });
        let mut cx = Converter::new(Locator::new(&source), SourceType::Module);
        let node = cx.convert(RawNode::new(&raw).unwrap()).unwrap();
        let element = node.children("quasis").next().unwrap();
        assert_eq!(source.slice(element.range), Some("``"));
    }
}
