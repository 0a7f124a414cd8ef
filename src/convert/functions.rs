//! Functions, and the function values of methods.

use text_size::{TextRange, TextSize};

use super::Converter;
use crate::errors::Error;
use crate::estree::{Field, Node};
use crate::raw::RawNode;

fn function<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>, kind: &str) -> Result<Node, Error> {
    Ok(cx
        .build(raw, kind)?
        .child("id")?
        .set("expression", false)
        .flag("generator")
        .flag("async")
        .list("params")?
        .child("body")?
        .finish())
}

pub(super) fn function_declaration<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    function(cx, raw, "FunctionDeclaration")
}

pub(super) fn function_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    function(cx, raw, "FunctionExpression")
}

pub(super) fn arrow_function<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let expression = !raw.required("body")?.is("BlockStatement");
    Ok(cx
        .build(raw, "ArrowFunctionExpression")?
        .set("id", Field::Null)
        .set("expression", expression)
        .set("generator", false)
        .flag("async")
        .list("params")?
        .child("body")?
        .finish())
}

/// The `FunctionExpression` value of an object or class method.
///
/// The source parser folds the function into the method node; the target
/// splits it out, spanning from the parameter list (or type parameters)
/// to the end of the method.
pub(super) fn method_value<'a>(
    cx: &mut Converter<'a>,
    raw: RawNode<'a>,
    key: &Node,
    computed: bool,
) -> Result<Node, Error> {
    let method = cx.span(raw)?;
    let start = value_start(cx, key.range.end(), computed).min(method.end());
    let range = TextRange::new(start, method.end());

    let params = cx.convert_all(raw, "params")?;
    let body = cx.required(raw, "body")?;
    Ok(cx
        .shell_at("FunctionExpression", range)
        .with("id", Field::Null)
        .with("expression", false)
        .with("generator", raw.bool("generator"))
        .with("async", raw.bool("async"))
        .with("params", params)
        .with("body", body))
}

/// First significant offset after the key, past the `]` of a computed key
/// and any parentheses the key expression closes before it
fn value_start(cx: &Converter<'_>, key_end: TextSize, computed: bool) -> TextSize {
    let source = cx.source();
    let mut at = key_end;
    if computed {
        while let Some((paren, ')')) = source.next_significant(at) {
            at = paren + TextSize::new(1);
        }
        if let Some((bracket, ']')) = source.next_significant(at) {
            at = bracket + TextSize::new(1);
        }
    }
    source.skip_trivia(at)
}
