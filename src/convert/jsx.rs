//! JSX nodes.
//!
//! JSX keeps its node vocabulary across both dialects. Attribute string
//! values become `Literal` through the ordinary literal rule, and `JSXText`
//! carries its source text verbatim as `raw`.

use super::Converter;
use crate::errors::Error;
use crate::estree::Node;
use crate::raw::RawNode;

/// Whether an element name refers to a host element or a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<div>`, `<my-element>`, `<svg:rect>`
    Intrinsic,
    /// `<App>`, `<ui.Button>`
    Component,
}

/// Names starting with a lower-case ASCII letter are host elements
pub fn is_intrinsic(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
}

/// Classify the `name` of a `JSXOpeningElement`
pub fn element_kind(name: &Node) -> ElementKind {
    match name.kind.as_str() {
        "JSXIdentifier" if name.str_field("name").is_some_and(is_intrinsic) => {
            ElementKind::Intrinsic
        }
        "JSXNamespacedName" => ElementKind::Intrinsic,
        _ => ElementKind::Component,
    }
}

pub(super) fn element<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "JSXElement")?
        .child("openingElement")?
        .list("children")?
        .child("closingElement")?
        .finish())
}

pub(super) fn opening_element<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "JSXOpeningElement")?
        .child("name")?
        .list("attributes")?
        .flag("selfClosing")
        .finish())
}

pub(super) fn closing_element<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "JSXClosingElement")?.child("name")?.finish())
}

pub(super) fn fragment<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "JSXFragment")?
        .child("openingFragment")?
        .list("children")?
        .child("closingFragment")?
        .finish())
}

pub(super) fn opening_fragment<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.shell(raw, "JSXOpeningFragment")
}

pub(super) fn closing_fragment<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.shell(raw, "JSXClosingFragment")
}

pub(super) fn attribute<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "JSXAttribute")?
        .child("name")?
        .child("value")?
        .finish())
}

pub(super) fn spread_attribute<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "JSXSpreadAttribute")?.child("argument")?.finish())
}

pub(super) fn expression_container<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "JSXExpressionContainer")?
        .child("expression")?
        .finish())
}

pub(super) fn empty_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.shell(raw, "JSXEmptyExpression")
}

pub(super) fn spread_child<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "JSXSpreadChild")?.child("expression")?.finish())
}

pub(super) fn text<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let range = cx.span(raw)?;
    let verbatim = cx
        .locator()
        .slice(range)
        .ok_or_else(|| Error::malformed("`JSXText` span is outside the program text"))?;
    let value = raw.str("value").unwrap_or(verbatim);
    Ok(cx
        .shell_at("JSXText", range)
        .with("value", value)
        .with("raw", verbatim))
}

pub(super) fn identifier<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let name = raw.required_str("name")?;
    Ok(cx.shell(raw, "JSXIdentifier")?.with("name", name))
}

pub(super) fn member_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "JSXMemberExpression")?
        .child("object")?
        .child("property")?
        .finish())
}

pub(super) fn namespaced_name<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "JSXNamespacedName")?
        .child("namespace")?
        .child("name")?
        .finish())
}
