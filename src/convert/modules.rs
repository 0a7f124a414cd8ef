//! Import and export declarations, and dynamic `import()`.

use text_size::{TextRange, TextSize};

use super::Converter;
use crate::errors::Error;
use crate::estree::{Field, Node};
use crate::raw::RawNode;

/// Import attributes; older source parser versions call them `assertions`
fn attributes<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Vec<Node>, Error> {
    let field = if raw.get("attributes").is_some() {
        "attributes"
    } else {
        "assertions"
    };
    cx.convert_all(raw, field)
}

// ============================================================================
// IMPORTS
// ============================================================================

pub(super) fn import_declaration<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let attributes = attributes(cx, raw)?;
    Ok(cx
        .build(raw, "ImportDeclaration")?
        .list("specifiers")?
        .child("source")?
        .set("attributes", attributes)
        .finish())
}

pub(super) fn import_specifier<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ImportSpecifier")?
        .child("imported")?
        .child("local")?
        .finish())
}

pub(super) fn import_default_specifier<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ImportDefaultSpecifier")?.child("local")?.finish())
}

pub(super) fn import_namespace_specifier<'a>(
    cx: &mut Converter<'a>,
    raw: RawNode<'a>,
) -> Result<Node, Error> {
    Ok(cx.build(raw, "ImportNamespaceSpecifier")?.child("local")?.finish())
}

pub(super) fn import_attribute<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ImportAttribute")?
        .child("key")?
        .child("value")?
        .finish())
}

pub(super) fn import_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ImportExpression")?
        .child("source")?
        .child("options")?
        .finish())
}

/// `import(source, options)` parsed as a call with an `Import` callee
pub(super) fn import_call<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.observe(raw.required("callee")?)?;
    let mut arguments = cx.convert_all(raw, "arguments")?.into_iter();
    let source = arguments
        .next()
        .ok_or_else(|| Error::malformed("`import()` without a source"))?;
    let options = arguments.next();

    Ok(cx
        .shell(raw, "ImportExpression")?
        .with("source", source)
        .with("options", options))
}

// ============================================================================
// EXPORTS
// ============================================================================

pub(super) fn export_named_declaration<'a>(
    cx: &mut Converter<'a>,
    raw: RawNode<'a>,
) -> Result<Node, Error> {
    let attributes = attributes(cx, raw)?;
    Ok(cx
        .build(raw, "ExportNamedDeclaration")?
        .child("declaration")?
        .list("specifiers")?
        .child("source")?
        .set("attributes", attributes)
        .finish())
}

pub(super) fn export_specifier<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ExportSpecifier")?
        .child("local")?
        .child("exported")?
        .finish())
}

pub(super) fn export_default_declaration<'a>(
    cx: &mut Converter<'a>,
    raw: RawNode<'a>,
) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ExportDefaultDeclaration")?
        .child("declaration")?
        .finish())
}

pub(super) fn export_namespace_specifier<'a>(
    cx: &mut Converter<'a>,
    raw: RawNode<'a>,
) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ExportNamespaceSpecifier")?
        .child("exported")?
        .finish())
}

/// `export v from "mod"`
pub(super) fn export_default_specifier<'a>(
    cx: &mut Converter<'a>,
    raw: RawNode<'a>,
) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ExportDefaultSpecifier")?
        .child("exported")?
        .finish())
}

/// `export * from "mod"`.
///
/// A namespace re-export written as `ExportAllDeclaration{exported}` is
/// reshaped into `ExportNamedDeclaration` with one
/// `ExportNamespaceSpecifier` spanning `* as name`.
pub(super) fn export_all_declaration<'a>(
    cx: &mut Converter<'a>,
    raw: RawNode<'a>,
) -> Result<Node, Error> {
    let attributes = attributes(cx, raw)?;
    let Some(exported_raw) = raw.node("exported")? else {
        return Ok(cx
            .build(raw, "ExportAllDeclaration")?
            .child("source")?
            .set("attributes", attributes)
            .finish());
    };

    let range = cx.span(raw)?;
    let exported = cx.convert(exported_raw)?;
    let star = cx
        .source()
        .next_significant(range.start() + TextSize::of("export"))
        .filter(|(_, c)| *c == '*')
        .map_or(exported.range.start(), |(at, _)| at);
    let specifier = cx
        .shell_at(
            "ExportNamespaceSpecifier",
            TextRange::new(star, exported.range.end()),
        )
        .with("exported", exported);
    let source = cx.convert_field(raw, "source")?;

    Ok(cx
        .shell_at("ExportNamedDeclaration", range)
        .with("declaration", Field::Null)
        .with("specifiers", vec![specifier])
        .with("source", source)
        .with("attributes", attributes))
}
