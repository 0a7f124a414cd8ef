//! Object members, classes and class members.

use super::{Converter, functions};
use crate::errors::Error;
use crate::estree::Node;
use crate::raw::RawNode;

// ============================================================================
// OBJECT MEMBERS
// ============================================================================

pub(super) fn object_property<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "Property")?
        .set("method", false)
        .flag("shorthand")
        .flag("computed")
        .child("key")?
        .child("value")?
        .set("kind", "init")
        .finish())
}

/// `{ m() {} }`, `{ get x() {} }`: the function moves into `value`
pub(super) fn object_method<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let computed = raw.bool("computed");
    let kind = raw.str("kind").unwrap_or("method");
    let is_method = kind == "method";

    let key = cx.required(raw, "key")?;
    let value = functions::method_value(cx, raw, &key, computed)?;
    Ok(cx
        .shell(raw, "Property")?
        .with("method", is_method)
        .with("shorthand", false)
        .with("computed", computed)
        .with("key", key)
        .with("value", value)
        .with("kind", if is_method { "init" } else { kind }))
}

// ============================================================================
// CLASSES
// ============================================================================

fn class<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>, kind: &str) -> Result<Node, Error> {
    Ok(cx
        .build(raw, kind)?
        .child("id")?
        .child("superClass")?
        .child("body")?
        .finish())
}

pub(super) fn class_declaration<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    class(cx, raw, "ClassDeclaration")
}

pub(super) fn class_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    class(cx, raw, "ClassExpression")
}

pub(super) fn class_body<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ClassBody")?.list("body")?.finish())
}

/// Public and private methods alike become `MethodDefinition`
pub(super) fn class_method<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let computed = raw.bool("computed");
    let kind = raw.str("kind").unwrap_or("method").to_string();

    let key = cx.required(raw, "key")?;
    let value = functions::method_value(cx, raw, &key, computed)?;
    Ok(cx
        .shell(raw, "MethodDefinition")?
        .with("static", raw.bool("static"))
        .with("computed", computed)
        .with("key", key)
        .with("kind", kind)
        .with("value", value))
}

/// Public and private fields alike become `PropertyDefinition`
pub(super) fn class_property<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    member(cx, raw, "PropertyDefinition")
}

/// `accessor x = 1`
pub(super) fn accessor_property<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    member(cx, raw, "AccessorProperty")
}

fn member<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>, kind: &str) -> Result<Node, Error> {
    Ok(cx
        .build(raw, kind)?
        .flag("static")
        .flag("computed")
        .child("key")?
        .child("value")?
        .finish())
}

pub(super) fn static_block<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "StaticBlock")?.list("body")?.finish())
}

/// `#x` → `PrivateIdentifier{name: "x"}`, spanning the `#`
pub(super) fn private_name<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let id = raw.required("id")?;
    cx.observe(id)?;
    let name = id.required_str("name")?;
    Ok(cx.shell(raw, "PrivateIdentifier")?.with("name", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SourceText;
    use crate::invoke::SourceType;
    use crate::positions::Locator;
    use serde_json::{Value, json};

    fn convert_one(text: &str, raw: Value) -> Node {
        let source = SourceText::new(text);
        let mut cx = Converter::new(Locator::new(&source), SourceType::Module);
        cx.convert(RawNode::new(&raw).unwrap()).unwrap()
    }

    #[test]
    fn test_private_method_becomes_method_definition() {
        // class A { static #m(a) {} }
        let text = "class A { static #m(a) {} }";
        let node = convert_one(
            text,
            json!({
                "type": "ClassPrivateMethod", "start": 10, "end": 25,
                "static": true, "kind": "method", "generator": false, "async": false,
                "key": {"type": "PrivateName", "start": 17, "end": 19,
                    "id": {"type": "Identifier", "name": "m", "start": 18, "end": 19}},
                "params": [{"type": "Identifier", "name": "a", "start": 20, "end": 21}],
                "body": {"type": "BlockStatement", "start": 23, "end": 25, "body": [], "directives": []}
            }),
        );
        assert_eq!(node.kind, "MethodDefinition");
        assert!(node.bool_field("static"));
        assert!(!node.bool_field("computed"));
        assert_eq!(node.str_field("kind"), Some("method"));

        let key = node.child("key").unwrap();
        assert_eq!(key.kind, "PrivateIdentifier");
        assert_eq!(key.str_field("name"), Some("m"));
        assert_eq!(u32::from(key.range.start()), 17);

        let value = node.child("value").unwrap();
        assert_eq!(value.kind, "FunctionExpression");
        assert_eq!(u32::from(value.range.start()), 19);
        assert_eq!(u32::from(value.range.end()), 25);
        assert_eq!(value.children("params").count(), 1);
    }

    #[test]
    fn test_private_property_becomes_property_definition() {
        let text = "class A { #x = 1; }";
        let node = convert_one(
            text,
            json!({
                "type": "ClassPrivateProperty", "start": 10, "end": 17, "static": false,
                "key": {"type": "PrivateName", "start": 10, "end": 12,
                    "id": {"type": "Identifier", "name": "x", "start": 11, "end": 12}},
                "value": {"type": "NumericLiteral", "start": 15, "end": 16, "value": 1,
                    "extra": {"raw": "1", "rawValue": 1}}
            }),
        );
        let json = node.to_json();
        assert_eq!(json["type"], "PropertyDefinition");
        assert_eq!(json["computed"], false);
        assert_eq!(json["key"]["type"], "PrivateIdentifier");
        assert_eq!(json["value"]["type"], "Literal");
    }

    #[test]
    fn test_object_getter() {
        let text = "({ get [k]() { } })";
        let node = convert_one(
            text,
            json!({
                "type": "ObjectMethod", "start": 3, "end": 16, "kind": "get", "computed": true,
                "generator": false, "async": false,
                "key": {"type": "Identifier", "name": "k", "start": 8, "end": 9},
                "params": [],
                "body": {"type": "BlockStatement", "start": 13, "end": 16, "body": [], "directives": []}
            }),
        );
        let json = node.to_json();
        assert_eq!(json["type"], "Property");
        assert_eq!(json["kind"], "get");
        assert_eq!(json["method"], false);
        assert_eq!(json["computed"], true);
        assert_eq!(json["value"]["range"], json!([10, 16]));
    }

    #[test]
    fn test_object_shorthand_property() {
        let node = convert_one(
            "({ a })",
            json!({
                "type": "ObjectProperty", "start": 3, "end": 4, "shorthand": true, "computed": false,
                "key": {"type": "Identifier", "name": "a", "start": 3, "end": 4},
                "value": {"type": "Identifier", "name": "a", "start": 3, "end": 4}
            }),
        );
        let names: Vec<_> = node.fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["method", "shorthand", "computed", "key", "value", "kind"]);
        assert!(node.bool_field("shorthand"));
        assert_eq!(node.str_field("kind"), Some("init"));
    }
}
