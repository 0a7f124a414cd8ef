//! Classes, class members and object methods.

mod helpers;

use estree_bridge::TextRange;
use estree_bridge::scope::ScopeKind;
use helpers::assertions::{assert_positions_agree, assert_shapes_match, find, token_summary};
use helpers::raw::*;
use serde_json::{Value, json};

fn empty_block(start: u32, end: u32) -> Value {
    node("BlockStatement", start, end, json!({"body": [], "directives": []}))
}

fn assign_token(start: u32) -> Value {
    json!({"type": {"label": "=", "isAssign": true}, "value": "=", "start": start, "end": start + 1})
}

/// `class A { #x = 1; m() {} }`
fn private_field_class() -> (&'static str, Value) {
    let text = "class A { #x = 1; m() {} }";
    let field = node(
        "ClassPrivateProperty",
        10,
        17,
        json!({
            "static": false,
            "key": node("PrivateName", 10, 12, json!({"id": ident("x", 11)})),
            "value": number("1", 1.0, 15)
        }),
    );
    let method = node(
        "ClassMethod",
        18,
        24,
        json!({
            "kind": "method", "static": false, "computed": false,
            "key": ident("m", 18), "id": null,
            "generator": false, "async": false, "params": [],
            "body": empty_block(22, 24)
        }),
    );
    let class = node(
        "ClassDeclaration",
        0,
        26,
        json!({
            "id": ident("A", 6), "superClass": null,
            "body": node("ClassBody", 8, 26, json!({"body": [field, method]}))
        }),
    );
    let raw = file(
        program(vec![class], 26, "module"),
        vec![
            keyword("class", 0),
            name("A", 6),
            punct("{", 8),
            tok("privateName", json!("x"), 10, 12),
            assign_token(13),
            tok("num", json!(1), 15, 16),
            punct(";", 16),
            name("m", 18),
            punct("(", 19),
            punct(")", 20),
            punct("{", 22),
            punct("}", 23),
            punct("}", 25),
            eof(26),
        ],
        vec![],
    );
    (text, raw)
}

#[test]
fn test_private_field_and_method() {
    let (text, raw) = private_field_class();
    let result = adapt(text, &raw);

    let class = find(&result.ast, "ClassDeclaration").to_json();
    assert_eq!(class["id"]["name"], "A");
    assert_eq!(class["superClass"], Value::Null);

    let field = &class["body"]["body"][0];
    assert_eq!(field["type"], "PropertyDefinition");
    assert_eq!(field["static"], false);
    assert_eq!(field["key"]["type"], "PrivateIdentifier");
    assert_eq!(field["key"]["name"], "x");
    assert_eq!(field["key"]["range"], json!([10, 12]));
    assert_eq!(field["value"]["raw"], "1");

    let method = &class["body"]["body"][1];
    assert_eq!(method["type"], "MethodDefinition");
    assert_eq!(method["kind"], "method");
    assert_eq!(method["key"]["name"], "m");
    assert_eq!(method["value"]["type"], "FunctionExpression");
    assert_eq!(method["value"]["range"], json!([19, 24]));
    assert_eq!(method["value"]["id"], Value::Null);
    assert!(method["value"].get("kind").is_none());

    assert_shapes_match(&result);
    assert_positions_agree(text, &result);
}

#[test]
fn test_private_name_token_splits() {
    let (text, raw) = private_field_class();
    let result = adapt(text, &raw);
    let tokens = token_summary(&result);
    assert_eq!(tokens[3], ("Punctuator".to_string(), "#".to_string()));
    assert_eq!(tokens[4], ("Identifier".to_string(), "x".to_string()));
    assert_eq!(result.tokens[3].range, TextRange::new(10.into(), 11.into()));
    assert_eq!(result.tokens[4].range, TextRange::new(11.into(), 12.into()));
    assert_eq!(tokens[0], ("Keyword".to_string(), "class".to_string()));
    assert_eq!(tokens[5], ("Punctuator".to_string(), "=".to_string()));
}

#[test]
fn test_class_scopes() {
    let (text, raw) = private_field_class();
    let result = adapt(text, &raw);
    let scopes = result.scope_manager.unwrap();

    let kinds: Vec<_> = scopes.scopes().map(|scope| scope.kind).collect();
    assert_eq!(
        kinds,
        [
            ScopeKind::Global,
            ScopeKind::Module,
            ScopeKind::Class,
            ScopeKind::ClassFieldInitializer,
            ScopeKind::Function,
        ]
    );
    let module = scopes.scopes().nth(1).unwrap();
    assert!(module.variable("A").is_some());
    let class_scope = scopes.scopes().nth(2).unwrap();
    assert!(class_scope.variable("A").is_some());
    assert!(class_scope.is_strict);
    // a private name is not a variable reference
    assert_eq!(scopes.references().count(), 0);
}

#[test]
fn test_computed_method_value_starts_after_bracket() {
    // ({ [k] () {} })
    let text = "({ [k] () {} })";
    let method = node(
        "ObjectMethod",
        3,
        12,
        json!({
            "kind": "method", "computed": true, "key": ident("k", 4),
            "id": null, "generator": false, "async": false, "params": [],
            "body": empty_block(10, 12)
        }),
    );
    let object = node(
        "ObjectExpression",
        1,
        14,
        json!({"properties": [method], "extra": {"parenthesized": true, "parenStart": 0}}),
    );
    let raw = program(vec![statement(object, 0, 15)], 15, "script");

    let result = adapt(text, &raw);
    let property = find(&result.ast, "Property").to_json();
    assert_eq!(property["method"], true);
    assert_eq!(property["computed"], true);
    assert_eq!(property["kind"], "init");
    assert_eq!(property["value"]["range"], json!([7, 12]));
}

#[test]
fn test_parenthesized_computed_key_stays_out_of_method_value() {
    let text = "({ [(a)]() {} })";
    let key = node(
        "Identifier",
        5,
        6,
        json!({"name": "a", "extra": {"parenthesized": true, "parenStart": 4}}),
    );
    let method = node(
        "ObjectMethod",
        3,
        13,
        json!({
            "kind": "method", "computed": true, "key": key,
            "id": null, "generator": false, "async": false, "params": [],
            "body": empty_block(11, 13)
        }),
    );
    let object = node(
        "ObjectExpression",
        1,
        15,
        json!({"properties": [method], "extra": {"parenthesized": true, "parenStart": 0}}),
    );
    let raw = program(vec![statement(object, 0, 16)], 16, "script");

    let property = find(&adapt(text, &raw).ast, "Property").to_json();
    assert_eq!(property["key"]["range"], json!([5, 6]));
    assert_eq!(property["value"]["range"], json!([8, 13]));
}

#[test]
fn test_getter_keeps_its_kind() {
    let text = "({ get a() {} })";
    let method = node(
        "ObjectMethod",
        3,
        13,
        json!({
            "kind": "get", "computed": false, "key": ident("a", 7),
            "id": null, "generator": false, "async": false, "params": [],
            "body": empty_block(11, 13)
        }),
    );
    let object = node("ObjectExpression", 1, 15, json!({"properties": [method]}));
    let raw = program(vec![statement(object, 0, 16)], 16, "script");

    let property = find(&adapt(text, &raw).ast, "Property").to_json();
    assert_eq!(property["kind"], "get");
    assert_eq!(property["method"], false);
    assert_eq!(property["value"]["range"], json!([8, 13]));
}

#[test]
fn test_static_block() {
    let text = "class B { static { x; } }";
    let block = node(
        "StaticBlock",
        10,
        23,
        json!({"body": [statement(ident("x", 19), 19, 21)]}),
    );
    let class = node(
        "ClassDeclaration",
        0,
        25,
        json!({
            "id": ident("B", 6), "superClass": null,
            "body": node("ClassBody", 8, 25, json!({"body": [block]}))
        }),
    );
    let raw = program(vec![class], 25, "module");

    let result = adapt(text, &raw);
    let block = find(&result.ast, "StaticBlock").to_json();
    assert_eq!(block["body"][0]["expression"]["name"], "x");

    let scopes = result.scope_manager.unwrap();
    assert!(scopes.scopes().any(|scope| scope.kind == ScopeKind::ClassStaticBlock));
    let through: Vec<_> = scopes.through().map(|r| r.name.to_string()).collect();
    assert_eq!(through, ["x"]);
}
