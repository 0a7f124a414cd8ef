//! The rule table, plus rules for statements, expressions and patterns
//! whose target shape matches the source shape.

use super::{Converter, Rule, chains, classes, functions, jsx, literals, modules, templates};
use crate::errors::Error;
use crate::estree::Node;
use crate::raw::RawNode;

pub(super) const RULES: &[(&str, Rule)] = &[
    // =========================================================================
    // Program and statements
    // =========================================================================
    ("Program", program),
    ("Directive", directive),
    ("ExpressionStatement", expression_statement),
    ("BlockStatement", block_statement),
    ("EmptyStatement", empty_statement),
    ("DebuggerStatement", debugger_statement),
    ("WithStatement", with_statement),
    ("ReturnStatement", return_statement),
    ("LabeledStatement", labeled_statement),
    ("BreakStatement", break_statement),
    ("ContinueStatement", continue_statement),
    ("IfStatement", if_statement),
    ("SwitchStatement", switch_statement),
    ("SwitchCase", switch_case),
    ("ThrowStatement", throw_statement),
    ("TryStatement", try_statement),
    ("CatchClause", catch_clause),
    ("WhileStatement", while_statement),
    ("DoWhileStatement", do_while_statement),
    ("ForStatement", for_statement),
    ("ForInStatement", for_in_statement),
    ("ForOfStatement", for_of_statement),
    ("VariableDeclaration", variable_declaration),
    ("VariableDeclarator", variable_declarator),
    // =========================================================================
    // Expressions
    // =========================================================================
    ("Identifier", identifier),
    ("ThisExpression", this_expression),
    ("Super", super_expression),
    ("ArrayExpression", array_expression),
    ("ObjectExpression", object_expression),
    ("SpreadElement", spread_element),
    ("UnaryExpression", unary_expression),
    ("UpdateExpression", update_expression),
    ("BinaryExpression", binary_expression),
    ("LogicalExpression", logical_expression),
    ("AssignmentExpression", assignment_expression),
    ("ConditionalExpression", conditional_expression),
    ("CallExpression", call_expression),
    ("NewExpression", new_expression),
    ("MemberExpression", member_expression),
    ("SequenceExpression", sequence_expression),
    ("YieldExpression", yield_expression),
    ("AwaitExpression", await_expression),
    ("MetaProperty", meta_property),
    ("ParenthesizedExpression", parenthesized_expression),
    ("TaggedTemplateExpression", tagged_template_expression),
    // =========================================================================
    // Patterns
    // =========================================================================
    ("ObjectPattern", object_pattern),
    ("ArrayPattern", array_pattern),
    ("RestElement", rest_element),
    ("AssignmentPattern", assignment_pattern),
    // =========================================================================
    // Literals and templates
    // =========================================================================
    ("StringLiteral", literals::string),
    ("NumericLiteral", literals::numeric),
    ("BooleanLiteral", literals::boolean),
    ("NullLiteral", literals::null),
    ("RegExpLiteral", literals::regexp),
    ("BigIntLiteral", literals::bigint),
    ("DirectiveLiteral", literals::directive),
    ("TemplateLiteral", templates::template_literal),
    ("TemplateElement", templates::template_element),
    // =========================================================================
    // Functions, objects and classes
    // =========================================================================
    ("FunctionDeclaration", functions::function_declaration),
    ("FunctionExpression", functions::function_expression),
    ("ArrowFunctionExpression", functions::arrow_function),
    ("ObjectProperty", classes::object_property),
    ("ObjectMethod", classes::object_method),
    ("ClassDeclaration", classes::class_declaration),
    ("ClassExpression", classes::class_expression),
    ("ClassBody", classes::class_body),
    ("ClassMethod", classes::class_method),
    ("ClassPrivateMethod", classes::class_method),
    ("ClassProperty", classes::class_property),
    ("ClassPrivateProperty", classes::class_property),
    ("ClassAccessorProperty", classes::accessor_property),
    ("StaticBlock", classes::static_block),
    ("PrivateName", classes::private_name),
    // =========================================================================
    // Optional chains
    // =========================================================================
    ("OptionalMemberExpression", chains::optional_chain),
    ("OptionalCallExpression", chains::optional_chain),
    // =========================================================================
    // Modules
    // =========================================================================
    ("ImportDeclaration", modules::import_declaration),
    ("ImportSpecifier", modules::import_specifier),
    ("ImportDefaultSpecifier", modules::import_default_specifier),
    ("ImportNamespaceSpecifier", modules::import_namespace_specifier),
    ("ImportAttribute", modules::import_attribute),
    ("ImportExpression", modules::import_expression),
    ("ExportNamedDeclaration", modules::export_named_declaration),
    ("ExportSpecifier", modules::export_specifier),
    ("ExportDefaultDeclaration", modules::export_default_declaration),
    ("ExportAllDeclaration", modules::export_all_declaration),
    ("ExportNamespaceSpecifier", modules::export_namespace_specifier),
    ("ExportDefaultSpecifier", modules::export_default_specifier),
    // =========================================================================
    // JSX
    // =========================================================================
    ("JSXElement", jsx::element),
    ("JSXOpeningElement", jsx::opening_element),
    ("JSXClosingElement", jsx::closing_element),
    ("JSXFragment", jsx::fragment),
    ("JSXOpeningFragment", jsx::opening_fragment),
    ("JSXClosingFragment", jsx::closing_fragment),
    ("JSXAttribute", jsx::attribute),
    ("JSXSpreadAttribute", jsx::spread_attribute),
    ("JSXExpressionContainer", jsx::expression_container),
    ("JSXEmptyExpression", jsx::empty_expression),
    ("JSXSpreadChild", jsx::spread_child),
    ("JSXText", jsx::text),
    ("JSXIdentifier", jsx::identifier),
    ("JSXMemberExpression", jsx::member_expression),
    ("JSXNamespacedName", jsx::namespaced_name),
];

// ============================================================================
// PROGRAM AND STATEMENTS
// ============================================================================

fn program<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    if let Some(interpreter) = raw.get("interpreter") {
        cx.observe_comment(interpreter);
    }

    let body = body_with_directives(cx, raw)?;
    let source_type = raw
        .str("sourceType")
        .unwrap_or(cx.source_type().as_str())
        .to_string();
    Ok(cx
        .shell(raw, "Program")?
        .with("body", body)
        .with("sourceType", source_type))
}

/// Directives become leading expression statements of the body
fn body_with_directives<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Vec<Node>, Error> {
    let mut body = cx.convert_all(raw, "directives")?;
    body.extend(cx.convert_all(raw, "body")?);
    Ok(body)
}

fn directive<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let expression = cx.required(raw, "value")?;
    let raw_text = expression.str_field("raw").unwrap_or_default();
    // The directive is the literal's source without its quotes.
    let directive = raw_text
        .get(1..raw_text.len().saturating_sub(1))
        .unwrap_or_default()
        .to_string();
    Ok(cx
        .shell(raw, "ExpressionStatement")?
        .with("expression", expression)
        .with("directive", directive))
}

fn expression_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ExpressionStatement")?.child("expression")?.finish())
}

fn block_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let body = body_with_directives(cx, raw)?;
    Ok(cx.shell(raw, "BlockStatement")?.with("body", body))
}

fn empty_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.shell(raw, "EmptyStatement")
}

fn debugger_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.shell(raw, "DebuggerStatement")
}

fn with_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "WithStatement")?
        .child("object")?
        .child("body")?
        .finish())
}

fn return_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ReturnStatement")?.child("argument")?.finish())
}

fn labeled_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "LabeledStatement")?
        .child("label")?
        .child("body")?
        .finish())
}

fn break_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "BreakStatement")?.child("label")?.finish())
}

fn continue_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ContinueStatement")?.child("label")?.finish())
}

fn if_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "IfStatement")?
        .child("test")?
        .child("consequent")?
        .child("alternate")?
        .finish())
}

fn switch_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "SwitchStatement")?
        .child("discriminant")?
        .list("cases")?
        .finish())
}

fn switch_case<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "SwitchCase")?
        .child("test")?
        .list("consequent")?
        .finish())
}

fn throw_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ThrowStatement")?.child("argument")?.finish())
}

fn try_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "TryStatement")?
        .child("block")?
        .child("handler")?
        .child("finalizer")?
        .finish())
}

fn catch_clause<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "CatchClause")?
        .child("param")?
        .child("body")?
        .finish())
}

fn while_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "WhileStatement")?
        .child("test")?
        .child("body")?
        .finish())
}

fn do_while_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "DoWhileStatement")?
        .child("body")?
        .child("test")?
        .finish())
}

fn for_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ForStatement")?
        .child("init")?
        .child("test")?
        .child("update")?
        .child("body")?
        .finish())
}

fn for_in_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ForInStatement")?
        .child("left")?
        .child("right")?
        .child("body")?
        .finish())
}

fn for_of_statement<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ForOfStatement")?
        .flag("await")
        .child("left")?
        .child("right")?
        .child("body")?
        .finish())
}

fn variable_declaration<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "VariableDeclaration")?
        .list("declarations")?
        .value("kind")
        .finish())
}

fn variable_declarator<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "VariableDeclarator")?
        .child("id")?
        .child("init")?
        .finish())
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

fn identifier<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let name = raw.required_str("name")?;
    Ok(cx.shell(raw, "Identifier")?.with("name", name))
}

fn this_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.shell(raw, "ThisExpression")
}

fn super_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.shell(raw, "Super")
}

fn array_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ArrayExpression")?.list("elements")?.finish())
}

fn object_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ObjectExpression")?.list("properties")?.finish())
}

fn spread_element<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "SpreadElement")?.child("argument")?.finish())
}

fn unary_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "UnaryExpression")?
        .value("operator")
        .set("prefix", true)
        .child("argument")?
        .finish())
}

fn update_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "UpdateExpression")?
        .value("operator")
        .flag("prefix")
        .child("argument")?
        .finish())
}

/// Also carries the pipeline operator (`a |> f`) unchanged
fn binary_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "BinaryExpression")?
        .value("operator")
        .child("left")?
        .child("right")?
        .finish())
}

fn logical_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "LogicalExpression")?
        .value("operator")
        .child("left")?
        .child("right")?
        .finish())
}

fn assignment_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "AssignmentExpression")?
        .value("operator")
        .child("left")?
        .child("right")?
        .finish())
}

fn conditional_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "ConditionalExpression")?
        .child("test")?
        .child("consequent")?
        .child("alternate")?
        .finish())
}

fn call_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    if raw.node("callee")?.is_some_and(|callee| callee.is("Import")) {
        return modules::import_call(cx, raw);
    }
    Ok(cx
        .build(raw, "CallExpression")?
        .child("callee")?
        .list("arguments")?
        .set("optional", false)
        .finish())
}

fn new_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "NewExpression")?
        .child("callee")?
        .list("arguments")?
        .finish())
}

fn member_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "MemberExpression")?
        .child("object")?
        .child("property")?
        .flag("computed")
        .set("optional", false)
        .finish())
}

fn sequence_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "SequenceExpression")?
        .list("expressions")?
        .finish())
}

fn yield_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "YieldExpression")?
        .flag("delegate")
        .child("argument")?
        .finish())
}

fn await_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "AwaitExpression")?.child("argument")?.finish())
}

fn meta_property<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "MetaProperty")?
        .child("meta")?
        .child("property")?
        .finish())
}

/// Parentheses are not nodes in the target dialect
fn parenthesized_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    cx.required(raw, "expression")
}

fn tagged_template_expression<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "TaggedTemplateExpression")?
        .child("tag")?
        .child("quasi")?
        .finish())
}

// ============================================================================
// PATTERNS
// ============================================================================

fn object_pattern<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ObjectPattern")?.list("properties")?.finish())
}

fn array_pattern<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "ArrayPattern")?.list("elements")?.finish())
}

fn rest_element<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx.build(raw, "RestElement")?.child("argument")?.finish())
}

fn assignment_pattern<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    Ok(cx
        .build(raw, "AssignmentPattern")?
        .child("left")?
        .child("right")?
        .finish())
}
