//! Visitor keys: which fields of each target node type hold child nodes,
//! in traversal order.

use indexmap::IndexMap;
use serde::Serialize;
use smol_str::SmolStr;

const ESTREE_KEYS: &[(&str, &[&str])] = &[
    // =========================================================================
    // Program and statements
    // =========================================================================
    ("Program", &["body"]),
    ("BlockStatement", &["body"]),
    ("BreakStatement", &["label"]),
    ("ContinueStatement", &["label"]),
    ("DebuggerStatement", &[]),
    ("DoWhileStatement", &["body", "test"]),
    ("EmptyStatement", &[]),
    ("ExpressionStatement", &["expression"]),
    ("ForInStatement", &["left", "right", "body"]),
    ("ForOfStatement", &["left", "right", "body"]),
    ("ForStatement", &["init", "test", "update", "body"]),
    ("IfStatement", &["test", "consequent", "alternate"]),
    ("LabeledStatement", &["label", "body"]),
    ("ReturnStatement", &["argument"]),
    ("SwitchCase", &["test", "consequent"]),
    ("SwitchStatement", &["discriminant", "cases"]),
    ("ThrowStatement", &["argument"]),
    ("TryStatement", &["block", "handler", "finalizer"]),
    ("CatchClause", &["param", "body"]),
    ("WhileStatement", &["test", "body"]),
    ("WithStatement", &["object", "body"]),
    // =========================================================================
    // Declarations
    // =========================================================================
    ("FunctionDeclaration", &["id", "params", "body"]),
    ("VariableDeclaration", &["declarations"]),
    ("VariableDeclarator", &["id", "init"]),
    ("ClassDeclaration", &["id", "superClass", "body"]),
    ("ClassExpression", &["id", "superClass", "body"]),
    ("ClassBody", &["body"]),
    ("MethodDefinition", &["key", "value"]),
    ("PropertyDefinition", &["key", "value"]),
    ("AccessorProperty", &["key", "value"]),
    ("StaticBlock", &["body"]),
    ("PrivateIdentifier", &[]),
    // =========================================================================
    // Expressions
    // =========================================================================
    ("ArrayExpression", &["elements"]),
    ("ArrowFunctionExpression", &["params", "body"]),
    ("AssignmentExpression", &["left", "right"]),
    ("AwaitExpression", &["argument"]),
    ("BinaryExpression", &["left", "right"]),
    ("CallExpression", &["callee", "arguments"]),
    ("ChainExpression", &["expression"]),
    ("ConditionalExpression", &["test", "consequent", "alternate"]),
    ("FunctionExpression", &["id", "params", "body"]),
    ("Identifier", &[]),
    ("ImportExpression", &["source", "options"]),
    ("Literal", &[]),
    ("LogicalExpression", &["left", "right"]),
    ("MemberExpression", &["object", "property"]),
    ("MetaProperty", &["meta", "property"]),
    ("NewExpression", &["callee", "arguments"]),
    ("ObjectExpression", &["properties"]),
    ("Property", &["key", "value"]),
    ("SequenceExpression", &["expressions"]),
    ("SpreadElement", &["argument"]),
    ("Super", &[]),
    ("TaggedTemplateExpression", &["tag", "quasi"]),
    ("TemplateElement", &[]),
    ("TemplateLiteral", &["quasis", "expressions"]),
    ("ThisExpression", &[]),
    ("UnaryExpression", &["argument"]),
    ("UpdateExpression", &["argument"]),
    ("YieldExpression", &["argument"]),
    // =========================================================================
    // Patterns
    // =========================================================================
    ("ArrayPattern", &["elements"]),
    ("AssignmentPattern", &["left", "right"]),
    ("ObjectPattern", &["properties"]),
    ("RestElement", &["argument"]),
    // =========================================================================
    // Modules
    // =========================================================================
    ("ExportAllDeclaration", &["source", "attributes"]),
    ("ExportDefaultDeclaration", &["declaration"]),
    ("ExportDefaultSpecifier", &["exported"]),
    ("ExportNamedDeclaration", &["declaration", "specifiers", "source", "attributes"]),
    ("ExportNamespaceSpecifier", &["exported"]),
    ("ExportSpecifier", &["local", "exported"]),
    ("ImportAttribute", &["key", "value"]),
    ("ImportDeclaration", &["specifiers", "source", "attributes"]),
    ("ImportDefaultSpecifier", &["local"]),
    ("ImportNamespaceSpecifier", &["local"]),
    ("ImportSpecifier", &["imported", "local"]),
    // =========================================================================
    // JSX
    // =========================================================================
    ("JSXAttribute", &["name", "value"]),
    ("JSXClosingElement", &["name"]),
    ("JSXClosingFragment", &[]),
    ("JSXElement", &["openingElement", "children", "closingElement"]),
    ("JSXEmptyExpression", &[]),
    ("JSXExpressionContainer", &["expression"]),
    ("JSXFragment", &["openingFragment", "children", "closingFragment"]),
    ("JSXIdentifier", &[]),
    ("JSXMemberExpression", &["object", "property"]),
    ("JSXNamespacedName", &["namespace", "name"]),
    ("JSXOpeningElement", &["name", "attributes"]),
    ("JSXOpeningFragment", &[]),
    ("JSXSpreadAttribute", &["argument"]),
    ("JSXSpreadChild", &["expression"]),
    ("JSXText", &[]),
];

/// Ordered map from node type to its child-bearing fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisitorKeys {
    keys: IndexMap<SmolStr, Vec<SmolStr>>,
}

impl VisitorKeys {
    /// Keys for every node type the adapter emits
    pub fn estree() -> Self {
        let keys = ESTREE_KEYS
            .iter()
            .map(|(kind, fields)| {
                (
                    SmolStr::new(kind),
                    fields.iter().map(|field| SmolStr::new(field)).collect(),
                )
            })
            .collect();
        Self { keys }
    }

    pub fn empty() -> Self {
        Self {
            keys: IndexMap::new(),
        }
    }

    pub fn get(&self, kind: &str) -> Option<&[SmolStr]> {
        self.keys.get(kind).map(Vec::as_slice)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.keys.contains_key(kind)
    }

    /// Add or replace the keys for one node type
    pub fn insert(&mut self, kind: &str, fields: &[&str]) {
        self.keys.insert(
            SmolStr::new(kind),
            fields.iter().map(|field| SmolStr::new(field)).collect(),
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SmolStr])> {
        self.keys
            .iter()
            .map(|(kind, fields)| (kind.as_str(), fields.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for VisitorKeys {
    fn default() -> Self {
        Self::estree()
    }
}
