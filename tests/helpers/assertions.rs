//! Structural assertions over adapted results.

use std::fmt;

use estree_bridge::{Field, Node, ParseResult, SourceText, TextRange, VisitorKeys};

/// A node whose fields disagree with the visitor keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub kind: String,
    pub range: TextRange,
    pub detail: String,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}: {}", self.kind, self.range, self.detail)
    }
}

/// Every node type must have visitor keys, and every node-bearing field
/// must be one of them.
pub fn shape_mismatches(ast: &Node, keys: &VisitorKeys) -> Vec<ShapeMismatch> {
    let mut mismatches = Vec::new();
    ast.walk(&mut |node| {
        let mismatch = |detail: String| ShapeMismatch {
            kind: node.kind.to_string(),
            range: node.range,
            detail,
        };
        let Some(fields) = keys.get(&node.kind) else {
            mismatches.push(mismatch("no visitor keys".to_string()));
            return;
        };
        for (name, field) in &node.fields {
            let holds_nodes = matches!(field, Field::Node(_))
                || matches!(field, Field::Nodes(list) if list.iter().any(Option::is_some));
            if holds_nodes && !fields.contains(name) {
                mismatches.push(mismatch(format!("field `{name}` holds nodes but is not a visitor key")));
            }
        }
    });
    mismatches
}

pub fn assert_shapes_match(result: &ParseResult) {
    let keys = VisitorKeys::estree();
    let mismatches = shape_mismatches(&result.ast, &keys);
    assert!(
        mismatches.is_empty(),
        "shape mismatches:\n{}",
        mismatches
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Every node, token and comment carries a `loc` equal to the one derived
/// from its `range`, and `loc` maps back to the same offsets.
pub fn assert_positions_agree(text: &str, result: &ParseResult) {
    let source = SourceText::new(text);
    let check = |what: &str, range: TextRange, loc: estree_bridge::SourceLocation| {
        assert_eq!(loc, source.location(range), "{what} at {range:?}: loc disagrees with range");
        assert_eq!(source.offset(loc.start), Some(range.start()), "{what}: start does not round-trip");
        assert_eq!(source.offset(loc.end), Some(range.end()), "{what}: end does not round-trip");
    };

    result.ast.walk(&mut |node| check(&node.kind, node.range, node.loc));
    for token in &result.tokens {
        check(token.kind.as_str(), token.range, token.loc);
    }
    for comment in &result.comments {
        check("comment", comment.range, comment.loc);
    }
}

/// Find the first node of `kind` in pre-order
pub fn find<'n>(ast: &'n Node, kind: &str) -> &'n Node {
    let mut found = None;
    ast.walk(&mut |node| {
        if found.is_none() && node.is(kind) {
            found = Some(node);
        }
    });
    found.unwrap_or_else(|| panic!("no `{kind}` node in the tree"))
}

/// `(type, value)` for every token
pub fn token_summary(result: &ParseResult) -> Vec<(String, String)> {
    result
        .tokens
        .iter()
        .map(|token| (token.kind.as_str().to_string(), token.value.clone()))
        .collect()
}

pub fn expected_tokens(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(kind, value)| (kind.to_string(), value.to_string()))
        .collect()
}
