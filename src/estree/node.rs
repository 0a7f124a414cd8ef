//! Target tree nodes.
//!
//! A [`Node`] is a type name, a span in both conventions, and an ordered
//! field map. Field order is output order.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::SourceLocation;

/// A node in the target dialect
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: SmolStr,
    pub range: TextRange,
    pub loc: SourceLocation,
    pub fields: IndexMap<SmolStr, Field>,
}

/// One field value of a target node
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// An absent optional child
    Null,
    Node(Box<Node>),
    /// A child list; `None` entries are elisions (`[a, , b]`)
    Nodes(Vec<Option<Node>>),
    /// A JSON scalar, or a plain record such as `regex`
    Value(Value),
}

impl Node {
    pub fn new(kind: impl Into<SmolStr>, range: TextRange, loc: SourceLocation) -> Self {
        Self {
            kind: kind.into(),
            range,
            loc,
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, name: &str, field: impl Into<Field>) -> Self {
        self.set(name, field);
        self
    }

    /// Set a field, keeping its position if it already exists
    pub fn set(&mut self, name: &str, field: impl Into<Field>) {
        self.fields.insert(SmolStr::new(name), field.into());
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// A single child node
    pub fn child(&self, name: &str) -> Option<&Node> {
        match self.fields.get(name)? {
            Field::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The present entries of a child list
    pub fn children(&self, name: &str) -> impl Iterator<Item = &Node> {
        let list = match self.fields.get(name) {
            Some(Field::Nodes(nodes)) => nodes.as_slice(),
            _ => &[],
        };
        list.iter().flatten()
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            Field::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn bool_field(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(Field::Value(Value::Bool(true))))
    }

    /// Every child node, across all fields, in field order
    pub fn child_nodes(&self) -> impl Iterator<Item = &Node> {
        self.fields.values().flat_map(Field::nodes)
    }

    /// Visit this node and every descendant in pre-order
    pub fn walk<'n>(&'n self, visit: &mut impl FnMut(&'n Node)) {
        visit(self);
        for child in self.child_nodes() {
            child.walk(visit);
        }
    }

    pub fn to_json(&self) -> Value {
        // Serializing into a Value can't fail: every key is a string.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Field {
    /// The nodes held directly by this field
    pub fn nodes(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        match self {
            Field::Node(node) => Box::new(std::iter::once(node.as_ref())),
            Field::Nodes(nodes) => Box::new(nodes.iter().flatten()),
            Field::Null | Field::Value(_) => Box::new(std::iter::empty()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Node> for Field {
    fn from(node: Node) -> Self {
        Field::Node(Box::new(node))
    }
}

impl From<Option<Node>> for Field {
    fn from(node: Option<Node>) -> Self {
        node.map_or(Field::Null, Field::from)
    }
}

impl From<Vec<Node>> for Field {
    fn from(nodes: Vec<Node>) -> Self {
        Field::Nodes(nodes.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<Node>>> for Field {
    fn from(nodes: Vec<Option<Node>>) -> Self {
        Field::Nodes(nodes)
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Field::Value(value)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Value(Value::Bool(value))
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Value(Value::String(value))
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 3))?;
        map.serialize_entry("type", self.kind.as_str())?;
        for (name, field) in &self.fields {
            map.serialize_entry(name.as_str(), field)?;
        }
        map.serialize_entry("range", &super::range_pair(self.range))?;
        map.serialize_entry("loc", &self.loc)?;
        map.end()
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Null => serializer.serialize_none(),
            Field::Node(node) => node.serialize(serializer),
            Field::Nodes(nodes) => nodes.serialize(serializer),
            Field::Value(value) => value.serialize(serializer),
        }
    }
}
