//! Borrowed view over a raw tree node.

use serde_json::{Map, Value};

use super::output::RawPositions;
use crate::errors::Error;

/// Fields a node may carry comments in
const COMMENT_FIELDS: [&str; 3] = ["leadingComments", "trailingComments", "innerComments"];

/// A raw node: a JSON object with a string `type`.
///
/// `get` treats explicit `null` the same as a missing field, which is how
/// the source parser marks absent optional children.
#[derive(Debug, Clone, Copy)]
pub struct RawNode<'a> {
    map: &'a Map<String, Value>,
    kind: &'a str,
}

impl<'a> RawNode<'a> {
    pub fn new(value: &'a Value) -> Result<Self, Error> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::malformed(format!("expected a node object, found `{value}`")))?;
        let kind = map
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::malformed("node object without a `type`"))?;
        Ok(Self { map, kind })
    }

    pub fn kind(&self) -> &'a str {
        self.kind
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn positions(&self) -> RawPositions {
        RawPositions::from_map(self.map)
    }

    /// Best-effort start offset, for error reporting
    pub fn start_offset(&self) -> u32 {
        let positions = self.positions();
        positions
            .start
            .or(positions.range.map(|[start, _]| start))
            .unwrap_or(0)
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    /// An optional child node
    pub fn node(&self, field: &str) -> Result<Option<RawNode<'a>>, Error> {
        self.get(field).map(RawNode::new).transpose()
    }

    /// A child node that must be present
    pub fn required(&self, field: &str) -> Result<RawNode<'a>, Error> {
        self.node(field)?
            .ok_or_else(|| Error::malformed(format!("`{}` without `{field}`", self.kind)))
    }

    /// A list of child nodes; `null` entries are elisions.
    ///
    /// A missing list reads as empty.
    pub fn nodes(&self, field: &str) -> Result<Vec<Option<RawNode<'a>>>, Error> {
        match self.get(field) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    if item.is_null() {
                        Ok(None)
                    } else {
                        RawNode::new(item).map(Some)
                    }
                })
                .collect(),
            Some(other) => Err(Error::malformed(format!(
                "`{}.{field}` should be a list, found `{other}`",
                self.kind
            ))),
        }
    }

    pub fn str(&self, field: &str) -> Option<&'a str> {
        self.get(field).and_then(Value::as_str)
    }

    /// A string field that must be present
    pub fn required_str(&self, field: &str) -> Result<&'a str, Error> {
        self.str(field)
            .ok_or_else(|| Error::malformed(format!("`{}` without `{field}`", self.kind)))
    }

    /// A boolean flag; missing reads as `false`
    pub fn bool(&self, field: &str) -> bool {
        self.get(field).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Whether a field is present and, for lists, non-empty
    pub fn has(&self, field: &str) -> bool {
        match self.get(field) {
            None => false,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    /// An entry of the node's `extra` record
    pub fn extra(&self, key: &str) -> Option<&'a Value> {
        self.get("extra")?.get(key).filter(|value| !value.is_null())
    }

    pub fn is_parenthesized(&self) -> bool {
        self.extra("parenthesized")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Comments the source parser attached to this node
    pub fn attached_comments(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let map = self.map;
        COMMENT_FIELDS
            .into_iter()
            .filter_map(move |field| map.get(field).and_then(Value::as_array))
            .flatten()
    }

    /// Every field name the node carries
    pub fn field_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.map.keys().map(String::as_str)
    }
}
