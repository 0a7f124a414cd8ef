//! Node transformation
//!
//! Raw nodes are converted by looking their type up in a [`RuleTable`] and
//! running the registered rule. A rule builds every field of its target
//! type, recursing through the [`Converter`] for children, so a raw type
//! with no rule anywhere in the tree fails the whole conversion.
//!
//! ```text
//! RawNode ──► RuleTable[kind] ──► Rule(cx, raw) ──► Node
//!                  │                    │
//!                  └─ missing: Error::UnsupportedConstruct
//!                                       └─ children via cx.convert(...)
//! ```

mod chains;
mod classes;
mod functions;
mod jsx;
mod literals;
mod modules;
mod rules;
mod templates;

pub use jsx::{ElementKind, element_kind, is_intrinsic};

use rustc_hash::FxHashMap;
use serde_json::Value;
use text_size::TextRange;

use crate::base::SourceText;
use crate::errors::Error;
use crate::estree::{Field, Node};
use crate::invoke::SourceType;
use crate::positions::Locator;
use crate::raw::RawNode;

/// A conversion rule for one raw node type
pub type Rule = for<'a> fn(&mut Converter<'a>, RawNode<'a>) -> Result<Node, Error>;

/// Source-parser-only fields that carry type or declaration annotations
const ANNOTATION_FIELDS: &[&str] = &[
    "typeAnnotation",
    "typeParameters",
    "typeArguments",
    "returnType",
    "superTypeParameters",
    "superTypeArguments",
    "implements",
    "importKind",
    "exportKind",
    "variance",
    "declare",
    "definite",
    "abstract",
    "override",
    "accessibility",
    "readonly",
    "predicate",
    "phase",
];

// ============================================================================
// RULE TABLE
// ============================================================================

/// Raw type name to conversion rule, built fresh for each conversion
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: FxHashMap<&'static str, Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self {
            rules: rules::RULES.iter().copied().collect(),
        }
    }

    pub fn get(&self, kind: &str) -> Option<Rule> {
        self.rules.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    /// Every raw type with a registered rule
    pub fn registered() -> impl Iterator<Item = &'static str> {
        rules::RULES.iter().map(|(kind, _)| *kind)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONVERTER
// ============================================================================

/// Per-call conversion state: the rule table, the position normalizer and
/// the comments seen on nodes so far
pub struct Converter<'a> {
    locator: Locator<'a>,
    rules: RuleTable,
    source_type: SourceType,
    comments: Vec<&'a Value>,
}

impl<'a> Converter<'a> {
    pub fn new(locator: Locator<'a>, source_type: SourceType) -> Self {
        Self {
            locator,
            rules: RuleTable::new(),
            source_type,
            comments: Vec::new(),
        }
    }

    /// Convert one raw node through its registered rule.
    pub fn convert(&mut self, raw: RawNode<'a>) -> Result<Node, Error> {
        self.observe(raw)?;
        let rule = self
            .rules
            .get(raw.kind())
            .ok_or_else(|| Error::unsupported(raw.kind(), raw.start_offset()))?;
        tracing::trace!(kind = raw.kind(), "converting node");
        rule(self, raw)
    }

    /// Bookkeeping every raw node gets, whether or not it goes through
    /// [`Converter::convert`]: collect its comments, reject decorators and
    /// trace dropped annotations.
    pub(crate) fn observe(&mut self, raw: RawNode<'a>) -> Result<(), Error> {
        self.comments.extend(raw.attached_comments());

        if raw.has("decorators") {
            let offset = raw
                .nodes("decorators")?
                .into_iter()
                .flatten()
                .next()
                .map_or(raw.start_offset(), |decorator| decorator.start_offset());
            return Err(Error::unsupported("Decorator", offset));
        }

        for field in ANNOTATION_FIELDS {
            let dropped = match raw.get(field) {
                None | Some(Value::Bool(false)) => false,
                Some(Value::String(kind)) => kind != "value",
                Some(Value::Array(items)) => !items.is_empty(),
                Some(_) => true,
            };
            if dropped {
                tracing::debug!(
                    node = raw.kind(),
                    field = *field,
                    offset = raw.start_offset(),
                    "dropping annotation field"
                );
            }
        }
        Ok(())
    }

    /// Convert an optional child
    pub fn convert_field(&mut self, raw: RawNode<'a>, name: &str) -> Result<Option<Node>, Error> {
        raw.node(name)?.map(|child| self.convert(child)).transpose()
    }

    /// Convert a child that must be present
    pub fn required(&mut self, raw: RawNode<'a>, name: &str) -> Result<Node, Error> {
        let child = raw.required(name)?;
        self.convert(child)
    }

    /// Convert a child list, keeping elisions
    pub fn convert_list(
        &mut self,
        raw: RawNode<'a>,
        name: &str,
    ) -> Result<Vec<Option<Node>>, Error> {
        raw.nodes(name)?
            .into_iter()
            .map(|item| item.map(|child| self.convert(child)).transpose())
            .collect()
    }

    /// Convert a child list that has no elisions
    pub fn convert_all(&mut self, raw: RawNode<'a>, name: &str) -> Result<Vec<Node>, Error> {
        raw.nodes(name)?
            .into_iter()
            .flatten()
            .map(|child| self.convert(child))
            .collect()
    }

    pub fn span(&self, raw: RawNode<'a>) -> Result<TextRange, Error> {
        self.locator.span(&raw.positions())
    }

    /// An empty node of `kind` spanning the raw node
    pub fn shell(&self, raw: RawNode<'a>, kind: &str) -> Result<Node, Error> {
        Ok(self.shell_at(kind, self.span(raw)?))
    }

    pub fn shell_at(&self, kind: &str, range: TextRange) -> Node {
        Node::new(kind, range, self.locator.locate(range))
    }

    /// Start building a node of `kind` spanning the raw node
    pub fn build<'c>(&'c mut self, raw: RawNode<'a>, kind: &str) -> Result<Build<'c, 'a>, Error> {
        let node = self.shell(raw, kind)?;
        Ok(Build {
            cx: self,
            raw,
            node,
        })
    }

    pub fn locator(&self) -> Locator<'a> {
        self.locator
    }

    pub fn source(&self) -> &'a SourceText<'a> {
        self.locator.source()
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Record a comment-like raw entity found outside the comment fields
    pub(crate) fn observe_comment(&mut self, comment: &'a Value) {
        self.comments.push(comment);
    }

    /// The comments observed on nodes during conversion
    pub fn into_comments(self) -> Vec<&'a Value> {
        self.comments
    }
}

/// Field-by-field construction of one target node
pub struct Build<'c, 'a> {
    cx: &'c mut Converter<'a>,
    raw: RawNode<'a>,
    node: Node,
}

impl<'c, 'a> Build<'c, 'a> {
    /// Convert an optional child field under the same name
    pub fn child(mut self, name: &str) -> Result<Self, Error> {
        let child = self.cx.convert_field(self.raw, name)?;
        self.node.set(name, child);
        Ok(self)
    }

    /// Convert a child list under the same name
    pub fn list(mut self, name: &str) -> Result<Self, Error> {
        let children = self.cx.convert_list(self.raw, name)?;
        self.node.set(name, children);
        Ok(self)
    }

    /// Copy a scalar field; missing reads as `null`
    pub fn value(mut self, name: &str) -> Self {
        let value = self.raw.get(name).cloned().unwrap_or(Value::Null);
        self.node.set(name, value);
        self
    }

    /// Copy a boolean field; missing reads as `false`
    pub fn flag(mut self, name: &str) -> Self {
        let flag = self.raw.bool(name);
        self.node.set(name, flag);
        self
    }

    pub fn set(mut self, name: &str, field: impl Into<Field>) -> Self {
        self.node.set(name, field);
        self
    }

    pub fn finish(self) -> Node {
        self.node
    }
}

/// Convert a raw `Program`, returning it with every comment observed on
/// its nodes.
pub fn convert_program<'a>(
    locator: Locator<'a>,
    program: &'a Value,
    source_type: SourceType,
) -> Result<(Node, Vec<&'a Value>), Error> {
    let raw = RawNode::new(program)?;
    if !raw.is("Program") {
        return Err(Error::malformed(format!(
            "expected a `Program` at the root, found `{}`",
            raw.kind()
        )));
    }

    let mut cx = Converter::new(locator, source_type);
    let node = cx.convert(raw)?;
    Ok((node, cx.into_comments()))
}
