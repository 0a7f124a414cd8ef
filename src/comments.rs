//! Comment collection
//!
//! Comments reach the adapter twice: in the top-level comment list and
//! attached to nodes as leading, trailing or inner comments. Both sources
//! are merged, de-duplicated by range and ordered by position.

use rustc_hash::FxHashSet;
use serde_json::Value;

use crate::errors::Error;
use crate::estree::{Comment, CommentKind};
use crate::positions::Locator;
use crate::raw::RawPositions;

/// Merge the top-level comments with those observed on nodes.
pub fn collect_comments<'v>(
    locator: Locator<'_>,
    top_level: impl IntoIterator<Item = &'v Value>,
    observed: impl IntoIterator<Item = &'v Value>,
) -> Result<Vec<Comment>, Error> {
    let mut seen = FxHashSet::default();
    let mut comments = Vec::new();

    for raw in top_level.into_iter().chain(observed) {
        let comment = convert_comment(locator, raw)?;
        if seen.insert((comment.range.start(), comment.range.end())) {
            comments.push(comment);
        }
    }

    comments.sort_by_key(|comment| (comment.range.start(), comment.range.end()));
    tracing::trace!(count = comments.len(), "collected comments");
    Ok(comments)
}

fn convert_comment(locator: Locator<'_>, raw: &Value) -> Result<Comment, Error> {
    let map = raw
        .as_object()
        .ok_or_else(|| Error::malformed(format!("expected a comment object, found `{raw}`")))?;
    let kind = match map.get("type").and_then(Value::as_str) {
        Some("CommentLine" | "Line" | "InterpreterDirective") => CommentKind::Line,
        Some("CommentBlock" | "Block") => CommentKind::Block,
        other => {
            return Err(Error::malformed(format!(
                "unknown comment type `{}`",
                other.unwrap_or("<missing>")
            )));
        }
    };
    let value = map
        .get("value")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let range = locator.span(&RawPositions::from_map(map))?;

    Ok(Comment {
        kind,
        value,
        range,
        loc: locator.locate(range),
    })
}
