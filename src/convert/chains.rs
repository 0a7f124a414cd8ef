//! Optional chains.
//!
//! The source parser marks every link of `a?.b.c()` as optional-typed. The
//! target uses plain member and call nodes with an `optional` flag per link
//! and wraps the outermost link in one `ChainExpression`:
//!
//! ```text
//! OptionalCallExpression            ChainExpression
//!   OptionalMemberExpression   ──►    CallExpression{optional: false}
//!     OptionalMemberExpression          MemberExpression{optional: false}
//!       Identifier a                      MemberExpression{optional: true}
//!                                           Identifier a
//! ```
//!
//! Parentheses end a chain: `(a?.b).c` is a member access on a complete
//! chain.

use super::Converter;
use crate::errors::Error;
use crate::estree::Node;
use crate::raw::RawNode;

fn is_link(raw: RawNode<'_>) -> bool {
    raw.is("OptionalMemberExpression") || raw.is("OptionalCallExpression")
}

/// Rule for the outermost link of a chain
pub(super) fn optional_chain<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let range = cx.span(raw)?;
    let expression = link(cx, raw)?;
    Ok(cx
        .shell_at("ChainExpression", range)
        .with("expression", expression))
}

fn link<'a>(cx: &mut Converter<'a>, raw: RawNode<'a>) -> Result<Node, Error> {
    let is_member = raw.is("OptionalMemberExpression");
    let inner_field = if is_member { "object" } else { "callee" };

    let inner_raw = raw.required(inner_field)?;
    let inner = if is_link(inner_raw) && !inner_raw.is_parenthesized() {
        cx.observe(inner_raw)?;
        link(cx, inner_raw)?
    } else {
        cx.convert(inner_raw)?
    };

    if is_member {
        let property = cx.required(raw, "property")?;
        Ok(cx
            .shell(raw, "MemberExpression")?
            .with("object", inner)
            .with("property", property)
            .with("computed", raw.bool("computed"))
            .with("optional", raw.bool("optional")))
    } else {
        let arguments = cx.convert_list(raw, "arguments")?;
        Ok(cx
            .shell(raw, "CallExpression")?
            .with("callee", inner)
            .with("arguments", arguments)
            .with("optional", raw.bool("optional")))
    }
}
