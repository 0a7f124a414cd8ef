//! Position normalization
//!
//! Every node, token and comment leaves the pipeline with both `range` and
//! `loc`. Whatever the source parser reported is first reduced to an offset
//! range, then `loc` is computed from that range, so the two always agree.

use text_size::{TextRange, TextSize};

use crate::base::{SourceLocation, SourceText};
use crate::errors::Error;
use crate::raw::RawPositions;

/// Shared offset and `loc` conversion for one program text.
#[derive(Debug, Clone, Copy)]
pub struct Locator<'a> {
    source: &'a SourceText<'a>,
}

impl<'a> Locator<'a> {
    pub fn new(source: &'a SourceText<'a>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a SourceText<'a> {
        self.source
    }

    /// Reduce raw position metadata to an offset range.
    ///
    /// Prefers `start`/`end`, then `range`, then `loc`.
    pub fn span(&self, raw: &RawPositions) -> Result<TextRange, Error> {
        let (start, end) = if let (Some(start), Some(end)) = (raw.start, raw.end) {
            (TextSize::new(start), TextSize::new(end))
        } else if let Some([start, end]) = raw.range {
            (TextSize::new(start), TextSize::new(end))
        } else if let Some(loc) = raw.loc {
            let start = self.source.offset(loc.start.into());
            let end = self.source.offset(loc.end.into());
            match (start, end) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(Error::malformed(format!(
                        "location {}:{}-{}:{} is outside the program text",
                        loc.start.line, loc.start.column, loc.end.line, loc.end.column
                    )));
                }
            }
        } else {
            return Err(Error::malformed("entity without position information"));
        };

        if start > end {
            return Err(Error::malformed(format!(
                "inverted range {start:?}..{end:?}"
            )));
        }
        if end > self.source.len() {
            return Err(Error::malformed(format!(
                "range {start:?}..{end:?} ends past the program text ({:?})",
                self.source.len()
            )));
        }
        Ok(TextRange::new(start, end))
    }

    /// The `loc` for a range
    pub fn locate(&self, range: TextRange) -> SourceLocation {
        self.source.location(range)
    }

    /// The source text under a range, if the range is on character
    /// boundaries
    pub fn slice(&self, range: TextRange) -> Option<&'a str> {
        self.source.slice(range)
    }
}
