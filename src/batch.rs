//! Parallel adaptation of independent programs.

use rayon::prelude::*;

use crate::assemble::ParseResult;
use crate::errors::Error;
use crate::invoke::{ParseOptions, SourceParser};
use crate::parse_for_lint;

/// Adapt every program in `sources` on the rayon pool.
///
/// Results come back in input order, one per source.
pub fn parse_batch<P, S>(
    parser: &P,
    sources: &[S],
    options: &ParseOptions,
) -> Vec<Result<ParseResult, Error>>
where
    P: SourceParser + Sync + ?Sized,
    S: AsRef<str> + Sync,
{
    tracing::debug!(count = sources.len(), "parsing batch");
    sources
        .par_iter()
        .map(|text| parse_for_lint(parser, text.as_ref(), options))
        .collect()
}
