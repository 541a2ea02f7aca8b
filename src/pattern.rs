//! Route and path tokenization.
//!
//! Both registered routes and request paths are split the same way: the
//! leading '/' is removed and the remainder is split on every '/'. Empty
//! segments are kept as literal empty strings, so `/` is the single segment
//! `""` and `/foo/` is `["foo", ""]`.

use crate::InsertError;

/// One segment of a registered route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Segment<'r> {
    Static(&'r str),
    Param(&'r str),
}

/// Splits a request path into segments, or returns `None` if the path does
/// not begin with '/'.
pub(crate) fn segments(path: &str) -> Option<std::str::Split<'_, char>> {
    path.strip_prefix('/').map(|rest| rest.split('/'))
}

/// Parses a route into its segments.
pub(crate) fn parse(route: &str) -> Result<Vec<Segment<'_>>, InsertError> {
    let segments = segments(route).ok_or_else(|| InsertError::MissingLeadingSlash(route.to_owned()))?;

    segments
        .map(|segment| parse_segment(route, segment))
        .collect()
}

fn parse_segment<'r>(route: &str, segment: &'r str) -> Result<Segment<'r>, InsertError> {
    let invalid = || InsertError::InvalidSegment {
        route: route.to_owned(),
        segment: segment.to_owned(),
    };

    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some("") => Err(InsertError::UnnamedParam(route.to_owned())),
        // a single placeholder, with no nested braces or pattern suffix
        Some(name) if !name.contains(['{', '}', ':']) => Ok(Segment::Param(name)),
        Some(_) => Err(invalid()),
        None if segment.contains(['{', '}']) => Err(invalid()),
        None => Ok(Segment::Static(segment)),
    }
}
