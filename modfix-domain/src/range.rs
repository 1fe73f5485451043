use modfix_manifest::{PositionError, PositionMapper, Span};
use modfix_types::Range;

/// Convert a byte-offset pair into a protocol range.
pub fn range_from_offsets(
    mapper: &dyn PositionMapper,
    start: usize,
    end: usize,
) -> Result<Range, PositionError> {
    Ok(Range::new(mapper.position(start)?, mapper.position(end)?))
}

pub fn range_from_span(mapper: &dyn PositionMapper, span: Span) -> Result<Range, PositionError> {
    range_from_offsets(mapper, span.start, span.end)
}
