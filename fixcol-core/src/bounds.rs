//! Bounds validation and slicing
//!
//! Offsets are byte offsets into the line's UTF-8 encoding.

use crate::error::BoundsError;

/// Check a resolved `[start, end)` interval against a line length
///
/// An unbounded end must already be resolved to `line_len`. Returns the
/// offsets as unsigned byte positions once both are known to be in the line.
pub fn validate_bounds(
    line_len: usize,
    start: isize,
    end: isize,
) -> Result<(usize, usize), BoundsError> {
    let Some(start_pos) = offset_in(line_len, start) else {
        return Err(BoundsError::StartOutOfBounds {
            start,
            len: line_len,
        });
    };

    let Some(end_pos) = offset_in(line_len, end) else {
        return Err(BoundsError::EndOutOfBounds { end, len: line_len });
    };

    if end_pos < start_pos {
        return Err(BoundsError::EndBeforeStart {
            start: start_pos,
            end: end_pos,
        });
    }

    Ok((start_pos, end_pos))
}

/// Validate `[start, end)` and return that slice of `line`
///
/// Fails with [`BoundsError::SplitsCharacter`] when either bound lands inside
/// a multi-byte character.
pub fn slice_field(line: &str, start: isize, end: isize) -> Result<&str, BoundsError> {
    let (start, end) = validate_bounds(line.len(), start, end)?;

    for offset in [start, end] {
        if !line.is_char_boundary(offset) {
            return Err(BoundsError::SplitsCharacter { offset });
        }
    }

    Ok(&line[start..end])
}

// `None` when negative or past `line_len`
fn offset_in(line_len: usize, offset: isize) -> Option<usize> {
    usize::try_from(offset).ok().filter(|pos| *pos <= line_len)
}
