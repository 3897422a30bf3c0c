//! Range spec parsing
//!
//! A range spec names the half-open byte interval `[start, end)` a field
//! occupies in a line: `<start>?<delim><end>?` or a bare `<start>`.
//!
//! | Spec     | Interval          |
//! |----------|-------------------|
//! | `"7,21"` | `[7, 21)`         |
//! | `"17"`   | `[17, line_len)`  |
//! | `",14"`  | `[0, 14)`         |
//! | `"3,"`   | `[3, line_len)`   |
//!
//! Bounds are signed so that a negative offset parses and is then rejected by
//! bounds validation, like any other offset outside the line.

use crate::constants::DEFAULT_DELIMITER;
use crate::error::RangeFormatError;
use core::fmt;
use core::str::FromStr;
use memchr::memmem;

/// A parsed range spec
///
/// `end == None` means the range runs to the end of whatever line it is
/// resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RangeSpec {
    /// Inclusive start offset
    pub start: isize,

    /// Exclusive end offset, unbounded when absent
    pub end: Option<isize>,
}

impl RangeSpec {
    /// Create a bounded range
    pub const fn new(start: isize, end: isize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Create a range running from `start` to the end of the line
    pub const fn from_start(start: isize) -> Self {
        Self { start, end: None }
    }

    /// Parse a range spec using `delimiter` between the two bounds
    ///
    /// Both bounds are optional. A missing start is 0 and a missing end is
    /// unbounded. The delimiter may appear at most once. Negative bounds are
    /// accepted here and fail later in [`crate::bounds::validate_bounds`].
    pub fn parse(spec: &str, delimiter: &str) -> Result<Self, RangeFormatError> {
        if delimiter.is_empty() {
            return Err(RangeFormatError::EmptyDelimiter);
        }

        let (start_part, end_part) = split_once_strict(spec, delimiter)?;

        let start = if start_part.is_empty() {
            0
        } else {
            start_part
                .parse::<isize>()
                .map_err(|source| RangeFormatError::InvalidStart {
                    value: start_part.to_string(),
                    source,
                })?
        };

        let end = match end_part {
            Some(part) if !part.is_empty() => Some(part.parse::<isize>().map_err(|source| {
                RangeFormatError::InvalidEnd {
                    value: part.to_string(),
                    source,
                }
            })?),
            _ => None,
        };

        Ok(Self { start, end })
    }

    /// Resolve against a line length, turning an unbounded end into `line_len`
    pub fn resolve(&self, line_len: usize) -> (isize, isize) {
        let len = isize::try_from(line_len).unwrap_or(isize::MAX);
        (self.start, self.end.unwrap_or(len))
    }

    /// Check if the range runs to the end of the line
    pub const fn is_unbounded(&self) -> bool {
        self.end.is_none()
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}{}{}", self.start, DEFAULT_DELIMITER, end),
            None => write!(f, "{}", self.start),
        }
    }
}

impl FromStr for RangeSpec {
    type Err = RangeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_DELIMITER)
    }
}

/// Split on the first delimiter, rejecting a second occurrence
fn split_once_strict<'a>(
    spec: &'a str,
    delimiter: &str,
) -> Result<(&'a str, Option<&'a str>), RangeFormatError> {
    let mut hits = memmem::find_iter(spec.as_bytes(), delimiter.as_bytes());

    match hits.next() {
        None => Ok((spec, None)),
        Some(_) if hits.next().is_some() => Err(RangeFormatError::TooManyParts {
            spec: spec.to_string(),
        }),
        Some(pos) => Ok((&spec[..pos], Some(&spec[pos + delimiter.len()..]))),
    }
}
