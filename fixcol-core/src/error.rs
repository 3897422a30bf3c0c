//! Error types for fixcol decoding

use crate::types::FieldKind;
use core::num::ParseIntError;

/// Error type returned by user formatters
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Range spec grammar violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeFormatError {
    /// The range spec contains the delimiter more than once
    #[error("invalid range format: {spec:?}")]
    TooManyParts {
        /// The offending spec.
        spec: String,
    },

    /// The start bound is not a non-negative integer
    #[error("invalid start index {value:?}: {source}")]
    InvalidStart {
        /// The text that failed to parse.
        value: String,
        /// The integer parse failure.
        source: ParseIntError,
    },

    /// The end bound is not a non-negative integer
    #[error("invalid end index {value:?}: {source}")]
    InvalidEnd {
        /// The text that failed to parse.
        value: String,
        /// The integer parse failure.
        source: ParseIntError,
    },

    /// The configured delimiter is empty
    #[error("range delimiter must not be empty")]
    EmptyDelimiter,
}

/// Resolved bounds that do not fit the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// Start offset is negative or past the end of the line
    #[error("start index out of bounds: {start} not in 0..={len}")]
    StartOutOfBounds {
        /// The start offset.
        start: isize,
        /// The line length in bytes.
        len: usize,
    },

    /// End offset is negative or past the end of the line
    #[error("end index out of bounds: {end} not in 0..={len}")]
    EndOutOfBounds {
        /// The end offset.
        end: isize,
        /// The line length in bytes.
        len: usize,
    },

    /// End offset precedes start offset
    #[error("end index must be greater or equal to start index: {end} < {start}")]
    EndBeforeStart {
        /// The start offset.
        start: usize,
        /// The end offset.
        end: usize,
    },

    /// A bound falls inside a multi-byte UTF-8 character
    #[error("byte offset {offset} splits a multi-byte character")]
    SplitsCharacter {
        /// The offending offset.
        offset: usize,
    },
}

/// A substring that cannot be parsed into its target kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse as {kind}: {message}")]
pub struct CoercionError {
    /// The target kind.
    pub kind: FieldKind,
    /// Why parsing failed.
    pub message: String,
}

impl CoercionError {
    /// Create a new coercion error
    pub fn new(kind: impl Into<FieldKind>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while decoding a record
///
/// Every variant aborts the whole record. Fields assigned before the failing
/// one keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The target is not a structured record
    #[error("invalid decode target: {reason}")]
    InvalidTarget {
        /// Why the target was rejected.
        reason: String,
    },

    /// A tagged field has no writable slot
    #[error("cannot assign any value to field {field:?}")]
    Assignment {
        /// The field name.
        field: String,
    },

    /// The field's range spec is malformed
    #[error("format error on field {field:?}: {source}")]
    FieldFormat {
        /// The field name.
        field: String,
        /// The grammar violation.
        #[source]
        source: RangeFormatError,
    },

    /// The field's resolved range does not fit the line
    #[error("invalid indexes on field {field:?}: {source}")]
    FieldRange {
        /// The field name.
        field: String,
        /// The bounds violation.
        #[source]
        source: BoundsError,
    },

    /// The field names a formatter that is not registered
    #[error("unknown formatter {name:?} on field {field:?}")]
    UnknownFormatter {
        /// The field name.
        field: String,
        /// The formatter name.
        name: String,
    },

    /// A registered formatter failed
    #[error("formatter {name:?} failed on field {field:?}: {source}")]
    Formatter {
        /// The field name.
        field: String,
        /// The formatter name.
        name: String,
        /// The formatter's own error.
        #[source]
        source: BoxError,
    },

    /// The substring does not parse into the field's kind
    #[error("cannot assign value {raw:?} to field {field:?}: {source}")]
    Conversion {
        /// The field name.
        field: String,
        /// The text handed to coercion (after formatting).
        raw: String,
        /// The parse failure.
        #[source]
        source: CoercionError,
    },
}

impl DecodeError {
    /// Name of the field that failed, if the error is field-specific
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::InvalidTarget { .. } => None,
            DecodeError::Assignment { field }
            | DecodeError::FieldFormat { field, .. }
            | DecodeError::FieldRange { field, .. }
            | DecodeError::UnknownFormatter { field, .. }
            | DecodeError::Formatter { field, .. }
            | DecodeError::Conversion { field, .. } => Some(field),
        }
    }
}
