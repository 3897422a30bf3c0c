//! # Fixcol Core
//!
//! Decodes fixed-width text records into typed fields. Each field of a
//! record layout may carry a range spec (`"start,end"`, `"start"` or
//! `",end"`) selecting a byte range of the line, and an optional formatter
//! run on the substring before it is coerced to the field's kind.
//!
//! ## Modules
//!
//! - `constants`: Delimiter, boolean literals and standard formatter names
//! - `types`: Field kinds, decoded values and the `FieldValue` trait
//! - `error`: Error types for every decode stage
//! - `range`: Range spec parsing
//! - `bounds`: Range validation and slicing against a line
//! - `coerce`: String to typed value coercion
//! - `format`: Named formatter registry
//! - `config`: Per-call decode options
//! - `layout`: Field descriptors, layout builder and layout files
//! - `decoder`: The per-line decode pass

#![warn(missing_docs)]

pub mod bounds;
pub mod coerce;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod format;
pub mod layout;
pub mod range;
pub mod types;

// Re-export commonly used types
pub use config::DecodeConfig;
pub use decoder::{decode, decode_new, decode_with_report, DecodeReport};
pub use error::{BoundsError, BoxError, CoercionError, DecodeError, RangeFormatError};
pub use format::{Formatter, FormatterRegistry};
pub use layout::{FieldDescriptor, FieldSpec, LayoutSpec, RecordLayout, Slot};
pub use range::RangeSpec;
pub use types::{FieldKind, FieldValue, ScalarKind, Value};

/// Result type alias for decode operations
pub type Result<T> = core::result::Result<T, DecodeError>;
