//! Record decoding (fail-fast, single pass)

use crate::bounds::slice_field;
use crate::coerce::Coercion;
use crate::config::DecodeConfig;
use crate::error::DecodeError;
use crate::layout::{FieldDescriptor, RecordLayout};
use crate::range::RangeSpec;
use std::borrow::Cow;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// What happened to one field during a decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The coerced value was written to the target
    Assigned,
    /// The field has no range spec
    Untagged,
    /// The field's kind has no coercion
    Unsupported,
}

/// Per-field outcome of a successful decode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport<'a> {
    /// Fields written, in layout order
    pub assigned: Vec<&'a str>,

    /// Fields skipped (untagged or unsupported kind), in layout order
    pub skipped: Vec<&'a str>,
}

/// Decode `line` into `target` following `layout`
///
/// Fields are processed in layout order:
/// 1. Untagged fields are skipped
/// 2. Tagged read-only fields fail with [`DecodeError::Assignment`]
/// 3. The range spec is parsed and its end resolved against the line length
/// 4. The bounds are validated and the substring sliced
/// 5. Fields whose kind has no coercion are skipped
/// 6. The formatter runs, if one is named
/// 7. The substring is coerced and assigned
///
/// The first failure aborts the decode. Fields assigned before it keep
/// their new values.
pub fn decode<R>(
    line: &str,
    target: &mut R,
    layout: &RecordLayout<R>,
    config: &DecodeConfig,
) -> Result<(), DecodeError> {
    decode_with_report(line, target, layout, config).map(|_| ())
}

/// Decode `line` into a fresh `R::default()`
pub fn decode_new<R: Default>(
    line: &str,
    layout: &RecordLayout<R>,
    config: &DecodeConfig,
) -> Result<R, DecodeError> {
    let mut target = R::default();
    decode(line, &mut target, layout, config)?;
    Ok(target)
}

/// Decode like [`decode`], reporting which fields were assigned or skipped
pub fn decode_with_report<'a, R>(
    line: &str,
    target: &mut R,
    layout: &'a RecordLayout<R>,
    config: &DecodeConfig,
) -> Result<DecodeReport<'a>, DecodeError> {
    layout.check_target(target)?;

    let mut report = DecodeReport::default();

    for field in layout.fields() {
        match decode_field(line, target, field, config)? {
            FieldOutcome::Assigned => report.assigned.push(field.name()),
            FieldOutcome::Untagged | FieldOutcome::Unsupported => {
                report.skipped.push(field.name())
            }
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Decoded {} byte line: {} fields assigned, {} skipped",
        line.len(),
        report.assigned.len(),
        report.skipped.len()
    );

    Ok(report)
}

/// Run the decode steps for a single field
pub fn decode_field<R>(
    line: &str,
    target: &mut R,
    field: &FieldDescriptor<R>,
    config: &DecodeConfig,
) -> Result<FieldOutcome, DecodeError> {
    let Some(spec) = field.range() else {
        return Ok(FieldOutcome::Untagged);
    };

    if !field.is_settable() {
        return Err(DecodeError::Assignment {
            field: field.name().to_string(),
        });
    }

    let range =
        RangeSpec::parse(spec, config.delimiter()).map_err(|source| DecodeError::FieldFormat {
            field: field.name().to_string(),
            source,
        })?;

    let (start, end) = range.resolve(line.len());
    let raw = slice_field(line, start, end).map_err(|source| DecodeError::FieldRange {
        field: field.name().to_string(),
        source,
    })?;

    #[cfg(feature = "logging")]
    trace!("Field {:?} sliced [{}, {}): {:?}", field.name(), start, end, raw);

    let Some(coercion) = Coercion::for_kind(field.kind()) else {
        #[cfg(feature = "logging")]
        debug!(
            "Skipping field {:?}: no coercion for kind {}",
            field.name(),
            field.kind()
        );
        return Ok(FieldOutcome::Unsupported);
    };

    let text = match field.formatter() {
        Some(name) => Cow::Owned(config.formatters().apply(field.name(), name, raw)?),
        None => Cow::Borrowed(raw),
    };

    let value = coercion
        .apply(&text)
        .map_err(|source| DecodeError::Conversion {
            field: field.name().to_string(),
            raw: text.to_string(),
            source,
        })?;

    if !field.assign(target, value) {
        return Err(DecodeError::Assignment {
            field: field.name().to_string(),
        });
    }

    Ok(FieldOutcome::Assigned)
}
