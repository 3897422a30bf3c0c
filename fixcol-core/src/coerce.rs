//! Type coercion from raw substrings into [`Value`]s
//!
//! Dispatch is a match over [`FieldKind`]. Kinds without a coercion
//! ([`FieldKind::Other`]) yield `None`, which the decoder treats as "skip this
//! field" rather than as an error. Layouts can therefore tag fields for
//! reasons unrelated to decoding without breaking it.
//!
//! Numeric parsing is strict base 10 with per-width overflow checks: a
//! literal that does not fit the target width is an error, never a wrapped
//! value.

use crate::constants::{FALSE_LITERALS, TRUE_LITERALS};
use crate::error::CoercionError;
use crate::types::{FieldKind, ScalarKind, Value};
use bytes::Bytes;
use core::fmt::Display;
use core::str::FromStr;

/// A resolved coercion for one supported field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Parse into a bare scalar
    Scalar(ScalarKind),
    /// Parse into a scalar and wrap it as a present optional value
    Optional(ScalarKind),
    /// Copy the substring's bytes
    Bytes,
}

impl Coercion {
    /// Look up the coercion for a kind, `None` if the kind is unsupported
    pub fn for_kind(kind: &FieldKind) -> Option<Self> {
        match kind {
            FieldKind::Scalar(scalar) => Some(Coercion::Scalar(*scalar)),
            FieldKind::Optional(scalar) => Some(Coercion::Optional(*scalar)),
            FieldKind::Bytes => Some(Coercion::Bytes),
            FieldKind::Other(_) => None,
        }
    }

    /// Convert `raw` into a value of this coercion's kind
    pub fn apply(self, raw: &str) -> Result<Value, CoercionError> {
        match self {
            Coercion::Scalar(kind) => coerce_scalar(kind, raw),
            Coercion::Optional(kind) => {
                coerce_scalar(kind, raw).map(|value| Value::Optional(Box::new(value)))
            }
            Coercion::Bytes => Ok(Value::Bytes(Bytes::copy_from_slice(raw.as_bytes()))),
        }
    }
}

/// Coerce `raw` into `kind`
///
/// Returns `None` when `kind` has no registered coercion.
pub fn coerce(kind: &FieldKind, raw: &str) -> Option<Result<Value, CoercionError>> {
    Coercion::for_kind(kind).map(|coercion| coercion.apply(raw))
}

/// Coerce `raw` into a scalar kind
pub fn coerce_scalar(kind: ScalarKind, raw: &str) -> Result<Value, CoercionError> {
    let value = match kind {
        ScalarKind::Bool => Value::Bool(parse_bool(raw)?),
        ScalarKind::I8 => Value::I8(parse_number(kind, raw)?),
        ScalarKind::I16 => Value::I16(parse_number(kind, raw)?),
        ScalarKind::I32 => Value::I32(parse_number(kind, raw)?),
        ScalarKind::I64 => Value::I64(parse_number(kind, raw)?),
        ScalarKind::Isize => Value::Isize(parse_number(kind, raw)?),
        ScalarKind::U8 => Value::U8(parse_unsigned(kind, raw)?),
        ScalarKind::U16 => Value::U16(parse_unsigned(kind, raw)?),
        ScalarKind::U32 => Value::U32(parse_unsigned(kind, raw)?),
        ScalarKind::U64 => Value::U64(parse_unsigned(kind, raw)?),
        ScalarKind::Usize => Value::Usize(parse_unsigned(kind, raw)?),
        ScalarKind::F32 => {
            let value: f32 = parse_number(kind, raw)?;
            check_finite(kind, raw, value.is_infinite())?;
            Value::F32(value)
        }
        ScalarKind::F64 => {
            let value: f64 = parse_number(kind, raw)?;
            check_finite(kind, raw, value.is_infinite())?;
            Value::F64(value)
        }
        ScalarKind::String => Value::String(raw.to_string()),
    };

    Ok(value)
}

/// Parse a boolean literal
pub fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    if TRUE_LITERALS.contains(&raw) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&raw) {
        Ok(false)
    } else {
        Err(CoercionError::new(
            ScalarKind::Bool,
            format!("invalid boolean literal {:?}", raw),
        ))
    }
}

fn parse_number<T>(kind: ScalarKind, raw: &str) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>()
        .map_err(|e| CoercionError::new(kind, e.to_string()))
}

// Unsigned literals take no sign at all, not even `+`
fn parse_unsigned<T>(kind: ScalarKind, raw: &str) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: Display,
{
    if raw.starts_with('+') {
        return Err(CoercionError::new(kind, "invalid digit found in string"));
    }
    parse_number(kind, raw)
}

/// Reject float literals that overflowed to infinity
fn check_finite(kind: ScalarKind, raw: &str, infinite: bool) -> Result<(), CoercionError> {
    if !infinite {
        return Ok(());
    }

    let unsigned = raw.trim_start_matches(|c: char| c == '+' || c == '-').to_ascii_lowercase();
    if unsigned == "inf" || unsigned == "infinity" {
        Ok(())
    } else {
        Err(CoercionError::new(
            kind,
            format!("value {:?} out of range", raw),
        ))
    }
}
