//! Core types for fixcol fields: kinds, coerced values, typed extraction

use bytes::Bytes;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Scalar target types a field can be coerced into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `String`
    String,
}

impl ScalarKind {
    /// Every scalar kind, in declaration order
    pub const ALL: [ScalarKind; 14] = [
        ScalarKind::Bool,
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
        ScalarKind::Isize,
        ScalarKind::U8,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::Usize,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::String,
    ];

    /// Name used in layout files
    pub const fn name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::String => "string",
        }
    }

    /// Look up a scalar kind by its layout-file name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Check if this is a numeric kind
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, ScalarKind::Bool | ScalarKind::String)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target type of a field
///
/// The textual form (used by layout files) is the scalar name, `bytes`,
/// `option<T>` or `?T` for optional scalars. Any other name is kept as
/// [`FieldKind::Other`]: such fields have no coercion and are skipped during
/// decoding rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// A plain scalar
    Scalar(ScalarKind),
    /// A nullable scalar; decoding always produces a present value
    Optional(ScalarKind),
    /// Raw bytes of the substring, no further decoding
    Bytes,
    /// A type with no registered coercion
    Other(String),
}

impl FieldKind {
    /// Check if the decoder knows how to coerce into this kind
    pub fn is_supported(&self) -> bool {
        !matches!(self, FieldKind::Other(_))
    }

    /// Scalar underlying a plain or optional kind
    pub fn scalar(&self) -> Option<ScalarKind> {
        match self {
            FieldKind::Scalar(kind) | FieldKind::Optional(kind) => Some(*kind),
            FieldKind::Bytes | FieldKind::Other(_) => None,
        }
    }
}

impl From<&str> for FieldKind {
    fn from(name: &str) -> Self {
        let name = name.trim();
        if name == "bytes" {
            return FieldKind::Bytes;
        }

        let optional = name
            .strip_prefix("option<")
            .and_then(|rest| rest.strip_suffix('>'))
            .or_else(|| name.strip_prefix('?'));

        match optional {
            Some(inner) => match ScalarKind::from_name(inner.trim()) {
                Some(kind) => FieldKind::Optional(kind),
                None => FieldKind::Other(name.to_string()),
            },
            None => match ScalarKind::from_name(name) {
                Some(kind) => FieldKind::Scalar(kind),
                None => FieldKind::Other(name.to_string()),
            },
        }
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        FieldKind::from(name.as_str())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.to_string()
    }
}

impl From<ScalarKind> for FieldKind {
    fn from(kind: ScalarKind) -> Self {
        FieldKind::Scalar(kind)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(kind) => write!(f, "{}", kind),
            FieldKind::Optional(kind) => write!(f, "option<{}>", kind),
            FieldKind::Bytes => f.write_str("bytes"),
            FieldKind::Other(name) => f.write_str(name),
        }
    }
}

/// A coerced field value, ready to be assigned
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `bool`
    Bool(bool),
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `isize`
    Isize(isize),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `usize`
    Usize(usize),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// `String`
    String(String),
    /// Raw bytes
    Bytes(Bytes),
    /// A present value for a nullable slot
    Optional(Box<Value>),
}

impl Value {
    /// Kind this value was coerced into
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Bool(_) => FieldKind::Scalar(ScalarKind::Bool),
            Value::I8(_) => FieldKind::Scalar(ScalarKind::I8),
            Value::I16(_) => FieldKind::Scalar(ScalarKind::I16),
            Value::I32(_) => FieldKind::Scalar(ScalarKind::I32),
            Value::I64(_) => FieldKind::Scalar(ScalarKind::I64),
            Value::Isize(_) => FieldKind::Scalar(ScalarKind::Isize),
            Value::U8(_) => FieldKind::Scalar(ScalarKind::U8),
            Value::U16(_) => FieldKind::Scalar(ScalarKind::U16),
            Value::U32(_) => FieldKind::Scalar(ScalarKind::U32),
            Value::U64(_) => FieldKind::Scalar(ScalarKind::U64),
            Value::Usize(_) => FieldKind::Scalar(ScalarKind::Usize),
            Value::F32(_) => FieldKind::Scalar(ScalarKind::F32),
            Value::F64(_) => FieldKind::Scalar(ScalarKind::F64),
            Value::String(_) => FieldKind::Scalar(ScalarKind::String),
            Value::Bytes(_) => FieldKind::Bytes,
            Value::Optional(inner) => match inner.kind() {
                FieldKind::Scalar(kind) => FieldKind::Optional(kind),
                other => other,
            },
        }
    }
}

/// Rust types that a decoded field can be assigned into
///
/// Typed setters registered on a layout use this to declare the field's kind
/// and to pull the matching Rust value out of a coerced [`Value`].
pub trait FieldValue: Sized {
    /// Kind to coerce the raw substring into
    fn kind() -> FieldKind;

    /// Extract the Rust value; `None` when the value has another kind
    fn from_value(value: Value) -> Option<Self>;
}

/// Field values that are plain scalars and can be wrapped in `Option`
pub trait ScalarValue: FieldValue {
    /// Scalar kind of this type
    fn scalar_kind() -> ScalarKind;
}

macro_rules! scalar_field_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Scalar(ScalarKind::$kind)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$kind(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl ScalarValue for $ty {
                fn scalar_kind() -> ScalarKind {
                    ScalarKind::$kind
                }
            }
        )*
    };
}

scalar_field_value! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl<T: ScalarValue> FieldValue for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(T::scalar_kind())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Optional(inner) => T::from_value(*inner).map(Some),
            _ => None,
        }
    }
}

impl FieldValue for Bytes {
    fn kind() -> FieldKind {
        FieldKind::Bytes
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl FieldValue for Vec<u8> {
    fn kind() -> FieldKind {
        FieldKind::Bytes
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(bytes) => Some(bytes.to_vec()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_parse() {
        for kind in ScalarKind::ALL {
            assert_eq!(FieldKind::from(kind.name()), FieldKind::Scalar(kind));
        }
        assert_eq!(FieldKind::from("bytes"), FieldKind::Bytes);
        assert_eq!(
            FieldKind::from("option<u16>"),
            FieldKind::Optional(ScalarKind::U16)
        );
        assert_eq!(FieldKind::from("?bool"), FieldKind::Optional(ScalarKind::Bool));
    }

    #[test]
    fn test_unknown_kind_is_other() {
        assert_eq!(
            FieldKind::from("timestamp"),
            FieldKind::Other("timestamp".to_string())
        );
        assert_eq!(
            FieldKind::from("option<bytes>"),
            FieldKind::Other("option<bytes>".to_string())
        );
        assert!(!FieldKind::from("map").is_supported());
    }

    #[test]
    fn test_kind_display_round_trips() {
        for name in ["i64", "option<f32>", "bytes", "string", "decimal"] {
            assert_eq!(FieldKind::from(name).to_string(), name);
        }
    }

    #[test]
    fn test_field_value_kinds() {
        assert_eq!(<u8 as FieldValue>::kind(), FieldKind::Scalar(ScalarKind::U8));
        assert_eq!(
            <Option<String> as FieldValue>::kind(),
            FieldKind::Optional(ScalarKind::String)
        );
        assert_eq!(<Vec<u8> as FieldValue>::kind(), FieldKind::Bytes);
    }

    #[test]
    fn test_from_value_rejects_mismatch() {
        assert_eq!(i32::from_value(Value::I32(7)), Some(7));
        assert_eq!(i32::from_value(Value::I64(7)), None);
        assert_eq!(
            Option::<i32>::from_value(Value::Optional(Box::new(Value::I32(7)))),
            Some(Some(7))
        );
        assert_eq!(Option::<i32>::from_value(Value::I32(7)), None);
    }

    #[test]
    fn test_value_kind() {
        let value = Value::Optional(Box::new(Value::F64(1.5)));
        assert_eq!(value.kind(), FieldKind::Optional(ScalarKind::F64));
        assert_eq!(Value::Bytes(Bytes::from_static(b"ab")).kind(), FieldKind::Bytes);
    }
}
