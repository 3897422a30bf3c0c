//! Record layouts: the field descriptor table a decode runs over
//!
//! A [`RecordLayout`] lists, in declaration order, every field slot of a
//! target type `R`: its name, target [`FieldKind`], optional range spec,
//! optional formatter name and a setter that writes the coerced [`Value`]
//! into the target. Layouts are built once and shared read-only.
//!
//! ```
//! use fixcol_core::{DecodeConfig, RecordLayout};
//!
//! #[derive(Default)]
//! struct Employee {
//!     last: String,
//!     salary: u32,
//! }
//!
//! let layout = RecordLayout::<Employee>::builder()
//!     .formatted_field("last", "0,8", "trim", |e: &mut Employee, v: String| e.last = v)
//!     .field("salary", "28,36", |e: &mut Employee, v: u32| e.salary = v)
//!     .build();
//!
//! let config = DecodeConfig::new().with_standard_formatters();
//! let employee = layout
//!     .decode_new("SMITH   JOHN      SALES     00050000", &config)
//!     .unwrap();
//!
//! assert_eq!(employee.last, "SMITH");
//! assert_eq!(employee.salary, 50000);
//! ```

use crate::coerce::Coercion;
use crate::config::DecodeConfig;
use crate::error::DecodeError;
use crate::range::RangeSpec;
use crate::types::{FieldKind, FieldValue, Value};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Writes a coerced value into a target; returns `false` if the value is rejected
pub type Setter<R> = Arc<dyn Fn(&mut R, Value) -> bool + Send + Sync>;

/// Check run on the target before any field is touched
pub type TargetGuard<R> = fn(&R) -> Result<(), String>;

/// Whether a field slot can be written
pub enum Slot<R> {
    /// The slot has a setter
    Writable(Setter<R>),
    /// The slot cannot be written; decoding a tagged read-only field fails
    ReadOnly,
}

impl<R> Clone for Slot<R> {
    fn clone(&self) -> Self {
        match self {
            Slot::Writable(setter) => Slot::Writable(Arc::clone(setter)),
            Slot::ReadOnly => Slot::ReadOnly,
        }
    }
}

/// One field slot of a record layout
pub struct FieldDescriptor<R> {
    name: String,
    kind: FieldKind,
    range: Option<String>,
    formatter: Option<String>,
    slot: Slot<R>,
}

impl<R> FieldDescriptor<R> {
    /// Create an untagged, read-only descriptor
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            range: None,
            formatter: None,
            slot: Slot::ReadOnly,
        }
    }

    /// Tag the field with a range spec
    pub fn with_range(mut self, spec: impl Into<String>) -> Self {
        self.range = Some(spec.into());
        self
    }

    /// Run the named formatter before coercion
    pub fn with_formatter(mut self, name: impl Into<String>) -> Self {
        self.formatter = Some(name.into());
        self
    }

    /// Make the slot writable through `setter`
    pub fn with_setter<F>(self, setter: F) -> Self
    where
        F: Fn(&mut R, Value) -> bool + Send + Sync + 'static,
    {
        self.with_slot(Slot::Writable(Arc::new(setter)))
    }

    /// Replace the slot
    pub fn with_slot(mut self, slot: Slot<R>) -> Self {
        self.slot = slot;
        self
    }

    /// Field name, used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target kind
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Raw range spec, `None` for untagged fields
    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    /// Formatter name, if any
    pub fn formatter(&self) -> Option<&str> {
        self.formatter.as_deref()
    }

    /// Check if the field carries a range spec
    pub fn is_tagged(&self) -> bool {
        self.range.is_some()
    }

    /// Check if the slot can be written
    pub fn is_settable(&self) -> bool {
        matches!(self.slot, Slot::Writable(_))
    }

    /// Write `value` into `target`; `false` if the slot is read-only or rejects it
    pub fn assign(&self, target: &mut R, value: Value) -> bool {
        match &self.slot {
            Slot::Writable(setter) => setter(target, value),
            Slot::ReadOnly => false,
        }
    }

    /// Validate this field's declaration without a line
    ///
    /// Checks, in decode order: writability, range spec grammar and, for
    /// supported kinds, that the formatter is registered.
    pub fn check(&self, config: &DecodeConfig) -> Result<(), DecodeError> {
        let Some(spec) = self.range() else {
            return Ok(());
        };

        if !self.is_settable() {
            return Err(DecodeError::Assignment {
                field: self.name.clone(),
            });
        }

        RangeSpec::parse(spec, config.delimiter()).map_err(|source| {
            DecodeError::FieldFormat {
                field: self.name.clone(),
                source,
            }
        })?;

        if Coercion::for_kind(&self.kind).is_none() {
            return Ok(());
        }

        match self.formatter() {
            Some(name) if !config.formatters().contains(name) => {
                Err(DecodeError::UnknownFormatter {
                    field: self.name.clone(),
                    name: name.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind.clone(),
            range: self.range.clone(),
            formatter: self.formatter.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("range", &self.range)
            .field("formatter", &self.formatter)
            .field("settable", &self.is_settable())
            .finish()
    }
}

/// Ordered field descriptors for a target type `R`
pub struct RecordLayout<R> {
    fields: Vec<FieldDescriptor<R>>,
    guard: Option<TargetGuard<R>>,
}

impl<R> RecordLayout<R> {
    /// Start building a layout
    pub fn builder() -> RecordLayoutBuilder<R>
    where
        R: 'static,
    {
        RecordLayoutBuilder::new()
    }

    /// Field descriptors in declaration order
    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of field slots
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the layout has no field slots
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Run the target guard, if any
    pub fn check_target(&self, target: &R) -> Result<(), DecodeError> {
        match self.guard {
            Some(guard) => guard(target).map_err(|reason| DecodeError::InvalidTarget { reason }),
            None => Ok(()),
        }
    }

    /// Validate every field declaration; stops at the first failure
    pub fn check(&self, config: &DecodeConfig) -> Result<(), DecodeError> {
        self.fields.iter().try_for_each(|field| field.check(config))
    }

    /// Decode `line` into `target`
    pub fn decode(&self, line: &str, target: &mut R, config: &DecodeConfig) -> crate::Result<()> {
        crate::decoder::decode(line, target, self, config)
    }

    /// Decode `line` into a fresh `R::default()`
    pub fn decode_new(&self, line: &str, config: &DecodeConfig) -> crate::Result<R>
    where
        R: Default,
    {
        crate::decoder::decode_new(line, self, config)
    }
}

impl<R> Clone for RecordLayout<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            guard: self.guard,
        }
    }
}

impl<R> fmt::Debug for RecordLayout<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordLayout")
            .field("fields", &self.fields)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Builder for [`RecordLayout`]
pub struct RecordLayoutBuilder<R> {
    fields: Vec<FieldDescriptor<R>>,
    guard: Option<TargetGuard<R>>,
}

impl<R: 'static> RecordLayoutBuilder<R> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            guard: None,
        }
    }

    /// Add a typed field; its kind comes from `T`
    pub fn field<T, F>(self, name: impl Into<String>, range: impl Into<String>, setter: F) -> Self
    where
        T: FieldValue + 'static,
        F: Fn(&mut R, T) + Send + Sync + 'static,
    {
        let descriptor = FieldDescriptor::new(name, T::kind())
            .with_range(range)
            .with_setter(typed_setter(setter));
        self.descriptor(descriptor)
    }

    /// Add a typed field whose substring goes through formatter `formatter` first
    pub fn formatted_field<T, F>(
        self,
        name: impl Into<String>,
        range: impl Into<String>,
        formatter: impl Into<String>,
        setter: F,
    ) -> Self
    where
        T: FieldValue + 'static,
        F: Fn(&mut R, T) + Send + Sync + 'static,
    {
        let descriptor = FieldDescriptor::new(name, T::kind())
            .with_range(range)
            .with_formatter(formatter)
            .with_setter(typed_setter(setter));
        self.descriptor(descriptor)
    }

    /// Add a field with an explicit kind and an untyped setter
    pub fn raw_field<F>(
        self,
        name: impl Into<String>,
        range: impl Into<String>,
        kind: impl Into<FieldKind>,
        setter: F,
    ) -> Self
    where
        F: Fn(&mut R, Value) -> bool + Send + Sync + 'static,
    {
        let descriptor = FieldDescriptor::new(name, kind)
            .with_range(range)
            .with_setter(setter);
        self.descriptor(descriptor)
    }

    /// Add a tagged field whose slot cannot be written
    pub fn read_only(
        self,
        name: impl Into<String>,
        range: impl Into<String>,
        kind: impl Into<FieldKind>,
    ) -> Self {
        self.descriptor(FieldDescriptor::new(name, kind).with_range(range))
    }

    /// Add a field slot that decoding never touches
    pub fn untagged(self, name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        self.descriptor(FieldDescriptor::new(name, kind))
    }

    /// Add a prepared descriptor
    pub fn descriptor(mut self, descriptor: FieldDescriptor<R>) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Reject targets that are not structured records before decoding
    pub fn guard(mut self, guard: TargetGuard<R>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Finish the layout
    pub fn build(self) -> RecordLayout<R> {
        RecordLayout {
            fields: self.fields,
            guard: self.guard,
        }
    }
}

impl<R: 'static> Default for RecordLayoutBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn typed_setter<R, T, F>(setter: F) -> impl Fn(&mut R, Value) -> bool + Send + Sync + 'static
where
    R: 'static,
    T: FieldValue + 'static,
    F: Fn(&mut R, T) + Send + Sync + 'static,
{
    move |target: &mut R, value: Value| match T::from_value(value) {
        Some(value) => {
            setter(target, value);
            true
        }
        None => false,
    }
}

/// Declarative layout, as read from a layout file
///
/// ```json
/// {
///   "delimiter": ",",
///   "fields": [
///     { "name": "last", "range": "0,8", "type": "string", "formatter": "trim" },
///     { "name": "salary", "range": "28,36", "type": "option<u32>" },
///     { "name": "notes", "type": "string" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSpec {
    /// Range delimiter used by this layout's specs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Field declarations in order
    pub fields: Vec<FieldSpec>,
}

/// One field of a [`LayoutSpec`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub name: String,

    /// Range spec; absent means the field is untagged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    /// Target kind
    #[serde(rename = "type", default = "default_kind")]
    pub kind: FieldKind,

    /// Formatter name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
}

fn default_kind() -> FieldKind {
    FieldKind::Scalar(crate::types::ScalarKind::String)
}

impl LayoutSpec {
    /// Turn the declarations into a layout builder
    ///
    /// `slot` supplies the slot for each field, typically a setter writing
    /// into a dynamic record keyed by the field name.
    pub fn to_builder<R, F>(&self, mut slot: F) -> RecordLayoutBuilder<R>
    where
        R: 'static,
        F: FnMut(&FieldSpec) -> Slot<R>,
    {
        self.fields.iter().fold(RecordLayoutBuilder::new(), |builder, spec| {
            let mut descriptor = FieldDescriptor::new(spec.name.clone(), spec.kind.clone());
            if let Some(range) = &spec.range {
                descriptor = descriptor.with_range(range.clone());
            }
            if let Some(formatter) = &spec.formatter {
                descriptor = descriptor.with_formatter(formatter.clone());
            }
            builder.descriptor(descriptor.with_slot(slot(spec)))
        })
    }

    /// Apply this layout's delimiter, if it declares one
    pub fn configure(&self, config: DecodeConfig) -> DecodeConfig {
        match &self.delimiter {
            Some(delimiter) => config.with_delimiter(delimiter.clone()),
            None => config,
        }
    }
}
