//! Named formatters applied to a field's substring before coercion

use crate::error::{BoxError, DecodeError};
use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

/// A string-to-string transform that may fail
pub type Formatter = Arc<dyn Fn(&str) -> Result<String, BoxError> + Send + Sync>;

/// Mapping from formatter name to [`Formatter`]
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Formatter>,
}

impl FormatterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the standard formatters
    ///
    /// - `trim`, `trim-start`, `trim-end`: strip whitespace padding
    /// - `upper`, `lower`: change case
    /// - `strip-zeros`: drop leading zeros, keeping a sign and at least one digit
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("trim", |s| Ok(s.trim().to_string()));
        registry.register("trim-start", |s| Ok(s.trim_start().to_string()));
        registry.register("trim-end", |s| Ok(s.trim_end().to_string()));
        registry.register("upper", |s| Ok(s.to_uppercase()));
        registry.register("lower", |s| Ok(s.to_lowercase()));
        registry.register("strip-zeros", |s| Ok(strip_leading_zeros(s)));
        registry
    }

    /// Register `formatter` under `name`, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, formatter: F)
    where
        F: Fn(&str) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.formatters.insert(name.into(), Arc::new(formatter));
    }

    /// Copy every formatter of `other` into this registry; `other` wins on conflicts
    pub fn extend(&mut self, other: &FormatterRegistry) {
        for (name, formatter) in &other.formatters {
            self.formatters.insert(name.clone(), Arc::clone(formatter));
        }
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&Formatter> {
        self.formatters.get(name)
    }

    /// Check if a formatter is registered
    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered formatters
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Check if no formatter is registered
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Run formatter `name` on `input` for `field`
    ///
    /// An unregistered name is [`DecodeError::UnknownFormatter`]; a failing
    /// formatter is [`DecodeError::Formatter`] carrying its error as source.
    pub fn apply(&self, field: &str, name: &str, input: &str) -> Result<String, DecodeError> {
        let formatter = self
            .get(name)
            .ok_or_else(|| DecodeError::UnknownFormatter {
                field: field.to_string(),
                name: name.to_string(),
            })?;

        formatter(input).map_err(|source| DecodeError::Formatter {
            field: field.to_string(),
            name: name.to_string(),
            source,
        })
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn strip_leading_zeros(input: &str) -> String {
    let (sign, digits) = match input.as_bytes().first() {
        Some(b'+') | Some(b'-') => input.split_at(1),
        _ => ("", input),
    };

    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() && !digits.is_empty() {
        format!("{}0", sign)
    } else {
        format!("{}{}", sign, stripped)
    }
}
