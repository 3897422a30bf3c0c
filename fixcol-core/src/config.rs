//! Per-call decode configuration

use crate::constants::DEFAULT_DELIMITER;
use crate::error::BoxError;
use crate::format::FormatterRegistry;

/// Options for a decode call: range delimiter and formatter registry
///
/// Built with chained `with_*` calls. Later calls win on conflicting keys.
/// The configuration is read-only during decoding and can be shared across
/// threads.
///
/// ```
/// use fixcol_core::DecodeConfig;
///
/// let config = DecodeConfig::new()
///     .with_delimiter("-")
///     .with_formatter("upper", |s| Ok(s.to_uppercase()));
///
/// assert_eq!(config.delimiter(), "-");
/// assert!(config.formatters().contains("upper"));
/// ```
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    delimiter: String,
    formatters: FormatterRegistry,
}

impl DecodeConfig {
    /// Create a configuration with the default `,` delimiter and no formatters
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            formatters: FormatterRegistry::new(),
        }
    }

    /// Use `delimiter` between range bounds instead of `,`
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Register a formatter under `name`
    pub fn with_formatter<F>(mut self, name: impl Into<String>, formatter: F) -> Self
    where
        F: Fn(&str) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.formatters.register(name, formatter);
        self
    }

    /// Register every formatter of `registry`
    pub fn with_formatters(mut self, registry: &FormatterRegistry) -> Self {
        self.formatters.extend(registry);
        self
    }

    /// Register the standard formatters (`trim`, `upper`, `strip-zeros`, ...)
    pub fn with_standard_formatters(self) -> Self {
        self.with_formatters(&FormatterRegistry::standard())
    }

    /// Range delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Formatter registry
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}
