//! Constants shared by the range grammar and coercion

/// Default separator between the start and end index of a range spec
pub const DEFAULT_DELIMITER: &str = ",";

/// Literals accepted as `true` by boolean coercion
pub const TRUE_LITERALS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];

/// Literals accepted as `false` by boolean coercion
pub const FALSE_LITERALS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];

/// Names of the formatters registered by [`crate::format::FormatterRegistry::standard`]
pub const STANDARD_FORMATTERS: [&str; 6] =
    ["trim", "trim-start", "trim-end", "upper", "lower", "strip-zeros"];
