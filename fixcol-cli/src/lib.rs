//! Library entry for fixcol-cli used by integration tests and embedding.

pub mod commands;
pub mod record;

// Re-export commands for convenience
pub use commands::*;

/// Output shape of `fixcol decode`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One pretty-printed JSON array holding every record
    Json,
    /// One compact JSON object per line
    Jsonl,
}
