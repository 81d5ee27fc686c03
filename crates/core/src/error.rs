//! Error types for gridtext layout extraction.

use thiserror::Error;

/// Primary error type for layout extraction.
///
/// Every variant aborts extraction of the whole document. The algorithm is
/// deterministic, so none of them is worth retrying on the same input.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// A character's row key has no curated row at or below it.
    #[error("no row found for y = {y}")]
    RowLookup { y: i64 },

    /// A slot or per-row minimum width at or below the stability floor.
    #[error("degenerate slot width: {slot}")]
    DegenerateSlot { slot: f64 },

    /// The raw page dump could not be interpreted.
    #[error("unsupported or corrupt input: {0}")]
    InvalidInput(String),

    #[error("invalid layout parameters: {0}")]
    InvalidParams(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
