//! High-level API module for layout text extraction.
//!
//! # Example
//!
//! ```ignore
//! use gridtext_core::api::{extract_text_from_slice, ExtractOptions};
//!
//! let dump = std::fs::read("document.json")?;
//! let text = extract_text_from_slice(&dump, None)?;
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    ExtractOptions, extract_text, extract_text_from_slice, extract_text_lossy, extract_text_to_fp,
    selected_pages,
};
