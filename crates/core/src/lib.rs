//! gridtext - plain-text page layout from raw per-character PDF geometry.
//!
//! Characters extracted by a PDF parser (glyph, bounding box, origin, font
//! size) are snapped onto a grid of rows and text columns, so that columns,
//! tables and indentation of the original page survive as whitespace.

pub mod api;
pub mod converter;
pub mod error;
pub mod layout;
pub mod model;

pub use api::high_level;
pub use error::{LayoutError, Result};
