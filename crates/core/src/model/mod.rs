//! Input model: the raw character dump handed over by the PDF parser.
//!
//! - `glyph` - glyph text stored as generalized UTF-8
//! - `rawdict` - blocks, lines, spans and characters of one page

pub mod glyph;
pub mod rawdict;

pub use glyph::Glyph;
pub use rawdict::{Point, RawBlock, RawChar, RawDocument, RawLine, RawPage, RawSpan, Rect};
