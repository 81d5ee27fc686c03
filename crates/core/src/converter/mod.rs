//! Output converters for laid out pages.
//!
//! - TextConverter: plain text grid output

mod text;

pub use text::TextConverter;
