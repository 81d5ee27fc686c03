//! Raw page structure: blocks -> lines -> spans -> characters.
//!
//! Mirrors the "rawdict" text extraction of the PDF parser, so its JSON form
//! (`rawjson`) deserializes directly. Fields the layout engine has no use for
//! (fonts flags, colors, ascender, ...) are ignored.

use serde::Deserialize;

use crate::error::{LayoutError, Result};

use super::glyph::Glyph;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle (x0, y0, x1, y1) in page units, y growing downwards.
pub type Rect = (f64, f64, f64, f64);

/// One page of raw character geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPage {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
}

/// A text or image block. Image blocks carry no lines.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub bbox: Option<Rect>,
    #[serde(default)]
    pub lines: Vec<RawLine>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawLine {
    /// Writing direction as a unit vector; (1, 0) is horizontal left-to-right.
    pub dir: Point,
    pub bbox: Rect,
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSpan {
    /// Font size in page units.
    pub size: f64,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub chars: Vec<RawChar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawChar {
    pub c: Glyph,
    pub origin: Point,
    pub bbox: Rect,
}

impl RawPage {
    /// Creates an empty page of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Total number of characters over all blocks, before any filtering.
    pub fn char_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.lines)
            .flat_map(|l| &l.spans)
            .map(|s| s.chars.len())
            .sum()
    }
}

impl RawLine {
    /// A horizontal left-to-right line with the given bbox.
    pub fn horizontal(bbox: Rect, spans: Vec<RawSpan>) -> Self {
        Self {
            dir: (1.0, 0.0),
            bbox,
            spans,
        }
    }
}

impl RawSpan {
    pub fn new(size: f64, chars: Vec<RawChar>) -> Self {
        Self {
            size,
            font: None,
            chars,
        }
    }
}

impl RawChar {
    /// A character with origin `(x, y)` and bbox spanning `width` to the right
    /// of the origin and `size` above the baseline.
    pub fn new(c: impl Into<Glyph>, x: f64, y: f64, width: f64, size: f64) -> Self {
        Self {
            c: c.into(),
            origin: (x, y),
            bbox: (x, y - size, x + width, y),
        }
    }

    /// Measured width of the glyph box.
    pub fn width(&self) -> f64 {
        self.bbox.2 - self.bbox.0
    }
}

/// An ordered sequence of raw pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    pub pages: Vec<RawPage>,
}

impl RawDocument {
    pub fn new(pages: Vec<RawPage>) -> Self {
        Self { pages }
    }

    /// Parses a raw JSON dump.
    ///
    /// Accepts either a JSON array of pages or a stream of page objects
    /// (one per line, or simply concatenated).
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let first = data.iter().find(|b| !b.is_ascii_whitespace());
        let pages = match first {
            None => return Err(LayoutError::InvalidInput("empty document".to_string())),
            Some(b'[') => serde_json::from_slice::<Vec<RawPage>>(data)?,
            Some(_) => serde_json::Deserializer::from_slice(data)
                .into_iter::<RawPage>()
                .collect::<std::result::Result<Vec<_>, _>>()?,
        };
        Ok(Self { pages })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawPage> {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "width": 200.0, "height": 100.0,
        "blocks": [
            {"type": 1, "bbox": [0, 0, 10, 10]},
            {"type": 0, "bbox": [10, 10, 40, 22], "lines": [
                {"wmode": 0, "dir": [1.0, 0.0], "bbox": [10, 10, 40, 22], "spans": [
                    {"size": 12.0, "flags": 0, "font": "Helvetica", "chars": [
                        {"c": "A", "origin": [10.0, 20.0], "bbox": [10, 10, 18, 22]},
                        {"c": 55296, "origin": [18.0, 20.0], "bbox": [18, 10, 26, 22]}
                    ]}
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_single_page_object() {
        let doc = RawDocument::from_slice(PAGE.as_bytes()).unwrap();
        assert_eq!(doc.len(), 1);
        let page = &doc.pages[0];
        assert_eq!(page.blocks.len(), 2);
        assert!(page.blocks[0].lines.is_empty());
        assert_eq!(page.char_count(), 2);
        assert_eq!(page.blocks[1].lines[0].spans[0].font.as_deref(), Some("Helvetica"));
    }

    #[test]
    fn test_parse_array_and_stream() {
        let array = format!("[{PAGE}, {PAGE}]");
        assert_eq!(RawDocument::from_slice(array.as_bytes()).unwrap().len(), 2);

        let stream = format!("{}\n{}\n", PAGE.replace('\n', " "), PAGE.replace('\n', " "));
        assert_eq!(RawDocument::from_slice(stream.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_input_is_invalid_input() {
        let err = RawDocument::from_slice(b"{\"width\": 1.0").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput(_)));
        let err = RawDocument::from_slice(b"   ").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput(_)));
    }

    #[test]
    fn test_escaped_lone_surrogate_in_dump() {
        let dump = PAGE.replace("55296", r#""\udc00""#);
        let doc = RawDocument::from_slice(dump.as_bytes()).unwrap();
        let chars = &doc.pages[0].blocks[1].lines[0].spans[0].chars;
        assert_eq!(chars[0].c, Glyph::from("A"));
        assert_eq!(chars[1].c.as_bytes(), &[0xED, 0xB0, 0x80]);
    }

    #[test]
    fn test_raw_char_width() {
        let c = RawChar::new('x', 5.0, 20.0, 4.5, 10.0);
        assert_eq!(c.width(), 4.5);
        assert_eq!(c.bbox, (5.0, 10.0, 9.5, 20.0));
    }
}
