//! Text Converter - writes the grid layout of pages as plain text.

use std::io::Write;

use crate::error::Result;
use crate::layout::{LayoutParams, PageStats, layout_page};
use crate::model::RawPage;

/// Text Converter - writes each received page to a byte sink.
///
/// Output bytes are generalized UTF-8: glyphs that are not Unicode scalar
/// values are written as they are.
pub struct TextConverter<'a, W: Write> {
    /// Output writer
    outfp: &'a mut W,
    /// Layout parameters
    params: LayoutParams,
    /// Whether to write a page header before each page
    showpageno: bool,
    /// Pages written so far
    pages: usize,
}

impl<'a, W: Write> TextConverter<'a, W> {
    /// Create a new text converter.
    pub fn new(outfp: &'a mut W, params: LayoutParams, showpageno: bool) -> Self {
        Self {
            outfp,
            params,
            showpageno,
            pages: 0,
        }
    }

    /// Number of pages written so far.
    pub fn pages_written(&self) -> usize {
        self.pages
    }

    /// Lay out and write one page. `pageid` is 1-based.
    ///
    /// Nothing is written when layout fails.
    pub fn receive_page(&mut self, pageid: usize, page: &RawPage) -> Result<PageStats> {
        let text = layout_page(page, &self.params)?;
        if self.showpageno {
            writeln!(self.outfp, "Page {pageid}")?;
        }
        self.outfp.write_all(&text.bytes)?;
        self.pages += 1;
        Ok(text.stats)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.outfp.flush()?;
        Ok(())
    }
}
