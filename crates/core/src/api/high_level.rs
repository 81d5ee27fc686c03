//! High-level text extraction API.
//!
//! Provides the main public API:
//! - `extract_text()` - lay out a whole document into one byte buffer
//! - `extract_text_to_fp()` - lay out a document into a writer
//! - `extract_text_from_slice()` - parse a raw JSON dump, then extract
//! - `extract_text_lossy()` - extract and decode for display

use std::io::Write;

use tracing::debug;

use crate::converter::TextConverter;
use crate::error::Result;
use crate::layout::LayoutParams;
use crate::model::{RawDocument, RawPage};

/// Options for text extraction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractOptions {
    /// Zero-indexed page numbers to extract. None means all pages.
    pub page_numbers: Option<Vec<usize>>,

    /// Maximum number of pages to extract. 0 means no limit.
    pub maxpages: usize,

    /// Layout parameters. None uses default LayoutParams.
    pub params: Option<LayoutParams>,

    /// Write a `Page N` header before each page.
    pub showpageno: bool,
}

/// Pages selected by `page_numbers` and `maxpages`, in document order, with
/// their zero-based index.
pub fn selected_pages<'a>(
    doc: &'a RawDocument,
    page_numbers: Option<&'a [usize]>,
    maxpages: usize,
) -> impl Iterator<Item = (usize, &'a RawPage)> + 'a {
    let limit = if maxpages > 0 { maxpages } else { usize::MAX };
    doc.iter()
        .enumerate()
        .filter(move |(idx, _)| page_numbers.is_none_or(|nums| nums.contains(idx)))
        .take(limit)
}

/// Lay out the text of a document and write it to a writer.
///
/// Pages are processed one at a time in document order. The first failing
/// page aborts the whole extraction. Returns the number of pages written.
///
/// # Example
/// ```ignore
/// use gridtext_core::high_level::extract_text_to_fp;
/// use gridtext_core::model::RawDocument;
///
/// let doc = RawDocument::from_slice(&std::fs::read("page.json")?)?;
/// let mut output = std::fs::File::create("page.txt")?;
/// extract_text_to_fp(&doc, &mut output, None)?;
/// ```
pub fn extract_text_to_fp<W: Write>(
    doc: &RawDocument,
    writer: &mut W,
    options: Option<ExtractOptions>,
) -> Result<usize> {
    let options = options.unwrap_or_default();
    let params = options.params.unwrap_or_default();
    params.validate()?;

    let mut converter = TextConverter::new(writer, params, options.showpageno);
    for (page_idx, page) in selected_pages(doc, options.page_numbers.as_deref(), options.maxpages) {
        let stats = converter.receive_page(page_idx + 1, page)?;
        debug!(
            page = page_idx + 1,
            chars = stats.chars,
            rows = stats.rows,
            "page written"
        );
    }
    converter.flush()?;
    Ok(converter.pages_written())
}

/// Lay out the text of a document.
///
/// The result is generalized UTF-8: every page's rows, each page terminated
/// by a form feed.
pub fn extract_text(doc: &RawDocument, options: Option<ExtractOptions>) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    extract_text_to_fp(doc, &mut output, options)?;
    Ok(output)
}

/// Parse a raw JSON dump and lay out its text.
pub fn extract_text_from_slice(data: &[u8], options: Option<ExtractOptions>) -> Result<Vec<u8>> {
    let doc = RawDocument::from_slice(data)?;
    extract_text(&doc, options)
}

/// Lay out the text of a document and decode it for display. Glyphs that
/// are not Unicode scalar values become U+FFFD.
pub fn extract_text_lossy(doc: &RawDocument, options: Option<ExtractOptions>) -> Result<String> {
    let bytes = extract_text(doc, options)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(n: usize) -> RawDocument {
        RawDocument::new((0..n).map(|_| RawPage::new(100.0, 100.0)).collect())
    }

    #[test]
    fn test_selected_pages_all() {
        let d = doc(3);
        let idx: Vec<usize> = selected_pages(&d, None, 0).map(|(i, _)| i).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn test_selected_pages_numbers_and_limit() {
        let d = doc(5);
        let nums = [4, 1, 3];
        let idx: Vec<usize> = selected_pages(&d, Some(&nums), 2).map(|(i, _)| i).collect();
        assert_eq!(idx, vec![1, 3]);
    }

    #[test]
    fn test_empty_pages_are_form_feeds() {
        let out = extract_text(&doc(3), None).unwrap();
        assert_eq!(out, b"\x0c\x0c\x0c".to_vec());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let options = ExtractOptions {
            params: Some(LayoutParams {
                grid: 0,
                ..LayoutParams::default()
            }),
            ..ExtractOptions::default()
        };
        assert!(extract_text(&doc(1), Some(options)).is_err());
    }
}
