//! Page layout: runs collection, row curation, slot estimation and line
//! rendering for one page and spaces the rendered rows vertically.

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::RawPage;

use super::collector::CharacterCollector;
use super::params::LayoutParams;
use super::render::render_line;
use super::rows::{assign_rows, curate_rows};
use super::slots::SlotEstimate;

/// Page separator written after every page.
pub const PAGE_SEPARATOR: u8 = 0x0C;

/// Summary of one laid out page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageStats {
    /// Characters after filtering and ligature merging.
    pub chars: usize,
    /// Curated rows.
    pub rows: usize,
    /// Column width, `None` for an empty page.
    pub slot: Option<f64>,
    /// Output lines written, blank spacer lines included.
    pub lines: usize,
}

/// Text of one page together with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub bytes: Vec<u8>,
    pub stats: PageStats,
}

/// Lay out one page.
///
/// The output is a newline, then for every row the blank lines that keep its
/// vertical distance to the previous row followed by the row text and a
/// newline, then the page separator. A page without usable characters is
/// only the page separator.
pub fn layout_page(page: &RawPage, params: &LayoutParams) -> Result<PageText> {
    let collected = CharacterCollector::collect(page, params);
    if collected.is_empty() {
        debug!(width = page.width, height = page.height, "empty page");
        return Ok(PageText {
            bytes: vec![PAGE_SEPARATOR],
            stats: PageStats::default(),
        });
    }

    let bounds = collected.bounds;
    let nchars = collected.chars.len();
    let rows = curate_rows(collected.rows, params.grid);
    let groups = assign_rows(collected.chars, &rows)?;
    let slots = SlotEstimate::estimate(&bounds, &groups);

    let advance = row_advance(bounds.min_row_height, &rows, params.line_spacing);
    let spaced = advance.is_finite() && advance > 0.0;
    if !spaced && rows.len() > 1 {
        warn!(
            advance,
            min_row_height = bounds.min_row_height,
            "degenerate row advance, rows are not spaced"
        );
    }

    let mut out = Vec::with_capacity(nchars + 2 * rows.len() + 2);
    let mut lines = 0;
    out.push(b'\n');

    let mut cursor = rows[0] as f64;
    for (&row, chars) in &groups {
        if spaced {
            while cursor < row as f64 {
                out.push(b'\n');
                lines += 1;
                cursor += advance;
            }
        }
        let text = render_line(bounds.left, slots.slot, slots.minslot(row), chars, params)?;
        out.extend_from_slice(&text);
        out.push(b'\n');
        lines += 1;
        cursor = row as f64 + advance;
    }
    out.push(PAGE_SEPARATOR);

    let stats = PageStats {
        chars: nchars,
        rows: rows.len(),
        slot: Some(slots.slot),
        lines,
    };
    debug!(
        chars = stats.chars,
        rows = stats.rows,
        slot = slots.slot,
        left = bounds.left,
        right = bounds.right,
        advance,
        lines,
        "page laid out"
    );
    Ok(PageText { bytes: out, stats })
}

/// Output line height: the average row pitch of the page scaled by
/// `line_spacing`.
///
/// `rows` must be nonempty. A zero row height gives NaN.
pub fn row_advance(min_row_height: f64, rows: &[i64], line_spacing: f64) -> f64 {
    let span = (rows[rows.len() - 1] - rows[0]) as f64;
    min_row_height * span / (min_row_height * rows.len() as f64) * line_spacing
}
