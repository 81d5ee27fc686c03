//! Character collection: filters a raw page down to the characters that take
//! part in the layout and records the page bounds.

use std::collections::BTreeSet;

use tracing::trace;

use crate::model::{Glyph, RawChar, RawLine, RawPage};

use super::params::LayoutParams;

/// Two-glyph sequences and the ligature code point they merge into.
const LIGATURES: &[(&str, char)] = &[
    ("ff", '\u{FB00}'),
    ("fi", '\u{FB01}'),
    ("fl", '\u{FB02}'),
    ("ffi", '\u{FB03}'),
    ("ffl", '\u{FB04}'),
    ("ft", '\u{FB05}'),
    ("st", '\u{FB06}'),
];

/// The "ff" ligature, which can grow into a three-letter ligature.
const FF_LIGATURE: char = '\u{FB00}';

/// Continuations of an "ff" ligature.
const FF_CONTINUATIONS: &[(&str, char)] = &[("i", '\u{FB03}'), ("l", '\u{FB04}')];

/// One character that takes part in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CharRecord {
    pub glyph: Glyph,
    /// Origin x in page units.
    pub origin_x: f64,
    /// Baseline y rounded to an integer; the row key.
    pub origin_y: i64,
    /// Measured glyph width.
    pub width: f64,
}

impl CharRecord {
    pub fn new(glyph: impl Into<Glyph>, origin_x: f64, origin_y: i64, width: f64) -> Self {
        Self {
            glyph: glyph.into(),
            origin_x,
            origin_y,
            width,
        }
    }
}

/// Horizontal text extent and smallest line height of a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBounds {
    /// Smallest origin x over non-space glyphs.
    pub left: f64,
    /// Largest glyph end x over all glyphs.
    pub right: f64,
    /// Smallest bbox height over the accepted horizontal lines.
    pub min_row_height: f64,
}

impl PageBounds {
    /// Initial bounds for a page: everything is narrowed down from here.
    pub fn for_page(width: f64, height: f64) -> Self {
        Self {
            left: width,
            right: 0.0,
            min_row_height: height,
        }
    }

    /// Width of the text area.
    pub fn text_width(&self) -> f64 {
        self.right - self.left
    }
}

/// Result of collecting one page.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedPage {
    /// Characters in extraction order.
    pub chars: Vec<CharRecord>,
    /// Every baseline seen, including merged ligature parts.
    pub rows: BTreeSet<i64>,
    pub bounds: PageBounds,
}

impl CollectedPage {
    /// True when no character survived filtering.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Outcome of merging a zero-width glyph into its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LigatureMerge {
    /// The predecessor takes this glyph.
    Replace(Glyph),
    /// The predecessor stays as it is.
    Keep,
}

/// Decides how a zero-width `cur` merges into `prev`.
///
/// An unknown pair is kept as the concatenation of both glyphs, so no text
/// is ever lost.
pub fn merge_ligature(prev: &Glyph, cur: &Glyph) -> LigatureMerge {
    if *prev == Glyph::from(FF_LIGATURE) {
        return match lookup(FF_CONTINUATIONS, cur.as_bytes()) {
            Some(lig) => LigatureMerge::Replace(Glyph::from(lig)),
            None => LigatureMerge::Keep,
        };
    }
    let joined = prev.concat(cur);
    match lookup(LIGATURES, joined.as_bytes()) {
        Some(lig) => LigatureMerge::Replace(Glyph::from(lig)),
        None => LigatureMerge::Replace(joined),
    }
}

fn lookup(table: &[(&str, char)], key: &[u8]) -> Option<char> {
    table
        .iter()
        .find(|(seq, _)| seq.as_bytes() == key)
        .map(|&(_, lig)| lig)
}

/// Accumulates the characters of one page.
#[derive(Debug)]
pub struct CharacterCollector<'a> {
    params: &'a LayoutParams,
    page_height: f64,
    chars: Vec<CharRecord>,
    rows: BTreeSet<i64>,
    bounds: PageBounds,
}

impl<'a> CharacterCollector<'a> {
    pub fn new(width: f64, height: f64, params: &'a LayoutParams) -> Self {
        Self {
            params,
            page_height: height,
            chars: Vec::new(),
            rows: BTreeSet::new(),
            bounds: PageBounds::for_page(width, height),
        }
    }

    /// Collects all characters of `page`.
    pub fn collect(page: &RawPage, params: &'a LayoutParams) -> CollectedPage {
        let mut collector = Self::new(page.width, page.height, params);
        for line in page.blocks.iter().flat_map(|b| &b.lines) {
            collector.add_line(line);
        }
        collector.finish()
    }

    /// Adds one line, applying the direction, crop box and font size filters.
    pub fn add_line(&mut self, line: &RawLine) {
        if line.dir != (1.0, 0.0) {
            return;
        }
        let (_, y0, _, y1) = line.bbox;
        if y1 < 0.0 || y0 > self.page_height {
            return;
        }
        self.bounds.min_row_height = self.bounds.min_row_height.min(y1 - y0);

        for span in &line.spans {
            if span.size <= self.params.min_font_size {
                continue;
            }
            for ch in &span.chars {
                self.add_char(ch);
            }
        }
    }

    fn add_char(&mut self, ch: &RawChar) {
        let width = ch.width();
        let (ox, oy) = ch.origin;
        let oy = oy.round_ties_even() as i64;
        self.rows.insert(oy);

        self.bounds.right = self.bounds.right.max(ch.bbox.2);
        if !ch.c.is_space() {
            self.bounds.left = self.bounds.left.min(ox);
        }

        if width == 0.0
            && let Some(prev) = self.chars.last_mut()
            && prev.origin_y == oy
        {
            match merge_ligature(&prev.glyph, &ch.c) {
                LigatureMerge::Replace(glyph) => {
                    trace!(prev = %prev.glyph, cur = %ch.c, merged = %glyph, "ligature merge");
                    prev.glyph = glyph;
                }
                LigatureMerge::Keep => {
                    trace!(prev = %prev.glyph, cur = %ch.c, "ligature continuation dropped");
                }
            }
            return;
        }

        self.chars.push(CharRecord {
            glyph: ch.c.clone(),
            origin_x: ox,
            origin_y: oy,
            width,
        });
    }

    pub fn finish(self) -> CollectedPage {
        CollectedPage {
            chars: self.chars,
            rows: self.rows,
            bounds: self.bounds,
        }
    }
}
