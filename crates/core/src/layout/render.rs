//! Line rendering: turns the characters of one row into text, placing every
//! glyph in its text column.

use crate::error::{LayoutError, Result};
use crate::model::Glyph;

use super::collector::CharRecord;
use super::params::LayoutParams;

/// Render one row.
///
/// `chars` must be sorted by origin x. `left` is the page's left text bound,
/// `slot` the page-global column width and `minslot` the narrowest glyph of
/// this row. Glyphs closer than `minslot` to the end of the previous glyph are
/// appended directly; a glyph after a wider gap is padded out to column
/// `origin / slot`. A space after a gap is dropped since the padding already
/// stands for it.
///
/// The result is generalized UTF-8 with trailing whitespace removed.
pub fn render_line(
    left: f64,
    slot: f64,
    minslot: f64,
    chars: &[CharRecord],
    params: &LayoutParams,
) -> Result<Vec<u8>> {
    if minslot <= params.epsilon {
        return Err(LayoutError::DegenerateSlot { slot: minslot });
    }

    let mut text: Vec<u8> = Vec::with_capacity(chars.len());
    let mut columns: usize = 0;
    let mut prev_glyph: Option<&Glyph> = None;
    let mut prev_x1 = 0.0;
    let mut prev_ox = 0.0;

    for ch in chars {
        let ox = ch.origin_x - left;
        let x1 = ox + ch.width;

        // overprint, e.g. synthetic bold
        if prev_glyph == Some(&ch.glyph) && ox - prev_ox <= ch.width * params.overprint_ratio {
            continue;
        }

        if ch.glyph.is_space() && prev_x1 - ox > ch.width * params.space_overlap_ratio {
            continue;
        }

        prev_glyph = Some(&ch.glyph);

        if ox < prev_x1 + minslot {
            push_glyph(&mut text, &mut columns, &ch.glyph);
            prev_x1 = x1;
            prev_ox = ox;
            continue;
        }

        if ch.glyph.is_space() {
            continue;
        }

        if slot <= params.epsilon {
            return Err(LayoutError::DegenerateSlot { slot });
        }
        let delta = (ox / slot).trunc() as i64 - columns as i64;
        if ox > prev_x1 && delta > 1 {
            let pad = delta as usize;
            text.resize(text.len() + pad, b' ');
            columns += pad;
        }

        push_glyph(&mut text, &mut columns, &ch.glyph);
        prev_x1 = x1;
        prev_ox = ox;
    }

    trim_end_whitespace(&mut text);
    Ok(text)
}

fn push_glyph(text: &mut Vec<u8>, columns: &mut usize, glyph: &Glyph) {
    text.extend_from_slice(glyph.as_bytes());
    *columns += glyph.char_count();
}

/// Strip trailing whitespace code points. Surrogates are never whitespace.
fn trim_end_whitespace(text: &mut Vec<u8>) {
    while let Some(start) = last_code_point_start(text) {
        let last = std::str::from_utf8(&text[start..])
            .ok()
            .and_then(|s| s.chars().next());
        match last {
            Some(c) if c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c) => {
                text.truncate(start)
            }
            _ => break,
        }
    }
}

fn last_code_point_start(text: &[u8]) -> Option<usize> {
    if text.is_empty() {
        return None;
    }
    let mut i = text.len() - 1;
    while i > 0 && text[i] & 0xC0 == 0x80 && text.len() - i < 4 {
        i -= 1;
    }
    Some(i)
}
