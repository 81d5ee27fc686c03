//! Slot estimation: the width of one output text column.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use super::collector::PageBounds;
use super::rows::RowGroups;

/// Minslot of rows too short to measure.
const SHORT_ROW_MINSLOT: f64 = 1.0;

/// Page-global slot width and per-row minimum glyph widths.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEstimate {
    /// Narrowest per-row median glyph width on the page.
    pub slot: f64,
    /// Smallest glyph width of each row; the adjacency threshold.
    pub minslots: BTreeMap<i64, f64>,
}

impl SlotEstimate {
    /// Estimate the slot of a page.
    ///
    /// Starts from the full text width and narrows it to the smallest
    /// median glyph width of any row holding at least two characters.
    /// Single-character rows get a fixed minslot and leave the slot alone.
    pub fn estimate(bounds: &PageBounds, groups: &RowGroups) -> Self {
        let mut slot = bounds.text_width();
        let mut minslots = BTreeMap::new();

        for (&row, chars) in groups {
            if chars.len() < 2 {
                minslots.insert(row, SHORT_ROW_MINSLOT);
                continue;
            }
            let mut widths: Vec<f64> = chars.iter().map(|c| c.width).collect();
            widths.sort_by_key(|&w| OrderedFloat(w));
            let row_slot = median_sorted(&widths);
            if row_slot < slot {
                slot = row_slot;
            }
            minslots.insert(row, widths[0]);
        }

        Self { slot, minslots }
    }

    /// Minslot of `row`; unknown rows are treated like single-character rows.
    pub fn minslot(&self, row: i64) -> f64 {
        self.minslots.get(&row).copied().unwrap_or(SHORT_ROW_MINSLOT)
    }
}

/// Median of an ascending, nonempty slice.
fn median_sorted(values: &[f64]) -> f64 {
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}
