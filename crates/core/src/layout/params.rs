//! Layout parameters.
//!
//! Contains LayoutParams for controlling how characters are snapped onto the
//! output grid.

use crate::error::{LayoutError, Result};

/// Parameters for layout reconstruction.
///
/// The defaults are tuned to page units of 1/72 inch. They are kept exactly
/// as they are for output compatibility, but are not necessarily right for a
/// parser that reports coordinates at a different scale.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Baselines closer than this many units collapse into one row.
    pub grid: i64,

    /// Spans with a font size at or below this are treated as invisible.
    pub min_font_size: f64,

    /// Output line height relative to the average row pitch of the page.
    pub line_spacing: f64,

    /// A repeated glyph starting within this fraction of its width from the
    /// previous one is an overprint and dropped.
    pub overprint_ratio: f64,

    /// A space overlapping the previous glyph by more than this fraction of
    /// its own width is dropped.
    pub space_overlap_ratio: f64,

    /// Slot widths at or below this are degenerate.
    pub epsilon: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            grid: 2,
            min_font_size: 3.0,
            line_spacing: 1.2,
            overprint_ratio: 0.2,
            space_overlap_ratio: 0.8,
            epsilon: 1e-5,
        }
    }
}

impl LayoutParams {
    /// Creates validated layout parameters.
    ///
    /// Fails when `grid` is below 1, `line_spacing` is not strictly positive,
    /// or any of the ratios is negative or not finite.
    pub fn new(
        grid: i64,
        min_font_size: f64,
        line_spacing: f64,
        overprint_ratio: f64,
        space_overlap_ratio: f64,
        epsilon: f64,
    ) -> Result<Self> {
        let params = Self {
            grid,
            min_font_size,
            line_spacing,
            overprint_ratio,
            space_overlap_ratio,
            epsilon,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the invariants documented on [`LayoutParams::new`].
    pub fn validate(&self) -> Result<()> {
        if self.grid < 1 {
            return Err(LayoutError::InvalidParams(format!(
                "grid must be at least 1, got {}",
                self.grid
            )));
        }
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(LayoutError::InvalidParams(format!(
                "line_spacing must be positive, got {}",
                self.line_spacing
            )));
        }
        let ratios = [
            ("min_font_size", self.min_font_size),
            ("overprint_ratio", self.overprint_ratio),
            ("space_overlap_ratio", self.space_overlap_ratio),
            ("epsilon", self.epsilon),
        ];
        for (name, value) in ratios {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::InvalidParams(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(LayoutParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_grid() {
        let err = LayoutParams::new(0, 3.0, 1.2, 0.2, 0.8, 1e-5).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidParams(_)));
    }

    #[test]
    fn test_rejects_bad_spacing_and_ratios() {
        assert!(LayoutParams::new(2, 3.0, 0.0, 0.2, 0.8, 1e-5).is_err());
        assert!(LayoutParams::new(2, 3.0, 1.2, -0.1, 0.8, 1e-5).is_err());
        assert!(LayoutParams::new(2, 3.0, 1.2, 0.2, f64::NAN, 1e-5).is_err());
    }
}
