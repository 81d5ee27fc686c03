//! Row curation and character-to-row assignment.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::error::{LayoutError, Result};

use super::collector::CharRecord;

/// Characters of each row, keyed by curated row coordinate, each row sorted
/// left to right.
pub type RowGroups = BTreeMap<i64, Vec<CharRecord>>;

/// Collapse raw baselines into one coordinate per visually distinct row.
///
/// The result is strictly ascending and consecutive entries are at least
/// `grid` apart. A coordinate closer than `grid` to the last kept one is
/// folded into it.
pub fn curate_rows(rows: impl IntoIterator<Item = i64>, grid: i64) -> Vec<i64> {
    let mut sorted: Vec<i64> = rows.into_iter().collect();
    sorted.sort_unstable();

    let mut curated: Vec<i64> = Vec::with_capacity(sorted.len());
    for y in sorted {
        match curated.last() {
            Some(&last) if y < last + grid => {}
            _ => curated.push(y),
        }
    }
    curated
}

/// Greatest curated row coordinate at or below `y`.
pub fn find_row(rows: &[i64], y: i64) -> Result<i64> {
    let idx = rows.partition_point(|&r| r <= y);
    if idx == 0 {
        return Err(LayoutError::RowLookup { y });
    }
    Ok(rows[idx - 1])
}

/// Sort characters left to right and distribute them over the curated rows.
pub fn assign_rows(mut chars: Vec<CharRecord>, rows: &[i64]) -> Result<RowGroups> {
    chars.sort_by_key(|c| OrderedFloat(c.origin_x));

    let mut groups = RowGroups::new();
    for ch in chars {
        let row = find_row(rows, ch.origin_y)?;
        groups.entry(row).or_default().push(ch);
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curate_collapses_jitter() {
        let rows = curate_rows([100, 101, 99, 120, 121, 123, 150], 2);
        assert_eq!(rows, vec![99, 101, 120, 123, 150]);
    }

    #[test]
    fn test_curate_empty_and_single() {
        assert!(curate_rows(Vec::new(), 2).is_empty());
        assert_eq!(curate_rows([7], 2), vec![7]);
    }

    #[test]
    fn test_find_row_floor() {
        let rows = [10, 20, 30];
        assert_eq!(find_row(&rows, 10).unwrap(), 10);
        assert_eq!(find_row(&rows, 21).unwrap(), 20);
        assert_eq!(find_row(&rows, 99).unwrap(), 30);
    }

    #[test]
    fn test_find_row_below_first_fails() {
        let err = find_row(&[10, 20], 9).unwrap_err();
        assert!(matches!(err, LayoutError::RowLookup { y: 9 }));
        assert!(find_row(&[], 0).is_err());
    }

    #[test]
    fn test_assign_rows_orders_left_to_right() {
        let chars = vec![
            CharRecord::new("b", 20.0, 11, 5.0),
            CharRecord::new("c", 5.0, 30, 5.0),
            CharRecord::new("a", 10.0, 10, 5.0),
        ];
        let groups = assign_rows(chars, &[10, 30]).unwrap();
        assert_eq!(groups.len(), 2);
        let first: Vec<String> = groups[&10].iter().map(|c| c.glyph.to_string()).collect();
        assert_eq!(first, vec!["a", "b"]);
        assert_eq!(groups[&30].len(), 1);
    }
}
