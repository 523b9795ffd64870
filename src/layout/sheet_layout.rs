//! Prefix-summed sheet geometry.
//!
//! Row and column edges are accumulated once per sheet so the tiler gets
//! O(1) span sums and O(log n) column lookups while paginating.

use std::collections::{HashMap, HashSet};

use crate::cell_ref::require_cell_range;
use crate::error::Result;
use crate::print::{CellRect, SheetDataView};
use crate::types::{CellRange, SheetDescription};

/// Concrete [`SheetDataView`] built from explicit sizes, merges and freeze counts
#[derive(Debug, Clone)]
pub struct SheetLayout {
    /// Column edges; `col_positions[i]` is the left x of column i, the last entry the total width
    pub col_positions: Vec<f64>,
    /// Row edges; `row_positions[i]` is the top y of row i
    pub row_positions: Vec<f64>,
    /// Every cell covered by a merge, keyed by (row, col)
    pub merges: HashMap<(u32, u32), MergeInfo>,
    /// Merge ranges in declaration order
    pub merge_ranges: Vec<CellRange>,
    /// Number of rows
    pub row_count: u32,
    /// Number of columns
    pub col_count: u32,
    /// Rows repeated at the top of every page
    pub frozen_rows: u32,
    /// Columns repeated at the left of every page
    pub frozen_cols: u32,
    /// Bounding range of used cells (None for empty sheets)
    pub used_range: Option<CellRange>,
}

/// Membership of a cell in a merge
#[derive(Debug, Clone, Copy)]
pub struct MergeInfo {
    /// Top-left cell of the merge
    pub is_origin: bool,
    /// Index into `SheetLayout::merge_ranges`
    pub range_idx: usize,
}

/// Width of columns without an explicit size, CSS pixels
pub const DEFAULT_COL_WIDTH: f64 = 64.0;

/// Height of rows without an explicit size, CSS pixels
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

impl SheetLayout {
    /// Build the layout from explicit sizes.
    ///
    /// # Arguments
    /// * `row_count` - Number of rows in the sheet
    /// * `col_count` - Number of columns in the sheet
    /// * `col_widths_map` - Map of column index to width
    /// * `row_heights_map` - Map of row index to height
    /// * `hidden_cols` - Set of hidden column indices
    /// * `hidden_rows` - Set of hidden row indices
    /// * `merge_ranges` - Merge ranges (clipped to the sheet, empty ones dropped)
    /// * `frozen_rows` - Number of frozen rows (0 = none)
    /// * `frozen_cols` - Number of frozen columns (0 = none)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        row_count: u32,
        col_count: u32,
        col_widths_map: &HashMap<u32, f64>,
        row_heights_map: &HashMap<u32, f64>,
        hidden_cols: &HashSet<u32>,
        hidden_rows: &HashSet<u32>,
        merge_ranges: &[CellRange],
        frozen_rows: u32,
        frozen_cols: u32,
    ) -> Self {
        let col_positions = prefix_positions(col_count, |col| {
            if hidden_cols.contains(&col) {
                0.0
            } else {
                sanitize(col_widths_map.get(&col).copied(), DEFAULT_COL_WIDTH)
            }
        });
        let row_positions = prefix_positions(row_count, |row| {
            if hidden_rows.contains(&row) {
                0.0
            } else {
                sanitize(row_heights_map.get(&row).copied(), DEFAULT_ROW_HEIGHT)
            }
        });

        let mut kept = Vec::with_capacity(merge_ranges.len());
        let mut merges = HashMap::new();
        for range in merge_ranges {
            if row_count == 0
                || col_count == 0
                || range.start_row >= row_count
                || range.start_col >= col_count
            {
                continue;
            }
            let clipped = CellRange::new(
                range.start_row,
                range.start_col,
                range.end_row.min(row_count - 1),
                range.end_col.min(col_count - 1),
            );
            if clipped.row_span() == 1 && clipped.col_span() == 1 {
                continue;
            }
            let range_idx = kept.len();
            for r in clipped.start_row..=clipped.end_row {
                for c in clipped.start_col..=clipped.end_col {
                    merges.insert(
                        (r, c),
                        MergeInfo {
                            is_origin: clipped.is_origin(r, c),
                            range_idx,
                        },
                    );
                }
            }
            kept.push(clipped);
        }

        let used_range = if row_count == 0 || col_count == 0 {
            None
        } else {
            Some(CellRange::new(0, 0, row_count - 1, col_count - 1))
        };

        SheetLayout {
            col_positions,
            row_positions,
            merges,
            merge_ranges: kept,
            row_count,
            col_count,
            frozen_rows,
            frozen_cols,
            used_range,
        }
    }

    /// Build a layout from a JSON sheet description.
    ///
    /// # Errors
    /// Returns an error if a merge or the used range is not valid A1 notation.
    pub fn from_description(desc: &SheetDescription) -> Result<Self> {
        let merges = desc
            .merge_cells
            .iter()
            .map(|m| require_cell_range(m))
            .collect::<Result<Vec<_>>>()?;

        let mut layout = Self::new(
            desc.rows,
            desc.cols,
            &desc.col_widths,
            &desc.row_heights,
            &desc.hidden_cols,
            &desc.hidden_rows,
            &merges,
            desc.frozen_rows,
            desc.frozen_cols,
        );
        if let Some(used) = desc.used_range.as_deref() {
            layout.set_used_range(require_cell_range(used)?);
        }
        Ok(layout)
    }

    /// Restrict the used-content range, clipped to the sheet
    pub fn set_used_range(&mut self, range: CellRange) {
        self.used_range = if self.row_count == 0
            || self.col_count == 0
            || range.start_row >= self.row_count
            || range.start_col >= self.col_count
        {
            None
        } else {
            Some(CellRange::new(
                range.start_row,
                range.start_col,
                range.end_row.min(self.row_count - 1),
                range.end_col.min(self.col_count - 1),
            ))
        };
    }

    fn col_position(&self, col: u32) -> f64 {
        let idx = (col as usize).min(self.col_positions.len().saturating_sub(1));
        self.col_positions.get(idx).copied().unwrap_or(0.0)
    }

    fn row_position(&self, row: u32) -> f64 {
        let idx = (row as usize).min(self.row_positions.len().saturating_sub(1));
        self.row_positions.get(idx).copied().unwrap_or(0.0)
    }
}

impl SheetDataView for SheetLayout {
    fn row_count(&self) -> u32 {
        self.row_count
    }

    fn row_height(&self, row: u32) -> f64 {
        if row >= self.row_count {
            return 0.0;
        }
        self.row_position(row + 1) - self.row_position(row)
    }

    fn col_count(&self) -> u32 {
        self.col_count
    }

    fn sum_col_width(&self, from: u32, to: u32) -> f64 {
        if to <= from {
            return 0.0;
        }
        self.col_position(to) - self.col_position(from)
    }

    fn freeze(&self) -> (u32, u32) {
        (self.frozen_rows, self.frozen_cols)
    }

    fn content_bounds(&self) -> Option<CellRange> {
        self.used_range
    }

    fn merges_intersecting(&self, range: &CellRange) -> Vec<CellRange> {
        // Single-cell queries are the hot path (cell_rect, merge reservation).
        if range.start_row == range.end_row && range.start_col == range.end_col {
            return self
                .merges
                .get(&(range.start_row, range.start_col))
                .and_then(|info| self.merge_ranges.get(info.range_idx))
                .copied()
                .into_iter()
                .collect();
        }
        self.merge_ranges
            .iter()
            .filter(|m| m.intersects(range))
            .copied()
            .collect()
    }

    fn frozen_band_height(&self) -> f64 {
        if self.frozen_rows == 0 {
            return 0.0;
        }
        self.row_position(self.frozen_rows)
    }

    fn frozen_band_width(&self) -> f64 {
        if self.frozen_cols == 0 {
            return 0.0;
        }
        self.col_position(self.frozen_cols)
    }

    fn row_top(&self, row: u32) -> f64 {
        self.row_position(row)
    }

    fn col_left(&self, col: u32) -> f64 {
        self.col_position(col)
    }

    /// Find column at x position (binary search)
    fn col_at_x(&self, x: f64) -> Option<u32> {
        if self.col_count == 0 {
            return None;
        }
        let idx = match self
            .col_positions
            .binary_search_by(|pos| pos.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal))
        {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let col = u32::try_from(idx).unwrap_or(u32::MAX);
        Some(col.min(self.col_count - 1))
    }

    fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        let x = self.col_position(col);
        let y = self.row_position(row);
        let mut w = self.sum_col_width(col, col + 1);
        let mut h = self.row_height(row);

        // Check for merge
        if let Some(merge) = self.merges.get(&(row, col)) {
            if !merge.is_origin {
                return CellRect {
                    x,
                    y,
                    width: w,
                    height: h,
                    skip: true,
                };
            }
            if let Some(span) = self.merge_ranges.get(merge.range_idx) {
                w = self.col_position(span.end_col + 1) - x;
                h = self.row_position(span.end_row + 1) - y;
            }
        }

        CellRect {
            x,
            y,
            width: w,
            height: h,
            skip: false,
        }
    }
}

/// Running edge positions for `count` tracks, including the final edge.
fn prefix_positions(count: u32, size_of: impl Fn(u32) -> f64) -> Vec<f64> {
    let mut positions = Vec::with_capacity(count as usize + 1);
    let mut edge = 0.0;
    for idx in 0..count {
        positions.push(edge);
        edge += size_of(idx);
    }
    positions.push(edge); // Final edge
    positions
}

/// Negative or non-finite sizes collapse to the default.
fn sanitize(size: Option<f64>, default: f64) -> f64 {
    match size {
        Some(s) if s.is_finite() && s >= 0.0 => s,
        _ => default,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn plain(rows: u32, cols: u32, merges: &[CellRange]) -> SheetLayout {
        SheetLayout::new(
            rows,
            cols,
            &HashMap::new(),
            &HashMap::new(),
            &HashSet::new(),
            &HashSet::new(),
            merges,
            0,
            0,
        )
    }

    #[test]
    fn test_basic_layout() {
        let layout = plain(11, 6, &[]);

        assert_eq!(layout.row_count(), 11);
        assert_eq!(layout.col_count(), 6);
        assert_eq!(layout.sum_col_width(0, 6), DEFAULT_COL_WIDTH * 6.0);
        assert_eq!(layout.row_top(11), DEFAULT_ROW_HEIGHT * 11.0);
        assert_eq!(layout.content_bounds(), Some(CellRange::new(0, 0, 10, 5)));
    }

    #[test]
    fn test_empty_sheet_has_no_bounds() {
        let layout = plain(0, 4, &[]);
        assert_eq!(layout.content_bounds(), None);
        assert_eq!(layout.row_top(3), 0.0);
        assert_eq!(layout.row_height(0), 0.0);
    }

    #[test]
    fn test_hidden_and_custom_sizes() {
        let widths = HashMap::from([(1, 100.0), (2, -5.0)]);
        let heights = HashMap::from([(0, 40.0)]);
        let layout = SheetLayout::new(
            5,
            4,
            &widths,
            &heights,
            &HashSet::from([3]),
            &HashSet::from([2]),
            &[],
            1,
            1,
        );

        assert_eq!(layout.sum_col_width(0, 4), 64.0 + 100.0 + 64.0);
        assert_eq!(layout.sum_col_width(3, 1), 0.0);
        assert_eq!(layout.row_height(0), 40.0);
        assert_eq!(layout.row_height(2), 0.0);
        assert_eq!(layout.frozen_band_height(), 40.0);
        assert_eq!(layout.frozen_band_width(), 64.0);
    }

    #[test]
    fn test_cell_rect() {
        let layout = plain(11, 6, &[]);

        let rect = layout.cell_rect(0, 0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, DEFAULT_COL_WIDTH);
        assert_eq!(rect.height, DEFAULT_ROW_HEIGHT);
        assert!(!rect.skip);

        let rect = layout.cell_rect(1, 2);
        assert_eq!(rect.x, DEFAULT_COL_WIDTH * 2.0);
        assert_eq!(rect.y, DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_merged_cells() {
        // Merge A1:B2 (rows 0-1, cols 0-1)
        let layout = plain(11, 6, &[CellRange::new(0, 0, 1, 1)]);

        // Origin cell should have full merged dimensions
        let rect = layout.cell_rect(0, 0);
        assert!(!rect.skip);
        assert_eq!(rect.width, DEFAULT_COL_WIDTH * 2.0);
        assert_eq!(rect.height, DEFAULT_ROW_HEIGHT * 2.0);

        // Non-origin cells should be skipped
        assert!(layout.cell_rect(0, 1).skip);
        assert!(layout.cell_rect(1, 0).skip);
        assert!(layout.cell_rect(1, 1).skip);
    }

    #[test]
    fn test_merges_clipped_and_queried() {
        let layout = plain(
            4,
            4,
            &[
                CellRange::new(2, 2, 9, 9),
                CellRange::new(0, 0, 0, 0),
                CellRange::new(7, 0, 8, 1),
            ],
        );

        assert_eq!(layout.merge_ranges, vec![CellRange::new(2, 2, 3, 3)]);
        assert_eq!(
            layout.merges_intersecting(&CellRange::cell(3, 3)),
            vec![CellRange::new(2, 2, 3, 3)]
        );
        assert!(layout.merges_intersecting(&CellRange::new(0, 0, 1, 3)).is_empty());
        assert_eq!(layout.merges_intersecting(&CellRange::new(0, 0, 3, 3)).len(), 1);
    }

    #[test]
    fn test_col_at_x() {
        let layout = plain(11, 6, &[]);

        assert_eq!(layout.col_at_x(0.0), Some(0));
        assert_eq!(layout.col_at_x(32.0), Some(0));
        assert_eq!(layout.col_at_x(DEFAULT_COL_WIDTH), Some(1));
        assert_eq!(layout.col_at_x(DEFAULT_COL_WIDTH * 2.5), Some(2));
        assert_eq!(layout.col_at_x(1.0e9), Some(5));
        assert_eq!(plain(3, 0, &[]).col_at_x(0.0), None);
    }

    #[test]
    fn test_from_description() {
        let desc: SheetDescription = serde_json::from_str(
            r#"{"rows":10,"cols":4,"rowHeights":{"0":30},"mergeCells":["A1:B1"],
                "frozenRows":1,"usedRange":"A1:C8"}"#,
        )
        .unwrap();
        let layout = SheetLayout::from_description(&desc).unwrap();

        assert_eq!(layout.row_height(0), 30.0);
        assert_eq!(layout.freeze(), (1, 0));
        assert_eq!(layout.content_bounds(), Some(CellRange::new(0, 0, 7, 2)));
        assert_eq!(layout.merge_ranges, vec![CellRange::new(0, 0, 0, 1)]);
    }

    #[test]
    fn test_from_description_rejects_bad_merge() {
        let desc = SheetDescription {
            rows: 2,
            cols: 2,
            merge_cells: vec!["A1:?".to_string()],
            ..SheetDescription::default()
        };
        assert!(SheetLayout::from_description(&desc).is_err());
    }
}
