//! Read-only view over sheet geometry consumed by the pagination engine.

use crate::types::CellRange;

/// Rectangle representing a cell's bounds in sheet coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (top edge)
    pub y: f64,
    /// Width of the cell (full merged width for merge origins)
    pub width: f64,
    /// Height of the cell (full merged height for merge origins)
    pub height: f64,
    /// True if this cell should be skipped (part of merge but not origin)
    pub skip: bool,
}

/// Geometry accessor the tiler and page renderer borrow for one pagination pass.
///
/// Implementations are trusted to be internally consistent; out-of-range
/// lookups should return a neutral value (0 height/width) rather than fail.
pub trait SheetDataView {
    /// Number of rows in the sheet
    fn row_count(&self) -> u32;

    /// Height of a row in CSS pixels (0 for hidden rows)
    fn row_height(&self, row: u32) -> f64;

    /// Number of columns in the sheet
    fn col_count(&self) -> u32;

    /// Sum of column widths over the half-open range `from..to`
    fn sum_col_width(&self, from: u32, to: u32) -> f64;

    /// `(frozen_rows, frozen_cols)`
    fn freeze(&self) -> (u32, u32);

    /// Bounding range of used cells, or `None` for an empty sheet
    fn content_bounds(&self) -> Option<CellRange>;

    /// Merge spans intersecting `range`
    fn merges_intersecting(&self, range: &CellRange) -> Vec<CellRange>;

    /// Total height of the frozen rows
    fn frozen_band_height(&self) -> f64 {
        let frozen_rows = self.freeze().0.min(self.row_count());
        (0..frozen_rows).map(|row| self.row_height(row)).sum()
    }

    /// Total width of the frozen columns
    fn frozen_band_width(&self) -> f64 {
        let frozen_cols = self.freeze().1.min(self.col_count());
        self.sum_col_width(0, frozen_cols)
    }

    /// Y of a row's top edge
    fn row_top(&self, row: u32) -> f64 {
        (0..row.min(self.row_count()))
            .map(|r| self.row_height(r))
            .sum()
    }

    /// X of a column's left edge
    fn col_left(&self, col: u32) -> f64 {
        self.sum_col_width(0, col)
    }

    /// Column whose span contains `x`, clamped to the last column.
    ///
    /// Returns `None` only for sheets without columns.
    fn col_at_x(&self, x: f64) -> Option<u32> {
        let cols = self.col_count();
        if cols == 0 {
            return None;
        }
        let mut right = 0.0;
        for col in 0..cols {
            right += self.sum_col_width(col, col + 1);
            if x < right {
                return Some(col);
            }
        }
        Some(cols - 1)
    }

    /// Cell bounds in sheet coordinates, expanded to the full span for merge origins
    fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        let x = self.col_left(col);
        let y = self.row_top(row);
        let merge = self
            .merges_intersecting(&CellRange::cell(row, col))
            .into_iter()
            .next();

        match merge {
            Some(span) if !span.is_origin(row, col) => CellRect {
                x,
                y,
                width: self.sum_col_width(col, col + 1),
                height: self.row_height(row),
                skip: true,
            },
            Some(span) => CellRect {
                x,
                y,
                width: self.sum_col_width(span.start_col, span.end_col + 1),
                height: (span.start_row..=span.end_row)
                    .map(|r| self.row_height(r))
                    .sum(),
                skip: false,
            },
            None => CellRect {
                x,
                y,
                width: self.sum_col_width(col, col + 1),
                height: self.row_height(row),
                skip: false,
            },
        }
    }
}
