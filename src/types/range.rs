use serde::{Deserialize, Serialize};

/// Inclusive rectangular cell range (0-indexed rows and columns).
///
/// Used for the used-content bounds, merge spans and the view range of a page.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl CellRange {
    /// Build a range, normalizing reversed corners.
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row: start_row.min(end_row),
            start_col: start_col.min(end_col),
            end_row: start_row.max(end_row),
            end_col: start_col.max(end_col),
        }
    }

    /// Single-cell range.
    pub fn cell(row: u32, col: u32) -> Self {
        Self::new(row, col, row, col)
    }

    pub fn row_span(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    pub fn col_span(&self) -> u32 {
        self.end_col - self.start_col + 1
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        row >= self.start_row && row <= self.end_row && col >= self.start_col && col <= self.end_col
    }

    pub fn intersects(&self, other: &CellRange) -> bool {
        self.start_row <= other.end_row
            && other.start_row <= self.end_row
            && self.start_col <= other.end_col
            && other.start_col <= self.end_col
    }

    /// True if this range is the origin cell of itself, i.e. `(row, col)` is its top-left.
    pub fn is_origin(&self, row: u32, col: u32) -> bool {
        self.start_row == row && self.start_col == col
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corners() {
        let range = CellRange::new(5, 4, 1, 2);
        assert_eq!(range, CellRange::new(1, 2, 5, 4));
        assert_eq!(range.row_span(), 5);
        assert_eq!(range.col_span(), 3);
    }

    #[test]
    fn test_intersects() {
        let a = CellRange::new(0, 0, 3, 3);
        assert!(a.intersects(&CellRange::new(3, 3, 5, 5)));
        assert!(!a.intersects(&CellRange::new(4, 0, 5, 5)));
        assert!(!a.intersects(&CellRange::new(0, 4, 0, 4)));
    }

    #[test]
    fn test_contains_and_origin() {
        let merge = CellRange::new(2, 1, 4, 3);
        assert!(merge.contains(3, 2));
        assert!(!merge.contains(5, 2));
        assert!(merge.is_origin(2, 1));
        assert!(!merge.is_origin(2, 2));
    }
}
