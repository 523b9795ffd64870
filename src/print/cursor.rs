//! Traversal state of one pagination pass.

use crate::types::CellRange;

/// Mutable cursor the tiler drives forward, one vertical band at a time.
///
/// Allocated fresh for every pass and only ever moves forward within it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCursor {
    /// First row not yet placed on a page
    pub next_row: u32,
    /// Vertical offset (unscaled) applied to body rows of the next page
    pub vertical_offset: f64,
    /// Rows/columns placed on the most recent page, used to look up merges
    pub view_range: CellRange,
}

/// Saved `(next_row, vertical_offset)` of a cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorSnapshot {
    pub next_row: u32,
    pub vertical_offset: f64,
}

impl PageCursor {
    pub fn new(start_row: u32) -> Self {
        Self {
            next_row: start_row,
            vertical_offset: 0.0,
            view_range: CellRange::new(start_row, 0, start_row, 0),
        }
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            next_row: self.next_row,
            vertical_offset: self.vertical_offset,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.next_row = snapshot.next_row;
        self.vertical_offset = snapshot.vertical_offset;
    }

    /// Move past a committed band of rows `start..=end` whose unscaled height is
    /// `committed_height`; `end_col` is the last column of the view.
    pub fn advance(&mut self, start: u32, end: u32, committed_height: f64, end_col: u32) {
        self.next_row = end.saturating_add(1);
        self.vertical_offset -= committed_height;
        self.view_range = CellRange::new(start, 0, end, end_col);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_carries_offset() {
        let mut cursor = PageCursor::new(0);
        cursor.advance(0, 49, 1000.0, 7);
        assert_eq!(cursor.next_row, 50);
        assert_eq!(cursor.vertical_offset, -1000.0);
        assert_eq!(cursor.view_range, CellRange::new(0, 0, 49, 7));

        cursor.advance(50, 59, 200.0, 7);
        assert_eq!(cursor.next_row, 60);
        assert_eq!(cursor.vertical_offset, -1200.0);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut cursor = PageCursor::new(2);
        let snapshot = cursor.snapshot();
        cursor.advance(2, 10, 180.0, 3);
        cursor.restore(snapshot);
        assert_eq!(cursor.next_row, 2);
        assert_eq!(cursor.vertical_offset, 0.0);
        // View range is not part of the snapshot
        assert_eq!(cursor.view_range, CellRange::new(2, 0, 10, 3));
    }
}
