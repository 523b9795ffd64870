//! Vertical and horizontal tiling of a sheet into pages.
//!
//! The tiler walks body rows one page at a time (vertical pass). When the
//! scaled content is wider than the printable width, every vertical band is
//! repeated as a series of horizontal strips, each shifted left by one
//! printable width. Strips are driven from an explicit work stack so very wide
//! sheets never recurse.

use std::ops::Range;

use serde::Serialize;

use super::cursor::{CursorSnapshot, PageCursor};
use super::paper::Paper;
use super::scale::PageGeometry;
use super::sheet_view::SheetDataView;
use crate::cell_ref::format_cell_range;
use crate::types::CellRange;

/// Tolerance for comparing accumulated float extents against page extents.
pub const LAYOUT_EPSILON: f64 = 1e-6;

/// One page produced by the tiler. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    /// Position in the output sequence
    pub index: usize,
    /// Vertical band this page belongs to
    pub band: usize,
    /// Horizontal strip within the band (0 = leftmost)
    pub strip: usize,
    /// Horizontal origin shift in page units: `0, -pw, -2pw, ...`
    pub left_offset: f64,
    /// Body rows committed to the band (frozen rows excluded)
    pub rows: Range<u32>,
    /// Columns visible in this strip
    pub cols: Range<u32>,
    /// Unscaled vertical offset applied to body rows
    pub vertical_offset: f64,
    /// Rows/columns placed on this page, used to look up merges to repaint
    pub view_range: Option<CellRange>,
}

/// Result of a full pagination pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub geometry: PageGeometry,
    pub pages: Vec<PageDescriptor>,
}

impl Pagination {
    /// Number of vertical bands (pages per horizontal strip)
    pub fn band_count(&self) -> usize {
        self.pages.last().map_or(0, |p| p.band + 1)
    }
}

/// Unscaled width of the used content, from column 0 to the last used column.
pub fn content_width<V: SheetDataView + ?Sized>(view: &V) -> f64 {
    view.content_bounds()
        .map_or(0.0, |bounds| view.sum_col_width(0, bounds.end_col.saturating_add(1)))
}

/// Paginate `view` onto `paper` in one pass.
pub fn paginate<V: SheetDataView + ?Sized>(view: &V, paper: &Paper) -> Pagination {
    let tiler = Tiler::for_paper(view, paper);
    let geometry = tiler.geometry();
    let pages: Vec<PageDescriptor> = tiler.collect();
    tracing::debug!(
        pages = pages.len(),
        scale = geometry.scale,
        paper = %paper.name,
        orientation = %paper.orientation,
        "pagination complete"
    );
    Pagination { geometry, pages }
}

#[derive(Debug, Clone)]
struct Band {
    rows: Range<u32>,
    vertical_offset: f64,
    view_range: Option<CellRange>,
}

/// Horizontal strip waiting on the work stack.
#[derive(Debug, Clone, Copy)]
struct Strip {
    band: usize,
    index: usize,
    left: f64,
    consumed: f64,
    total: f64,
    snapshot: CursorSnapshot,
}

/// Lazily yields [`PageDescriptor`]s for one pagination pass.
///
/// Pages come band by band; within a band every horizontal strip is emitted
/// before the next band starts. Each strip after the first starts a full
/// printable width to the right of the previous one, while frozen columns are
/// redrawn at the page's left edge. On those strips the frozen columns cover
/// the first `frozen_band_width() * scale` pixels of content, so that slice of
/// the sheet is not printed.
pub struct Tiler<'a, V: SheetDataView + ?Sized> {
    view: &'a V,
    geometry: PageGeometry,
    cursor: PageCursor,
    bounds: Option<CellRange>,
    frozen_height: f64,
    pending: Vec<Strip>,
    bands: usize,
    emitted: usize,
}

impl<'a, V: SheetDataView + ?Sized> Tiler<'a, V> {
    pub fn new(view: &'a V, geometry: PageGeometry) -> Self {
        let (frozen_rows, _) = view.freeze();
        Self {
            view,
            geometry,
            cursor: PageCursor::new(frozen_rows),
            bounds: view.content_bounds(),
            frozen_height: view.frozen_band_height(),
            pending: Vec::new(),
            bands: 0,
            emitted: 0,
        }
    }

    /// Tiler with geometry resolved from `paper` for this sheet's content.
    pub fn for_paper(view: &'a V, paper: &Paper) -> Self {
        let geometry = PageGeometry::resolve(paper, content_width(view));
        Self::new(view, geometry)
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    fn end_col(&self) -> u32 {
        self.bounds.map_or(0, |b| b.end_col)
    }

    /// Commit rows from the cursor until the printable height is used up.
    fn walk_band(&mut self) -> Band {
        let start = self.cursor.next_row;
        let vertical_offset = self.cursor.vertical_offset;
        let Some(bounds) = self.bounds else {
            return Band {
                rows: start..start,
                vertical_offset,
                view_range: None,
            };
        };
        if start > bounds.end_row {
            return Band {
                rows: start..start,
                vertical_offset,
                view_range: None,
            };
        }

        let scale = self.geometry.scale;
        let limit = self.geometry.printable_height + LAYOUT_EPSILON;
        let mut th = self.frozen_height * scale;
        let body_space = limit - th;
        let mut committed = 0.0;
        let mut row = start;

        while row <= bounds.end_row {
            let height = self.view.row_height(row);
            let rh = height * scale;
            let mut extra = self.merge_extra(row, bounds.end_row) * scale;
            if extra > 0.0 && rh + extra > body_space {
                // Taller than any page: let it spill instead of reserving it.
                tracing::warn!(
                    row,
                    height = rh + extra,
                    "merge taller than the printable height"
                );
                extra = 0.0;
            }
            let fits = th + rh + extra <= limit;
            tracing::trace!(row, th, rh, extra, fits, "row fit");
            if !fits && row != start {
                break;
            }
            if !fits {
                tracing::warn!(
                    row,
                    height = rh + extra,
                    printable_height = self.geometry.printable_height,
                    "row taller than the printable height; page overflows"
                );
            }
            th += rh;
            committed += height;
            row += 1;
            if !fits {
                break;
            }
        }

        let end = row - 1;
        self.cursor.advance(start, end, committed, bounds.end_col);
        Band {
            rows: start..row,
            vertical_offset,
            view_range: Some(self.cursor.view_range),
        }
    }

    /// Unscaled height of rows below `row` spanned by merges rooted at `row`.
    fn merge_extra(&self, row: u32, end_row: u32) -> f64 {
        self.view
            .merges_intersecting(&CellRange::new(row, 0, row, self.end_col()))
            .iter()
            .filter(|m| m.start_row == row && m.end_row > row)
            .map(|m| {
                (row + 1..=m.end_row.min(end_row))
                    .map(|r| self.view.row_height(r))
                    .sum::<f64>()
            })
            .fold(0.0, f64::max)
    }

    /// Columns visible in a strip whose origin is shifted by `left`.
    fn visible_cols(&self, left: f64) -> Range<u32> {
        let scale = self.geometry.scale;
        let x0 = -left / scale;
        let x1 = (-left + self.geometry.printable_width) / scale - LAYOUT_EPSILON;
        match (self.view.col_at_x(x0), self.view.col_at_x(x1.max(x0))) {
            (Some(first), Some(last)) => {
                let last = last.min(self.end_col());
                first.min(last)..last + 1
            }
            _ => 0..0,
        }
    }

    fn emit(&mut self, band: &Band, strip: Strip) -> PageDescriptor {
        let page = PageDescriptor {
            index: self.emitted,
            band: strip.band,
            strip: strip.index,
            left_offset: strip.left,
            rows: band.rows.clone(),
            cols: self.visible_cols(strip.left),
            vertical_offset: band.vertical_offset,
            view_range: band.view_range,
        };
        self.emitted += 1;

        let printable_width = self.geometry.printable_width;
        let consumed = strip.consumed + printable_width;
        if printable_width > 0.0 && consumed + LAYOUT_EPSILON < strip.total {
            self.pending.push(Strip {
                index: strip.index + 1,
                left: strip.left - printable_width,
                consumed,
                ..strip
            });
        }

        tracing::debug!(
            page = page.index,
            band = page.band,
            strip = page.strip,
            rows = ?page.rows,
            cols = ?page.cols,
            view = ?page.view_range.as_ref().map(format_cell_range),
            vertical_offset = page.vertical_offset,
            "page tiled"
        );
        page
    }
}

impl<V: SheetDataView + ?Sized> Iterator for Tiler<'_, V> {
    type Item = PageDescriptor;

    fn next(&mut self) -> Option<PageDescriptor> {
        if let Some(strip) = self.pending.pop() {
            // Same rows again: rewind the cursor to where the band started.
            self.cursor.restore(strip.snapshot);
            let band = self.walk_band();
            return Some(self.emit(&band, strip));
        }

        let bounds = self.bounds?;
        // A sheet whose used rows all sit in the frozen band still prints one page.
        if self.cursor.next_row > bounds.end_row && self.emitted > 0 {
            return None;
        }

        let snapshot = self.cursor.snapshot();
        let band = self.walk_band();
        let total = self
            .view
            .sum_col_width(0, bounds.end_col.saturating_add(1))
            * self.geometry.scale;
        let strip = Strip {
            band: self.bands,
            index: 0,
            left: 0.0,
            consumed: 0.0,
            total,
            snapshot,
        };
        self.bands += 1;
        Some(self.emit(&band, strip))
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
    use crate::layout::SheetLayout;
    use std::collections::{HashMap, HashSet};

    fn sheet(rows: u32, cols: u32, merges: &[CellRange], frozen_rows: u32) -> SheetLayout {
        SheetLayout::new(
            rows,
            cols,
            &HashMap::new(),
            &HashMap::new(),
            &HashSet::new(),
            &HashSet::new(),
            merges,
            frozen_rows,
            0,
        )
    }

    fn geometry(printable_width: f64, printable_height: f64, scale: f64) -> PageGeometry {
        PageGeometry {
            paper_width: printable_width,
            paper_height: printable_height,
            padding: 0.0,
            printable_width,
            printable_height,
            scale,
            align_offset: 0.0,
        }
    }

    #[test]
    fn test_single_page() {
        let layout = sheet(10, 4, &[], 0);
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].rows, 0..10);
        assert_eq!(pages[0].cols, 0..4);
        assert_eq!(pages[0].vertical_offset, 0.0);
    }

    #[test]
    fn test_exact_fill_is_included() {
        // 60 rows of 20px into 1000px: first page takes exactly 50 rows
        let layout = sheet(60, 4, &[], 0);
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows, 0..50);
        assert_eq!(pages[1].rows, 50..60);
        assert_eq!(pages[1].vertical_offset, -1000.0);
    }

    #[test]
    fn test_frozen_rows_reserve_space() {
        // 2 frozen rows (40px) leave 960px: 48 body rows per page
        let layout = sheet(100, 2, &[], 2);
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        assert_eq!(pages[0].rows, 2..50);
        assert_eq!(pages[1].rows, 50..98);
        assert_eq!(pages[2].rows, 98..100);
        assert_eq!(pages[1].vertical_offset, -960.0);
        assert_eq!(pages[2].vertical_offset, -1920.0);
    }

    #[test]
    fn test_merge_is_not_split() {
        // Merge rooted at row 48 spans rows 48..=51: only rows 0..48 fit on page 1
        let layout = sheet(60, 4, &[CellRange::new(48, 0, 51, 1)], 0);
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        assert_eq!(pages[0].rows, 0..48);
        assert_eq!(pages[1].rows, 48..60);
    }

    #[test]
    fn test_merge_taller_than_page_spills() {
        let layout = sheet(80, 2, &[CellRange::new(10, 0, 69, 0)], 0);
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        assert_eq!(pages[0].rows, 0..50);
        assert_eq!(pages[1].rows, 50..80);
    }

    #[test]
    fn test_oversized_row_committed_alone() {
        let heights = HashMap::from([(1, 5000.0)]);
        let layout = SheetLayout::new(
            4,
            1,
            &HashMap::new(),
            &heights,
            &HashSet::new(),
            &HashSet::new(),
            &[],
            0,
            0,
        );
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        let rows: Vec<_> = pages.iter().map(|p| p.rows.clone()).collect();
        assert_eq!(rows, vec![0..1, 1..2, 2..4]);
    }

    #[test]
    fn test_horizontal_strips() {
        // 3000px content (47 cols x 64 = 3008) at scale 1 into 800px
        let layout = sheet(10, 47, &[], 0);
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        assert_eq!(pages.len(), 4);
        let lefts: Vec<f64> = pages.iter().map(|p| p.left_offset).collect();
        assert_eq!(lefts, vec![0.0, -800.0, -1600.0, -2400.0]);
        assert!(pages.iter().all(|p| p.rows == (0..10) && p.band == 0));
        assert_eq!(pages[1].cols.start, 12);
        assert_eq!(pages[3].cols.end, 47);
    }

    #[test]
    fn test_strips_repeat_every_band() {
        let layout = sheet(60, 20, &[], 0); // 1280px wide
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        let shape: Vec<_> = pages
            .iter()
            .map(|p| (p.band, p.strip, p.rows.clone()))
            .collect();
        assert_eq!(
            shape,
            vec![(0, 0, 0..50), (0, 1, 0..50), (1, 0, 50..60), (1, 1, 50..60)]
        );
    }

    #[test]
    fn test_fit_to_width_single_strip() {
        let layout = sheet(10, 47, &[], 0);
        let paper = Paper::custom(800.0, 1000.0, 0.0);
        let pagination = paginate(&layout, &paper);
        assert_eq!(pagination.pages.len(), 1);
        assert!(pagination.geometry.scale < 1.0);
    }

    #[test]
    fn test_empty_sheet_yields_no_pages() {
        let layout = sheet(0, 0, &[], 0);
        assert_eq!(Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).count(), 0);
    }

    #[test]
    fn test_frozen_only_sheet_yields_one_page() {
        let layout = sheet(2, 3, &[], 2);
        let pages: Vec<_> = Tiler::new(&layout, geometry(800.0, 1000.0, 1.0)).collect();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].rows.is_empty());
        assert_eq!(pages[0].view_range, None);
    }
}
