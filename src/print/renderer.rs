//! Renders one page surface per page descriptor.

use super::scale::PageGeometry;
use super::sheet_view::SheetDataView;
use super::tiler::PageDescriptor;
use crate::error::Result;
use crate::render::{CellPainter, PageSurface, SurfaceFactory};
use crate::types::CellRange;

/// Draws pages of one pagination pass.
///
/// Drawing order per page, each step under its own save/restore:
/// 1. body rows of the band, shifted by the strip's left offset
/// 2. merges intersecting the page's view range, repainted from their origin
/// 3. frozen rows (shifted with the strip) and frozen columns (fixed at the
///    left), clipped to the frozen band once the body no longer continues it
/// 4. clear the left/right padding strips
pub struct PageRenderer<'a> {
    sheet: &'a dyn SheetDataView,
    geometry: PageGeometry,
}

impl<'a> PageRenderer<'a> {
    pub fn new(sheet: &'a dyn SheetDataView, geometry: PageGeometry) -> Self {
        Self { sheet, geometry }
    }

    /// Render `page` onto a fresh surface from `factory`.
    ///
    /// # Errors
    /// Only surface allocation can fail; drawing itself never does.
    pub fn render_page<F, P>(
        &self,
        page: &PageDescriptor,
        factory: &mut F,
        painter: &mut P,
    ) -> Result<F::Surface>
    where
        F: SurfaceFactory,
        P: CellPainter<F::Surface>,
    {
        let g = self.geometry;
        let mut surface = factory.create_surface(g.paper_width, g.paper_height)?;
        let origin_x = g.padding + g.align_offset;
        let origin_y = g.padding;

        self.draw_body(&mut surface, painter, page, origin_x, origin_y);
        self.draw_view_merges(&mut surface, painter, page, origin_x, origin_y);
        self.draw_frozen(&mut surface, painter, page, origin_x, origin_y);

        if g.padding > 0.0 {
            surface.clear_rect(0.0, 0.0, g.padding, g.paper_height);
            surface.clear_rect(g.paper_width - g.padding, 0.0, g.padding, g.paper_height);
        }

        Ok(surface)
    }

    fn begin<S: PageSurface>(&self, surface: &mut S, x: f64, y: f64) {
        surface.save();
        surface.translate(x, y);
        if self.geometry.scale < 1.0 {
            surface.scale(self.geometry.scale, self.geometry.scale);
        }
    }

    fn draw_body<S, P>(
        &self,
        surface: &mut S,
        painter: &mut P,
        page: &PageDescriptor,
        x: f64,
        y: f64,
    ) where
        S: PageSurface,
        P: CellPainter<S>,
    {
        self.begin(surface, x + page.left_offset, y);
        for row in page.rows.clone() {
            for col in 0..page.cols.end {
                painter.paint_cell(surface, self.sheet, row, col, page.vertical_offset);
            }
        }
        surface.restore();
    }

    fn draw_view_merges<S, P>(
        &self,
        surface: &mut S,
        painter: &mut P,
        page: &PageDescriptor,
        x: f64,
        y: f64,
    ) where
        S: PageSurface,
        P: CellPainter<S>,
    {
        let Some(view) = page.view_range else {
            return;
        };
        let (frozen_rows, _) = self.sheet.freeze();
        let painted = body_range(page);
        self.begin(surface, x + page.left_offset, y);
        for merge in self.sheet.merges_intersecting(&view) {
            // Frozen-band merges are drawn with the frozen rows.
            if merge.start_row < frozen_rows {
                continue;
            }
            if painted.is_some_and(|r| r.contains(merge.start_row, merge.start_col)) {
                continue;
            }
            painter.paint_cell(
                surface,
                self.sheet,
                merge.start_row,
                merge.start_col,
                page.vertical_offset,
            );
        }
        surface.restore();
    }

    /// Clip to the frozen rows and/or columns on pages where the body next to
    /// them does not continue them: frozen rows once the vertical offset is
    /// negative, frozen columns on every strip after the first.
    fn clip_frozen<S: PageSurface>(
        &self,
        surface: &mut S,
        page: &PageDescriptor,
        x: f64,
        y: f64,
        rows: bool,
        cols: bool,
    ) {
        let g = self.geometry;
        let clip_rows = rows && page.vertical_offset < 0.0;
        let clip_cols = cols && page.left_offset < 0.0;
        if !clip_rows && !clip_cols {
            return;
        }
        let (top, height) = if clip_rows {
            (y, self.sheet.frozen_band_height() * g.scale)
        } else {
            (0.0, g.paper_height)
        };
        let (left, width) = if clip_cols {
            (x, self.sheet.frozen_band_width() * g.scale)
        } else {
            (0.0, g.paper_width)
        };
        surface.clip_rect(left, top, width, height);
    }

    fn draw_frozen<S, P>(
        &self,
        surface: &mut S,
        painter: &mut P,
        page: &PageDescriptor,
        x: f64,
        y: f64,
    ) where
        S: PageSurface,
        P: CellPainter<S>,
    {
        let (frozen_rows, frozen_cols) = self.sheet.freeze();
        let frozen_rows = frozen_rows.min(self.sheet.row_count());
        let frozen_cols = frozen_cols.min(self.sheet.col_count());

        if frozen_rows > 0 && page.cols.end > 0 {
            surface.save();
            self.clip_frozen(surface, page, x, y, true, false);
            self.begin(surface, x + page.left_offset, y);
            for row in 0..frozen_rows {
                for col in 0..page.cols.end {
                    painter.paint_cell(surface, self.sheet, row, col, 0.0);
                }
            }
            surface.restore();
            surface.restore();
        }

        if frozen_cols > 0 {
            surface.save();
            self.clip_frozen(surface, page, x, y, false, true);
            self.begin(surface, x, y);
            for row in page.rows.clone() {
                for col in 0..frozen_cols {
                    painter.paint_cell(surface, self.sheet, row, col, page.vertical_offset);
                }
            }
            surface.restore();
            surface.restore();

            surface.save();
            self.clip_frozen(surface, page, x, y, true, true);
            self.begin(surface, x, y);
            for row in 0..frozen_rows {
                for col in 0..frozen_cols {
                    painter.paint_cell(surface, self.sheet, row, col, 0.0);
                }
            }
            surface.restore();
            surface.restore();
        }
    }
}

/// Cells the body pass paints: the band's rows across columns `0..cols.end`.
fn body_range(page: &PageDescriptor) -> Option<CellRange> {
    if page.rows.is_empty() || page.cols.end == 0 {
        return None;
    }
    Some(CellRange::new(
        page.rows.start,
        0,
        page.rows.end - 1,
        page.cols.end - 1,
    ))
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
    use crate::print::Tiler;
    use crate::render::{DrawOp, RecordingFactory, RecordingPainter, RecordingSurface};
    use std::collections::{HashMap, HashSet};

    fn sheet(rows: u32, cols: u32, merges: &[CellRange], frozen: (u32, u32)) -> SheetLayout {
        SheetLayout::new(
            rows,
            cols,
            &HashMap::new(),
            &HashMap::new(),
            &HashSet::new(),
            &HashSet::new(),
            merges,
            frozen.0,
            frozen.1,
        )
    }

    fn geometry(padding: f64, scale: f64) -> PageGeometry {
        PageGeometry {
            paper_width: 800.0 + 2.0 * padding,
            paper_height: 1000.0 + 2.0 * padding,
            padding,
            printable_width: 800.0,
            printable_height: 1000.0,
            scale,
            align_offset: 0.0,
        }
    }

    fn render_all(layout: &SheetLayout, g: PageGeometry) -> Vec<RecordingSurface> {
        let renderer = PageRenderer::new(layout, g);
        Tiler::new(layout, g)
            .map(|page| {
                renderer
                    .render_page(&page, &mut RecordingFactory::default(), &mut RecordingPainter)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_second_page_starts_at_top() {
        let layout = sheet(60, 2, &[], (0, 0));
        let pages = render_all(&layout, geometry(0.0, 1.0));
        assert_eq!(pages.len(), 2);
        let first = pages[1].cells().next().unwrap();
        assert_eq!((first.row, first.y), (50, 0.0));
        assert!(pages.iter().all(|p| p.depth() == 0));
    }

    #[test]
    fn test_frozen_rows_repeat() {
        let layout = sheet(60, 2, &[], (1, 0));
        let pages = render_all(&layout, geometry(10.0, 1.0));
        for page in &pages {
            let header: Vec<_> = page.cells().filter(|c| c.row == 0).collect();
            assert_eq!(header.len(), 2);
            assert!(header.iter().all(|c| c.y == 10.0));
        }
        // First body row of page 2 sits right below the header
        let body = pages[1].cells().find(|c| c.row > 0).unwrap();
        assert_eq!(body.y, 30.0);
    }

    #[test]
    fn test_spilled_merge_repainted_from_origin() {
        // Merge taller than a page spills onto page 2
        let layout = sheet(80, 2, &[CellRange::new(0, 0, 59, 0)], (0, 0));
        let pages = render_all(&layout, geometry(0.0, 1.0));
        let origin = pages[1]
            .cells()
            .find(|c| c.row == 0 && c.col == 0)
            .unwrap();
        assert_eq!(origin.height, 1200.0);
        assert!(origin.y < 0.0);
    }

    #[test]
    fn test_scale_and_padding_clear() {
        let layout = sheet(5, 2, &[], (0, 0));
        let pages = render_all(&layout, geometry(50.0, 0.5));
        let ops = pages[0].ops();
        assert!(ops.contains(&DrawOp::Scale { x: 0.5, y: 0.5 }));
        assert!(ops.contains(&DrawOp::ClearRect {
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 1100.0
        }));
        assert!(ops.contains(&DrawOp::ClearRect {
            x: 850.0,
            y: 0.0,
            width: 50.0,
            height: 1100.0
        }));
        let cell = pages[0].cells().find(|c| c.row == 1 && c.col == 1).unwrap();
        assert_eq!((cell.x, cell.y, cell.width), (82.0, 60.0, 32.0));
    }

    #[test]
    fn test_frozen_cols_on_every_strip() {
        let layout = sheet(5, 20, &[], (0, 1));
        let pages = render_all(&layout, geometry(0.0, 1.0));
        assert_eq!(pages.len(), 2);
        let pinned = pages[1]
            .cells()
            .filter(|c| c.col == 0 && c.x == 0.0)
            .count();
        assert_eq!(pinned, 5);
    }
}
