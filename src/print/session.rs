//! Print preview session: paper settings plus the pages of the last preview.

use super::paper::Paper;
use super::renderer::PageRenderer;
use super::sheet_view::SheetDataView;
use super::tiler::{paginate, Pagination};
use crate::error::Result;
use crate::render::{CellPainter, PageSurface, PrintHost, SurfaceFactory};
use crate::types::{Alignment, Orientation, PaperConfig};

/// Construction-time options of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintOptions {
    /// Device pixel ratio of the rendering surfaces
    pub dpr: f64,
    /// Stacking order of the preview container
    pub z_index: i32,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            dpr: 1.0,
            z_index: 10,
        }
    }
}

/// Owns the paper configuration and the rendered pages of the latest preview.
///
/// Every paper change discards the previous pages; the next [`preview`]
/// recomputes the whole pass from scratch.
///
/// [`preview`]: PrintSession::preview
pub struct PrintSession<S> {
    paper: Paper,
    options: PrintOptions,
    pagination: Option<Pagination>,
    pages: Vec<S>,
}

impl<S: PageSurface> Default for PrintSession<S> {
    fn default() -> Self {
        Self::new(Paper::default(), PrintOptions::default())
    }
}

impl<S: PageSurface> PrintSession<S> {
    pub fn new(paper: Paper, options: PrintOptions) -> Self {
        Self {
            paper,
            options,
            pagination: None,
            pages: Vec::new(),
        }
    }

    pub fn paper(&self) -> &Paper {
        &self.paper
    }

    pub fn options(&self) -> PrintOptions {
        self.options
    }

    /// Select a named paper size.
    ///
    /// # Errors
    /// Returns `UnknownPaperSize`; the paper and pages are left untouched then.
    pub fn set_paper_size(&mut self, name: &str) -> Result<()> {
        self.paper.set_size(name)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.paper.orientation = orientation;
        self.invalidate();
    }

    pub fn set_alignment(&mut self, align: Alignment) {
        self.paper.align = align;
        self.invalidate();
    }

    pub fn set_padding(&mut self, padding: f64) {
        self.paper.padding = padding.max(0.0);
        self.invalidate();
    }

    pub fn set_fit_to_width(&mut self, fit: bool) {
        self.paper.fit_to_width = fit;
        self.invalidate();
    }

    /// Apply a paper config from a sheet description.
    ///
    /// # Errors
    /// Returns `UnknownPaperSize` for an unknown paper name.
    pub fn apply_config(&mut self, config: &PaperConfig) -> Result<()> {
        self.paper.apply_config(config)?;
        self.invalidate();
        Ok(())
    }

    fn invalidate(&mut self) {
        self.pagination = None;
        self.pages.clear();
    }

    /// Compute the page plan for `sheet` without rendering.
    pub fn paginate(&self, sheet: &dyn SheetDataView) -> Pagination {
        paginate(sheet, &self.paper)
    }

    /// Re-paginate `sheet` and render every page.
    ///
    /// Previous pages are dropped first. Returns the number of pages.
    ///
    /// # Errors
    /// Propagates surface allocation failures; no pages are kept then.
    pub fn preview<F, P>(
        &mut self,
        sheet: &dyn SheetDataView,
        factory: &mut F,
        painter: &mut P,
    ) -> Result<usize>
    where
        F: SurfaceFactory<Surface = S>,
        P: CellPainter<S>,
    {
        self.invalidate();
        let pagination = self.paginate(sheet);
        let renderer = PageRenderer::new(sheet, pagination.geometry);

        let mut pages = Vec::with_capacity(pagination.pages.len());
        for page in &pagination.pages {
            pages.push(renderer.render_page(page, factory, painter)?);
        }

        tracing::info!(
            pages = pages.len(),
            bands = pagination.band_count(),
            scale = pagination.geometry.scale,
            "print preview rendered"
        );
        self.pages = pages;
        self.pagination = Some(pagination);
        Ok(self.pages.len())
    }

    /// Rendered pages of the latest preview, in print order
    pub fn pages(&self) -> &[S] {
        &self.pages
    }

    /// Plan of the latest preview
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn page_css(&self) -> String {
        self.paper.page_css()
    }

    /// Hand the rendered pages to the host print facility.
    ///
    /// # Errors
    /// Propagates host failures.
    pub fn print<H: PrintHost<S>>(&self, host: &mut H) -> Result<()> {
        tracing::info!(pages = self.pages.len(), paper = %self.paper.name, "printing");
        host.print(&self.page_css(), &self.pages)
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
    use crate::error::XlprintError;
    use crate::layout::SheetLayout;
    use crate::render::{RecordingFactory, RecordingHost, RecordingPainter, RecordingSurface};
    use std::collections::{HashMap, HashSet};

    fn sheet(rows: u32, cols: u32) -> SheetLayout {
        SheetLayout::new(
            rows,
            cols,
            &HashMap::new(),
            &HashMap::new(),
            &HashSet::new(),
            &HashSet::new(),
            &[],
            0,
            0,
        )
    }

    #[test]
    fn test_preview_and_invalidate() {
        let layout = sheet(200, 5);
        let mut session: PrintSession<RecordingSurface> = PrintSession::default();
        let count = session
            .preview(&layout, &mut RecordingFactory::default(), &mut RecordingPainter)
            .unwrap();
        assert!(count > 1);
        assert_eq!(session.pages().len(), count);

        session.set_orientation(Orientation::Landscape);
        assert!(session.pages().is_empty());
        assert!(session.pagination().is_none());
    }

    #[test]
    fn test_unknown_paper_keeps_pages() {
        let layout = sheet(10, 2);
        let mut session: PrintSession<RecordingSurface> = PrintSession::default();
        session
            .preview(&layout, &mut RecordingFactory::default(), &mut RecordingPainter)
            .unwrap();
        let err = session.set_paper_size("Legal").unwrap_err();
        assert!(matches!(err, XlprintError::UnknownPaperSize(_)));
        assert_eq!(session.pages().len(), 1);
    }

    #[test]
    fn test_print_hands_css_and_pages() {
        let layout = sheet(10, 2);
        let mut session: PrintSession<RecordingSurface> =
            PrintSession::new(Paper::custom(800.0, 1000.0, 0.0), PrintOptions::default());
        session
            .preview(&layout, &mut RecordingFactory::default(), &mut RecordingPainter)
            .unwrap();
        let mut host = RecordingHost::default();
        session.print(&mut host).unwrap();
        assert_eq!(host.jobs.len(), 1);
        assert_eq!(host.jobs[0].page_count, 1);
        assert!(host.jobs[0].page_css.contains("size: 800px 1000px"));
    }

    #[test]
    fn test_closure_painter() {
        let layout = sheet(3, 2);
        let mut session: PrintSession<RecordingSurface> = PrintSession::default();
        let mut painted = Vec::new();
        session
            .preview(
                &layout,
                &mut RecordingFactory::default(),
                &mut |_: &mut RecordingSurface,
                      _: &dyn SheetDataView,
                      row: u32,
                      col: u32,
                      _offset: f64| {
                    painted.push((row, col));
                },
            )
            .unwrap();
        assert_eq!(painted, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }
}
