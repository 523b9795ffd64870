//! Print session tests: preview lifecycle, settings changes and printing.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::SheetBuilder;
use xlprint::error::{Result, XlprintError};
use xlprint::print::{Paper, PrintOptions, PrintSession, SheetDataView};
use xlprint::render::{
    PrintHost, RecordingFactory, RecordingHost, RecordingPainter, RecordingSurface,
    SurfaceFactory,
};
use xlprint::types::{Alignment, Orientation};

type Session = PrintSession<RecordingSurface>;

fn preview(session: &mut Session, layout: &dyn SheetDataView) -> usize {
    session
        .preview(layout, &mut RecordingFactory::default(), &mut RecordingPainter)
        .unwrap()
}

#[test]
fn test_defaults() {
    let session = Session::default();
    assert_eq!(session.paper(), &Paper::default());
    assert_eq!(session.options(), PrintOptions::default());
    assert_eq!(session.options().z_index, 10);
    assert!(session.pages().is_empty());
    assert!(session.pagination().is_none());
}

#[test]
fn test_preview_is_idempotent() {
    let layout = SheetBuilder::new(400, 30)
        .freeze(2, 1)
        .merge("C10:E30")
        .row_heights(50..80, 44.0)
        .layout();
    let mut session = Session::default();
    session.set_fit_to_width(false);

    let first = preview(&mut session, &layout);
    let plan = session.pagination().cloned().unwrap();
    let cells: Vec<Vec<_>> = session
        .pages()
        .iter()
        .map(|p| p.cells().copied().collect())
        .collect();

    let second = preview(&mut session, &layout);
    assert_eq!(first, second);
    assert_eq!(session.pagination(), Some(&plan));
    let again: Vec<Vec<_>> = session
        .pages()
        .iter()
        .map(|p| p.cells().copied().collect())
        .collect();
    assert_eq!(cells, again);
}

#[test]
fn test_settings_change_discards_pages() {
    let layout = SheetBuilder::new(100, 10).layout();
    let mut session = Session::default();

    preview(&mut session, &layout);
    session.set_alignment(Alignment::Center);
    assert!(session.pages().is_empty());

    preview(&mut session, &layout);
    session.set_padding(10.0);
    assert!(session.pagination().is_none());

    preview(&mut session, &layout);
    session.set_paper_size("a3").unwrap();
    assert!(session.pages().is_empty());
    assert_eq!(session.paper().name, "A3");
}

#[test]
fn test_landscape_preview_recomputes() {
    let layout = SheetBuilder::new(100, 5).layout();
    let mut session = Session::default();
    let portrait = preview(&mut session, &layout);
    session.set_orientation(Orientation::Landscape);
    let landscape = preview(&mut session, &layout);
    assert!(landscape > portrait);
    let geometry = session.pagination().unwrap().geometry;
    assert!(geometry.paper_width > geometry.paper_height);
}

#[test]
fn test_print_receives_pages_in_order() {
    let layout = SheetBuilder::new(120, 3).layout();
    let mut session = Session::new(Paper::custom(800.0, 1000.0, 0.0), PrintOptions::default());
    let count = preview(&mut session, &layout);
    assert_eq!(count, 3);

    let mut host = RecordingHost::default();
    session.print(&mut host).unwrap();
    assert_eq!(host.jobs.len(), 1);
    assert_eq!(host.jobs[0].page_count, 3);
    assert_eq!(host.jobs[0].page_css, session.page_css());
}

struct FailingFactory {
    remaining: usize,
}

impl SurfaceFactory for FailingFactory {
    type Surface = RecordingSurface;

    fn create_surface(&mut self, width: f64, height: f64) -> Result<RecordingSurface> {
        if self.remaining == 0 {
            return Err(XlprintError::Render("out of canvases".into()));
        }
        self.remaining -= 1;
        Ok(RecordingSurface::new(width, height, 1.0))
    }
}

#[test]
fn test_failed_preview_keeps_nothing() {
    let layout = SheetBuilder::new(120, 3).layout();
    let mut session = Session::new(Paper::custom(800.0, 1000.0, 0.0), PrintOptions::default());
    let err = session
        .preview(
            &layout,
            &mut FailingFactory { remaining: 2 },
            &mut RecordingPainter,
        )
        .unwrap_err();
    assert!(matches!(err, XlprintError::Render(_)));
    assert!(session.pages().is_empty());
    assert!(session.pagination().is_none());
}

struct RejectingHost;

impl PrintHost<RecordingSurface> for RejectingHost {
    fn print(&mut self, _page_css: &str, _pages: &[RecordingSurface]) -> Result<()> {
        Err("print dialog unavailable".into())
    }
}

#[test]
fn test_print_error_propagates() {
    let layout = SheetBuilder::new(5, 3).layout();
    let mut session = Session::default();
    preview(&mut session, &layout);
    let err = session.print(&mut RejectingHost).unwrap_err();
    assert_eq!(err.to_string(), "print dialog unavailable");
}
