//! Render backend traits for pluggable page surfaces.
//!
//! This module defines the seams between the page renderer and whatever
//! actually draws: a page surface with a save/restore transform stack, a
//! factory that allocates one surface per page, the external single-cell
//! painter, and the host print facility.

use crate::error::Result;
use crate::print::SheetDataView;

/// One drawable page.
///
/// Coordinates are logical (CSS) pixels; backends apply the device pixel
/// ratio to their backing store themselves.
pub trait PageSurface {
    /// Logical width of the surface
    fn width(&self) -> f64;

    /// Logical height of the surface
    fn height(&self) -> f64;

    /// Push the current transform
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64);

    fn scale(&mut self, sx: f64, sy: f64);

    /// Restrict further drawing to a rectangle in the current transform,
    /// intersected with any active clip. Undone by the matching `restore`.
    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Clear a rectangle in untransformed surface coordinates
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// Allocates page surfaces.
pub trait SurfaceFactory {
    type Surface: PageSurface;

    /// Create a blank surface `width` x `height` logical pixels
    fn create_surface(&mut self, width: f64, height: f64) -> Result<Self::Surface>;
}

/// External single-cell renderer.
///
/// Paints cell `(row, col)` of `sheet` with body rows shifted by
/// `vertical_offset` (unscaled). Merge origins paint their whole span; cells
/// covered by a merge but not its origin paint nothing. Expected to be
/// idempotent for identical inputs.
pub trait CellPainter<S: ?Sized> {
    fn paint_cell(
        &mut self,
        surface: &mut S,
        sheet: &dyn SheetDataView,
        row: u32,
        col: u32,
        vertical_offset: f64,
    );
}

impl<S: ?Sized, F> CellPainter<S> for F
where
    F: FnMut(&mut S, &dyn SheetDataView, u32, u32, f64),
{
    fn paint_cell(
        &mut self,
        surface: &mut S,
        sheet: &dyn SheetDataView,
        row: u32,
        col: u32,
        vertical_offset: f64,
    ) {
        self(surface, sheet, row, col, vertical_offset);
    }
}

/// Host print facility. Fire-and-forget: nothing waits for the print to finish.
pub trait PrintHost<S> {
    /// Print `pages` in order, with `page_css` describing the page size
    fn print(&mut self, page_css: &str, pages: &[S]) -> Result<()>;
}
