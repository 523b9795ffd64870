//! In-memory page surface that records drawing operations.
//!
//! Used for headless pagination (CLI, tests): each painted cell is recorded
//! with its final position on the page, after all translate/scale calls and
//! cut to the active clip. Cells entirely outside the clip are not recorded.

use serde::Serialize;

use super::backend::{CellPainter, PageSurface, PrintHost, SurfaceFactory};
use crate::error::Result;
use crate::print::{CellRect, SheetDataView};

/// A cell as it landed on the page, in page (logical pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintedCell {
    pub row: u32,
    pub col: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    ClipRect { x: f64, y: f64, width: f64, height: f64 },
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Cell(PaintedCell),
}

/// Axis-aligned rectangle in page coordinates, as `(left, top, right, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Bounds {
    fn intersect(self, other: Bounds) -> Bounds {
        Bounds {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
    clip: Option<Bounds>,
}

impl Transform {
    const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        sx: 1.0,
        sy: 1.0,
        clip: None,
    };

    fn map(&self, x: f64, y: f64, width: f64, height: f64) -> Bounds {
        Bounds {
            left: self.tx + self.sx * x,
            top: self.ty + self.sy * y,
            right: self.tx + self.sx * (x + width),
            bottom: self.ty + self.sy * (y + height),
        }
    }
}

/// Page surface that keeps a log of what was drawn.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    dpr: f64,
    ops: Vec<DrawOp>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            width,
            height,
            dpr,
            ops: Vec::new(),
            transform: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    /// Backing store size in device pixels
    pub fn device_size(&self) -> (f64, f64) {
        (self.width * self.dpr, self.height * self.dpr)
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Painted cells in drawing order
    pub fn cells(&self) -> impl Iterator<Item = &PaintedCell> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Cell(cell) => Some(cell),
            _ => None,
        })
    }

    /// Current save/restore depth (0 when balanced)
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Record `rect` of cell `(row, col)` shifted down by `vertical_offset`.
    pub fn fill_cell(&mut self, row: u32, col: u32, rect: &CellRect, vertical_offset: f64) {
        let t = self.transform;
        let mut bounds = t.map(rect.x, rect.y + vertical_offset, rect.width, rect.height);
        if let Some(clip) = t.clip {
            bounds = bounds.intersect(clip);
            if bounds.is_empty() {
                return;
            }
        }
        self.ops.push(DrawOp::Cell(PaintedCell {
            row,
            col,
            x: bounds.left,
            y: bounds.top,
            width: bounds.right - bounds.left,
            height: bounds.bottom - bounds.top,
        }));
    }
}

impl PageSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform.tx += self.transform.sx * x;
        self.transform.ty += self.transform.sy * y;
        self.ops.push(DrawOp::Translate { x, y });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform.sx *= sx;
        self.transform.sy *= sy;
        self.ops.push(DrawOp::Scale { x: sx, y: sy });
    }

    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let area = self.transform.map(x, y, width, height);
        self.transform.clip = Some(match self.transform.clip {
            Some(clip) => clip.intersect(area),
            None => area,
        });
        self.ops.push(DrawOp::ClipRect {
            x,
            y,
            width,
            height,
        });
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::ClearRect {
            x,
            y,
            width,
            height,
        });
    }
}

/// Creates [`RecordingSurface`]s.
#[derive(Debug, Clone, Copy)]
pub struct RecordingFactory {
    pub dpr: f64,
}

impl Default for RecordingFactory {
    fn default() -> Self {
        Self { dpr: 1.0 }
    }
}

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingSurface;

    fn create_surface(&mut self, width: f64, height: f64) -> Result<RecordingSurface> {
        Ok(RecordingSurface::new(width, height, self.dpr))
    }
}

/// Paints every cell as its rectangle, skipping merge-covered cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingPainter;

impl CellPainter<RecordingSurface> for RecordingPainter {
    fn paint_cell(
        &mut self,
        surface: &mut RecordingSurface,
        sheet: &dyn SheetDataView,
        row: u32,
        col: u32,
        vertical_offset: f64,
    ) {
        let rect = sheet.cell_rect(row, col);
        if rect.skip {
            return;
        }
        surface.fill_cell(row, col, &rect, vertical_offset);
    }
}

/// Print host that remembers what it was asked to print.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub jobs: Vec<RecordedPrint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrint {
    pub page_css: String,
    pub page_count: usize,
}

impl PrintHost<RecordingSurface> for RecordingHost {
    fn print(&mut self, page_css: &str, pages: &[RecordingSurface]) -> Result<()> {
        self.jobs.push(RecordedPrint {
            page_css: page_css.to_string(),
            page_count: pages.len(),
        });
        Ok(())
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

    fn rect(x: f64, y: f64) -> CellRect {
        CellRect {
            x,
            y,
            width: 64.0,
            height: 20.0,
            skip: false,
        }
    }

    #[test]
    fn test_transform_stack() {
        let mut surface = RecordingSurface::new(800.0, 1000.0, 2.0);
        surface.save();
        surface.translate(50.0, 50.0);
        surface.scale(0.5, 0.5);
        surface.fill_cell(0, 1, &rect(64.0, 0.0), 0.0);
        surface.restore();
        surface.fill_cell(1, 0, &rect(0.0, 20.0), -20.0);

        let cells: Vec<_> = surface.cells().copied().collect();
        assert_eq!(cells[0].x, 82.0);
        assert_eq!(cells[0].y, 50.0);
        assert_eq!(cells[0].width, 32.0);
        assert_eq!(cells[1].x, 0.0);
        assert_eq!(cells[1].y, 0.0);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.device_size(), (1600.0, 2000.0));
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut surface = RecordingSurface::new(10.0, 10.0, 1.0);
        surface.translate(5.0, 5.0);
        surface.restore();
        surface.fill_cell(0, 0, &rect(0.0, 0.0), 0.0);
        assert_eq!(surface.cells().next().unwrap().x, 5.0);
    }

    #[test]
    fn test_clip_cuts_cells_until_restore() {
        let mut surface = RecordingSurface::new(800.0, 1000.0, 1.0);
        surface.save();
        surface.translate(10.0, 10.0);
        surface.clip_rect(0.0, 0.0, 100.0, 20.0);
        // 60px tall cell keeps only its top 20px
        surface.fill_cell(0, 0, &CellRect { height: 60.0, ..rect(0.0, 0.0) }, 0.0);
        // Entirely below the clip
        surface.fill_cell(1, 0, &rect(0.0, 20.0), 0.0);
        surface.restore();
        surface.fill_cell(2, 0, &rect(0.0, 40.0), 0.0);

        let cells: Vec<_> = surface.cells().copied().collect();
        assert_eq!(cells.len(), 2);
        assert_eq!((cells[0].row, cells[0].y, cells[0].height), (0, 10.0, 20.0));
        assert_eq!((cells[1].row, cells[1].y, cells[1].height), (2, 40.0, 20.0));
    }

    #[test]
    fn test_draw_op_json() {
        let json = serde_json::to_string(&DrawOp::Translate { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(json, r#"{"op":"translate","x":1.0,"y":2.0}"#);
    }
}
