//! Page surfaces with pluggable backends.
//!
//! - [`backend`]: surface, factory, painter and print host traits
//! - [`recording`]: headless surface that logs drawing operations
//! - `canvas`: Canvas 2D surfaces and iframe printing (wasm32 only)

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

pub use backend::{CellPainter, PageSurface, PrintHost, SurfaceFactory};
#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, CanvasSurfaceFactory, IframePrintHost};
pub use recording::{
    DrawOp, PaintedCell, RecordedPrint, RecordingFactory, RecordingHost, RecordingPainter,
    RecordingSurface,
};
