//! Canvas 2D page surfaces.
//!
//! Each printed page is its own `<canvas>` element sized to the paper at the
//! device pixel ratio. Printing copies the canvases into a hidden iframe and
//! calls the iframe window's `print()`.

mod print_host;
mod surface;

pub use print_host::IframePrintHost;
pub use surface::{CanvasSurface, CanvasSurfaceFactory};
