//! Print pagination and page rendering.
//!
//! The pipeline runs in three stages:
//! - [`Paper`] + content width resolve a [`PageGeometry`] (scale, alignment)
//! - [`Tiler`] walks the sheet into vertical bands and horizontal strips,
//!   yielding one [`PageDescriptor`] per page
//! - [`PageRenderer`] draws each page onto a surface through the cell painter
//!
//! [`PrintSession`] ties the stages together and owns the rendered pages.

mod cursor;
mod paper;
mod renderer;
mod scale;
mod session;
mod sheet_view;
mod tiler;

pub use cursor::{CursorSnapshot, PageCursor};
pub use paper::{inches_to_px, paper_size_px, Paper, DEFAULT_PADDING, PAPER_SIZES, PX_PER_INCH};
pub use renderer::PageRenderer;
pub use scale::{align_offset, resolve_scale, PageGeometry};
pub use session::{PrintOptions, PrintSession};
pub use sheet_view::{CellRect, SheetDataView};
pub use tiler::{content_width, paginate, PageDescriptor, Pagination, Tiler, LAYOUT_EPSILON};
