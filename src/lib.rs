//! xlprint - spreadsheet print pagination for the web
//!
//! Tiles a sheet into fixed-size printed pages and renders them via
//! WebAssembly and Canvas 2D:
//! - Named paper sizes, portrait/landscape, padding and horizontal alignment
//! - Fit-to-width scaling, or horizontal page strips when content is wider
//! - Frozen rows/columns repeated on every page
//! - Merged cells kept whole across page breaks when they fit
//!
//! Cell appearance is left to the caller: every page is drawn through an
//! external single-cell painter.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { XlPrint } from 'xlprint';
//! await init();
//! const print = new XlPrint(window.devicePixelRatio, 10);
//! print.load_sheet(sheetJson);
//! print.preview(container, renderCell);
//! print.print();
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use xlprint::layout::SheetLayout;
//! use xlprint::print::{paginate, Paper};
//! use xlprint::types::SheetDescription;
//!
//! let desc: SheetDescription = serde_json::from_str(r#"{"rows": 120, "cols": 8}"#).unwrap();
//! let layout = SheetLayout::from_description(&desc).unwrap();
//! let plan = paginate(&layout, &Paper::default());
//! assert!(plan.pages.len() > 1);
//! ```

pub mod cell_ref;
pub mod error;
pub mod layout;
pub mod print;
pub mod render;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::XlPrint;

pub use error::{Result, XlprintError};
pub use layout::SheetLayout;
pub use print::{paginate, PageDescriptor, Pagination, Paper, PrintOptions, PrintSession};
pub use types::*;

/// Paginate a sheet description, using its paper config on top of the default A4 paper.
///
/// # Errors
/// Returns an error for malformed merge ranges or an unknown paper size.
pub fn paginate_description(desc: &SheetDescription) -> Result<Pagination> {
    let layout = SheetLayout::from_description(desc)?;
    let mut paper = Paper::default();
    if let Some(config) = &desc.paper {
        paper.apply_config(config)?;
    }
    Ok(paginate(&layout, &paper))
}

/// Paginate a JSON sheet description and return the page plan as JSON
///
/// # Errors
/// Returns an error if the JSON is invalid or the paper config is rejected.
#[wasm_bindgen]
pub fn paginate_json(sheet_json: &str) -> std::result::Result<String, JsValue> {
    let desc: SheetDescription =
        serde_json::from_str(sheet_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let plan = paginate_description(&desc).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&plan)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
