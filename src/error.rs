//! Structured error types for xlprint.
//!
//! Pagination itself never fails; these errors cover configuration input
//! (paper names, orientation strings, sheet descriptions) and the host
//! surfaces used for preview and printing.

/// All errors that can occur while configuring or printing a sheet.
#[derive(Debug, thiserror::Error)]
pub enum XlprintError {
    /// Paper size name not present in the paper table.
    #[error("Unknown paper size: {0}")]
    UnknownPaperSize(String),

    /// Orientation string other than `landscape` / `portrait`.
    #[error("Invalid orientation: {0}")]
    InvalidOrientation(String),

    /// Alignment string other than `left` / `center` / `right`.
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    /// Invalid cell reference or range.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Sheet or paper description could not be (de)serialized.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering or print host error.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors from host APIs.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlprintError>;

impl From<String> for XlprintError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for XlprintError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<XlprintError> for wasm_bindgen::JsValue {
    fn from(e: XlprintError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
