use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::PaperConfig;

/// JSON description of a sheet's geometry, as consumed by the CLI and the
/// WASM binding.
///
/// ```json
/// {
///   "rows": 60, "cols": 8,
///   "rowHeights": {"0": 32}, "colWidths": {"1": 120},
///   "mergeCells": ["A1:C1"],
///   "frozenRows": 1,
///   "usedRange": "A1:H60",
///   "paper": {"paperSize": "A4", "orientation": "landscape"}
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SheetDescription {
    /// Number of rows in the sheet
    pub rows: u32,
    /// Number of columns in the sheet
    pub cols: u32,
    /// Explicit row heights, CSS pixels (missing rows use the default)
    #[serde(default)]
    pub row_heights: HashMap<u32, f64>,
    /// Explicit column widths, CSS pixels (missing columns use the default)
    #[serde(default)]
    pub col_widths: HashMap<u32, f64>,
    #[serde(default)]
    pub hidden_rows: HashSet<u32>,
    #[serde(default)]
    pub hidden_cols: HashSet<u32>,
    /// Merge ranges in A1 notation (e.g. `"A1:B2"`)
    #[serde(default)]
    pub merge_cells: Vec<String>,
    #[serde(default)]
    pub frozen_rows: u32,
    #[serde(default)]
    pub frozen_cols: u32,
    /// Used-content range in A1 notation; defaults to the whole sheet
    #[serde(default)]
    pub used_range: Option<String>,
    #[serde(default)]
    pub paper: Option<PaperConfig>,
}
