//! Layout engine for computing cell positions.
//!
//! This module handles:
//! - Pre-computing cell positions from column widths and row heights
//! - Merge range handling
//! - Binary search for column lookup at sheet coordinates

mod sheet_layout;

pub use sheet_layout::{MergeInfo, SheetLayout, DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT};
