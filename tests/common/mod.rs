//! Common test utilities: a fluent builder for sheet descriptions.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::BTreeSet;

use xlprint::layout::SheetLayout;
use xlprint::print::{Pagination, Paper};
use xlprint::types::{PaperConfig, SheetDescription};

/// Paper with a printable area of exactly `width` x `height` and no padding.
#[must_use]
pub fn bare_paper(width: f64, height: f64) -> Paper {
    Paper::custom(width, height, 0.0)
}

/// Builder for [`SheetDescription`]s.
///
/// ```rust
/// let layout = SheetBuilder::new(100, 10)
///     .row_height(0, 40.0)
///     .merge("A2:B4")
///     .freeze(1, 0)
///     .layout();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    desc: SheetDescription,
}

impl SheetBuilder {
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            desc: SheetDescription {
                rows,
                cols,
                ..SheetDescription::default()
            },
        }
    }

    #[must_use]
    pub fn row_height(mut self, row: u32, height: f64) -> Self {
        self.desc.row_heights.insert(row, height);
        self
    }

    /// Same height for every row in `rows`
    #[must_use]
    pub fn row_heights(mut self, rows: std::ops::Range<u32>, height: f64) -> Self {
        for row in rows {
            self.desc.row_heights.insert(row, height);
        }
        self
    }

    #[must_use]
    pub fn col_width(mut self, col: u32, width: f64) -> Self {
        self.desc.col_widths.insert(col, width);
        self
    }

    #[must_use]
    pub fn col_widths(mut self, cols: std::ops::Range<u32>, width: f64) -> Self {
        for col in cols {
            self.desc.col_widths.insert(col, width);
        }
        self
    }

    #[must_use]
    pub fn hide_row(mut self, row: u32) -> Self {
        self.desc.hidden_rows.insert(row);
        self
    }

    #[must_use]
    pub fn hide_col(mut self, col: u32) -> Self {
        self.desc.hidden_cols.insert(col);
        self
    }

    #[must_use]
    pub fn merge(mut self, range: &str) -> Self {
        self.desc.merge_cells.push(range.to_string());
        self
    }

    #[must_use]
    pub fn freeze(mut self, rows: u32, cols: u32) -> Self {
        self.desc.frozen_rows = rows;
        self.desc.frozen_cols = cols;
        self
    }

    #[must_use]
    pub fn used_range(mut self, range: &str) -> Self {
        self.desc.used_range = Some(range.to_string());
        self
    }

    #[must_use]
    pub fn paper(mut self, config: PaperConfig) -> Self {
        self.desc.paper = Some(config);
        self
    }

    #[must_use]
    pub fn build(self) -> SheetDescription {
        self.desc
    }

    #[must_use]
    pub fn layout(self) -> SheetLayout {
        SheetLayout::from_description(&self.desc).expect("valid sheet description")
    }
}

/// Every body row appears in exactly one band, in order.
pub fn assert_rows_covered_once(plan: &Pagination, first_body_row: u32, end_row: u32) {
    let mut seen = BTreeSet::new();
    let mut last_band = None;
    for page in plan.pages.iter().filter(|p| p.strip == 0) {
        assert_ne!(last_band, Some(page.band), "one strip-0 page per band");
        last_band = Some(page.band);
        for row in page.rows.clone() {
            assert!(seen.insert(row), "row {row} committed twice");
        }
    }
    let expected: BTreeSet<u32> = (first_body_row..=end_row).collect();
    assert_eq!(seen, expected);
}
