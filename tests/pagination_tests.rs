//! Pagination tests: how sheets are tiled into vertical bands and horizontal strips.
//!
//! The printable area used throughout is 800 x 1000 px (custom paper, no padding),
//! with the default 20px rows and 64px columns unless a test says otherwise.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

mod common;

use common::{assert_rows_covered_once, bare_paper, SheetBuilder};
use test_case::test_case;
use xlprint::print::{paginate, Paper, SheetDataView};
use xlprint::types::CellRange;

fn no_fit(width: f64, height: f64) -> Paper {
    let mut paper = bare_paper(width, height);
    paper.fit_to_width = false;
    paper
}

// ============================================================================
// VERTICAL BANDS
// ============================================================================

#[test]
fn test_small_sheet_is_one_page() {
    let layout = SheetBuilder::new(10, 5).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));

    assert_eq!(plan.pages.len(), 1);
    let page = &plan.pages[0];
    assert_eq!(page.rows, 0..10);
    assert_eq!(page.cols, 0..5);
    assert_eq!(page.vertical_offset, 0.0);
    assert_eq!(page.view_range, Some(CellRange::new(0, 0, 9, 4)));
    assert_eq!(plan.geometry.scale, 1.0);
}

#[test]
fn test_sixty_rows_make_two_pages() {
    let layout = SheetBuilder::new(60, 5).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));

    assert_eq!(plan.pages.len(), 2);
    assert_eq!(plan.pages[0].rows, 0..50);
    assert_eq!(plan.pages[0].vertical_offset, 0.0);
    assert_eq!(plan.pages[1].rows, 50..60);
    assert_eq!(plan.pages[1].vertical_offset, -1000.0);
    assert_eq!(plan.band_count(), 2);
}

#[test_case(1, 1 ; "one row")]
#[test_case(50, 1 ; "exact fill")]
#[test_case(51, 2 ; "one row over")]
#[test_case(100, 2 ; "two exact pages")]
#[test_case(101, 3 ; "three pages")]
fn test_band_count(rows: u32, bands: usize) {
    let layout = SheetBuilder::new(rows, 3).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));
    assert_eq!(plan.band_count(), bands);
    assert_rows_covered_once(&plan, 0, rows - 1);
}

#[test]
fn test_mixed_row_heights_cover_every_row_once() {
    let mut builder = SheetBuilder::new(300, 4);
    for row in 0..300 {
        builder = builder.row_height(row, f64::from(10 + (row * 37) % 90));
    }
    let layout = builder.layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));

    assert_rows_covered_once(&plan, 0, 299);
    for page in &plan.pages {
        let height: f64 = page.rows.clone().map(|r| layout.row_height(r)).sum();
        assert!(height <= 1000.0, "page {} is {height}px tall", page.index);
    }
}

#[test]
fn test_vertical_offset_is_minus_rows_above() {
    let layout = SheetBuilder::new(200, 2).row_heights(0..200, 33.0).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));
    for page in &plan.pages {
        let above: f64 = (0..page.rows.start).map(|r| layout.row_height(r)).sum();
        assert_eq!(page.vertical_offset, -above);
    }
}

#[test]
fn test_oversized_row_gets_its_own_page() {
    let layout = SheetBuilder::new(5, 2).row_height(2, 1500.0).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));

    let rows: Vec<_> = plan.pages.iter().map(|p| p.rows.clone()).collect();
    assert_eq!(rows, vec![0..2, 2..3, 3..5]);
}

#[test]
fn test_hidden_rows_take_no_space() {
    let mut builder = SheetBuilder::new(60, 2);
    for row in 0..10 {
        builder = builder.hide_row(row);
    }
    let plan = paginate(&builder.layout(), &bare_paper(800.0, 1000.0));
    assert_eq!(plan.pages.len(), 1);
    assert_eq!(plan.pages[0].rows, 0..60);
}

#[test]
fn test_used_range_limits_output() {
    let layout = SheetBuilder::new(1000, 50).used_range("A1:C30").layout();
    let plan = paginate(&layout, &no_fit(800.0, 1000.0));
    assert_eq!(plan.pages.len(), 1);
    assert_eq!(plan.pages[0].rows, 0..30);
    assert_eq!(plan.pages[0].cols, 0..3);
}

// ============================================================================
// FROZEN BAND
// ============================================================================

#[test]
fn test_frozen_rows_reserve_space_on_every_page() {
    // 2 frozen rows take 40px, leaving 48 body rows per page
    let layout = SheetBuilder::new(150, 3).freeze(2, 0).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));

    assert_eq!(plan.pages[0].rows, 2..50);
    assert_eq!(plan.pages[1].rows, 50..98);
    assert_eq!(plan.pages[2].rows, 98..146);
    assert_eq!(plan.pages[3].rows, 146..150);
    assert_rows_covered_once(&plan, 2, 149);
}

#[test]
fn test_only_frozen_rows_still_prints_a_page() {
    let layout = SheetBuilder::new(3, 4).freeze(3, 0).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));
    assert_eq!(plan.pages.len(), 1);
    assert!(plan.pages[0].rows.is_empty());
    assert_eq!(plan.pages[0].view_range, None);
}

// ============================================================================
// MERGES
// ============================================================================

#[test]
fn test_merge_moves_to_next_page() {
    // A46:A55 would straddle the 50-row boundary
    let layout = SheetBuilder::new(80, 2).merge("A46:A55").layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));

    assert_eq!(plan.pages[0].rows, 0..45);
    assert_eq!(plan.pages[1].rows.start, 45);
    assert!(plan.pages[1].rows.contains(&54));
}

#[test]
fn test_merges_that_fit_are_never_split() {
    let layout = SheetBuilder::new(400, 6)
        .merge("A10:B14")
        .merge("C48:C53")
        .merge("A99:F101")
        .merge("D150:D180")
        .merge("B249:B251")
        .layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));

    let merges = layout.merges_intersecting(&CellRange::new(0, 0, 399, 5));
    assert_eq!(merges.len(), 5);
    for merge in merges {
        let page = plan
            .pages
            .iter()
            .find(|p| p.rows.contains(&merge.start_row))
            .unwrap();
        assert!(
            page.rows.contains(&merge.end_row),
            "merge {merge:?} split by page {:?}",
            page.rows
        );
    }
}

#[test]
fn test_merge_taller_than_page_spills() {
    let layout = SheetBuilder::new(80, 2).merge("A1:A60").layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));
    assert_eq!(plan.pages[0].rows, 0..50);
    assert_eq!(plan.pages[1].rows, 50..80);
}

// ============================================================================
// HORIZONTAL STRIPS
// ============================================================================

#[test]
fn test_four_strips_for_3000px() {
    let layout = SheetBuilder::new(10, 30).col_widths(0..30, 100.0).layout();
    let plan = paginate(&layout, &no_fit(800.0, 1000.0));

    assert_eq!(plan.pages.len(), 4);
    let lefts: Vec<f64> = plan.pages.iter().map(|p| p.left_offset).collect();
    assert_eq!(lefts, vec![0.0, -800.0, -1600.0, -2400.0]);
    let strips: Vec<usize> = plan.pages.iter().map(|p| p.strip).collect();
    assert_eq!(strips, vec![0, 1, 2, 3]);
    assert!(plan.pages.iter().all(|p| p.rows == (0..10)));
}

#[test_case(12, 1 ; "narrower than page")]
#[test_case(13, 2 ; "just over one page")]
#[test_case(25, 2 ; "exactly two pages")]
#[test_case(47, 4 ; "ceil of 3008 over 800")]
fn test_strip_count_is_ceil(cols: u32, strips: usize) {
    let layout = SheetBuilder::new(5, cols).layout();
    let plan = paginate(&layout, &no_fit(800.0, 1000.0));
    let expected = (f64::from(cols) * 64.0 / 800.0).ceil() as usize;
    assert_eq!(expected, strips);
    assert_eq!(plan.pages.len(), strips);
}

#[test]
fn test_strips_repeat_for_every_band() {
    let layout = SheetBuilder::new(120, 30).col_widths(0..30, 100.0).layout();
    let plan = paginate(&layout, &no_fit(800.0, 1000.0));

    assert_eq!(plan.band_count(), 3);
    assert_eq!(plan.pages.len(), 12);
    for (i, page) in plan.pages.iter().enumerate() {
        assert_eq!(page.index, i);
        assert_eq!(page.band, i / 4);
        assert_eq!(page.strip, i % 4);
    }
    // Strips of one band share its rows
    assert!(plan.pages[4..8].iter().all(|p| p.rows == (50..100)));
}

#[test]
fn test_strip_columns_follow_left_offset() {
    let layout = SheetBuilder::new(5, 30).col_widths(0..30, 100.0).layout();
    let plan = paginate(&layout, &no_fit(800.0, 1000.0));
    let cols: Vec<_> = plan.pages.iter().map(|p| p.cols.clone()).collect();
    assert_eq!(cols, vec![0..8, 8..16, 16..24, 24..30]);
}

// ============================================================================
// SCALE
// ============================================================================

#[test]
fn test_fit_to_width_scales_into_one_strip() {
    let layout = SheetBuilder::new(300, 30).col_widths(0..30, 100.0).layout();
    let plan = paginate(&layout, &bare_paper(750.0, 1000.0));

    assert_eq!(plan.geometry.scale, 0.25);
    assert!(plan.pages.iter().all(|p| p.strip == 0));
    // 20px rows at 0.25 are 5px: 200 per page
    assert_eq!(plan.pages[0].rows, 0..200);
    assert_eq!(plan.pages[1].rows, 200..300);
}

#[test_case(5 ; "narrow")]
#[test_case(12 ; "nearly full")]
#[test_case(200 ; "very wide")]
fn test_scale_in_unit_interval(cols: u32) {
    let layout = SheetBuilder::new(10, cols).layout();
    let scale = paginate(&layout, &bare_paper(800.0, 1000.0)).geometry.scale;
    assert!(scale > 0.0 && scale <= 1.0);
}

#[test]
fn test_zero_width_content_scales_to_one() {
    let mut builder = SheetBuilder::new(10, 3);
    for col in 0..3 {
        builder = builder.hide_col(col);
    }
    let plan = paginate(&builder.layout(), &bare_paper(800.0, 1000.0));
    assert_eq!(plan.geometry.scale, 1.0);
    assert!(plan.geometry.scale.is_finite());
}

// ============================================================================
// DEGENERATE SHEETS
// ============================================================================

#[test_case(0, 0 ; "empty")]
#[test_case(0, 5 ; "no rows")]
#[test_case(5, 0 ; "no columns")]
fn test_empty_sheet_has_no_pages(rows: u32, cols: u32) {
    let layout = SheetBuilder::new(rows, cols).layout();
    let plan = paginate(&layout, &bare_paper(800.0, 1000.0));
    assert!(plan.pages.is_empty());
    assert_eq!(plan.band_count(), 0);
}

#[test]
fn test_pagination_is_deterministic() {
    let layout = SheetBuilder::new(500, 40)
        .freeze(1, 1)
        .merge("B20:D40")
        .row_heights(100..150, 45.0)
        .layout();
    let paper = no_fit(800.0, 1000.0);
    assert_eq!(paginate(&layout, &paper), paginate(&layout, &paper));
}
