//! Utilities for parsing and formatting Excel-style cell references and ranges.

use crate::error::{Result, XlprintError};
use crate::types::CellRange;

/// Parse a cell reference like "A1" into (col, row) where col and row are 0-indexed.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for ch in cell_ref.trim().chars() {
        if ch == '$' {
            continue;
        }
        if ch.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = ch.to_ascii_uppercase();
            col = col
                .checked_mul(26)?
                .checked_add(upper as u32 - 'A' as u32 + 1)?;
            saw_col = true;
        } else if ch.is_ascii_digit() {
            row = row.checked_mul(10)?.checked_add(ch as u32 - '0' as u32)?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some((col - 1, row - 1))
}

/// Parse a cell range like "A1:B10" or "A1" into a normalized [`CellRange`].
pub fn parse_cell_range(range: &str) -> Option<CellRange> {
    if let Some((start, end)) = range.split_once(':') {
        let (start_col, start_row) = parse_cell_ref(start)?;
        let (end_col, end_row) = parse_cell_ref(end)?;
        Some(CellRange::new(start_row, start_col, end_row, end_col))
    } else {
        let (col, row) = parse_cell_ref(range)?;
        Some(CellRange::cell(row, col))
    }
}

/// Like [`parse_cell_range`] but reports the offending text.
pub fn require_cell_range(range: &str) -> Result<CellRange> {
    parse_cell_range(range).ok_or_else(|| XlprintError::CellRef(range.to_string()))
}

/// Convert a 0-based column index to Excel column letters (A, B, ..., Z, AA, AB, ...)
pub fn col_to_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or(0);
        letters.push(char::from(b'A' + offset));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Format a range in A1 notation, collapsing single cells ("B3" rather than "B3:B3").
pub fn format_cell_range(range: &CellRange) -> String {
    let start = format!("{}{}", col_to_letter(range.start_col), range.start_row + 1);
    if range.start_row == range.end_row && range.start_col == range.end_col {
        return start;
    }
    format!(
        "{start}:{}{}",
        col_to_letter(range.end_col),
        range.end_row + 1
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("$C$7"), Some((2, 6)));
        assert_eq!(parse_cell_ref("aa10"), Some((26, 9)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("11"), None);
        assert_eq!(parse_cell_ref("1A"), None);
        assert_eq!(parse_cell_ref("A-1"), None);
    }

    #[test]
    fn test_parse_cell_range() {
        assert_eq!(parse_cell_range("A1:B2"), Some(CellRange::new(0, 0, 1, 1)));
        assert_eq!(parse_cell_range("B2:A1"), Some(CellRange::new(0, 0, 1, 1)));
        assert_eq!(parse_cell_range("D4"), Some(CellRange::cell(3, 3)));
        assert_eq!(parse_cell_range("D4:"), None);
    }

    #[test]
    fn test_require_cell_range_error() {
        let err = require_cell_range("nope").unwrap_err();
        assert!(matches!(err, XlprintError::CellRef(ref s) if s == "nope"));
    }

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
        assert_eq!(col_to_letter(702), "AAA");
    }

    #[test]
    fn test_format_cell_range() {
        assert_eq!(format_cell_range(&CellRange::new(0, 0, 59, 7)), "A1:H60");
        assert_eq!(format_cell_range(&CellRange::cell(2, 1)), "B3");
    }
}
