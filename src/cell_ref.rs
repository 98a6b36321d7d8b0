//! Utilities for converting between grid coordinates and Excel-style cell names.
//!
//! All coordinates in this crate are 1-based: column 1 is `A`, row 1 is the
//! first row.

use std::fmt;

use serde::Serialize;

use crate::error::SurfaceError;

/// Maximum number of rows in a worksheet (Excel limit).
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit).
pub const MAX_COLS: u32 = 16_384;

/// A validated cell position on a grid surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CellAddress {
    col: u32,
    row: u32,
}

impl CellAddress {
    /// Validate a 1-based `(col, row)` pair.
    ///
    /// # Errors
    /// Returns [`SurfaceError::InvalidCoordinate`] if either coordinate is 0
    /// or beyond the worksheet limits.
    pub fn new(col: u32, row: u32) -> Result<Self, SurfaceError> {
        if col == 0 || row == 0 || col > MAX_COLS || row > MAX_ROWS {
            return Err(SurfaceError::InvalidCoordinate { col, row });
        }
        Ok(Self { col, row })
    }

    pub fn col(self) -> u32 {
        self.col
    }

    pub fn row(self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", col_to_letter(self.col), self.row)
    }
}

/// Convert a 1-based column number to its letter name (1 -> "A", 27 -> "AA").
///
/// Column 0 has no name and yields an empty string.
pub fn col_to_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + digit_u8(n % 26)));
        n /= 26;
    }
    letters.iter().rev().collect()
}

fn digit_u8(n: u32) -> u8 {
    u8::try_from(n).unwrap_or(0)
}

/// Parse a cell reference like "A1" or "$B$7" into 1-based `(col, row)`.
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
                .checked_add(u32::from(upper) - u32::from('A') + 1)?;
            saw_col = true;
        } else if let Some(digit) = ch.to_digit(10) {
            row = row.checked_mul(10)?.checked_add(digit)?;
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || col == 0 || row == 0 {
        return None;
    }

    Some((col, row))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, "A")]
    #[test_case(26, "Z")]
    #[test_case(27, "AA")]
    #[test_case(52, "AZ")]
    #[test_case(703, "AAA")]
    #[test_case(16_384, "XFD")]
    fn test_col_to_letter(col: u32, expected: &str) {
        assert_eq!(col_to_letter(col), expected);
    }

    #[test]
    fn test_address_display() {
        assert_eq!(CellAddress::new(1, 1).unwrap().to_string(), "A1");
        assert_eq!(CellAddress::new(3, 12).unwrap().to_string(), "C12");
    }

    #[test_case(0, 1)]
    #[test_case(1, 0)]
    #[test_case(MAX_COLS + 1, 1)]
    #[test_case(1, MAX_ROWS + 1)]
    fn test_invalid_coordinates(col: u32, row: u32) {
        assert_eq!(
            CellAddress::new(col, row),
            Err(SurfaceError::InvalidCoordinate { col, row })
        );
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some((1, 1)));
        assert_eq!(parse_cell_ref("$AA$10"), Some((27, 10)));
        assert_eq!(parse_cell_ref("xfd1048576"), Some((16_384, 1_048_576)));
        assert_eq!(parse_cell_ref("1A"), None);
        assert_eq!(parse_cell_ref("A"), None);
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("A-1"), None);
    }

    #[test]
    fn test_address_display_round_trips_through_parse() {
        let addr = CellAddress::new(731, 42).unwrap();
        assert_eq!(parse_cell_ref(&addr.to_string()), Some((731, 42)));
    }
}
