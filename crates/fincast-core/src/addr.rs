//! Cell addresses and rectangular ranges

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A single cell address in A1 notation (e.g. "B9", "$B$6")
///
/// Rows and columns are 0-based internally; display is 1-based rows and
/// letter columns. The `$` flags mark absolute references and only affect
/// how the address prints, not where it points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u16,
    /// Whether the row reference is absolute ($)
    pub row_absolute: bool,
    /// Whether the column reference is absolute ($)
    pub col_absolute: bool,
}

impl CellAddress {
    /// Create a relative cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self {
            row,
            col,
            row_absolute: false,
            col_absolute: false,
        }
    }

    /// Create a fully absolute address ($A$1 style)
    pub fn absolute(row: u32, col: u16) -> Self {
        Self {
            row,
            col,
            row_absolute: true,
            col_absolute: true,
        }
    }

    /// Parse an address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use fincast_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B9").unwrap();
    /// assert_eq!((addr.row, addr.col), (8, 1));
    ///
    /// let addr = CellAddress::parse("$B$6").unwrap();
    /// assert!(addr.row_absolute && addr.col_absolute);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        let col_absolute = if bytes.first() == Some(&b'$') {
            pos += 1;
            true
        } else {
            false
        };

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::InvalidAddress(format!("no column letters in '{s}'")));
        }
        let col = Self::letters_to_column(&s[col_start..pos])?;

        let row_absolute = if bytes.get(pos) == Some(&b'$') {
            pos += 1;
            true
        } else {
            false
        };

        let row_str = &s[pos..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!("bad row number in '{s}'")));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("bad row number in '{s}'")))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!("row must be >= 1 in '{s}'")));
        }
        let row = row - 1;
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self {
            row,
            col,
            row_absolute,
            col_absolute,
        })
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, ...)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = String::new();
        let mut n = col as u32 + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, ((n % 26) as u8 + b'A') as char);
            n /= 26;
        }
        letters
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26, ...)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }
        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!("bad column letter '{c}'")));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }
        let col = col - 1;
        if col >= MAX_COLS as u32 {
            return Err(Error::ColumnOutOfBounds(col as u16, MAX_COLS - 1));
        }
        Ok(col as u16)
    }

    /// Format as an A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut out = String::new();
        if self.col_absolute {
            out.push('$');
        }
        out.push_str(&Self::column_to_letters(self.col));
        if self.row_absolute {
            out.push('$');
        }
        out.push_str(&(self.row + 1).to_string());
        out
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g. "B5:B7")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellAddress,
    /// Bottom-right corner
    pub end: CellAddress,
}

impl CellRange {
    /// Create a range, normalizing so start is top-left
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        let (start_row, end_row) = if a.row <= b.row {
            (a.row, b.row)
        } else {
            (b.row, a.row)
        };
        let (start_col, end_col) = if a.col <= b.col {
            (a.col, b.col)
        } else {
            (b.col, a.col)
        };
        Self {
            start: CellAddress::new(start_row, start_col),
            end: CellAddress::new(end_row, end_col),
        }
    }

    /// A range covering a single cell
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: CellAddress::new(addr.row, addr.col),
            end: CellAddress::new(addr.row, addr.col),
        }
    }

    /// Parse from "A1:B10" notation; a bare address is a single-cell range
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.find(':') {
            Some(colon) => {
                let start = CellAddress::parse(&s[..colon])?;
                let end = CellAddress::parse(&s[colon + 1..])?;
                Ok(Self::new(start, end))
            }
            None => Ok(Self::single(CellAddress::parse(s)?)),
        }
    }

    /// Whether this range is exactly one cell
    pub fn is_single(&self) -> bool {
        self.start.row == self.end.row && self.start.col == self.end.col
    }

    /// Whether the range contains the given address
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Number of cells covered
    pub fn cell_count(&self) -> u64 {
        let rows = (self.end.row - self.start.row + 1) as u64;
        let cols = (self.end.col - self.start.col + 1) as u64;
        rows * cols
    }

    /// Iterate all addresses in the range, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> + '_ {
        let range = *self;
        (range.start.row..=range.end.row).flat_map(move |row| {
            (range.start.col..=range.end.col).map(move |col| CellAddress::new(row, col))
        })
    }

    /// Format as "A1:B10" (or a single address)
    pub fn to_a1_string(&self) -> String {
        if self.is_single() {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn column_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(1), "B");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
        assert_eq!(CellAddress::column_to_letters(702), "AAA");

        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellAddress::letters_to_column("f").unwrap(), 5);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 26);
        assert!(CellAddress::letters_to_column("").is_err());
    }

    #[test]
    fn parse_addresses() {
        let addr = CellAddress::parse("B9").unwrap();
        assert_eq!((addr.row, addr.col), (8, 1));
        assert!(!addr.row_absolute && !addr.col_absolute);

        let addr = CellAddress::parse("$B$6").unwrap();
        assert_eq!((addr.row, addr.col), (5, 1));
        assert!(addr.row_absolute && addr.col_absolute);

        let addr = CellAddress::parse("A$1").unwrap();
        assert!(addr.row_absolute && !addr.col_absolute);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("B").is_err());
        assert!(CellAddress::parse("9").is_err());
        assert!(CellAddress::parse("B0").is_err());
        assert!(CellAddress::parse("B9C").is_err());
        assert!(CellAddress::parse("XFE1").is_err());
    }

    #[test]
    fn display_round_trip() {
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
        assert_eq!(CellAddress::new(8, 1).to_string(), "B9");
        assert_eq!(CellAddress::absolute(5, 1).to_string(), "$B$6");
    }

    #[test]
    fn ranges() {
        let range = CellRange::parse("B5:B7").unwrap();
        assert_eq!(range.cell_count(), 3);
        assert!(range.contains(&CellAddress::parse("B6").unwrap()));
        assert!(!range.contains(&CellAddress::parse("B9").unwrap()));
        assert_eq!(range.to_string(), "B5:B7");

        // Single cell and reversed corners
        assert!(CellRange::parse("C3").unwrap().is_single());
        let rev = CellRange::parse("F23:B19").unwrap();
        assert_eq!(rev.to_string(), "B19:F23");
    }

    #[test]
    fn range_iteration_is_row_major() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<String> = range.cells().map(|a| a.to_string()).collect();
        assert_eq!(cells, ["A1", "B1", "A2", "B2"]);
    }

    proptest! {
        #[test]
        fn letters_round_trip(col in 0u16..16_384) {
            let letters = CellAddress::column_to_letters(col);
            prop_assert_eq!(CellAddress::letters_to_column(&letters).unwrap(), col);
        }

        #[test]
        fn address_round_trip(row in 0u32..1000, col in 0u16..100) {
            let addr = CellAddress::new(row, col);
            prop_assert_eq!(CellAddress::parse(&addr.to_string()).unwrap(), addr);
        }
    }
}
