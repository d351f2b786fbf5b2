//! Shared layout constants
//!
//! The forecast spans five years, 2025-2029, in columns B-F on every sheet
//! that carries a yearly table. Colors and number formats are the handful
//! the workbook uses throughout.

use fincast_core::{CellAddress, Color, Result, Style, Worksheet};

/// Forecast year labels, columns B..F in order
pub const YEARS: [&str; 5] = ["2025", "2026", "2027", "2028", "2029"];

/// Column letter of forecast year `i` (0 → "B", 4 → "F")
pub fn year_col(i: usize) -> String {
    CellAddress::column_to_letters((i + 1) as u16)
}

// Fill palette
pub const HEADER_BLUE: Color = Color::from_hex(0xDCE6F1);
pub const LIGHT_BLUE: Color = Color::from_hex(0xDDEBF7);
pub const LIGHT_GREEN: Color = Color::from_hex(0xE2EFDA);
pub const LIGHT_ORANGE: Color = Color::from_hex(0xFCE4D6);
pub const LIGHT_RED: Color = Color::from_hex(0xFFCCCC);
pub const LIGHT_YELLOW: Color = Color::from_hex(0xFFF2CC);
pub const LIGHT_GRAY: Color = Color::from_hex(0xF2F2F2);
pub const MEDIUM_GRAY: Color = Color::from_hex(0xD9D9D9);
pub const RED: Color = Color::from_hex(0xFF0000);

// Color scale anchors
pub const SCALE_GREEN: Color = Color::from_hex(0x63BE7B);
pub const SCALE_YELLOW: Color = Color::from_hex(0xFFEB84);
pub const SCALE_RED: Color = Color::from_hex(0xF8696B);

// Number formats
pub const FMT_THOUSANDS: &str = "#,##0";
pub const FMT_PERCENT: &str = "0.00%";
pub const FMT_WHOLE_PERCENT: &str = "0%";
pub const FMT_PRICE: &str = "$#,##0.00";
pub const FMT_DOLLARS: &str = "$#,##0";
pub const FMT_TWO_DECIMALS: &str = "0.00";
pub const FMT_THREE_DECIMALS: &str = "0.000";
pub const FMT_ONE_DECIMAL: &str = "0.0";

/// Sheet title style (row 1 of every sheet)
pub fn title_style() -> Style {
    Style::new().bold(true).font_size(14)
}

/// Section header style
pub fn bold() -> Style {
    Style::new().bold(true)
}

/// Write the standard yearly table header: a bold label in column A and
/// bold year labels in columns B-F of the given 1-based display row.
pub fn write_year_header(ws: &mut Worksheet, label: &str, display_row: u32) -> Result<()> {
    ws.set_value(&format!("A{display_row}"), label)?;
    ws.set_style(&format!("A{display_row}"), &bold())?;
    for (i, year) in YEARS.iter().enumerate() {
        let addr = format!("{}{display_row}", year_col(i));
        ws.set_value(&addr, *year)?;
        ws.set_style(&addr, &bold())?;
    }
    Ok(())
}
