//! Gantt bar placement on the day grid
//!
//! The Visual Timeline keeps its label in column A and a narrow spacer in
//! column B; day `i` of the grid sits in zero-based column `i + BASE_OFFSET`.
//!
//! ```text
//!        A            B   C     D     E     F     G
//!   1    Stage / Task     01/01 01/02 01/03 01/04 01/05
//!   2    Design           ███   ███   ███   ███   ███
//!   3      Wireframes           ███   ███
//! ```

use chrono::NaiveDate;
use planxl_core::{DateGrid, Status};

use crate::sheet::{CellStyle, Sheet};
use crate::style::status_color;

/// Columns to the left of the first grid day (label + spacer)
pub const BASE_OFFSET: u16 = 2;

/// Inclusive, zero-based column range of one bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarSpan {
    pub first_col: u16,
    pub last_col: u16,
}

impl BarSpan {
    /// Number of day columns covered
    pub fn width(&self) -> u16 {
        self.last_col - self.first_col + 1
    }

    /// A1-style reference of the bar on `row` (zero-based), e.g. `C2:G2`
    pub fn range_ref(&self, row: u32) -> String {
        format!(
            "{}{}:{}{}",
            column_letter(u32::from(self.first_col) + 1),
            row + 1,
            column_letter(u32::from(self.last_col) + 1),
            row + 1
        )
    }
}

/// Spreadsheet letters for a one-based column number (1 -> A, 27 -> AA).
///
/// Column 0 has no letters and yields an empty string.
pub fn column_letter(column: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Zero-based worksheet column of a date, unclamped
pub fn grid_column(grid: &DateGrid, date: NaiveDate) -> i64 {
    grid.index_of(date) + i64::from(BASE_OFFSET)
}

/// Column span of a bar from `start` to `end`.
///
/// Unset dates give no bar. Columns are clamped into the grid; a span whose
/// end falls before its start after clamping collapses to one column.
pub fn bar_span(
    grid: &DateGrid,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<BarSpan> {
    let (start, end) = (start?, end?);

    let min = i64::from(BASE_OFFSET);
    let max = min + grid.len() as i64 - 1;

    let first = grid_column(grid, start).clamp(min, max);
    let mut last = grid_column(grid, end).clamp(min, max);
    if last < first {
        last = first;
    }

    Some(BarSpan {
        first_col: u16::try_from(first).ok()?,
        last_col: u16::try_from(last).ok()?,
    })
}

/// Fill `span` on `row` with the bordered bar color of `status`
pub fn paint_bar(sheet: &mut Sheet, row: u32, span: BarSpan, status: &Status) {
    let style = CellStyle::Bar(status_color(status));
    for col in span.first_col..=span.last_col {
        sheet.set_style(row, col, style);
    }
}
