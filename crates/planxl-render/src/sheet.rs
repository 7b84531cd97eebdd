//! In-memory worksheet model
//!
//! Sheets are composed as plain data first and handed to the XLSX writer
//! afterwards. Cells are keyed by zero-based `(row, column)`, matching the
//! writer's `RowNum`/`ColNum` convention.

use std::collections::BTreeMap;

/// Cell content
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Styled cell without content
    Blank,
}

/// Visual role of a cell; mapped to concrete formats at write time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Plain,
    /// Large bold centered title
    Title,
    /// Bold white on dark blue
    Header,
    /// Bold label in a label/value pair
    Label,
    /// Stage rows are emphasised
    StageText,
    /// Timeline date header on a weekday
    DayHeader,
    /// Timeline date header on a weekend
    WeekendHeader,
    /// Gantt bar cell with the given RGB fill
    Bar(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self.value {
            CellValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// Inclusive merged cell range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

/// One worksheet: cells, merges, column widths and frozen panes
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    merges: Vec<MergedRange>,
    widths: BTreeMap<u16, f64>,
    freeze: Option<(u32, u16)>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            merges: Vec::new(),
            widths: BTreeMap::new(),
            freeze: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_text(&mut self, row: u32, col: u16, text: impl Into<String>, style: CellStyle) {
        self.cells.insert(
            (row, col),
            Cell {
                value: CellValue::Text(text.into()),
                style,
            },
        );
    }

    pub fn set_number(&mut self, row: u32, col: u16, value: f64, style: CellStyle) {
        self.cells.insert(
            (row, col),
            Cell {
                value: CellValue::Number(value),
                style,
            },
        );
    }

    /// Restyle a cell, creating a blank one if it is empty
    pub fn set_style(&mut self, row: u32, col: u16, style: CellStyle) {
        self.cells
            .entry((row, col))
            .and_modify(|cell| cell.style = style)
            .or_insert(Cell {
                value: CellValue::Blank,
                style,
            });
    }

    /// Write a run of header texts starting at `(row, first_col)`
    pub fn set_headers(&mut self, row: u32, first_col: u16, headers: &[&str], style: CellStyle) {
        for (offset, header) in headers.iter().enumerate() {
            self.set_text(row, first_col + offset as u16, *header, style);
        }
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Text content of a cell, if it holds text
    pub fn text(&self, row: u32, col: u16) -> Option<&str> {
        self.cell(row, col).and_then(Cell::text)
    }

    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &Cell)> + '_ {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Cells of one row, in column order
    pub fn row_cells(&self, row: u32) -> impl Iterator<Item = (u16, &Cell)> + '_ {
        self.cells
            .range((row, 0)..=(row, u16::MAX))
            .map(|((_, col), cell)| (*col, cell))
    }

    /// Number of rows up to and including the last populated one
    pub fn row_count(&self) -> u32 {
        self.cells.keys().next_back().map_or(0, |(row, _)| row + 1)
    }

    pub fn merge(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16) {
        self.merges.push(MergedRange {
            first_row,
            first_col,
            last_row,
            last_col,
        });
    }

    pub fn merges(&self) -> &[MergedRange] {
        &self.merges
    }

    pub fn set_width(&mut self, col: u16, width: f64) {
        self.widths.insert(col, width);
    }

    /// Same width for every column in `first..=last`
    pub fn set_width_range(&mut self, first: u16, last: u16, width: f64) {
        for col in first..=last {
            self.set_width(col, width);
        }
    }

    pub fn width(&self, col: u16) -> Option<f64> {
        self.widths.get(&col).copied()
    }

    pub fn widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.widths.iter().map(|(col, width)| (*col, *width))
    }

    pub fn freeze_panes(&mut self, row: u32, col: u16) {
        self.freeze = Some((row, col));
    }

    pub fn frozen(&self) -> Option<(u32, u16)> {
        self.freeze
    }
}
