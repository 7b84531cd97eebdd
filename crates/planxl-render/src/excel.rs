//! Project timeline workbook
//!
//! Generates an XLSX file with four sheets, always in this order:
//! - Overview: project identity block and the stage/task table
//! - Tabular Data: flat table, one row per stage or task, for filtering
//! - Visual Timeline: one column per calendar day with Gantt bars
//! - Team Roster: the project's members
//!
//! ## Example Output Structure
//!
//! ```text
//! Sheet: Overview
//! | A            | B          | C            | D          | E          | F  | G       | H      | I        | J        |
//! |--------------|------------|--------------|------------|------------|----|---------|--------|----------|----------|
//! |                         Project Gantt Chart (merged A1:J1)                                                     |
//! | Project Name | Launch     |              |            |            |    |         |        |          |          |
//! | ...          |            |              |            |            |    |         |        |          |          |
//! |              |            | Stage / Task | Start      | End        | BD | Status  | Prog.  | Assignee | Priority |
//! |              |            | Design       | 2024-01-01 | 2024-01-05 | 5  | Pending | 20.0%  |          |          |
//! |              |            |   Wireframes | 2024-01-02 | 2024-01-03 | 2  | Pending | 0.0%   | Ana      | High     |
//! ```
//!
//! Sheets are composed into the [`Sheet`] model by [`ExcelExporter::compose`]
//! and only then written with `rust_xlsxwriter`, so sheet content can be
//! inspected without unpacking the archive.

use std::collections::HashMap;
use std::path::Path;

use planxl_core::{DateGrid, ProjectId, ProjectSnapshot, RenderError, Renderer, SnapshotSource};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::{debug, info, warn};

use crate::gantt::{bar_span, paint_bar, BASE_OFFSET};
use crate::sheet::{CellStyle, CellValue, Sheet};
use crate::style::{priority_label, status_label, Labels, Locale, HEADER_COLOR, WEEKEND_COLOR};
use crate::timeline::{compose_rows, format_date, RowKind, TimelineRow};
use crate::ExportError;

/// MIME type of the produced document
pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Column limit of the XLSX format
pub const MAX_COLUMNS: usize = 16_384;

/// Overview table starts in column C, below the identity block
const OVERVIEW_TABLE_COL: u16 = 2;
const OVERVIEW_HEADER_ROW: u32 = 7;
/// Last column of the Overview table (J); the title is merged up to it
const OVERVIEW_LAST_COL: u16 = 9;

/// A serialized workbook ready to hand to the caller
#[derive(Clone, Debug)]
pub struct ExportedWorkbook {
    /// Suggested download name, `<project>_<suffix>.xlsx`
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedWorkbook {
    /// Write the workbook bytes to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Timeline workbook exporter
#[derive(Clone, Debug)]
pub struct ExcelExporter {
    /// Language of labels, headers and sheet names
    pub locale: Locale,
    /// Replaces the locale's file name suffix
    pub file_suffix: Option<String>,
    /// Width of each day column on the Visual Timeline
    pub day_column_width: f64,
    /// Freeze header rows (and the label columns on the timeline)
    pub freeze_headers: bool,
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self {
            locale: Locale::Zh,
            file_suffix: None,
            day_column_width: 3.0,
            freeze_headers: true,
        }
    }
}

impl ExcelExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label locale
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Override the file name suffix
    pub fn file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = Some(suffix.into());
        self
    }

    /// Set the day column width on the Visual Timeline
    pub fn day_column_width(mut self, width: f64) -> Self {
        self.day_column_width = width;
        self
    }

    /// Do not freeze header rows
    pub fn no_freeze(mut self) -> Self {
        self.freeze_headers = false;
        self
    }

    /// Suggested file name for a project
    pub fn file_name(&self, project: &ProjectSnapshot) -> String {
        let suffix = self
            .file_suffix
            .as_deref()
            .unwrap_or(self.locale.labels().file_suffix);
        format!("{}_{}.xlsx", project.name, suffix)
    }

    /// Load a project through `source` and export it
    pub fn export_from<S>(&self, source: &S, id: ProjectId) -> Result<ExportedWorkbook, ExportError>
    where
        S: SnapshotSource + ?Sized,
    {
        let project = source.load(id)?;
        Ok(self.export(&project)?)
    }

    /// Compose and serialize the workbook
    pub fn export(&self, project: &ProjectSnapshot) -> Result<ExportedWorkbook, RenderError> {
        let sheets = self.compose(project)?;
        let bytes = write_workbook(&sheets)?;

        info!(
            project = %project.name,
            bytes = bytes.len(),
            "exported timeline workbook"
        );

        Ok(ExportedWorkbook {
            file_name: self.file_name(project),
            content_type: CONTENT_TYPE,
            bytes,
        })
    }

    /// Build the four sheets without serializing them
    pub fn compose(&self, project: &ProjectSnapshot) -> Result<Vec<Sheet>, RenderError> {
        let grid = DateGrid::new(project.start_date, project.end_date).ok_or_else(|| {
            RenderError::InvalidData(format!(
                "project '{}' starts {} after it ends {}",
                project.name, project.start_date, project.end_date
            ))
        })?;
        if grid.len() + usize::from(BASE_OFFSET) > MAX_COLUMNS {
            return Err(RenderError::InvalidData(format!(
                "project '{}' spans {} days, more than a worksheet can hold",
                project.name,
                grid.len()
            )));
        }

        let rows = compose_rows(project);
        debug!(
            project = %project.name,
            rows = rows.len(),
            days = grid.len(),
            members = project.team_members.len(),
            "composing workbook"
        );

        let labels = self.locale.labels();
        Ok(vec![
            self.overview_sheet(project, &rows, labels),
            self.data_sheet(project, &rows, labels),
            self.timeline_sheet(&grid, &rows, labels),
            self.roster_sheet(project, labels),
        ])
    }

    /// Overview: identity block, then the indented stage/task table
    fn overview_sheet(&self, project: &ProjectSnapshot, rows: &[TimelineRow], labels: &Labels) -> Sheet {
        let mut sheet = Sheet::new(labels.overview_sheet);

        sheet.set_text(0, 0, labels.title, CellStyle::Title);
        sheet.merge(0, 0, 0, OVERVIEW_LAST_COL);

        let identity = [
            (labels.project_name, project.name.clone()),
            (labels.project_description, project.description.clone()),
            (labels.start_date, format_date(Some(project.start_date))),
            (labels.end_date, format_date(Some(project.end_date))),
            (labels.status, status_label(&project.status, self.locale).to_string()),
        ];
        for (offset, (label, value)) in identity.into_iter().enumerate() {
            let row = 1 + offset as u32;
            sheet.set_text(row, 0, label, CellStyle::Label);
            sheet.set_text(row, 1, value, CellStyle::Plain);
        }

        sheet.set_headers(
            OVERVIEW_HEADER_ROW,
            OVERVIEW_TABLE_COL,
            &labels.overview_headers,
            CellStyle::Header,
        );

        let c = OVERVIEW_TABLE_COL;
        for (i, row) in rows.iter().enumerate() {
            let r = OVERVIEW_HEADER_ROW + 1 + i as u32;
            let (name, text_style) = match row.kind {
                RowKind::Stage => (row.label.clone(), CellStyle::StageText),
                RowKind::Task => (format!("  {}", row.label), CellStyle::Plain),
            };
            sheet.set_text(r, c, name, text_style);
            sheet.set_text(r, c + 1, row.start_text(), CellStyle::Plain);
            sheet.set_text(r, c + 2, row.end_text(), CellStyle::Plain);
            sheet.set_number(r, c + 3, f64::from(row.business_days), CellStyle::Plain);
            sheet.set_text(r, c + 4, status_label(&row.status, self.locale), CellStyle::Plain);
            sheet.set_text(r, c + 5, row.progress_text(), CellStyle::Plain);
            if let Some(assignee) = &row.assignee {
                sheet.set_text(r, c + 6, assignee.as_str(), CellStyle::Plain);
            }
            if let Some(priority) = &row.priority {
                sheet.set_text(r, c + 7, priority_label(priority, self.locale), CellStyle::Plain);
            }
        }

        sheet.set_width(0, 15.0);
        sheet.set_width(1, 20.0);
        sheet.set_width(2, 25.0);
        sheet.set_width_range(3, 4, 12.0);
        sheet.set_width(5, 15.0);
        sheet.set_width(6, 12.0);
        sheet.set_width(7, 12.0);
        sheet.set_width(8, 15.0);
        sheet.set_width(9, 12.0);

        sheet
    }

    /// Tabular Data: one flat row per stage or task
    fn data_sheet(&self, project: &ProjectSnapshot, rows: &[TimelineRow], labels: &Labels) -> Sheet {
        let mut sheet = Sheet::new(labels.data_sheet);
        sheet.set_headers(0, 0, &labels.data_headers, CellStyle::Header);

        for (i, row) in rows.iter().enumerate() {
            let r = 1 + i as u32;
            sheet.set_text(r, 0, project.name.as_str(), CellStyle::Plain);
            sheet.set_text(r, 1, row.stage.as_str(), CellStyle::Plain);
            let task_name = match row.kind {
                RowKind::Stage => "",
                RowKind::Task => row.label.as_str(),
            };
            sheet.set_text(r, 2, task_name, CellStyle::Plain);
            sheet.set_text(r, 3, row.start_text(), CellStyle::Plain);
            sheet.set_text(r, 4, row.end_text(), CellStyle::Plain);
            sheet.set_number(r, 5, f64::from(row.business_days), CellStyle::Plain);
            sheet.set_text(r, 6, status_label(&row.status, self.locale), CellStyle::Plain);
            sheet.set_text(r, 7, row.progress_text(), CellStyle::Plain);
            sheet.set_text(r, 8, row.assignee.clone().unwrap_or_default(), CellStyle::Plain);
            let priority = row
                .priority
                .as_ref()
                .map(|p| priority_label(p, self.locale))
                .unwrap_or_default();
            sheet.set_text(r, 9, priority, CellStyle::Plain);
        }

        sheet.set_width(0, 20.0);
        sheet.set_width(1, 25.0);
        sheet.set_width(2, 25.0);
        sheet.set_width_range(3, 4, 12.0);
        sheet.set_width(5, 15.0);
        sheet.set_width(6, 12.0);
        sheet.set_width(7, 12.0);
        sheet.set_width(8, 15.0);
        sheet.set_width(9, 12.0);
        if self.freeze_headers {
            sheet.freeze_panes(1, 0);
        }

        sheet
    }

    /// Visual Timeline: date header per grid day, one bar per row
    fn timeline_sheet(&self, grid: &DateGrid, rows: &[TimelineRow], labels: &Labels) -> Sheet {
        let mut sheet = Sheet::new(labels.timeline_sheet);
        sheet.set_text(0, 0, labels.timeline_corner, CellStyle::Header);

        for (index, day) in grid.days().enumerate() {
            let col = BASE_OFFSET + index as u16;
            let style = if planxl_core::is_weekend(day) {
                CellStyle::WeekendHeader
            } else {
                CellStyle::DayHeader
            };
            sheet.set_text(0, col, day.format("%m/%d").to_string(), style);
        }

        for (i, row) in rows.iter().enumerate() {
            let r = 1 + i as u32;
            let (label, style) = match row.kind {
                RowKind::Stage => (format!("📁 {}", row.label), CellStyle::StageText),
                RowKind::Task => (format!("  📄 {}", row.label), CellStyle::Plain),
            };
            sheet.set_text(r, 0, label, style);

            if row.is_degenerate() {
                warn!(row = %row.label, start = ?row.start, end = ?row.end, "no drawable date range, skipping bar");
                continue;
            }
            if let Some(span) = bar_span(grid, row.start, row.end) {
                debug!(row = %row.label, cells = %span.range_ref(r), "bar");
                paint_bar(&mut sheet, r, span, &row.status);
            }
        }

        sheet.set_width(0, 30.0);
        sheet.set_width(1, 2.0);
        let last_day_col = BASE_OFFSET + (grid.len() - 1) as u16;
        sheet.set_width_range(BASE_OFFSET, last_day_col, self.day_column_width);
        if self.freeze_headers {
            sheet.freeze_panes(1, BASE_OFFSET);
        }

        sheet
    }

    /// Team Roster: one row per member
    fn roster_sheet(&self, project: &ProjectSnapshot, labels: &Labels) -> Sheet {
        let mut sheet = Sheet::new(labels.roster_sheet);
        sheet.set_headers(0, 0, &labels.roster_headers, CellStyle::Header);

        for (i, member) in project.team_members.iter().enumerate() {
            let r = 1 + i as u32;
            sheet.set_text(r, 0, member.name.as_str(), CellStyle::Plain);
            sheet.set_text(r, 1, member.role.as_str(), CellStyle::Plain);
            sheet.set_text(r, 2, member.email.as_str(), CellStyle::Plain);
            sheet.set_text(r, 3, member.avatar.as_str(), CellStyle::Plain);
            sheet.set_text(r, 4, member.created_at.format("%Y-%m-%d").to_string(), CellStyle::Plain);
            let activity = if member.is_active {
                labels.member_active
            } else {
                labels.member_inactive
            };
            sheet.set_text(r, 5, activity, CellStyle::Plain);
        }

        sheet.set_width(0, 15.0);
        sheet.set_width(1, 15.0);
        sheet.set_width(2, 25.0);
        sheet.set_width(3, 20.0);
        sheet.set_width(4, 12.0);
        sheet.set_width(5, 10.0);
        if self.freeze_headers {
            sheet.freeze_panes(1, 0);
        }

        sheet
    }
}

impl Renderer for ExcelExporter {
    type Output = Vec<u8>;

    fn render(&self, project: &ProjectSnapshot) -> Result<Vec<u8>, RenderError> {
        self.export(project).map(|workbook| workbook.bytes)
    }
}

// ============================================================================
// XLSX Writing
// ============================================================================

/// Reusable Excel formats
struct ExcelFormats {
    plain: Format,
    title: Format,
    header: Format,
    label: Format,
    stage_text: Format,
    day_header: Format,
    weekend_header: Format,
    /// Bar formats by fill color, created on first use
    bars: HashMap<u32, Format>,
}

impl ExcelFormats {
    fn new() -> Self {
        let title = Format::new()
            .set_bold()
            .set_font_size(16)
            .set_font_color(0x000000)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let header = Format::new()
            .set_bold()
            .set_font_color(0xFFFFFF)
            .set_background_color(HEADER_COLOR)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let day_header = Format::new().set_align(FormatAlign::Center);

        let weekend_header = Format::new()
            .set_align(FormatAlign::Center)
            .set_background_color(WEEKEND_COLOR);

        Self {
            plain: Format::new(),
            title,
            header,
            label: Format::new().set_bold(),
            stage_text: Format::new().set_bold(),
            day_header,
            weekend_header,
            bars: HashMap::new(),
        }
    }

    fn get(&mut self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Plain => &self.plain,
            CellStyle::Title => &self.title,
            CellStyle::Header => &self.header,
            CellStyle::Label => &self.label,
            CellStyle::StageText => &self.stage_text,
            CellStyle::DayHeader => &self.day_header,
            CellStyle::WeekendHeader => &self.weekend_header,
            CellStyle::Bar(color) => &*self.bars.entry(color).or_insert_with(|| {
                Format::new()
                    .set_background_color(color)
                    .set_border(FormatBorder::Thin)
                    .set_border_color(0x000000)
            }),
        }
    }
}

fn xlsx_error(e: XlsxError) -> RenderError {
    RenderError::Format(e.to_string())
}

/// Serialize composed sheets into XLSX bytes
pub fn write_workbook(sheets: &[Sheet]) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let mut formats = ExcelFormats::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name()).map_err(xlsx_error)?;
        write_sheet(worksheet, sheet, &mut formats)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &Sheet,
    formats: &mut ExcelFormats,
) -> Result<(), RenderError> {
    for ((row, col), cell) in sheet.cells() {
        let format = formats.get(cell.style);
        match &cell.value {
            CellValue::Text(text) => {
                worksheet
                    .write_string_with_format(row, col, text.as_str(), format)
                    .map_err(xlsx_error)?;
            }
            CellValue::Number(value) => {
                worksheet
                    .write_number_with_format(row, col, *value, format)
                    .map_err(xlsx_error)?;
            }
            CellValue::Blank => {
                worksheet.write_blank(row, col, format).map_err(xlsx_error)?;
            }
        }
    }

    for range in sheet.merges() {
        let anchor = sheet.cell(range.first_row, range.first_col);
        let text = anchor.and_then(|c| c.text()).unwrap_or_default();
        let style = anchor.map_or(CellStyle::Plain, |c| c.style);
        worksheet
            .merge_range(
                range.first_row,
                range.first_col,
                range.last_row,
                range.last_col,
                text,
                formats.get(style),
            )
            .map_err(xlsx_error)?;
    }

    for (col, width) in sheet.widths() {
        worksheet.set_column_width(col, width).map_err(xlsx_error)?;
    }

    if let Some((row, col)) = sheet.frozen() {
        worksheet.set_freeze_panes(row, col).map_err(xlsx_error)?;
    }

    Ok(())
}
