//! Integration tests for the timeline workbook

use chrono::NaiveDate;
use planxl_core::{Priority, ProjectSnapshot, Stage, Status, Task, TeamMember};
use planxl_render::{CellStyle, ExcelExporter, Locale, Sheet};
use pretty_assertions::assert_eq;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Ten-day project: one in-progress stage with one task assigned to Ana
fn create_launch_project() -> ProjectSnapshot {
    ProjectSnapshot::new(1, "Launch", date(2024, 1, 1), date(2024, 1, 10))
        .member(TeamMember::new(1, "Ana").role("frontend"))
        .stage(
            Stage::new(1, "Design")
                .dates(date(2024, 1, 1), date(2024, 1, 5))
                .status(Status::InProgress)
                .task(
                    Task::new(1, "Wireframes")
                        .dates(date(2024, 1, 2), date(2024, 1, 3))
                        .priority(Priority::High)
                        .assign(1),
                ),
        )
}

/// Columns on `row` painted as bars, in order
fn bar_columns(sheet: &Sheet, row: u32) -> Vec<u16> {
    sheet
        .row_cells(row)
        .filter(|(_, cell)| matches!(cell.style, CellStyle::Bar(_)))
        .map(|(col, _)| col)
        .collect()
}

#[test]
fn ten_day_project_layout() {
    let sheets = ExcelExporter::new().compose(&create_launch_project()).unwrap();
    let (data, timeline) = (&sheets[1], &sheets[2]);

    // Visual Timeline: label column, spacer, then exactly ten date columns
    let date_headers: Vec<&str> = timeline
        .row_cells(0)
        .filter(|(col, _)| *col >= 2)
        .filter_map(|(_, cell)| cell.text())
        .collect();
    assert_eq!(date_headers.len(), 10);
    assert_eq!(date_headers[0], "01/01");
    assert_eq!(date_headers[9], "01/10");

    assert_eq!(bar_columns(timeline, 1), vec![2, 3, 4, 5, 6]);
    assert_eq!(bar_columns(timeline, 2), vec![3, 4]);
    assert_eq!(timeline.cell(1, 2).map(|c| c.style), Some(CellStyle::Bar(0xFFB366)));

    // Tabular Data: header plus exactly two rows
    assert_eq!(data.row_count(), 3);
    assert_eq!(data.cell(1, 5).and_then(|c| c.number()), Some(5.0));
    assert_eq!(data.text(1, 2), Some(""));
    assert_eq!(data.text(2, 0), Some("Launch"));
    assert_eq!(data.text(2, 1), Some("Design"));
    assert_eq!(data.text(2, 2), Some("Wireframes"));
    assert_eq!(data.text(2, 8), Some("Ana"));
    assert_eq!(data.text(2, 9), Some("高"));
}

#[test]
fn weekend_headers_are_marked() {
    let sheets = ExcelExporter::new().compose(&create_launch_project()).unwrap();
    let timeline = &sheets[2];

    // 2024-01-06 and 2024-01-07 fall on the weekend: grid days 5 and 6
    for col in 2..12u16 {
        let expected = if col == 7 || col == 8 {
            CellStyle::WeekendHeader
        } else {
            CellStyle::DayHeader
        };
        assert_eq!(timeline.cell(0, col).map(|c| c.style), Some(expected), "column {col}");
    }
}

#[test]
fn timeline_labels_and_widths() {
    let sheets = ExcelExporter::new().compose(&create_launch_project()).unwrap();
    let timeline = &sheets[2];

    assert_eq!(timeline.text(1, 0), Some("📁 Design"));
    assert_eq!(timeline.text(2, 0), Some("  📄 Wireframes"));
    assert_eq!(timeline.width(0), Some(30.0));
    assert_eq!(timeline.width(2), Some(3.0));
    assert_eq!(timeline.width(11), Some(3.0));
    assert_eq!(timeline.width(12), None);
    assert_eq!(timeline.frozen(), Some((1, 2)));
}

#[test]
fn task_without_end_date_renders_without_bar() {
    let project = create_launch_project().stage(
        Stage::new(2, "Build")
            .dates(date(2024, 1, 8), date(2024, 1, 10))
            .task(Task::new(2, "Open ended").starts(date(2024, 1, 8))),
    );
    let sheets = ExcelExporter::new().compose(&project).unwrap();
    let (data, timeline) = (&sheets[1], &sheets[2]);

    // rows: Design, Wireframes, Build, Open ended
    assert_eq!(data.text(4, 2), Some("Open ended"));
    assert_eq!(data.text(4, 3), Some("2024-01-08"));
    assert_eq!(data.text(4, 4), Some(""));
    assert_eq!(data.cell(4, 5).and_then(|c| c.number()), Some(0.0));

    assert_eq!(timeline.text(4, 0), Some("  📄 Open ended"));
    assert!(bar_columns(timeline, 4).is_empty());
    assert_eq!(bar_columns(timeline, 3), vec![9, 10, 11]);
}

#[test]
fn inverted_task_renders_without_bar() {
    let project = create_launch_project().stage(
        Stage::new(2, "Backwards")
            .dates(date(2024, 1, 9), date(2024, 1, 4))
            .status(Status::Paused),
    );
    let sheets = ExcelExporter::new().compose(&project).unwrap();

    assert!(bar_columns(&sheets[2], 3).is_empty());
    assert_eq!(sheets[1].cell(3, 5).and_then(|c| c.number()), Some(0.0));
}

#[test]
fn unknown_codes_in_workbook() {
    let project = ProjectSnapshot::new(1, "Codes", date(2024, 1, 1), date(2024, 1, 3)).stage(
        Stage::new(1, "S")
            .dates(date(2024, 1, 1), date(2024, 1, 2))
            .status(Status::from_code("blocked"))
            .task(
                Task::new(1, "T")
                    .dates(date(2024, 1, 1), date(2024, 1, 1))
                    .priority(Priority::from_code("whenever")),
            ),
    );
    let sheets = ExcelExporter::new().locale(Locale::En).compose(&project).unwrap();

    assert_eq!(sheets[1].text(1, 6), Some("blocked"));
    assert_eq!(sheets[1].text(2, 9), Some("Medium"));
    assert_eq!(sheets[2].cell(1, 2).map(|c| c.style), Some(CellStyle::Bar(0xE0E0E0)));
}

#[test]
fn rows_keep_document_order_regardless_of_dates() {
    let project = ProjectSnapshot::new(1, "Order", date(2024, 1, 1), date(2024, 2, 29))
        .stage(Stage::new(1, "Second half").dates(date(2024, 2, 1), date(2024, 2, 29)))
        .stage(
            Stage::new(2, "First half")
                .dates(date(2024, 1, 1), date(2024, 1, 31))
                .task(Task::new(1, "late task").dates(date(2024, 1, 20), date(2024, 1, 25)))
                .task(Task::new(2, "early task").dates(date(2024, 1, 2), date(2024, 1, 3))),
        );
    let sheets = ExcelExporter::new().compose(&project).unwrap();
    let data = &sheets[1];

    let order: Vec<(&str, &str)> = (1..=4)
        .map(|r| (data.text(r, 1).unwrap(), data.text(r, 2).unwrap()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Second half", ""),
            ("First half", ""),
            ("First half", "late task"),
            ("First half", "early task"),
        ]
    );
}

#[test]
fn long_projects_use_multi_letter_columns() {
    let project = ProjectSnapshot::new(1, "Long", date(2024, 1, 1), date(2024, 3, 31))
        .stage(Stage::new(1, "All").dates(date(2024, 1, 1), date(2024, 3, 31)));
    let sheets = ExcelExporter::new().compose(&project).unwrap();

    // 91 days -> last day column is 92 (zero-based), i.e. "CO"
    let bars = bar_columns(&sheets[2], 1);
    assert_eq!(bars.len(), 91);
    assert_eq!(bars.last(), Some(&92));
    assert_eq!(planxl_render::column_letter(93), "CO");

    let bytes = ExcelExporter::new().export(&project).unwrap().bytes;
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn composing_twice_is_identical() {
    let project = create_launch_project();
    let exporter = ExcelExporter::new();

    let first = exporter.compose(&project).unwrap();
    let second = exporter.compose(&project).unwrap();

    assert_eq!(first, second);
}

#[test]
fn percentages_have_one_decimal() {
    let mut project = create_launch_project();
    project.stages[0].progress = 66.666;
    project.stages[0].tasks[0].progress = 5.0;
    let sheets = ExcelExporter::new().compose(&project).unwrap();

    assert_eq!(sheets[1].text(1, 7), Some("66.7%"));
    assert_eq!(sheets[1].text(2, 7), Some("5.0%"));
}

fn widths(sheet: &Sheet) -> Vec<(u16, f64)> {
    sheet.widths().collect()
}

#[test]
fn overview_title_labels_and_header_styles() {
    let sheets = ExcelExporter::new().compose(&create_launch_project()).unwrap();
    let overview = &sheets[0];

    assert_eq!(overview.cell(0, 0).map(|c| c.style), Some(CellStyle::Title));
    for row in 1..=5 {
        assert_eq!(overview.cell(row, 0).map(|c| c.style), Some(CellStyle::Label), "row {row}");
    }
    for col in 2..=9u16 {
        assert_eq!(overview.cell(7, col).map(|c| c.style), Some(CellStyle::Header), "column {col}");
    }
    assert!(overview.cell(7, 10).is_none());
    assert_eq!(overview.cell(8, 2).map(|c| c.style), Some(CellStyle::StageText));
    assert_eq!(overview.cell(9, 2).map(|c| c.style), Some(CellStyle::Plain));
}

#[test]
fn table_headers_are_styled() {
    let sheets = ExcelExporter::new().compose(&create_launch_project()).unwrap();
    let (data, roster) = (&sheets[1], &sheets[3]);

    let data_header: Vec<_> = data.row_cells(0).map(|(col, c)| (col, c.style)).collect();
    assert_eq!(data_header.len(), 10);
    assert!(data_header.iter().all(|(_, style)| *style == CellStyle::Header));

    let roster_header: Vec<_> = roster.row_cells(0).map(|(col, c)| (col, c.style)).collect();
    assert_eq!(roster_header.len(), 6);
    assert!(roster_header.iter().all(|(_, style)| *style == CellStyle::Header));

    assert_eq!(data.cell(1, 0).map(|c| c.style), Some(CellStyle::Plain));
    assert_eq!(roster.cell(1, 0).map(|c| c.style), Some(CellStyle::Plain));
}

#[test]
fn fixed_column_widths() {
    let sheets = ExcelExporter::new().compose(&create_launch_project()).unwrap();

    assert_eq!(
        widths(&sheets[0]),
        vec![
            (0, 15.0),
            (1, 20.0),
            (2, 25.0),
            (3, 12.0),
            (4, 12.0),
            (5, 15.0),
            (6, 12.0),
            (7, 12.0),
            (8, 15.0),
            (9, 12.0),
        ]
    );
    assert_eq!(
        widths(&sheets[1]),
        vec![
            (0, 20.0),
            (1, 25.0),
            (2, 25.0),
            (3, 12.0),
            (4, 12.0),
            (5, 15.0),
            (6, 12.0),
            (7, 12.0),
            (8, 15.0),
            (9, 12.0),
        ]
    );
    assert_eq!(
        widths(&sheets[3]),
        vec![(0, 15.0), (1, 15.0), (2, 25.0), (3, 20.0), (4, 12.0), (5, 10.0)]
    );
}

#[test]
fn header_rows_freeze_unless_disabled() {
    let project = create_launch_project();

    let frozen = ExcelExporter::new().compose(&project).unwrap();
    assert_eq!(frozen[0].frozen(), None);
    assert_eq!(frozen[1].frozen(), Some((1, 0)));
    assert_eq!(frozen[3].frozen(), Some((1, 0)));

    let loose = ExcelExporter::new().no_freeze().compose(&project).unwrap();
    assert!(loose.iter().all(|sheet| sheet.frozen().is_none()));
}
