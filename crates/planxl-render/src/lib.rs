//! # planxl-render
//!
//! Timeline layout and output backends for planxl projects.
//!
//! This crate provides:
//! - Timeline rows: the stage/task tree flattened in document order
//! - Gantt bar placement on the project's day grid
//! - Excel workbook export (Overview, Tabular Data, Visual Timeline, Team Roster)
//! - JSON gantt data for interactive front-ends
//! - Status/priority labels and colors in Chinese and English
//!
//! ## Example
//!
//! ```rust,ignore
//! use planxl_core::{InMemorySource, Renderer};
//! use planxl_render::{ExcelExporter, JsonTimelineRenderer, Locale};
//!
//! // Excel workbook with a suggested file name
//! let exporter = ExcelExporter::new().locale(Locale::En);
//! let workbook = exporter.export_from(&source, project_id)?;
//! std::fs::write(&workbook.file_name, &workbook.bytes)?;
//!
//! // Nested timeline as JSON
//! let json = JsonTimelineRenderer::new().render(&project)?;
//! ```

pub mod excel;
pub mod gantt;
pub mod json;
pub mod sheet;
pub mod style;
pub mod timeline;

pub use excel::{ExcelExporter, ExportedWorkbook, CONTENT_TYPE};
pub use gantt::{bar_span, column_letter, BarSpan, BASE_OFFSET};
pub use json::JsonTimelineRenderer;
pub use sheet::{Cell, CellStyle, CellValue, Sheet};
pub use style::{priority_label, status_color, status_label, Locale};
pub use timeline::{compose_rows, RowKind, TimelineRow};

use planxl_core::{RenderError, SourceError};
use thiserror::Error;

/// Failure of a load-then-render export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
