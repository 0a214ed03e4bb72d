//! Excel backend and record pipelines
//!
//! - Export: records → [`Workbook`](crate::grid::Workbook) → .xlsx (rust_xlsxwriter)
//! - Import: .xlsx (calamine) → [`Workbook`](crate::grid::Workbook) → records

mod exporter;
mod importer;
mod reader;
mod writer;

pub use exporter::{export, RecordExporter};
pub use importer::{import, import_workbook, RecordImporter};
pub use writer::to_format;
