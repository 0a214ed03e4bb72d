//! sheetbind - typed records ↔ spreadsheet sheets
//!
//! This library exports lists of typed records to styled worksheets and
//! imports worksheets back into records, binding columns to fields by
//! header text.
//!
//! # Features
//!
//! - Static field-binding tables via the [`record!`] macro (no reflection)
//! - Scalar fields: `i32`, `i64`, `f32`, `f64`, `Decimal`, `bool`, `String`,
//!   and `Option` of each
//! - Column descriptors with titles, private styles, exclusion and
//!   percentage/currency display formats
//! - Strict header matching with row/column context on every failure
//! - Excel backend: rust_xlsxwriter (write) and calamine (read)
//!
//! # Example
//!
//! ```no_run
//! use sheetbind::{export, import};
//!
//! sheetbind::record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Person {
//!         pub name: String => "Name",
//!         pub age: i32 => "Age",
//!     }
//! }
//!
//! let people = vec![Person { name: "Ana".into(), age: 30 }];
//! let workbook = export(&people, "People", None)?;
//! workbook.save("people.xlsx")?;
//!
//! let sheets: Vec<Vec<Person>> = import("people.xlsx")?;
//! assert_eq!(sheets[0], people);
//! # Ok::<(), sheetbind::SheetError>(())
//! ```

pub mod assign;
pub mod cli;
pub mod coerce;
pub mod column;
pub mod error;
pub mod excel;
pub mod grid;
pub mod record;
pub mod style;
pub mod value;

// Re-export commonly used types
pub use column::ColumnDescriptor;
pub use error::{SheetError, SheetResult};
pub use excel::{export, import, import_workbook, RecordExporter, RecordImporter};
pub use grid::{Cell, CellKind, CellValue, Row, Sheet, Workbook};
pub use record::{FieldBinding, FieldTable, Record};
pub use style::{Color, DisplayFormat, NumberFormat, Style, StylePreset};
pub use value::{Scalar, ScalarKind, Value};

// Decimal fields use rust_decimal directly
pub use rust_decimal::Decimal;
