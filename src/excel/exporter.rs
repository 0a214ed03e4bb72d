//! Export pipeline: records -> styled workbook

use crate::assign::assign_cell;
use crate::column::ColumnDescriptor;
use crate::error::{SheetError, SheetResult};
use crate::grid::{Cell, Workbook, MAX_COLUMNS};
use crate::record::Record;
use crate::style::StylePreset;
use tracing::{info, warn};

/// Writes record lists as sheets: one header row, then one row per record
#[derive(Debug, Clone, Default)]
pub struct RecordExporter {
    styles: StylePreset,
}

impl RecordExporter {
    /// Exporter using the canonical header/body styles
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_styles(styles: StylePreset) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &StylePreset {
        &self.styles
    }

    /// Export `records` into a new workbook with a single sheet.
    ///
    /// With `columns` missing or empty, every field of `R` becomes a column
    /// in declaration order using the body style. Nothing is written to
    /// disk; call [`Workbook::save`] to persist the result.
    pub fn export<R: Record>(
        &self,
        records: &[R],
        sheet_name: &str,
        columns: Option<Vec<ColumnDescriptor<R>>>,
    ) -> SheetResult<Workbook> {
        let mut workbook = Workbook::new();
        self.append_sheet(&mut workbook, records, sheet_name, columns)?;
        Ok(workbook)
    }

    /// Export `records` as an additional sheet of `workbook`
    pub fn append_sheet<R: Record>(
        &self,
        workbook: &mut Workbook,
        records: &[R],
        sheet_name: &str,
        columns: Option<Vec<ColumnDescriptor<R>>>,
    ) -> SheetResult<()> {
        self.write_sheet(workbook, records, sheet_name, columns)
            .map_err(|e| {
                warn!(sheet = sheet_name, record = R::record_name(), error = %e, "export failed");
                SheetError::Export {
                    source: Box::new(e),
                }
            })
    }

    fn write_sheet<R: Record>(
        &self,
        workbook: &mut Workbook,
        records: &[R],
        sheet_name: &str,
        columns: Option<Vec<ColumnDescriptor<R>>>,
    ) -> SheetResult<()> {
        let columns = match columns {
            Some(columns) if !columns.is_empty() => columns,
            _ => ColumnDescriptor::all(&self.styles.body)?,
        };

        // Excluded columns take no slot
        let included: Vec<&ColumnDescriptor<R>> =
            columns.iter().filter(|c| c.is_included()).collect();
        if included.len() > MAX_COLUMNS {
            return Err(SheetError::TooManyColumns(included.len()));
        }

        let sheet = workbook.create_sheet(sheet_name)?;

        let header = sheet.create_row();
        for (col, column) in included.iter().enumerate() {
            header.set_cell(
                col as u16,
                Cell::text(column.title(), self.styles.header.clone()),
            );
        }

        for record in records {
            let row = sheet.create_row();
            let row_number = row.number();
            for (col, column) in included.iter().enumerate() {
                let value = column.binding().get(record);
                let cell = assign_cell(value, column.style(), column.display_format())
                    .map_err(|e| match e {
                        SheetError::ArgumentNull { element, .. } => SheetError::ArgumentNull {
                            element,
                            context: format!(
                                "row {}, column '{}' ({}.{})",
                                row_number,
                                column.title(),
                                R::record_name(),
                                column.field_name()
                            ),
                        },
                        other => other,
                    })?;
                row.set_cell(col as u16, cell);
            }
        }

        sheet.autofit = true;

        info!(
            sheet = sheet_name,
            record = R::record_name(),
            rows = records.len(),
            columns = included.len(),
            "exported records"
        );
        Ok(())
    }
}

/// Export `records` with the canonical styles
pub fn export<R: Record>(
    records: &[R],
    sheet_name: &str,
    columns: Option<Vec<ColumnDescriptor<R>>>,
) -> SheetResult<Workbook> {
    RecordExporter::new().export(records, sheet_name, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellValue;
    use crate::style::Style;

    crate::record! {
        #[derive(Debug, Default, Clone)]
        struct Person {
            name: String => "Name",
            age: i32 => "Age",
        }
    }

    crate::record! {
        #[derive(Debug, Default, Clone)]
        struct Nullable {
            note: Option<String> => "Note",
        }
    }

    fn people() -> Vec<Person> {
        vec![
            Person {
                name: "Ana".into(),
                age: 30,
            },
            Person {
                name: "Bo".into(),
                age: 41,
            },
        ]
    }

    fn texts(workbook: &Workbook, row: usize) -> Vec<String> {
        workbook.sheets()[0].rows()[row]
            .cells
            .iter()
            .map(Cell::canonical_text)
            .collect()
    }

    #[test]
    fn test_export_without_descriptors() {
        let wb = export(&people(), "People", None).unwrap();
        let sheet = &wb.sheets()[0];

        assert_eq!(sheet.name(), "People");
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(texts(&wb, 0), vec!["Name", "Age"]);
        assert_eq!(sheet.rows()[1].cells[1].value, CellValue::Numeric(30.0));
        assert_eq!(sheet.rows()[2].cells[0].value, CellValue::Text("Bo".into()));
        assert!(sheet.autofit);
    }

    #[test]
    fn test_header_and_body_styles() {
        let wb = export(&people(), "People", Some(Vec::new())).unwrap();
        let sheet = &wb.sheets()[0];
        assert_eq!(sheet.rows()[0].cells[0].style, Style::header());
        assert_eq!(sheet.rows()[1].cells[0].style, Style::body());
    }

    #[test]
    fn test_null_value_fails_with_context() {
        let rows = vec![Nullable { note: None }];
        let err = export(&rows, "Notes", None).unwrap_err();
        assert!(matches!(err, SheetError::Export { .. }));
        match err.root_cause() {
            SheetError::ArgumentNull { element, context } => {
                assert_eq!(*element, "value");
                assert!(context.contains("row 2"));
                assert!(context.contains("'Note'"));
            }
            other => panic!("Expected ArgumentNull, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_sheet_name_is_wrapped() {
        let err = export(&people(), "bad/name", None).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SheetError::InvalidSheetName(_)
        ));
    }

    #[test]
    fn test_append_sheet_adds_second_sheet() {
        let exporter = RecordExporter::new();
        let mut wb = exporter.export(&people(), "First", None).unwrap();
        exporter
            .append_sheet(&mut wb, &people()[..1], "Second", None)
            .unwrap();

        assert_eq!(wb.sheet_count(), 2);
        assert_eq!(wb.sheet("Second").unwrap().body().len(), 1);

        let dup = exporter.append_sheet(&mut wb, &people(), "first", None);
        assert!(matches!(
            dup.unwrap_err().root_cause(),
            SheetError::DuplicateSheetName(_)
        ));
    }
}
