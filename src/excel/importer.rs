//! Import pipeline: workbook -> one record list per sheet

use crate::coerce::CellReader;
use crate::error::{SheetError, SheetResult};
use crate::grid::{Sheet, Workbook};
use crate::record::{FieldTable, Record};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Imports an .xlsx file into typed records
pub struct RecordImporter {
    path: PathBuf,
}

impl RecordImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the workbook and map every sheet onto `R`.
    ///
    /// Returns one list per sheet in workbook order, rows in physical
    /// order. Any failure aborts the whole import.
    pub fn import<R: Record>(&self) -> SheetResult<Vec<Vec<R>>> {
        let workbook = Workbook::open(&self.path)?;
        let records = import_workbook::<R>(&workbook)?;
        info!(
            path = %self.path.display(),
            record = R::record_name(),
            sheets = records.len(),
            rows = records.iter().map(Vec::len).sum::<usize>(),
            "imported workbook"
        );
        Ok(records)
    }
}

/// Import the file at `path`, one record list per sheet
pub fn import<R: Record, P: AsRef<Path>>(path: P) -> SheetResult<Vec<Vec<R>>> {
    RecordImporter::new(path).import()
}

/// Map an in-memory workbook onto `R`.
///
/// Open, coercion and structural errors come back as they are; anything
/// else is wrapped in [`SheetError::Import`].
pub fn import_workbook<R: Record>(workbook: &Workbook) -> SheetResult<Vec<Vec<R>>> {
    read_records(workbook).map_err(|e| {
        warn!(record = R::record_name(), error = %e, "import failed");
        if e.is_distinguished() {
            e
        } else {
            SheetError::Import {
                source: Box::new(e),
            }
        }
    })
}

fn read_records<R: Record>(workbook: &Workbook) -> SheetResult<Vec<Vec<R>>> {
    let table = FieldTable::<R>::of()?;
    workbook
        .sheets()
        .iter()
        .map(|sheet| read_sheet(&table, sheet))
        .collect()
}

fn read_sheet<R: Record>(table: &FieldTable<R>, sheet: &Sheet) -> SheetResult<Vec<R>> {
    let Some(header_row) = sheet.header() else {
        return Ok(Vec::new());
    };

    let headers: Vec<Option<String>> = header_row
        .cells
        .iter()
        .map(|cell| (!cell.is_blank()).then(|| cell.canonical_text()))
        .collect();

    let mut records = Vec::with_capacity(sheet.body().len());

    for row in sheet.body() {
        if row.is_empty() {
            return Err(SheetError::argument_null(
                "row",
                format!(
                    "Invalid or empty row {} on sheet '{}'",
                    row.number(),
                    sheet.name()
                ),
            ));
        }

        let mut record = R::default();

        for (col, cell) in row.cells.iter().enumerate() {
            let header = headers.get(col).and_then(Option::as_deref);

            let Some(header) = header else {
                if cell.is_blank() {
                    continue;
                }
                return Err(SheetError::argument_null(
                    "header cell",
                    format!(
                        "sheet '{}' has no header for cell {}{}",
                        sheet.name(),
                        column_letter(col),
                        row.number()
                    ),
                ));
            };

            let binding = match table.get(header) {
                Some(binding) => binding,
                None if cell.is_blank() => continue,
                None => {
                    return Err(SheetError::MissingMember {
                        record: R::record_name(),
                        header: header.to_string(),
                        row: row.number(),
                    })
                }
            };

            let value = CellReader::new(Some(cell), row.number(), header).read(binding.kind())?;
            binding.set(&mut record, value)?;
        }

        records.push(record);
    }

    debug!(
        sheet = sheet.name(),
        rows = records.len(),
        "mapped sheet"
    );
    Ok(records)
}

/// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
fn column_letter(n: usize) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}
