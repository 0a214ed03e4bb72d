//! .xlsx -> grid via calamine

use crate::error::{SheetError, SheetResult};
use crate::grid::{Cell, CellValue, Row, Workbook};
use crate::style::Style;
use calamine::{Data, Range, Reader, Xlsx, XlsxError};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

impl Workbook {
    /// Read every sheet of an .xlsx file.
    ///
    /// The file is read into memory in one go and closed before any sheet
    /// is parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> SheetResult<Workbook> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| SheetError::Open {
            origin: origin.clone(),
            source: XlsxError::Io(e),
        })?;
        read_bytes(bytes, origin)
    }

    /// Read an .xlsx workbook already held in memory
    pub fn from_bytes(bytes: Vec<u8>) -> SheetResult<Workbook> {
        read_bytes(bytes, "<memory>".to_string())
    }
}

fn read_bytes(bytes: Vec<u8>, origin: String) -> SheetResult<Workbook> {
    let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|source| SheetError::Open {
        origin: origin.clone(),
        source,
    })?;

    let mut workbook = Workbook::new();
    let sheet_names = xlsx.sheet_names().to_vec();

    for sheet_name in sheet_names {
        let range = xlsx
            .worksheet_range(&sheet_name)
            .map_err(|source| SheetError::Read {
                sheet: sheet_name.clone(),
                source,
            })?;

        let sheet = workbook.create_sheet(&sheet_name)?;
        for row in range_rows(&range) {
            sheet.push_row(row);
        }
        debug!(
            workbook = %origin,
            sheet = %sheet_name,
            rows = sheet.row_count(),
            "read sheet"
        );
    }

    Ok(workbook)
}

/// Convert a calamine range into rows keeping physical positions
fn range_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    range
        .rows()
        .enumerate()
        .map(|(offset, data)| {
            let mut row = Row::new(start_row + offset as u32);
            for (col_offset, value) in data.iter().enumerate() {
                let value = to_cell_value(value);
                if value.is_blank() {
                    continue;
                }
                let col = start_col as usize + col_offset;
                row.set_cell(col as u16, Cell::new(value, Style::default()));
            }
            row
        })
        .collect()
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Blank,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Numeric(*f),
        Data::Int(i) => CellValue::Numeric(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::Numeric(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}
