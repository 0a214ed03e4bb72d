//! Grid -> .xlsx via rust_xlsxwriter

use crate::error::SheetResult;
use crate::grid::{CellValue, Sheet, Workbook};
use crate::style::{NumberFormat, Style};
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook as XlsxWorkbook,
    Worksheet,
};
use std::path::Path;
use tracing::debug;

/// Translate a grid style into a backend format
pub fn to_format(style: &Style) -> Format {
    let mut format = Format::new();

    if let Some(ref name) = style.font.name {
        format = format.set_font_name(name);
    }
    if style.font.bold {
        format = format.set_bold();
    }
    if let Some(color) = style.font.color {
        format = format.set_font_color(Color::RGB(color.rgb()));
    }
    if let Some(fill) = style.fill {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(fill.rgb()));
    }
    if style.thin_border {
        format = format.set_border(FormatBorder::Thin);
    }
    if style.centered {
        format = format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
    }
    match style.number_format {
        NumberFormat::General => {}
        NumberFormat::BuiltIn(index) => format = format.set_num_format_index(index),
        NumberFormat::Custom(ref pattern) => format = format.set_num_format(pattern),
    }

    format
}

impl Workbook {
    /// Build the backend workbook without touching the filesystem
    pub fn to_xlsx(&self) -> SheetResult<XlsxWorkbook> {
        let mut xlsx = XlsxWorkbook::new();
        for sheet in self.sheets() {
            let worksheet = xlsx.add_worksheet();
            write_sheet(worksheet, sheet)?;
        }
        Ok(xlsx)
    }

    /// Write the workbook to an .xlsx file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SheetResult<()> {
        let mut xlsx = self.to_xlsx()?;
        xlsx.save(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "saved workbook");
        Ok(())
    }

    /// Serialize the workbook as .xlsx bytes
    pub fn save_to_buffer(&self) -> SheetResult<Vec<u8>> {
        let mut xlsx = self.to_xlsx()?;
        Ok(xlsx.save_to_buffer()?)
    }
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> SheetResult<()> {
    worksheet.set_name(sheet.name())?;

    for row in sheet.rows() {
        for (col_idx, cell) in row.cells.iter().enumerate() {
            // Column count per row is bounded by MAX_COLUMNS when built
            let col = col_idx as u16;
            let format = to_format(&cell.style);
            match &cell.value {
                CellValue::Numeric(n) => {
                    worksheet.write_number_with_format(row.index, col, *n, &format)?;
                }
                CellValue::Boolean(b) => {
                    worksheet.write_boolean_with_format(row.index, col, *b, &format)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(row.index, col, s, &format)?;
                }
                CellValue::Blank => {
                    if cell.style != Style::default() {
                        worksheet.write_blank(row.index, col, &format)?;
                    }
                }
            }
        }
    }

    if sheet.autofit {
        worksheet.autofit();
    }

    Ok(())
}
