//! In-memory workbook grid
//!
//! The grid is the format-independent structure exchanged with the
//! backend: a [`Workbook`] holds named [`Sheet`]s, a sheet holds [`Row`]s
//! and a row holds [`Cell`]s addressed by zero-based column index.

use crate::error::{SheetError, SheetResult};
use crate::style::Style;
use serde::Serialize;

/// Maximum sheet name length accepted by Excel
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum columns per sheet accepted by Excel
pub const MAX_COLUMNS: usize = 16_384;

/// Cell kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Numeric,
    Boolean,
    Text,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Numeric(f64),
    Boolean(bool),
    Text(String),
    #[default]
    Blank,
}

impl CellValue {
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Numeric(_) => CellKind::Numeric,
            CellValue::Boolean(_) => CellKind::Boolean,
            CellValue::Text(_) => CellKind::Text,
            CellValue::Blank => CellKind::Blank,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// Canonical text form used for header lookup and coercion.
    ///
    /// Numbers print without a trailing `.0`, booleans as `TRUE`/`FALSE`,
    /// blank cells as an empty string.
    pub fn canonical_text(&self) -> String {
        match self {
            CellValue::Numeric(n) => n.to_string(),
            CellValue::Boolean(true) => "TRUE".to_string(),
            CellValue::Boolean(false) => "FALSE".to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Blank => String::new(),
        }
    }
}

/// A styled cell
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Cell {
    pub value: CellValue,
    #[serde(skip)]
    pub style: Style,
}

impl Cell {
    pub fn new(value: CellValue, style: Style) -> Self {
        Self { value, style }
    }

    pub fn text<S: Into<String>>(text: S, style: Style) -> Self {
        Self::new(CellValue::Text(text.into()), style)
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> CellKind {
        self.value.kind()
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }

    pub fn canonical_text(&self) -> String {
        self.value.canonical_text()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// Zero-based physical row index within the sheet
    pub index: u32,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    /// Place `cell` at column `col`, padding any gap with blank cells
    pub fn set_cell(&mut self, col: u16, cell: Cell) {
        let col = usize::from(col);
        if self.cells.len() <= col {
            self.cells.resize_with(col + 1, Cell::blank);
        }
        self.cells[col] = cell;
    }

    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// True when the row holds no populated cell
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }

    /// 1-based row number, as shown in a spreadsheet application
    pub fn number(&self) -> usize {
        self.index as usize + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    name: String,
    rows: Vec<Row>,
    /// Size columns to their content when written
    #[serde(skip)]
    pub autofit: bool,
}

impl Sheet {
    fn new(name: String) -> Self {
        Self {
            name,
            rows: Vec::new(),
            autofit: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Append a row at the next physical index
    pub fn create_row(&mut self) -> &mut Row {
        let index = self.rows.last().map(|r| r.index + 1).unwrap_or(0);
        self.push_row(Row::new(index))
    }

    pub fn push_row(&mut self, row: Row) -> &mut Row {
        self.rows.push(row);
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First physical row
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Every row after the header
    pub fn body(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Add an empty sheet, enforcing Excel's naming rules
    pub fn create_sheet(&mut self, name: &str) -> SheetResult<&mut Sheet> {
        self.validate_sheet_name(name)?;
        self.sheets.push(Sheet::new(name.to_string()));
        let last = self.sheets.len() - 1;
        Ok(&mut self.sheets[last])
    }

    fn validate_sheet_name(&self, name: &str) -> SheetResult<()> {
        if name.trim().is_empty() {
            return Err(SheetError::InvalidSheetName(
                "Sheet name cannot be empty".into(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(SheetError::InvalidSheetName(format!(
                "Sheet name too long (max {} characters): {}",
                MAX_SHEET_NAME_LEN, name
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(SheetError::InvalidSheetName(format!(
                "Sheet name cannot contain '{}': {}",
                c, name
            )));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(SheetError::InvalidSheetName(format!(
                "Sheet name cannot start or end with an apostrophe: {}",
                name
            )));
        }

        let lower = name.to_lowercase();
        if self.sheets.iter().any(|s| s.name.to_lowercase() == lower) {
            return Err(SheetError::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}
