//! Cell coercion: cell -> typed value
//!
//! Every conversion starts from the cell's canonical text, so a number
//! stored as text and a numeric cell parse the same way. Blank or absent
//! cells read as `None` for every target type.

use crate::error::{SheetError, SheetResult};
use crate::grid::Cell;
use crate::value::{ScalarKind, Value};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Reads one cell with the row/column context used in error reports
#[derive(Debug, Clone, Copy)]
pub struct CellReader<'a> {
    cell: Option<&'a Cell>,
    row: usize,
    header: &'a str,
}

impl<'a> CellReader<'a> {
    /// `row` is the 1-based row number, `header` the column's header text
    pub fn new(cell: Option<&'a Cell>, row: usize, header: &'a str) -> Self {
        Self { cell, row, header }
    }

    fn text(&self) -> Option<String> {
        self.cell
            .filter(|cell| !cell.is_blank())
            .map(Cell::canonical_text)
    }

    fn parse<T>(&self, target: ScalarKind, parse: impl Fn(&str) -> Option<T>) -> SheetResult<Option<T>> {
        let Some(text) = self.text() else {
            return Ok(None);
        };
        parse(text.trim())
            .map(Some)
            .ok_or_else(|| SheetError::InvalidCast {
                row: self.row,
                column: self.header.to_string(),
                text,
                target,
            })
    }

    pub fn as_int(&self) -> SheetResult<Option<i32>> {
        self.parse(ScalarKind::Integer, |s| s.parse().ok())
    }

    pub fn as_long(&self) -> SheetResult<Option<i64>> {
        self.parse(ScalarKind::Long, |s| s.parse().ok())
    }

    pub fn as_float(&self) -> SheetResult<Option<f32>> {
        self.parse(ScalarKind::Float, |s| {
            s.parse::<f32>().ok().filter(|n| n.is_finite())
        })
    }

    pub fn as_double(&self) -> SheetResult<Option<f64>> {
        self.parse(ScalarKind::Double, |s| {
            s.parse::<f64>().ok().filter(|n| n.is_finite())
        })
    }

    pub fn as_decimal(&self) -> SheetResult<Option<Decimal>> {
        self.parse(ScalarKind::Decimal, |s| {
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        })
    }

    pub fn as_bool(&self) -> SheetResult<Option<bool>> {
        self.parse(ScalarKind::Boolean, |s| {
            if s.eq_ignore_ascii_case("true") {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") {
                Some(false)
            } else {
                None
            }
        })
    }

    /// Canonical text, untrimmed
    pub fn as_text(&self) -> SheetResult<Option<String>> {
        Ok(self.text())
    }

    /// Read the cell as `kind`
    pub fn read(&self, kind: ScalarKind) -> SheetResult<Option<Value>> {
        Ok(match kind {
            ScalarKind::Integer => self.as_int()?.map(Value::Integer),
            ScalarKind::Long => self.as_long()?.map(Value::Long),
            ScalarKind::Float => self.as_float()?.map(Value::Float),
            ScalarKind::Double => self.as_double()?.map(Value::Double),
            ScalarKind::Decimal => self.as_decimal()?.map(Value::Decimal),
            ScalarKind::Boolean => self.as_bool()?.map(Value::Boolean),
            ScalarKind::Text => self.as_text()?.map(Value::Text),
        })
    }
}
