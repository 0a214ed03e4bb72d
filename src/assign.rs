//! Cell assignment: typed value -> styled cell

use crate::error::{SheetError, SheetResult};
use crate::grid::{Cell, CellValue};
use crate::style::{DisplayFormat, Style};
use crate::value::Value;

/// Largest magnitude an `f64` cell holds without losing integer precision
pub const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Build a cell for `value` with a copy of `style`.
///
/// Numeric kinds are stored as `f64` (see [`Value::as_f64`] for the
/// precision tradeoff); `Long` values past 2^53 are refused since they
/// would not read back. `display_format` only touches the cell's own style
/// copy. A `None` value or empty text is rejected: export never writes
/// implicit blanks.
pub fn assign_cell(
    value: Option<Value>,
    style: &Style,
    display_format: Option<DisplayFormat>,
) -> SheetResult<Cell> {
    let value = value.ok_or_else(|| {
        SheetError::argument_null("value", "content to write into spreadsheet cell")
    })?;

    let mut style = style.clone();
    if let Some(format) = display_format {
        style.apply_display_format(format);
    }

    let cell_value = match value {
        Value::Boolean(b) => CellValue::Boolean(b),
        Value::Text(s) if s.is_empty() => {
            return Err(SheetError::argument_null(
                "value",
                "empty text would be written as a blank cell",
            ))
        }
        Value::Text(s) => CellValue::Text(s),
        Value::Long(n) if n.unsigned_abs() > MAX_EXACT_INTEGER => {
            return Err(SheetError::NotRepresentable {
                value: n.to_string(),
            })
        }
        numeric => {
            let number = numeric
                .as_f64()
                .filter(|n| n.is_finite())
                .ok_or_else(|| SheetError::NotRepresentable {
                    value: numeric.to_string(),
                })?;
            CellValue::Numeric(number)
        }
    };

    Ok(Cell::new(cell_value, style))
}
