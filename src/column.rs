//! Column descriptors: field -> title, style and inclusion

use crate::error::SheetResult;
use crate::record::{FieldBinding, FieldTable, Record};
use crate::style::{DisplayFormat, Style};
use std::fmt;

/// Binds one record field to a display column
pub struct ColumnDescriptor<R> {
    binding: FieldBinding<R>,
    title: String,
    style: Style,
    included: bool,
    display_format: Option<DisplayFormat>,
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            binding: self.binding,
            title: self.title.clone(),
            style: self.style.clone(),
            included: self.included,
            display_format: self.display_format,
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("field", &self.binding.name())
            .field("title", &self.title)
            .field("included", &self.included)
            .field("display_format", &self.display_format)
            .finish()
    }
}

impl<R: Record> ColumnDescriptor<R> {
    /// Descriptor for the field called `field_name`.
    ///
    /// Fails with `UnknownField` when `R` has no such field. A blank
    /// `title` falls back to the field name and `included: None` means
    /// the column is included.
    pub fn new(
        field_name: &str,
        style: &Style,
        title: &str,
        included: Option<bool>,
    ) -> SheetResult<Self> {
        let table = FieldTable::<R>::of()?;
        let binding = *table.require(field_name)?;
        Ok(Self::from_binding(binding, style, title, included))
    }

    /// Descriptor for an already resolved binding
    pub fn from_binding(
        binding: FieldBinding<R>,
        style: &Style,
        title: &str,
        included: Option<bool>,
    ) -> Self {
        let title = if title.trim().is_empty() {
            binding.name().to_string()
        } else {
            title.to_string()
        };

        Self {
            binding,
            title,
            style: style.clone(),
            included: included.unwrap_or(true),
            display_format: None,
        }
    }

    /// One included descriptor per field of `R`, in declaration order
    pub fn all(style: &Style) -> SheetResult<Vec<Self>> {
        let table = FieldTable::<R>::of()?;
        Ok(table
            .iter()
            .map(|binding| Self::from_binding(*binding, style, "", None))
            .collect())
    }
}

impl<R> ColumnDescriptor<R> {
    pub fn field_name(&self) -> &'static str {
        self.binding.name()
    }

    pub fn binding(&self) -> &FieldBinding<R> {
        &self.binding
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// This descriptor's own style copy
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn is_included(&self) -> bool {
        self.included
    }

    pub fn display_format(&self) -> Option<DisplayFormat> {
        self.display_format
    }

    pub fn with_display_format(mut self, format: DisplayFormat) -> Self {
        self.display_format = Some(format);
        self
    }

    /// `1` for percentage, `2` for currency; other codes clear the format
    pub fn with_display_hint(mut self, code: i32) -> Self {
        self.display_format = DisplayFormat::from_hint(code);
        self
    }
}
