use crate::value::ScalarKind;
use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    /// A required structural element (row, header cell, value) is missing.
    #[error("{element} is null or invalid: {context}")]
    ArgumentNull {
        element: &'static str,
        context: String,
    },

    #[error("Invalid value at row {row}, column '{column}': cannot convert '{text}' to {target}")]
    InvalidCast {
        /// 1-based physical row number
        row: usize,
        column: String,
        text: String,
        target: ScalarKind,
    },

    #[error("Row {row}: header '{header}' has no matching field on {record}")]
    MissingMember {
        record: &'static str,
        header: String,
        row: usize,
    },

    #[error("Field '{field}' does not exist on {record}")]
    UnknownField {
        record: &'static str,
        field: String,
    },

    #[error("Field '{field}' is bound more than once on {record}")]
    DuplicateField {
        record: &'static str,
        field: String,
    },

    #[error("Field '{field}' expects {expected}, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: ScalarKind,
        actual: ScalarKind,
    },

    #[error("Value {value} cannot be stored as a numeric cell")]
    NotRepresentable { value: String },

    #[error("Too many columns: {0} (max {max})", max = crate::grid::MAX_COLUMNS)]
    TooManyColumns(usize),

    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    #[error("Failed to open workbook {origin}: {source}")]
    Open {
        origin: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("Failed to read sheet '{sheet}': {source}")]
    Read {
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("Excel write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("An error occurred while exporting the contents of the informed list: {source}")]
    Export {
        #[source]
        source: Box<SheetError>,
    },

    #[error("An error occurred while loading the file for import: {source}")]
    Import {
        #[source]
        source: Box<SheetError>,
    },
}

impl SheetError {
    pub(crate) fn argument_null<S: Into<String>>(element: &'static str, context: S) -> Self {
        SheetError::ArgumentNull {
            element,
            context: context.into(),
        }
    }

    /// Walk through `Export`/`Import` wrappers to the error that started it.
    pub fn root_cause(&self) -> &SheetError {
        match self {
            SheetError::Export { source } | SheetError::Import { source } => source.root_cause(),
            other => other,
        }
    }

    /// Errors the import pipeline lets through without wrapping.
    pub(crate) fn is_distinguished(&self) -> bool {
        matches!(
            self,
            SheetError::Open { .. }
                | SheetError::Read { .. }
                | SheetError::InvalidCast { .. }
                | SheetError::ArgumentNull { .. }
                | SheetError::MissingMember { .. }
                | SheetError::TypeMismatch { .. }
                | SheetError::Import { .. }
        )
    }
}
