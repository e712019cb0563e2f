use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Column '{column}' not found in sheet '{sheet}' (available: {})", .available.join(", "))]
    SchemaMismatch {
        sheet: String,
        column: String,
        available: Vec<String>,
    },

    #[error("Row {row}: {reason}")]
    RowInvalid { row: usize, reason: String },

    #[error("Cannot tell import kind from file name '{0}' (expected teams-stadiums, stadium-distances or souvenirs)")]
    UnknownImportKind(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Import finished with errors: {0}")]
    Incomplete(String),
}

impl ImportError {
    /// Create a row validation error.
    pub fn invalid(row: usize, reason: impl Into<String>) -> Self {
        Self::RowInvalid {
            row,
            reason: reason.into(),
        }
    }

    /// Whether the error ends the whole run rather than the current row or sheet.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::SourceNotFound(_)
            | Self::Workbook(_)
            | Self::UnknownImportKind(_)
            | Self::Incomplete(_) => true,
            Self::Store(e) => e.is_fatal(),
            Self::SchemaMismatch { .. } | Self::RowInvalid { .. } => false,
        }
    }
}

impl From<calamine::Error> for ImportError {
    fn from(e: calamine::Error) -> Self {
        Self::Workbook(e.to_string())
    }
}
