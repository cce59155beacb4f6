//! Error types for table construction and queries

use std::path::PathBuf;

use thiserror::Error;

use crate::model::CellType;

/// Result alias for all fallible table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors reported by [`DataTable`](crate::DataTable) operations.
///
/// Every error is returned synchronously from the offending call; nothing
/// is retried and no mutation is rolled back.
#[derive(Debug, Error)]
pub enum TableError {
    /// The source file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The CSV content is malformed (ragged rows, duplicate header
    /// labels, invalid UTF-8).
    #[error("malformed CSV: {reason}")]
    Parse { reason: String },

    /// Dictionary construction was given columns of unequal length.
    #[error("column `{column}` has {actual} values, expected {expected}")]
    Shape {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// An operation referenced a column label that is not declared.
    #[error("unknown column: `{column}`")]
    ColumnNotFound { column: String },

    /// A numeric aggregate was requested on a non-numeric column.
    #[error("column `{column}` is not numeric ({ty})")]
    NonNumeric { column: String, ty: CellType },

    /// A numeric aggregate was requested but the column holds no
    /// non-null values.
    #[error("column `{column}` has no values to aggregate")]
    EmptyColumn { column: String },

    /// `save()` was called on a table that was not constructed from a
    /// file path.
    #[error("table has no backing file; use save_as")]
    NoBackingFile,

    /// An I/O failure other than a missing source file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub(crate) fn parse(reason: impl Into<String>) -> Self {
        TableError::Parse {
            reason: reason.into(),
        }
    }

    pub(crate) fn column_not_found(column: impl Into<String>) -> Self {
        TableError::ColumnNotFound {
            column: column.into(),
        }
    }
}
