//! Error types for the achtable conversion pipeline.
//!
//! The hierarchy mirrors the pipeline stages:
//!
//! - [`ControlError`] - control total recalculation rejected the file
//! - [`AttachError`] - an addenda could not be attached to an entry
//! - [`ReconstructError`] - applying edited tables back onto a file failed
//! - [`CsvError`] - reading or writing table CSV files
//! - [`PipelineError`] - top-level file-based operations
//!
//! Conversion is automatic via `From` implementations, so `?` works across
//! error boundaries.

use thiserror::Error;

use crate::models::AddendaType;
use crate::table::TableKind;

// =============================================================================
// Control Recalculation Errors
// =============================================================================

/// Reasons the control recalculation pass refuses a file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    /// A required header field is empty.
    #[error("{record}: required field '{field}' is missing")]
    MissingField {
        record: String,
        field: &'static str,
    },

    /// A header field holds a value the format does not allow.
    #[error("{record}: field '{field}' has invalid value '{value}'")]
    InvalidField {
        record: String,
        field: &'static str,
        value: String,
    },

    /// A batch carries no entries.
    #[error("{record}: batch has no entries")]
    EmptyBatch { record: String },

    /// A control total does not fit its field.
    #[error("{record}: {field} overflows")]
    TotalOverflow {
        record: String,
        field: &'static str,
    },
}

// =============================================================================
// Addenda Attachment Errors
// =============================================================================

/// Errors raised while attaching an addenda record to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The variant belongs to the other entry family.
    #[error("addenda {0} cannot be attached to this kind of entry")]
    WrongFamily(AddendaType),

    /// The single-occurrence slot is already taken.
    #[error("entry already carries an addenda {0}")]
    SlotOccupied(AddendaType),

    /// A repeatable variant reached its maximum count.
    #[error("entry already carries the maximum of {max} addenda {kind}")]
    CapacityExceeded { kind: AddendaType, max: usize },
}

// =============================================================================
// Reconstruction Errors
// =============================================================================

/// Errors returned while rebuilding a file from edited tables.
///
/// Every variant that concerns a row carries the table and the zero-based row
/// number so the failing cell can be found without re-deriving it.
#[derive(Debug, Error)]
pub enum ReconstructError {
    /// Nothing to reconstruct from.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An index column no longer resolves into the file.
    #[error("{table} row {row}: {column} {index} out of range (len {len})")]
    IndexOutOfRange {
        table: TableKind,
        row: usize,
        column: &'static str,
        index: usize,
        len: usize,
    },

    /// An index cell is not a non-negative integer.
    #[error("{table} row {row}: {column} has malformed value '{value}'")]
    MalformedIndex {
        table: TableKind,
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The table lacks one of its row identity columns.
    #[error("{table}: missing index column '{column}'")]
    MissingIndexColumn {
        table: TableKind,
        column: &'static str,
    },

    /// The addenda_type cell names no variant of the table's family.
    #[error("{table} row {row}: unknown addenda_type '{tag}'")]
    UnknownAddendaType {
        table: TableKind,
        row: usize,
        tag: String,
    },

    /// Two rows address the same record.
    #[error("{table} row {row}: {key} is already edited by row {first}")]
    DuplicateRow {
        table: TableKind,
        row: usize,
        first: usize,
        key: String,
    },

    /// A table holds fewer or more rows than the file has records.
    #[error("{table}: {found} rows for {expected} records; rows cannot be inserted or deleted")]
    RowCountMismatch {
        table: TableKind,
        expected: usize,
        found: usize,
    },

    /// A numeric field cell could not be parsed.
    #[error("{table} row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        table: TableKind,
        row: usize,
        column: String,
        value: String,
    },

    /// The working copy of the original file could not be produced.
    #[error("Failed to copy original file: {0}")]
    DeepCopyFailure(String),

    /// Control totals could not be recalculated on the rebuilt file.
    #[error("Failed to recalculate control records: {0}")]
    ControlRecalculation(#[from] ControlError),
}

// =============================================================================
// CSV Table Errors
// =============================================================================

/// Errors while reading or writing table CSV files.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read or write a file.
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    /// The csv reader or writer failed.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// The bytes could not be decoded as text.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// The file has no header line.
    #[error("No headers found in {0}")]
    NoHeaders(String),

    /// A data row does not have as many cells as the header.
    #[error("{table}: row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A required table file is absent from the directory.
    #[error("Missing table file: {0}")]
    MissingTable(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors for file-based operations and the CLI.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Table CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Reconstruction error.
    #[error("Reconstruction error: {0}")]
    Reconstruct(#[from] ReconstructError),

    /// JSON (de)serialization of an ACH file failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown table name.
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reconstruction.
pub type ReconstructResult<T> = Result<T, ReconstructError>;

/// Result type for CSV table operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // ControlError -> ReconstructError -> PipelineError
        let control = ControlError::EmptyBatch { record: "batch 0".into() };
        let reconstruct: ReconstructError = control.into();
        assert!(matches!(reconstruct, ReconstructError::ControlRecalculation(_)));
        let pipeline: PipelineError = reconstruct.into();
        assert!(pipeline.to_string().contains("no entries"));
    }

    #[test]
    fn test_index_error_format() {
        let err = ReconstructError::IndexOutOfRange {
            table: TableKind::Entries,
            row: 3,
            column: "entry_index",
            index: 9,
            len: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("entries row 3"));
        assert!(msg.contains("entry_index 9"));
        assert!(msg.contains("len 2"));
    }

    #[test]
    fn test_attach_error_format() {
        let err = AttachError::CapacityExceeded {
            kind: AddendaType::IatPaymentInfo,
            max: 2,
        };
        assert!(err.to_string().contains("17"));
    }
}
