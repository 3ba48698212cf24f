//! # achtable - ACH files as editable tables
//!
//! achtable flattens an ACH (NACHA) payment file into seven relational
//! tables, lets callers edit cells in place, and rebuilds a valid file with
//! fresh control totals from the edited tables.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  ACH file   │────▶│   Flatten   │────▶│  TableSet   │────▶│  CSV files  │
//! │   (JSON)    │     │             │     │  (7 tables) │     │  (edited)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       ▲                   │
//!        │            ┌─────────────┐            │                   │
//!        └───────────▶│ Reconstruct │◀───────────┴───────────────────┘
//!                     │ + controls  │
//!                     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use achtable::{load_file, EditSession};
//!
//! let file = load_file("payroll.json".as_ref())?;
//! let mut session = EditSession::new(file);
//! session.tables_mut().entries_mut().set_cell(0, "amount", "50000000");
//! let rebuilt = session.rebuild()?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - ACH file model, addenda variants, control recalculation
//! - [`table`] - Tables, schemas and row identity
//! - [`transform`] - Codec, flatten, isolate, reconstruct, session, pipeline
//! - [`parser`] - Table CSV reading and writing
//! - [`config`] - Settings from the environment
//! - [`logs`] - Log sink

// Core modules
pub mod error;
pub mod models;
pub mod table;

// Transformation
pub mod transform;

// Table files
pub mod parser;

// Ambient
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AttachError, ControlError, CsvError, CsvResult, PipelineError, PipelineResult,
    ReconstructError, ReconstructResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    AchFile, Addenda, AddendaFamily, AddendaType, Batch, BatchControl, BatchHeader, EntryDetail,
    FileControl, FileHeader, IatBatch, IatBatchHeader, IatEntryDetail,
};

// =============================================================================
// Re-exports - Tables
// =============================================================================

pub use table::{
    schema_for, AddendaIndex, BatchIndex, ColumnType, EntryIndex, TableData, TableKind,
    TableSchema, TableSet, SCHEMA_VERSION,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    flatten, flatten_to_dir, isolate, load_file, read_file_json, rebuild_from_dir, reconstruct,
    save_file, write_file_json, EditSession, FileSummary, FlattenReport,
};

// =============================================================================
// Re-exports - CSV
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, read_tables, table_file_name,
    write_tables, ParsedTable,
};

// =============================================================================
// Re-exports - Config & Logs
// =============================================================================

pub use config::Settings;
pub use logs::{log_error, log_info, log_success, log_warning, LogEntry, LogLevel, LOG_SINK};
