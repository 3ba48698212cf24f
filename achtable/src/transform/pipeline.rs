//! File-level pipeline: JSON ACH files in, table directories out, and back.
//!
//! ```text
//! file.json ──read_file_json──▶ AchFile ──flatten_to_dir──▶ tables/*.csv
//!                                  │                            │ (edited)
//!                                  └──────rebuild_from_dir◀─────┘
//!                                               │
//!                                               ▼
//!                                     write_file_json ──▶ out.json
//! ```

use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{PipelineResult, ReconstructError};
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::AchFile;
use crate::parser::{read_tables, write_tables};
use crate::table::{TableKind, TableSet};

use super::session::EditSession;

// =============================================================================
// JSON Files
// =============================================================================

pub fn read_file_json<R: Read>(reader: R) -> PipelineResult<AchFile> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_file_json<W: Write>(file: &AchFile, mut writer: W) -> PipelineResult<()> {
    serde_json::to_writer_pretty(&mut writer, file)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn load_file(path: &Path) -> PipelineResult<AchFile> {
    read_file_json(BufReader::new(fs::File::open(path)?))
}

pub fn save_file(file: &AchFile, path: &Path) -> PipelineResult<()> {
    write_file_json(file, BufWriter::new(fs::File::create(path)?))
}

// =============================================================================
// Table Directories
// =============================================================================

/// What [`flatten_to_dir`] wrote.
#[derive(Debug, Clone)]
pub struct FlattenReport {
    pub paths: Vec<PathBuf>,
    pub rows: Vec<(TableKind, usize)>,
}

/// Flatten a file and write its tables to `dir`.
pub fn flatten_to_dir(file: &AchFile, dir: &Path, delimiter: u8) -> PipelineResult<FlattenReport> {
    let tables = TableSet::from_file(file);
    let rows: Vec<(TableKind, usize)> = tables
        .tables()
        .map(|(kind, table)| (kind, table.row_count()))
        .collect();

    log_info(format!("Writing {} tables to {}", rows.len(), dir.display()));
    let paths = write_tables(dir, &tables, delimiter)?;
    for (kind, count) in &rows {
        log_info_indent(format!("{}: {} rows", kind, count), 1);
    }
    log_success(format!("Flattened {} batches", file.batches.len() + file.iat_batches.len()));

    Ok(FlattenReport { paths, rows })
}

/// Read edited tables from `dir` and rebuild them onto `original`.
pub fn rebuild_from_dir(
    original: Arc<AchFile>,
    dir: &Path,
    delimiter: Option<u8>,
) -> PipelineResult<AchFile> {
    log_info(format!("Reading tables from {}", dir.display()));
    let tables = read_tables(dir, delimiter)?;
    let session = EditSession::with_tables(original, tables);
    Ok(session.rebuild()?)
}

// =============================================================================
// Summary
// =============================================================================

/// Counts and control totals of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub batches: usize,
    pub iat_batches: usize,
    pub entries: usize,
    pub addenda: usize,
    pub entry_addenda_count: u64,
    pub entry_hash: u64,
    pub total_debit: u64,
    pub total_credit: u64,
    pub block_count: u64,
}

impl FileSummary {
    /// Summarize `file` with freshly recalculated controls.
    pub fn of(file: &AchFile) -> PipelineResult<Self> {
        let mut file = file.clone();
        file.recalculate().map_err(ReconstructError::from)?;
        Ok(Self {
            batches: file.batches.len(),
            iat_batches: file.iat_batches.len(),
            entries: file.entry_count(),
            addenda: file.addenda_count(),
            entry_addenda_count: file.control.entry_addenda_count,
            entry_hash: file.control.entry_hash,
            total_debit: file.control.total_debit,
            total_credit: file.control.total_credit,
            block_count: file.control.block_count,
        })
    }
}
