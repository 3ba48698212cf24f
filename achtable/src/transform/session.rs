//! Edit session: one original file, its tables, and rebuilds from edits.

use std::sync::Arc;

use crate::error::ReconstructResult;
use crate::logs::{log_info, log_success};
use crate::models::AchFile;
use crate::table::{TableData, TableKind, TableSet};

/// Keeps the flattened tables next to the file they came from, so edits can
/// be rebuilt without passing the original around.
///
/// The original is shared and never mutated; every [`rebuild`](Self::rebuild)
/// works on its own copy.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Arc<AchFile>,
    tables: TableSet,
}

impl EditSession {
    pub fn new(file: AchFile) -> Self {
        Self::from_shared(Arc::new(file))
    }

    pub fn from_shared(original: Arc<AchFile>) -> Self {
        let tables = TableSet::from_file(&original);
        Self { original, tables }
    }

    /// Resume a session from tables edited elsewhere.
    pub fn with_tables(original: Arc<AchFile>, tables: TableSet) -> Self {
        Self { original, tables }
    }

    pub fn original(&self) -> &AchFile {
        &self.original
    }

    pub fn shared_original(&self) -> Arc<AchFile> {
        Arc::clone(&self.original)
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut TableSet {
        &mut self.tables
    }

    pub fn table_mut(&mut self, kind: TableKind) -> Option<&mut TableData> {
        self.tables.get_mut(kind)
    }

    /// Swap in an edited table, returning the previous one.
    pub fn replace(&mut self, kind: TableKind, table: TableData) -> Option<TableData> {
        self.tables.replace(kind, table)
    }

    /// Discard all edits.
    pub fn reset(&mut self) {
        self.tables = TableSet::from_file(&self.original);
    }

    /// Rebuild a file from the current tables.
    pub fn rebuild(&self) -> ReconstructResult<AchFile> {
        log_info(format!(
            "Rebuilding from {} batch rows, {} entry rows, {} addenda rows",
            self.tables.batches().row_count(),
            self.tables.entries().row_count(),
            self.tables.addenda().row_count()
        ));
        let file = self.tables.to_file(&self.original)?;
        log_success(format!(
            "Rebuilt {} batches ({} IAT), {} entries",
            file.batches.len() + file.iat_batches.len(),
            file.iat_batches.len(),
            file.entry_count()
        ));
        Ok(file)
    }

    pub fn into_parts(self) -> (Arc<AchFile>, TableSet) {
        (self.original, self.tables)
    }
}
