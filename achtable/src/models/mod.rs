//! Hierarchical ACH file model.
//!
//! This module contains the in-memory shape of a NACHA payment file:
//!
//! - [`AchFile`] - file header, standard batches, IAT batches, file control
//! - [`Batch`] / [`EntryDetail`] - standard batches and their entries
//! - [`IatBatch`] / [`IatEntryDetail`] - international batches and entries
//! - [`Addenda`] - the closed set of addenda variants, tagged by [`AddendaType`]
//! - [`BatchControl`] / [`FileControl`] - derived control records
//!
//! Every type derives `Clone` field by field, which is what the isolation
//! layer relies on to produce an independent working copy.

pub mod addenda;
pub mod batch;
pub mod control;
pub mod iat;

use chrono::Local;
use serde::{Deserialize, Serialize};

pub use addenda::{
    Addenda, Addenda02, Addenda05, Addenda10, Addenda11, Addenda12, Addenda13, Addenda14,
    Addenda15, Addenda16, Addenda17, Addenda18, Addenda98, Addenda98Refused, Addenda99,
    Addenda99Contested, Addenda99Dishonored, AddendaFamily, AddendaType,
};
pub use batch::{Batch, BatchHeader, EntryDetail};
pub use control::{hash_part, BatchControl, EntrySide, FileControl, SERVICE_CLASS_CODES};
pub use iat::{IatBatch, IatBatchHeader, IatEntryDetail};

// =============================================================================
// File Header
// =============================================================================

/// File header record (type 1).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHeader {
    pub immediate_destination: String,
    pub immediate_origin: String,
    /// `YYMMDD`
    pub file_creation_date: String,
    /// `HHMM`
    pub file_creation_time: String,
    pub file_id_modifier: String,
    pub immediate_destination_name: String,
    pub immediate_origin_name: String,
    pub reference_code: String,
}

impl FileHeader {
    /// Header stamped with the current local date and time, modifier `A`.
    pub fn new(
        immediate_destination: impl Into<String>,
        immediate_origin: impl Into<String>,
    ) -> Self {
        let now = Local::now();
        Self {
            immediate_destination: immediate_destination.into(),
            immediate_origin: immediate_origin.into(),
            file_creation_date: now.format("%y%m%d").to_string(),
            file_creation_time: now.format("%H%M").to_string(),
            file_id_modifier: "A".to_string(),
            ..Self::default()
        }
    }
}

// =============================================================================
// ACH File
// =============================================================================

/// A complete ACH file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AchFile {
    pub header: FileHeader,
    pub batches: Vec<Batch>,
    pub iat_batches: Vec<IatBatch>,
    pub control: FileControl,
}

impl AchFile {
    pub fn new(header: FileHeader) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    pub fn add_batch(&mut self, batch: Batch) {
        self.batches.push(batch);
    }

    pub fn add_iat_batch(&mut self, batch: IatBatch) {
        self.iat_batches.push(batch);
    }

    /// Total number of entries across standard and IAT batches.
    pub fn entry_count(&self) -> usize {
        self.batches.iter().map(|b| b.entries.len()).sum::<usize>()
            + self.iat_batches.iter().map(|b| b.entries.len()).sum::<usize>()
    }

    /// Total number of addenda records across all entries.
    pub fn addenda_count(&self) -> usize {
        let standard: usize = self
            .batches
            .iter()
            .flat_map(|b| &b.entries)
            .map(EntryDetail::addenda_count)
            .sum();
        let iat: usize = self
            .iat_batches
            .iter()
            .flat_map(|b| &b.entries)
            .map(IatEntryDetail::addenda_count)
            .sum();
        standard + iat
    }
}
