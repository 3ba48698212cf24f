//! Control records and their recalculation.
//!
//! Control totals are never hand-set: [`AchFile::recalculate`] validates the
//! headers it depends on and rebuilds every batch control and the file
//! control from the entries.
//!
//! ```text
//! entries ──▶ BatchTotals (count, hash, debit, credit) ──▶ BatchControl
//!                       │
//!                       └──────── summed ──────────────▶ FileControl
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AchFile, Batch, BatchHeader, FileHeader, IatBatch, IatBatchHeader};
use crate::error::ControlError;

/// Service class codes accepted on batch headers.
pub const SERVICE_CLASS_CODES: [u16; 4] = [200, 220, 225, 280];

/// Entry hash and file hash are truncated to ten digits.
const HASH_MODULUS: u64 = 10_000_000_000;

/// Records per block in the fixed-width layout.
const BLOCKING_FACTOR: u64 = 10;

/// Largest amount a ten-digit entry amount field can carry. Larger edited
/// amounts are rejected before they reach the totals.
pub const MAX_AMOUNT: u64 = 9_999_999_999;

// =============================================================================
// Control Records
// =============================================================================

/// Batch control record (type 8).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchControl {
    pub service_class_code: u16,
    pub entry_addenda_count: u64,
    pub entry_hash: u64,
    pub total_debit: u64,
    pub total_credit: u64,
    pub company_identification: String,
    pub odfi_identification: String,
    pub batch_number: u32,
}

/// File control record (type 9).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileControl {
    pub batch_count: u64,
    pub block_count: u64,
    pub entry_addenda_count: u64,
    pub entry_hash: u64,
    pub total_debit: u64,
    pub total_credit: u64,
}

// =============================================================================
// Totals
// =============================================================================

/// Direction of an entry derived from its transaction code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySide {
    Credit,
    Debit,
    /// Codes ending in 0 move no money.
    Neutral,
}

impl EntrySide {
    pub fn of(transaction_code: u16) -> Self {
        match transaction_code % 10 {
            1..=4 => Self::Credit,
            5..=9 => Self::Debit,
            _ => Self::Neutral,
        }
    }
}

/// Routing number contribution to the entry hash: its first eight digits.
pub fn hash_part(rdfi_identification: &str) -> u64 {
    let digits: String = rdfi_identification.trim().chars().take(8).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    entry_addenda_count: u64,
    entry_hash: u64,
    total_debit: u64,
    total_credit: u64,
}

fn checked_sum(record: &str, field: &'static str, a: u64, b: u64) -> Result<u64, ControlError> {
    a.checked_add(b).ok_or_else(|| ControlError::TotalOverflow {
        record: record.to_string(),
        field,
    })
}

impl Totals {
    fn add_entry(
        &mut self,
        record: &str,
        transaction_code: u16,
        rdfi: &str,
        amount: u64,
        addenda: usize,
    ) -> Result<(), ControlError> {
        if amount > MAX_AMOUNT {
            return Err(invalid(record, "amount", amount));
        }
        self.entry_addenda_count = checked_sum(
            record,
            "entry_addenda_count",
            self.entry_addenda_count,
            1 + addenda as u64,
        )?;
        self.entry_hash = (self.entry_hash + hash_part(rdfi)) % HASH_MODULUS;
        let (field, total) = match EntrySide::of(transaction_code) {
            EntrySide::Credit => ("total_credit", &mut self.total_credit),
            EntrySide::Debit => ("total_debit", &mut self.total_debit),
            EntrySide::Neutral => return Ok(()),
        };
        *total = checked_sum(record, field, *total, amount)?;
        Ok(())
    }

    fn merge(&mut self, record: &str, control: &BatchControl) -> Result<(), ControlError> {
        self.entry_addenda_count = checked_sum(
            record,
            "entry_addenda_count",
            self.entry_addenda_count,
            control.entry_addenda_count,
        )?;
        self.entry_hash = (self.entry_hash + control.entry_hash % HASH_MODULUS) % HASH_MODULUS;
        self.total_debit =
            checked_sum(record, "total_debit", self.total_debit, control.total_debit)?;
        self.total_credit =
            checked_sum(record, "total_credit", self.total_credit, control.total_credit)?;
        Ok(())
    }
}

// =============================================================================
// Validation
// =============================================================================

fn require(record: &str, field: &'static str, value: &str) -> Result<(), ControlError> {
    if value.trim().is_empty() {
        return Err(ControlError::MissingField {
            record: record.to_string(),
            field,
        });
    }
    Ok(())
}

fn invalid(record: &str, field: &'static str, value: impl ToString) -> ControlError {
    ControlError::InvalidField {
        record: record.to_string(),
        field,
        value: value.to_string(),
    }
}

fn validate_file_header(header: &FileHeader) -> Result<(), ControlError> {
    let record = "file header";
    require(record, "immediate_destination", &header.immediate_destination)?;
    require(record, "immediate_origin", &header.immediate_origin)?;

    if NaiveDate::parse_from_str(header.file_creation_date.trim(), "%y%m%d").is_err() {
        return Err(invalid(record, "file_creation_date", &header.file_creation_date));
    }

    let modifier = header.file_id_modifier.as_str();
    let valid_modifier = modifier.len() == 1
        && modifier
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !valid_modifier {
        return Err(invalid(record, "file_id_modifier", modifier));
    }
    Ok(())
}

fn validate_batch_fields(
    record: &str,
    service_class_code: u16,
    sec_code: &str,
    odfi: &str,
    entries: usize,
) -> Result<(), ControlError> {
    if !SERVICE_CLASS_CODES.contains(&service_class_code) {
        return Err(invalid(record, "service_class_code", service_class_code));
    }
    require(record, "standard_entry_class_code", sec_code)?;
    require(record, "odfi_identification", odfi)?;
    if entries == 0 {
        return Err(ControlError::EmptyBatch {
            record: record.to_string(),
        });
    }
    Ok(())
}

fn control_from(
    totals: Totals,
    service_class_code: u16,
    company: &str,
    odfi: &str,
    batch_number: u32,
) -> BatchControl {
    BatchControl {
        service_class_code,
        entry_addenda_count: totals.entry_addenda_count,
        entry_hash: totals.entry_hash,
        total_debit: totals.total_debit,
        total_credit: totals.total_credit,
        company_identification: company.to_string(),
        odfi_identification: odfi.to_string(),
        batch_number,
    }
}

// =============================================================================
// Recalculation
// =============================================================================

impl Batch {
    /// Rebuild the batch control from the entries.
    pub fn recalculate(&mut self, position: usize) -> Result<(), ControlError> {
        let BatchHeader {
            service_class_code,
            ref standard_entry_class_code,
            ref odfi_identification,
            ref company_identification,
            batch_number,
            ..
        } = self.header;
        let record = format!("batch {}", position);
        validate_batch_fields(
            &record,
            service_class_code,
            standard_entry_class_code,
            odfi_identification,
            self.entries.len(),
        )?;

        let mut totals = Totals::default();
        for (index, entry) in self.entries.iter().enumerate() {
            totals.add_entry(
                &format!("{} entry {}", record, index),
                entry.transaction_code,
                &entry.rdfi_identification,
                entry.amount,
                entry.addenda_count(),
            )?;
        }
        self.control = control_from(
            totals,
            service_class_code,
            company_identification,
            odfi_identification,
            batch_number,
        );
        Ok(())
    }
}

impl IatBatch {
    /// Rebuild the batch control from the entries.
    ///
    /// IAT batches have no company identification; the control echoes the
    /// originator identification instead.
    pub fn recalculate(&mut self, position: usize) -> Result<(), ControlError> {
        let IatBatchHeader {
            service_class_code,
            ref standard_entry_class_code,
            ref odfi_identification,
            ref originator_identification,
            batch_number,
            ..
        } = self.header;
        let record = format!("iat batch {}", position);
        validate_batch_fields(
            &record,
            service_class_code,
            standard_entry_class_code,
            odfi_identification,
            self.entries.len(),
        )?;

        let mut totals = Totals::default();
        for (index, entry) in self.entries.iter().enumerate() {
            totals.add_entry(
                &format!("{} entry {}", record, index),
                entry.transaction_code,
                &entry.rdfi_identification,
                entry.amount,
                entry.addenda_count(),
            )?;
        }
        self.control = control_from(
            totals,
            service_class_code,
            originator_identification,
            odfi_identification,
            batch_number,
        );
        Ok(())
    }
}

impl AchFile {
    /// Validate headers and rebuild every control record.
    ///
    /// On error the file may hold recalculated controls for the batches that
    /// preceded the failing one; callers discard it.
    pub fn recalculate(&mut self) -> Result<(), ControlError> {
        validate_file_header(&self.header)?;

        let mut totals = Totals::default();
        for (position, batch) in self.batches.iter_mut().enumerate() {
            batch.recalculate(position)?;
            totals.merge("file control", &batch.control)?;
        }
        for (position, batch) in self.iat_batches.iter_mut().enumerate() {
            batch.recalculate(position)?;
            totals.merge("file control", &batch.control)?;
        }

        let batch_count = (self.batches.len() + self.iat_batches.len()) as u64;
        let records = 2 + 2 * batch_count + totals.entry_addenda_count;
        self.control = FileControl {
            batch_count,
            block_count: records.div_ceil(BLOCKING_FACTOR),
            entry_addenda_count: totals.entry_addenda_count,
            entry_hash: totals.entry_hash,
            total_debit: totals.total_debit,
            total_credit: totals.total_credit,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Addenda, Addenda05, EntryDetail};

    fn header() -> FileHeader {
        FileHeader {
            immediate_destination: "231380104".into(),
            immediate_origin: "121042882".into(),
            file_creation_date: "261018".into(),
            file_creation_time: "0930".into(),
            file_id_modifier: "A".into(),
            ..FileHeader::default()
        }
    }

    fn batch(service_class_code: u16) -> Batch {
        Batch::new(BatchHeader {
            service_class_code,
            company_name: "ACME".into(),
            company_identification: "1234567890".into(),
            standard_entry_class_code: "PPD".into(),
            odfi_identification: "12104288".into(),
            batch_number: 1,
            ..BatchHeader::default()
        })
    }

    fn entry(transaction_code: u16, rdfi: &str, amount: u64) -> EntryDetail {
        EntryDetail {
            transaction_code,
            rdfi_identification: rdfi.into(),
            check_digit: "4".into(),
            amount,
            ..EntryDetail::default()
        }
    }

    #[test]
    fn test_entry_side() {
        assert_eq!(EntrySide::of(22), EntrySide::Credit);
        assert_eq!(EntrySide::of(27), EntrySide::Debit);
        assert_eq!(EntrySide::of(36), EntrySide::Debit);
        assert_eq!(EntrySide::of(80), EntrySide::Neutral);
    }

    #[test]
    fn test_hash_part_uses_first_eight_digits() {
        assert_eq!(hash_part("23138010"), 23138010);
        assert_eq!(hash_part("231380104"), 23138010);
        assert_eq!(hash_part(""), 0);
    }

    #[test]
    fn test_recalculate_totals() {
        let mut b = batch(200);
        b.add_entry(entry(22, "23138010", 100_000));
        let mut debit = entry(27, "12104288", 2_500);
        debit.attach(Addenda::PaymentInfo(Addenda05::new("inv 7", 1))).unwrap();
        b.add_entry(debit);

        let mut file = AchFile::new(header());
        file.add_batch(b);
        file.recalculate().unwrap();

        let control = &file.batches[0].control;
        assert_eq!(control.entry_addenda_count, 3);
        assert_eq!(control.entry_hash, 23138010 + 12104288);
        assert_eq!(control.total_credit, 100_000);
        assert_eq!(control.total_debit, 2_500);
        assert_eq!(control.company_identification, "1234567890");

        assert_eq!(file.control.batch_count, 1);
        assert_eq!(file.control.entry_addenda_count, 3);
        // 2 file records + 2 batch records + 3 = 7 -> 1 block
        assert_eq!(file.control.block_count, 1);
    }

    #[test]
    fn test_block_count_rounds_up() {
        let mut b = batch(220);
        for _ in 0..7 {
            b.add_entry(entry(22, "23138010", 1));
        }
        let mut file = AchFile::new(header());
        file.add_batch(b);
        file.recalculate().unwrap();
        // 2 + 2 + 7 = 11 records
        assert_eq!(file.control.block_count, 2);
    }

    #[test]
    fn test_rejects_empty_batch() {
        let mut file = AchFile::new(header());
        file.add_batch(batch(200));
        let err = file.recalculate().unwrap_err();
        assert!(matches!(err, ControlError::EmptyBatch { .. }));
    }

    #[test]
    fn test_rejects_bad_service_class() {
        let mut b = batch(201);
        b.add_entry(entry(22, "23138010", 1));
        let mut file = AchFile::new(header());
        file.add_batch(b);
        let err = file.recalculate().unwrap_err();
        assert_eq!(err, invalid("batch 0", "service_class_code", 201));
    }

    #[test]
    fn test_rejects_bad_file_header() {
        let mut file = AchFile::new(FileHeader {
            file_creation_date: "261340".into(),
            ..header()
        });
        assert!(matches!(
            file.recalculate(),
            Err(ControlError::InvalidField { field: "file_creation_date", .. })
        ));

        file.header = FileHeader {
            file_id_modifier: "a".into(),
            ..header()
        };
        assert!(matches!(
            file.recalculate(),
            Err(ControlError::InvalidField { field: "file_id_modifier", .. })
        ));

        file.header = FileHeader {
            immediate_origin: "  ".into(),
            ..header()
        };
        assert!(matches!(
            file.recalculate(),
            Err(ControlError::MissingField { field: "immediate_origin", .. })
        ));
    }

    #[test]
    fn test_rejects_amount_beyond_ten_digits() {
        let mut b = batch(220);
        b.add_entry(entry(22, "23138010", 1));
        b.add_entry(entry(22, "23138010", MAX_AMOUNT + 1));
        let mut file = AchFile::new(header());
        file.add_batch(b);
        let err = file.recalculate().unwrap_err();
        assert_eq!(err, invalid("batch 0 entry 1", "amount", MAX_AMOUNT + 1));
    }

    #[test]
    fn test_max_amounts_do_not_overflow() {
        let mut b = batch(220);
        b.add_entry(entry(22, "23138010", MAX_AMOUNT));
        b.add_entry(entry(22, "23138010", MAX_AMOUNT));
        let mut file = AchFile::new(header());
        file.add_batch(b);
        file.recalculate().unwrap();
        assert_eq!(file.control.total_credit, 2 * MAX_AMOUNT);
    }

    #[test]
    fn test_merge_overflow_is_an_error() {
        let mut totals = Totals {
            total_debit: u64::MAX,
            ..Totals::default()
        };
        let control = BatchControl {
            total_debit: 1,
            ..BatchControl::default()
        };
        assert_eq!(
            totals.merge("file control", &control),
            Err(ControlError::TotalOverflow {
                record: "file control".into(),
                field: "total_debit",
            })
        );
    }

    #[test]
    fn test_file_without_batches() {
        let mut file = AchFile::new(header());
        file.recalculate().unwrap();
        assert_eq!(file.control.batch_count, 0);
        assert_eq!(file.control.block_count, 1);
    }
}
