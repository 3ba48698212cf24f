//! Reconstruction: [`TableSet`] back to a hierarchical ACH file.
//!
//! ```text
//! original ──isolate──▶ copy
//!                        │  file_header row 0
//!                        │  batches      (batch_index)           fatal if unresolved
//!                        │  entries      (batch_index, entry_index)
//!                        │  addenda      (+ addenda_index, addenda_type) skipped if unresolved
//!                        │  iat_* tables, same order
//!                        ▼
//!                   recalculate controls ──▶ new file
//! ```
//!
//! Only fields of records that already exist are overwritten. Rows cannot add
//! or remove batches, entries or addenda, and columns absent from a table
//! leave their fields as they were in the original.
//!
//! Batch and entry tables must keep exactly one row per record: a second row
//! for the same index is [`ReconstructError::DuplicateRow`] and a table with
//! rows missing is [`ReconstructError::RowCountMismatch`]. A repeated addenda
//! row is skipped with a warning once the first one has been applied.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{ReconstructError, ReconstructResult};
use crate::logs::log_warning;
use crate::models::{
    AchFile, AddendaFamily, AddendaType, Batch, BatchHeader, EntryDetail, FileHeader, IatBatch,
    IatBatchHeader, IatEntryDetail,
};
use crate::table::schema::col::*;
use crate::table::{
    AddendaIndex, BatchIndex, ColumnMap, EntryIndex, RowReader, TableData, TableKind, TableSet,
};

use super::addenda_codec::{decode_iat, decode_standard};
use super::isolate::isolate;

/// Rebuild a file from edited tables and the file they were flattened from.
///
/// The original is never modified. An absent table set is
/// [`ReconstructError::InvalidInput`].
///
/// Numeric cells are strict: a value that does not parse, such as `12.50`
/// in `amount`, fails with [`ReconstructError::InvalidValue`] instead of
/// leaving the field at its original value.
pub fn reconstruct(tables: Option<&TableSet>, original: &AchFile) -> ReconstructResult<AchFile> {
    let tables = tables.ok_or_else(|| {
        ReconstructError::InvalidInput("no table set to reconstruct from".to_string())
    })?;
    tables.to_file(original)
}

impl TableSet {
    /// Apply every table onto a private copy of `original` and recalculate
    /// its controls.
    pub fn to_file(&self, original: &AchFile) -> ReconstructResult<AchFile> {
        let mut file = isolate(original)?;

        apply_file_header(&self.file_header, &mut file.header);
        apply_batch_rows(&self.batches, TableKind::Batches, &mut file.batches, apply_batch)?;
        apply_entry_rows(
            &self.entries,
            TableKind::Entries,
            &mut file.batches,
            standard_entries,
            apply_entry,
        )?;
        apply_addenda_rows(
            &self.addenda,
            TableKind::Addenda,
            AddendaFamily::Standard,
            &mut file.batches,
            standard_entries,
            decode_standard,
        )?;

        if let Some(table) = &self.iat_batches {
            apply_batch_rows(table, TableKind::IatBatches, &mut file.iat_batches, apply_iat_batch)?;
        }
        if let Some(table) = &self.iat_entries {
            apply_entry_rows(
                table,
                TableKind::IatEntries,
                &mut file.iat_batches,
                iat_entries,
                apply_iat_entry,
            )?;
        }
        if let Some(table) = &self.iat_addenda {
            apply_addenda_rows(
                table,
                TableKind::IatAddenda,
                AddendaFamily::International,
                &mut file.iat_batches,
                iat_entries,
                decode_iat,
            )?;
        }

        file.recalculate()?;
        Ok(file)
    }
}

// =============================================================================
// Row Dispatch
// =============================================================================

fn standard_entries(batch: &mut Batch) -> &mut [EntryDetail] {
    &mut batch.entries
}

fn iat_entries(batch: &mut IatBatch) -> &mut [IatEntryDetail] {
    &mut batch.entries
}

/// Only the first row is read; a table with no rows changes nothing.
fn apply_file_header(table: &TableData, header: &mut FileHeader) {
    let Some(record) = table.records.first() else {
        return;
    };
    let columns = ColumnMap::new(TableKind::FileHeader, table);
    let row = columns.reader(0, record);
    row.apply_text(IMMEDIATE_DESTINATION, &mut header.immediate_destination);
    row.apply_text(IMMEDIATE_ORIGIN, &mut header.immediate_origin);
    row.apply_text(FILE_CREATION_DATE, &mut header.file_creation_date);
    row.apply_text(FILE_CREATION_TIME, &mut header.file_creation_time);
    row.apply_text(FILE_ID_MODIFIER, &mut header.file_id_modifier);
    row.apply_text(IMMEDIATE_DESTINATION_NAME, &mut header.immediate_destination_name);
    row.apply_text(IMMEDIATE_ORIGIN_NAME, &mut header.immediate_origin_name);
    row.apply_text(REFERENCE_CODE, &mut header.reference_code);
}

/// Record that `row` edits `key`, failing if an earlier row already did.
fn claim<K: Hash + Eq>(
    seen: &mut HashMap<K, usize>,
    key: K,
    kind: TableKind,
    row: usize,
    describe: impl FnOnce(&K) -> String,
) -> ReconstructResult<()> {
    match seen.entry(key) {
        Entry::Occupied(first) => Err(ReconstructError::DuplicateRow {
            table: kind,
            row,
            first: *first.get(),
            key: describe(first.key()),
        }),
        Entry::Vacant(slot) => {
            slot.insert(row);
            Ok(())
        }
    }
}

fn check_row_count(kind: TableKind, found: usize, expected: usize) -> ReconstructResult<()> {
    if found != expected {
        return Err(ReconstructError::RowCountMismatch {
            table: kind,
            expected,
            found,
        });
    }
    Ok(())
}

fn apply_batch_rows<B>(
    table: &TableData,
    kind: TableKind,
    batches: &mut [B],
    apply: fn(&mut B, &RowReader<'_>) -> ReconstructResult<()>,
) -> ReconstructResult<()> {
    let columns = ColumnMap::new(kind, table);
    let mut seen: HashMap<BatchIndex, usize> = HashMap::new();
    for (i, record) in table.records.iter().enumerate() {
        let row = columns.reader(i, record);
        let batch_index = row.batch_index()?;
        let batch = batch_index.resolve(batches, kind, i)?;
        claim(&mut seen, batch_index, kind, i, |b| format!("batch {}", b))?;
        apply(batch, &row)?;
    }
    check_row_count(kind, table.row_count(), batches.len())
}

fn apply_entry_rows<B, E>(
    table: &TableData,
    kind: TableKind,
    batches: &mut [B],
    entries_of: fn(&mut B) -> &mut [E],
    apply: fn(&mut E, &RowReader<'_>) -> ReconstructResult<()>,
) -> ReconstructResult<()> {
    let columns = ColumnMap::new(kind, table);
    let mut seen: HashMap<(BatchIndex, EntryIndex), usize> = HashMap::new();
    for (i, record) in table.records.iter().enumerate() {
        let row = columns.reader(i, record);
        let batch_index = row.batch_index()?;
        let entry_index = row.entry_index()?;
        let batch = batch_index.resolve(batches, kind, i)?;
        let entry = entry_index.resolve(entries_of(batch), kind, i)?;
        claim(&mut seen, (batch_index, entry_index), kind, i, |key| {
            format!("batch {} entry {}", key.0, key.1)
        })?;
        apply(entry, &row)?;
    }
    let expected = batches.iter_mut().map(|b| entries_of(b).len()).sum();
    check_row_count(kind, table.row_count(), expected)
}

fn apply_addenda_rows<B, E>(
    table: &TableData,
    kind: TableKind,
    family: AddendaFamily,
    batches: &mut [B],
    entries_of: fn(&mut B) -> &mut [E],
    decode: fn(&mut E, AddendaType, AddendaIndex, &RowReader<'_>) -> ReconstructResult<bool>,
) -> ReconstructResult<()> {
    let columns = ColumnMap::new(kind, table);
    let mut applied: HashMap<(BatchIndex, EntryIndex, AddendaIndex), usize> = HashMap::new();
    for (i, record) in table.records.iter().enumerate() {
        let row = columns.reader(i, record);
        let batch_index = row.batch_index()?;
        let entry_index = row.entry_index()?;
        let addenda_index = row.addenda_index()?;
        let addenda_type = read_addenda_type(&columns, &row, family)?;

        let key = (batch_index, entry_index, addenda_index);
        if let Some(first) = applied.get(&key) {
            log_warning(format!(
                "{} row {}: batch {} entry {} addenda {} already edited by row {}, row skipped",
                kind, i, batch_index, entry_index, addenda_index, first
            ));
            continue;
        }

        let entry = batch_index
            .lookup(batches)
            .and_then(|batch| entry_index.lookup(entries_of(batch)));
        let Some(entry) = entry else {
            log_warning(format!(
                "{} row {}: no entry at batch {} entry {}, row skipped",
                kind, i, batch_index, entry_index
            ));
            continue;
        };

        if decode(entry, addenda_type, addenda_index, &row)? {
            applied.insert(key, i);
        } else {
            log_warning(format!(
                "{} row {}: entry has no {} addenda at index {}, row skipped",
                kind, i, addenda_type, addenda_index
            ));
        }
    }
    Ok(())
}

fn read_addenda_type(
    columns: &ColumnMap,
    row: &RowReader<'_>,
    family: AddendaFamily,
) -> ReconstructResult<AddendaType> {
    columns.require(ADDENDA_TYPE)?;
    let tag = row.text(ADDENDA_TYPE).unwrap_or("").trim();
    AddendaType::from_tag(tag, family).ok_or_else(|| ReconstructError::UnknownAddendaType {
        table: row.table(),
        row: row.row(),
        tag: tag.to_string(),
    })
}

// =============================================================================
// Field Application
// =============================================================================

// Control columns and type codes are read-only and never applied.

fn apply_batch(batch: &mut Batch, row: &RowReader<'_>) -> ReconstructResult<()> {
    let h: &mut BatchHeader = &mut batch.header;
    row.apply_number(SERVICE_CLASS_CODE, &mut h.service_class_code)?;
    row.apply_text(COMPANY_NAME, &mut h.company_name);
    row.apply_text(COMPANY_DISCRETIONARY_DATA, &mut h.company_discretionary_data);
    row.apply_text(COMPANY_IDENTIFICATION, &mut h.company_identification);
    row.apply_text(STANDARD_ENTRY_CLASS_CODE, &mut h.standard_entry_class_code);
    row.apply_text(COMPANY_ENTRY_DESCRIPTION, &mut h.company_entry_description);
    row.apply_text(COMPANY_DESCRIPTIVE_DATE, &mut h.company_descriptive_date);
    row.apply_text(EFFECTIVE_ENTRY_DATE, &mut h.effective_entry_date);
    row.apply_number(ORIGINATOR_STATUS_CODE, &mut h.originator_status_code)?;
    row.apply_text(ODFI_IDENTIFICATION, &mut h.odfi_identification);
    row.apply_number(BATCH_NUMBER, &mut h.batch_number)?;
    Ok(())
}

fn apply_iat_batch(batch: &mut IatBatch, row: &RowReader<'_>) -> ReconstructResult<()> {
    let h: &mut IatBatchHeader = &mut batch.header;
    row.apply_number(SERVICE_CLASS_CODE, &mut h.service_class_code)?;
    row.apply_text(IAT_INDICATOR, &mut h.iat_indicator);
    row.apply_text(FOREIGN_EXCHANGE_INDICATOR, &mut h.foreign_exchange_indicator);
    row.apply_number(
        FOREIGN_EXCHANGE_REFERENCE_INDICATOR,
        &mut h.foreign_exchange_reference_indicator,
    )?;
    row.apply_text(FOREIGN_EXCHANGE_REFERENCE, &mut h.foreign_exchange_reference);
    row.apply_text(ISO_DESTINATION_COUNTRY_CODE, &mut h.iso_destination_country_code);
    row.apply_text(ORIGINATOR_IDENTIFICATION, &mut h.originator_identification);
    row.apply_text(STANDARD_ENTRY_CLASS_CODE, &mut h.standard_entry_class_code);
    row.apply_text(COMPANY_ENTRY_DESCRIPTION, &mut h.company_entry_description);
    row.apply_text(ISO_ORIGINATING_CURRENCY_CODE, &mut h.iso_originating_currency_code);
    row.apply_text(ISO_DESTINATION_CURRENCY_CODE, &mut h.iso_destination_currency_code);
    row.apply_text(EFFECTIVE_ENTRY_DATE, &mut h.effective_entry_date);
    row.apply_text(ODFI_IDENTIFICATION, &mut h.odfi_identification);
    row.apply_number(BATCH_NUMBER, &mut h.batch_number)?;
    Ok(())
}

fn apply_entry(entry: &mut EntryDetail, row: &RowReader<'_>) -> ReconstructResult<()> {
    row.apply_number(TRANSACTION_CODE, &mut entry.transaction_code)?;
    row.apply_text(RDFI_IDENTIFICATION, &mut entry.rdfi_identification);
    row.apply_text(CHECK_DIGIT, &mut entry.check_digit);
    row.apply_text(DFI_ACCOUNT_NUMBER, &mut entry.dfi_account_number);
    row.apply_number(AMOUNT, &mut entry.amount)?;
    row.apply_text(IDENTIFICATION_NUMBER, &mut entry.identification_number);
    row.apply_text(INDIVIDUAL_NAME, &mut entry.individual_name);
    row.apply_text(DISCRETIONARY_DATA, &mut entry.discretionary_data);
    row.apply_number(ADDENDA_RECORD_INDICATOR, &mut entry.addenda_record_indicator)?;
    row.apply_text(TRACE_NUMBER, &mut entry.trace_number);
    row.apply_text(CATEGORY, &mut entry.category);
    Ok(())
}

fn apply_iat_entry(entry: &mut IatEntryDetail, row: &RowReader<'_>) -> ReconstructResult<()> {
    row.apply_number(TRANSACTION_CODE, &mut entry.transaction_code)?;
    row.apply_text(RDFI_IDENTIFICATION, &mut entry.rdfi_identification);
    row.apply_text(CHECK_DIGIT, &mut entry.check_digit);
    row.apply_number(ADDENDA_RECORDS, &mut entry.addenda_records)?;
    row.apply_number(AMOUNT, &mut entry.amount)?;
    row.apply_text(DFI_ACCOUNT_NUMBER, &mut entry.dfi_account_number);
    row.apply_text(OFAC_SCREENING_INDICATOR, &mut entry.ofac_screening_indicator);
    row.apply_text(
        SECONDARY_OFAC_SCREENING_INDICATOR,
        &mut entry.secondary_ofac_screening_indicator,
    );
    row.apply_number(ADDENDA_RECORD_INDICATOR, &mut entry.addenda_record_indicator)?;
    row.apply_text(TRACE_NUMBER, &mut entry.trace_number);
    row.apply_text(CATEGORY, &mut entry.category);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ControlError;
    use crate::transform::fixtures::{sample_file, single_payment_file};
    use crate::transform::flatten::flatten;

    fn row_of(table: &TableData, column: &str, value: &str) -> usize {
        (0..table.row_count())
            .find(|&r| table.cell(r, column) == Some(value))
            .unwrap()
    }

    #[test]
    fn test_absent_tables_is_invalid_input() {
        let err = reconstruct(None, &sample_file()).unwrap_err();
        assert!(matches!(err, ReconstructError::InvalidInput(_)));
    }

    #[test]
    fn test_unchanged_tables_round_trip() {
        let original = sample_file();
        let tables = flatten(Some(&original)).unwrap();
        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_every_attached_addenda_has_a_row() {
        let original = sample_file();
        let tables = TableSet::from_file(&original);

        let standard = original.batches[0].entries[1].addenda_count();
        assert_eq!(standard, 8);
        assert_eq!(tables.addenda().row_count(), standard);

        let iat = original.iat_batches[0].entries[0].addenda_count();
        assert_eq!(iat, 13);
        assert_eq!(tables.iat_addenda().unwrap().row_count(), iat);
    }

    #[test]
    fn test_amount_edit_updates_entry_and_controls() {
        let original = single_payment_file();
        let mut tables = TableSet::from_file(&original);
        tables.entries_mut().set_cell(0, AMOUNT, "50000000");

        let rebuilt = reconstruct(Some(&tables), &original).unwrap();

        let entry = &rebuilt.batches[0].entries[0];
        assert_eq!(entry.amount, 50_000_000);
        assert_eq!(entry.addenda05[0].payment_related_information, "Original Payment Info");
        assert_eq!(rebuilt.batches[0].control.total_credit, 50_000_000);
        assert_eq!(rebuilt.control.total_credit, 50_000_000);

        assert_eq!(original.batches[0].entries[0].amount, 100_000_000);
        assert_eq!(original.control.total_credit, 100_000_000);
    }

    #[test]
    fn test_single_field_edit_changes_only_that_field() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.entries_mut().set_cell(1, INDIVIDUAL_NAME, "John Roe");

        let rebuilt = reconstruct(Some(&tables), &original).unwrap();

        let mut expected = original.clone();
        expected.batches[0].entries[1].individual_name = "John Roe".into();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_addenda_edits_reach_each_variant() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        let addenda = tables.addenda_mut();
        let second_05 = row_of(addenda, PAYMENT_RELATED_INFORMATION, "second payment info");
        addenda.set_cell(second_05, PAYMENT_RELATED_INFORMATION, "edited");
        let contested = row_of(addenda, ADDENDA_TYPE, "99_contested");
        addenda.set_cell(contested, DISHONORED_RETURN_REASON_CODE, "R69");
        let dishonored = row_of(addenda, ADDENDA_TYPE, "99_dishonored");
        addenda.set_cell(dishonored, ADDENDA_INFORMATION, "note");

        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        let entry = &rebuilt.batches[0].entries[1];
        assert_eq!(entry.addenda05[0].payment_related_information, "first payment info");
        assert_eq!(entry.addenda05[1].payment_related_information, "edited");
        let contested = entry.addenda99_contested.as_ref().unwrap();
        assert_eq!(contested.dishonored_return_reason_code, "R69");
        let dishonored = entry.addenda99_dishonored.as_ref().unwrap();
        assert_eq!(dishonored.dishonored_return_reason_code, "R61");
        assert_eq!(dishonored.addenda_information, "note");
    }

    #[test]
    fn test_iat_edits_apply() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables
            .iat_batches_mut()
            .unwrap()
            .set_cell(0, ISO_DESTINATION_COUNTRY_CODE, "MX");
        tables.iat_entries_mut().unwrap().set_cell(0, AMOUNT, "250000");
        let iat_addenda = tables.iat_addenda_mut().unwrap();
        let bank = row_of(iat_addenda, FOREIGN_CORRESPONDENT_BANK_NAME, "Bank C");
        iat_addenda.set_cell(bank, FOREIGN_CORRESPONDENT_BANK_NAME, "Bank Z");
        let ten = row_of(iat_addenda, ADDENDA_TYPE, "10");
        iat_addenda.set_cell(ten, FOREIGN_PAYMENT_AMOUNT, "250000");

        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        let batch = &rebuilt.iat_batches[0];
        assert_eq!(batch.header.iso_destination_country_code, "MX");
        let entry = &batch.entries[0];
        assert_eq!(entry.amount, 250_000);
        assert_eq!(entry.addenda18[2].foreign_correspondent_bank_name, "Bank Z");
        assert_eq!(entry.addenda18[1].foreign_correspondent_bank_name, "Bank B");
        assert_eq!(entry.addenda10.as_ref().unwrap().foreign_payment_amount, 250_000);
        assert_eq!(batch.control.total_debit, 250_000);
    }

    #[test]
    fn test_batch_out_of_range_is_fatal() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.entries_mut().set_cell(0, BATCH_INDEX, "7");

        let err = reconstruct(Some(&tables), &original).unwrap_err();
        match err {
            ReconstructError::IndexOutOfRange { table, index, len, .. } => {
                assert_eq!(table, TableKind::Entries);
                assert_eq!(index, 7);
                assert_eq!(len, 2);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(original, sample_file());
    }

    #[test]
    fn test_iat_entry_out_of_range_is_fatal() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.iat_entries_mut().unwrap().set_cell(0, ENTRY_INDEX, "3");
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::IndexOutOfRange {
                table: TableKind::IatEntries,
                column: "entry_index",
                ..
            }
        ));
    }

    #[test]
    fn test_unresolved_addenda_rows_are_skipped() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        let addenda = tables.addenda_mut();
        addenda.set_cell(0, BATCH_INDEX, "9");
        let second_05 = row_of(addenda, PAYMENT_RELATED_INFORMATION, "second payment info");
        addenda.set_cell(second_05, ADDENDA_INDEX, "6");
        addenda.set_cell(second_05, PAYMENT_RELATED_INFORMATION, "lost");

        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_addenda_for_missing_slot_is_skipped() {
        let original = single_payment_file();
        let mut tables = TableSet::from_file(&original);
        tables.addenda_mut().set_cell(0, ADDENDA_TYPE, "98");
        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_malformed_index_is_fatal() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.batches_mut().set_cell(1, BATCH_INDEX, "-1");
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::MalformedIndex { table: TableKind::Batches, row: 1, .. }
        ));
    }

    #[test]
    fn test_unknown_addenda_type_is_fatal() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.addenda_mut().set_cell(0, ADDENDA_TYPE, "17");
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        match err {
            ReconstructError::UnknownAddendaType { table, tag, .. } => {
                assert_eq!(table, TableKind::Addenda);
                assert_eq!(tag, "17");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_number_is_fatal() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.entries_mut().set_cell(0, AMOUNT, "12.50");
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(err, ReconstructError::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn test_control_columns_are_read_only() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.batches_mut().set_cell(0, TOTAL_CREDIT, "1");
        tables.addenda_mut().set_cell(0, TYPE_CODE, "77");
        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_absent_column_keeps_original_value() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        let entries = tables.entries_mut();
        let amount = entries.column_index(AMOUNT).unwrap();
        entries.headers.remove(amount);
        for record in &mut entries.records {
            record.remove(amount);
        }
        entries.set_cell(0, INDIVIDUAL_NAME, "Renamed");

        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        assert_eq!(rebuilt.batches[0].entries[0].amount, 100_000);
        assert_eq!(rebuilt.batches[0].entries[0].individual_name, "Renamed");
    }

    #[test]
    fn test_missing_index_column_is_fatal() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        let batches = tables.batches_mut();
        batches.headers[0] = "position".into();
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::MissingIndexColumn { column: "batch_index", .. }
        ));
    }

    #[test]
    fn test_empty_file_header_table_is_a_no_op() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.file_header_mut().records.clear();
        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        assert_eq!(rebuilt.header, original.header);
    }

    #[test]
    fn test_file_without_batches_round_trips() {
        let original = AchFile::new(crate::transform::fixtures::file_header());
        let tables = TableSet::from_file(&original);
        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        assert!(rebuilt.batches.is_empty());
        assert_eq!(rebuilt.control.batch_count, 0);
        assert_eq!(rebuilt.control.block_count, 1);
    }

    #[test]
    fn test_control_failure_surfaces() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.batches_mut().set_cell(0, STANDARD_ENTRY_CLASS_CODE, "");
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::ControlRecalculation(ControlError::MissingField {
                field: "standard_entry_class_code",
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_amounts_fail_recalculation() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        let entries = tables.entries_mut();
        for row in 0..entries.row_count() {
            entries.set_cell(row, AMOUNT, u64::MAX.to_string());
        }
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::ControlRecalculation(ControlError::InvalidField {
                field: "amount",
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_entry_row_is_fatal() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        let entries = tables.entries_mut();
        let mut copy = entries.records[0].clone();
        copy[entries.column_index(AMOUNT).unwrap()] = "7".into();
        entries.records.push(copy);

        let err = reconstruct(Some(&tables), &original).unwrap_err();
        match err {
            ReconstructError::DuplicateRow { table, row, first, key } => {
                assert_eq!(table, TableKind::Entries);
                assert_eq!(row, 3);
                assert_eq!(first, 0);
                assert_eq!(key, "batch 0 entry 0");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_deleted_batch_rows_are_rejected() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.batches_mut().records.clear();
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::RowCountMismatch {
                table: TableKind::Batches,
                expected: 2,
                found: 0,
            }
        ));
    }

    #[test]
    fn test_deleted_entry_row_is_rejected() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        tables.entries_mut().records.remove(1);
        let err = reconstruct(Some(&tables), &original).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::RowCountMismatch {
                table: TableKind::Entries,
                expected: 3,
                found: 2,
            }
        ));
    }

    #[test]
    fn test_repeated_addenda_row_keeps_first_edit() {
        let original = sample_file();
        let mut tables = TableSet::from_file(&original);
        let addenda = tables.addenda_mut();
        let second_05 = row_of(addenda, PAYMENT_RELATED_INFORMATION, "second payment info");
        addenda.set_cell(second_05, PAYMENT_RELATED_INFORMATION, "edited");
        let mut repeat = addenda.records[second_05].clone();
        repeat[addenda.column_index(PAYMENT_RELATED_INFORMATION).unwrap()] = "again".into();
        addenda.records.push(repeat);

        let rebuilt = reconstruct(Some(&tables), &original).unwrap();
        let entry = &rebuilt.batches[0].entries[1];
        assert_eq!(entry.addenda05[1].payment_related_information, "edited");
    }

    #[test]
    fn test_original_survives_failed_reconstruction() {
        let original = sample_file();
        let before = original.clone();
        let mut tables = TableSet::from_file(&original);
        tables.entries_mut().set_cell(0, AMOUNT, "1");
        tables.addenda_mut().set_cell(0, ADDENDA_TYPE, "bogus");
        assert!(reconstruct(Some(&tables), &original).is_err());
        assert_eq!(original, before);
    }
}
