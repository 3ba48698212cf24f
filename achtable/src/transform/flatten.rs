//! Flattening: hierarchical ACH file to [`TableSet`].
//!
//! Pure projection. Every batch, entry and addenda row is stamped with its
//! zero-based position, which is the only row identity reconstruction uses.

use crate::models::AchFile;
use crate::table::schema::{self, col::*};
use crate::table::{BatchIndex, EntryIndex, RowBuilder, TableData, TableSet};

use super::addenda_codec::{encode_iat, encode_standard};

/// Flatten a file into its seven tables.
///
/// An absent file yields an absent table set. The IAT tables are present
/// only when the file carries at least one IAT batch.
pub fn flatten(file: Option<&AchFile>) -> Option<TableSet> {
    file.map(TableSet::from_file)
}

impl TableSet {
    pub fn from_file(file: &AchFile) -> Self {
        let has_iat = !file.iat_batches.is_empty();
        Self {
            file_header: file_header_table(file),
            batches: batches_table(file),
            entries: entries_table(file),
            addenda: addenda_table(file),
            iat_batches: has_iat.then(|| iat_batches_table(file)),
            iat_entries: has_iat.then(|| iat_entries_table(file)),
            iat_addenda: has_iat.then(|| iat_addenda_table(file)),
        }
    }
}

// =============================================================================
// Standard Tables
// =============================================================================

fn file_header_table(file: &AchFile) -> TableData {
    let h = &file.header;
    let mut table = TableData::from_schema(&schema::FILE_HEADER);
    let mut row = RowBuilder::new(&schema::FILE_HEADER);
    row.set(IMMEDIATE_DESTINATION, &h.immediate_destination)
        .set(IMMEDIATE_ORIGIN, &h.immediate_origin)
        .set(FILE_CREATION_DATE, &h.file_creation_date)
        .set(FILE_CREATION_TIME, &h.file_creation_time)
        .set(FILE_ID_MODIFIER, &h.file_id_modifier)
        .set(IMMEDIATE_DESTINATION_NAME, &h.immediate_destination_name)
        .set(IMMEDIATE_ORIGIN_NAME, &h.immediate_origin_name)
        .set(REFERENCE_CODE, &h.reference_code);
    table.records.push(row.finish());
    table
}

fn batches_table(file: &AchFile) -> TableData {
    let mut table = TableData::from_schema(&schema::BATCHES);
    for (i, batch) in file.batches.iter().enumerate() {
        let (h, c) = (&batch.header, &batch.control);
        let mut row = RowBuilder::new(&schema::BATCHES);
        row.set(BATCH_INDEX, BatchIndex::new(i))
            .set(SERVICE_CLASS_CODE, h.service_class_code)
            .text(COMPANY_NAME, &h.company_name)
            .text(COMPANY_DISCRETIONARY_DATA, &h.company_discretionary_data)
            .text(COMPANY_IDENTIFICATION, &h.company_identification)
            .set(STANDARD_ENTRY_CLASS_CODE, &h.standard_entry_class_code)
            .text(COMPANY_ENTRY_DESCRIPTION, &h.company_entry_description)
            .text(COMPANY_DESCRIPTIVE_DATE, &h.company_descriptive_date)
            .set(EFFECTIVE_ENTRY_DATE, &h.effective_entry_date)
            .set(ORIGINATOR_STATUS_CODE, h.originator_status_code)
            .set(ODFI_IDENTIFICATION, &h.odfi_identification)
            .set(BATCH_NUMBER, h.batch_number)
            .set(ENTRY_ADDENDA_COUNT, c.entry_addenda_count)
            .set(ENTRY_HASH, c.entry_hash)
            .set(TOTAL_DEBIT, c.total_debit)
            .set(TOTAL_CREDIT, c.total_credit);
        table.records.push(row.finish());
    }
    table
}

fn entries_table(file: &AchFile) -> TableData {
    let mut table = TableData::from_schema(&schema::ENTRIES);
    for (b, batch) in file.batches.iter().enumerate() {
        for (e, entry) in batch.entries.iter().enumerate() {
            let mut row = RowBuilder::new(&schema::ENTRIES);
            row.set(BATCH_INDEX, BatchIndex::new(b))
                .set(ENTRY_INDEX, EntryIndex::new(e))
                .set(TRANSACTION_CODE, entry.transaction_code)
                .set(RDFI_IDENTIFICATION, &entry.rdfi_identification)
                .set(CHECK_DIGIT, &entry.check_digit)
                .text(DFI_ACCOUNT_NUMBER, &entry.dfi_account_number)
                .set(AMOUNT, entry.amount)
                .text(IDENTIFICATION_NUMBER, &entry.identification_number)
                .text(INDIVIDUAL_NAME, &entry.individual_name)
                .text(DISCRETIONARY_DATA, &entry.discretionary_data)
                .set(ADDENDA_RECORD_INDICATOR, entry.addenda_record_indicator)
                .set(TRACE_NUMBER, &entry.trace_number)
                .set(CATEGORY, &entry.category);
            table.records.push(row.finish());
        }
    }
    table
}

fn addenda_table(file: &AchFile) -> TableData {
    let mut table = TableData::from_schema(&schema::ADDENDA);
    for (b, batch) in file.batches.iter().enumerate() {
        for (e, entry) in batch.entries.iter().enumerate() {
            encode_standard(
                &schema::ADDENDA,
                BatchIndex::new(b),
                EntryIndex::new(e),
                entry,
                &mut table.records,
            );
        }
    }
    table
}

// =============================================================================
// IAT Tables
// =============================================================================

fn iat_batches_table(file: &AchFile) -> TableData {
    let mut table = TableData::from_schema(&schema::IAT_BATCHES);
    for (i, batch) in file.iat_batches.iter().enumerate() {
        let h = &batch.header;
        let mut row = RowBuilder::new(&schema::IAT_BATCHES);
        row.set(BATCH_INDEX, BatchIndex::new(i))
            .set(SERVICE_CLASS_CODE, h.service_class_code)
            .text(IAT_INDICATOR, &h.iat_indicator)
            .text(FOREIGN_EXCHANGE_INDICATOR, &h.foreign_exchange_indicator)
            .set(FOREIGN_EXCHANGE_REFERENCE_INDICATOR, h.foreign_exchange_reference_indicator)
            .text(FOREIGN_EXCHANGE_REFERENCE, &h.foreign_exchange_reference)
            .text(ISO_DESTINATION_COUNTRY_CODE, &h.iso_destination_country_code)
            .text(ORIGINATOR_IDENTIFICATION, &h.originator_identification)
            .set(STANDARD_ENTRY_CLASS_CODE, &h.standard_entry_class_code)
            .text(COMPANY_ENTRY_DESCRIPTION, &h.company_entry_description)
            .text(ISO_ORIGINATING_CURRENCY_CODE, &h.iso_originating_currency_code)
            .text(ISO_DESTINATION_CURRENCY_CODE, &h.iso_destination_currency_code)
            .set(EFFECTIVE_ENTRY_DATE, &h.effective_entry_date)
            .set(ODFI_IDENTIFICATION, &h.odfi_identification)
            .set(BATCH_NUMBER, h.batch_number);
        table.records.push(row.finish());
    }
    table
}

fn iat_entries_table(file: &AchFile) -> TableData {
    let mut table = TableData::from_schema(&schema::IAT_ENTRIES);
    for (b, batch) in file.iat_batches.iter().enumerate() {
        for (e, entry) in batch.entries.iter().enumerate() {
            let mut row = RowBuilder::new(&schema::IAT_ENTRIES);
            row.set(BATCH_INDEX, BatchIndex::new(b))
                .set(ENTRY_INDEX, EntryIndex::new(e))
                .set(TRANSACTION_CODE, entry.transaction_code)
                .set(RDFI_IDENTIFICATION, &entry.rdfi_identification)
                .set(CHECK_DIGIT, &entry.check_digit)
                .set(ADDENDA_RECORDS, entry.addenda_records)
                .set(AMOUNT, entry.amount)
                .text(DFI_ACCOUNT_NUMBER, &entry.dfi_account_number)
                .text(OFAC_SCREENING_INDICATOR, &entry.ofac_screening_indicator)
                .text(
                    SECONDARY_OFAC_SCREENING_INDICATOR,
                    &entry.secondary_ofac_screening_indicator,
                )
                .set(ADDENDA_RECORD_INDICATOR, entry.addenda_record_indicator)
                .set(TRACE_NUMBER, &entry.trace_number)
                .set(CATEGORY, &entry.category);
            table.records.push(row.finish());
        }
    }
    table
}

fn iat_addenda_table(file: &AchFile) -> TableData {
    let mut table = TableData::from_schema(&schema::IAT_ADDENDA);
    for (b, batch) in file.iat_batches.iter().enumerate() {
        for (e, entry) in batch.entries.iter().enumerate() {
            encode_iat(
                &schema::IAT_ADDENDA,
                BatchIndex::new(b),
                EntryIndex::new(e),
                entry,
                &mut table.records,
            );
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Addenda, Addenda05, Addenda10, Addenda17, Batch, BatchHeader, EntryDetail, FileHeader,
        IatBatch, IatBatchHeader, IatEntryDetail,
    };
    use crate::table::TableKind;

    fn file_with_entry() -> AchFile {
        let mut file = AchFile::new(FileHeader {
            immediate_destination: "231380104".into(),
            immediate_origin: "121042882".into(),
            file_creation_date: "261018".into(),
            file_id_modifier: "A".into(),
            ..FileHeader::default()
        });
        let mut batch = Batch::new(BatchHeader {
            service_class_code: 220,
            company_name: "  Acme Corp  ".into(),
            standard_entry_class_code: "PPD".into(),
            odfi_identification: "12104288".into(),
            ..BatchHeader::default()
        });
        let mut entry = EntryDetail {
            transaction_code: 22,
            rdfi_identification: "23138010".into(),
            amount: 1_250,
            individual_name: "Jane Doe               ".into(),
            ..EntryDetail::default()
        };
        entry.attach(Addenda::PaymentInfo(Addenda05::new("note", 1))).unwrap();
        batch.add_entry(entry);
        file.add_batch(batch);
        file
    }

    #[test]
    fn test_absent_file_yields_absent_tables() {
        assert!(flatten(None).is_none());
    }

    #[test]
    fn test_flatten_projects_and_trims() {
        let tables = flatten(Some(&file_with_entry())).unwrap();
        assert_eq!(tables.file_header().row_count(), 1);
        assert_eq!(tables.file_header().cell(0, IMMEDIATE_ORIGIN), Some("121042882"));
        assert_eq!(tables.batches().cell(0, COMPANY_NAME), Some("Acme Corp"));
        assert_eq!(tables.entries().cell(0, INDIVIDUAL_NAME), Some("Jane Doe"));
        assert_eq!(tables.entries().cell(0, AMOUNT), Some("1250"));
        assert_eq!(tables.entries().cell(0, ADDENDA_RECORD_INDICATOR), Some("1"));
        assert_eq!(tables.addenda().cell(0, ADDENDA_TYPE), Some("05"));
        assert!(!tables.has_iat());
        for (kind, table) in tables.tables() {
            assert!(table.validate_shape(kind.name()).is_ok());
        }
    }

    #[test]
    fn test_flatten_does_not_touch_input() {
        let file = file_with_entry();
        let before = file.clone();
        let _ = TableSet::from_file(&file);
        assert_eq!(file, before);
    }

    #[test]
    fn test_empty_file_has_empty_tables() {
        let file = AchFile::new(FileHeader::default());
        let tables = TableSet::from_file(&file);
        assert_eq!(tables.file_header().row_count(), 1);
        assert!(tables.batches().is_empty());
        assert!(tables.entries().is_empty());
        assert!(tables.addenda().is_empty());
        assert_eq!(tables.batches().headers, schema::BATCHES.headers());
        assert!(tables.get(TableKind::IatBatches).is_none());
    }

    #[test]
    fn test_iat_tables_present_with_iat_batch() {
        let mut file = file_with_entry();
        let mut batch = IatBatch::new(IatBatchHeader {
            service_class_code: 220,
            iso_destination_country_code: "CA".into(),
            ..IatBatchHeader::default()
        });
        let mut entry = IatEntryDetail {
            transaction_code: 22,
            amount: 99,
            ..IatEntryDetail::default()
        };
        entry.attach(Addenda::IatTransaction(Addenda10 {
            foreign_payment_amount: 99,
            ..Addenda10::default()
        }))
        .unwrap();
        entry.attach(Addenda::IatPaymentInfo(Addenda17::default())).unwrap();
        batch.add_entry(entry);
        file.add_iat_batch(batch);

        let tables = TableSet::from_file(&file);
        let iat_batches = tables.iat_batches().unwrap();
        assert_eq!(iat_batches.cell(0, ISO_DESTINATION_COUNTRY_CODE), Some("CA"));
        assert_eq!(tables.iat_entries().unwrap().row_count(), 1);
        let iat_addenda = tables.iat_addenda().unwrap();
        assert_eq!(iat_addenda.row_count(), 2);
        assert_eq!(iat_addenda.cell(0, FOREIGN_PAYMENT_AMOUNT), Some("99"));
        assert_eq!(iat_addenda.cell(1, ADDENDA_INDEX), Some("1"));
        // standard tables are unaffected
        assert_eq!(tables.addenda().row_count(), 1);
    }
}
