//! Addenda variant encoder/decoder.
//!
//! Every addenda variant maps onto one wide row of the shared addenda layout
//! of its family. Columns are addressed by name, so a variant present in both
//! families (98, 99) uses one implementation for both tables.
//!
//! ```text
//! entry ──▶ traversal order ──▶ addenda_index 0, 1, 2, ...
//!
//! standard       02, 05*, 98, 99, 98_refused, 99_dishonored, 99_contested
//! international  10, 11, 12, 13, 14, 15, 16, 17*, 18*, 98, 99
//! ```
//!
//! Repeatable variants (`*`) are found again on decode by subtracting from
//! `addenda_index` the number of addenda that precede the list.

use crate::error::ReconstructResult;
use crate::models::{
    Addenda02, Addenda05, Addenda10, Addenda11, Addenda12, Addenda13, Addenda14, Addenda15,
    Addenda16, Addenda17, Addenda18, Addenda98, Addenda98Refused, Addenda99, Addenda99Contested,
    Addenda99Dishonored, AddendaType, EntryDetail, IatEntryDetail,
};
use crate::table::schema::col::*;
use crate::table::schema::TableSchema;
use crate::table::{AddendaIndex, BatchIndex, EntryIndex, RowBuilder, RowReader};

// =============================================================================
// Codec Trait
// =============================================================================

/// A record that can be written to and read back from an addenda row.
pub trait AddendaRecord {
    /// Tag written to the `addenda_type` column.
    const KIND: AddendaType;

    /// Record type code, written to the read-only `type_code` column.
    fn type_code(&self) -> &str;

    /// Fill the variant's columns. Other columns stay empty.
    fn encode(&self, row: &mut RowBuilder);

    /// Overwrite the variant's fields from the columns present in the row.
    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()>;
}

// =============================================================================
// Standard Variants
// =============================================================================

impl AddendaRecord for Addenda02 {
    const KIND: AddendaType = AddendaType::Terminal;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(TRACE_NUMBER, &self.trace_number)
            .text(REFERENCE_INFORMATION_ONE, &self.reference_information_one)
            .text(REFERENCE_INFORMATION_TWO, &self.reference_information_two)
            .text(TERMINAL_IDENTIFICATION, &self.terminal_identification_code)
            .text(TRANSACTION_SERIAL, &self.transaction_serial_number)
            .text(TRANSACTION_DATE, &self.transaction_date)
            .text(AUTHORIZATION_CODE, &self.authorization_code_or_expire_date)
            .text(TERMINAL_LOCATION, &self.terminal_location)
            .text(TERMINAL_CITY, &self.terminal_city)
            .text(TERMINAL_STATE, &self.terminal_state);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_text(TRACE_NUMBER, &mut self.trace_number);
        row.apply_text(REFERENCE_INFORMATION_ONE, &mut self.reference_information_one);
        row.apply_text(REFERENCE_INFORMATION_TWO, &mut self.reference_information_two);
        row.apply_text(TERMINAL_IDENTIFICATION, &mut self.terminal_identification_code);
        row.apply_text(TRANSACTION_SERIAL, &mut self.transaction_serial_number);
        row.apply_text(TRANSACTION_DATE, &mut self.transaction_date);
        row.apply_text(AUTHORIZATION_CODE, &mut self.authorization_code_or_expire_date);
        row.apply_text(TERMINAL_LOCATION, &mut self.terminal_location);
        row.apply_text(TERMINAL_CITY, &mut self.terminal_city);
        row.apply_text(TERMINAL_STATE, &mut self.terminal_state);
        Ok(())
    }
}

impl AddendaRecord for Addenda05 {
    const KIND: AddendaType = AddendaType::PaymentInfo;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.text(PAYMENT_RELATED_INFORMATION, &self.payment_related_information)
            .set(SEQUENCE_NUMBER, self.sequence_number)
            .set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_text(PAYMENT_RELATED_INFORMATION, &mut self.payment_related_information);
        row.apply_number(SEQUENCE_NUMBER, &mut self.sequence_number)?;
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)
    }
}

impl AddendaRecord for Addenda98 {
    const KIND: AddendaType = AddendaType::NotificationOfChange;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ORIGINAL_TRACE, &self.original_trace)
            .set(ORIGINAL_RDFI, &self.original_dfi)
            .text(CORRECTED_DATA, &self.corrected_data)
            .set(CHANGE_CODE, &self.change_code)
            .set(TRACE_NUMBER, &self.trace_number);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_text(ORIGINAL_TRACE, &mut self.original_trace);
        row.apply_text(ORIGINAL_RDFI, &mut self.original_dfi);
        row.apply_text(CORRECTED_DATA, &mut self.corrected_data);
        row.apply_text(CHANGE_CODE, &mut self.change_code);
        row.apply_text(TRACE_NUMBER, &mut self.trace_number);
        Ok(())
    }
}

impl AddendaRecord for Addenda98Refused {
    const KIND: AddendaType = AddendaType::RefusedNotificationOfChange;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ORIGINAL_TRACE, &self.original_trace)
            .set(ORIGINAL_RDFI, &self.original_dfi)
            .text(CORRECTED_DATA, &self.corrected_data)
            .set(CHANGE_CODE, &self.change_code)
            .set(TRACE_NUMBER, &self.trace_number)
            .set(REFUSED_CHANGE_CODE, &self.refused_change_code)
            .set(TRACE_SEQUENCE_NUMBER, &self.trace_sequence_number);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_text(ORIGINAL_TRACE, &mut self.original_trace);
        row.apply_text(ORIGINAL_RDFI, &mut self.original_dfi);
        row.apply_text(CORRECTED_DATA, &mut self.corrected_data);
        row.apply_text(CHANGE_CODE, &mut self.change_code);
        row.apply_text(TRACE_NUMBER, &mut self.trace_number);
        row.apply_text(REFUSED_CHANGE_CODE, &mut self.refused_change_code);
        row.apply_text(TRACE_SEQUENCE_NUMBER, &mut self.trace_sequence_number);
        Ok(())
    }
}

impl AddendaRecord for Addenda99 {
    const KIND: AddendaType = AddendaType::Return;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ORIGINAL_TRACE, &self.original_trace)
            .set(ORIGINAL_RDFI, &self.original_dfi)
            .set(RETURN_CODE, &self.return_code)
            .text(ADDENDA_INFORMATION, &self.addenda_information)
            .set(TRACE_NUMBER, &self.trace_number);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_text(ORIGINAL_TRACE, &mut self.original_trace);
        row.apply_text(ORIGINAL_RDFI, &mut self.original_dfi);
        row.apply_text(RETURN_CODE, &mut self.return_code);
        row.apply_text(ADDENDA_INFORMATION, &mut self.addenda_information);
        row.apply_text(TRACE_NUMBER, &mut self.trace_number);
        Ok(())
    }
}

impl AddendaRecord for Addenda99Dishonored {
    const KIND: AddendaType = AddendaType::DishonoredReturn;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.text(ADDENDA_INFORMATION, &self.addenda_information)
            .set(TRACE_NUMBER, &self.trace_number)
            .set(DISHONORED_RETURN_REASON_CODE, &self.dishonored_return_reason_code)
            .set(ORIGINAL_ENTRY_TRACE_NUMBER, &self.original_entry_trace_number)
            .set(
                ORIGINAL_RECEIVING_DFI_IDENTIFICATION,
                &self.original_receiving_dfi_identification,
            )
            .set(RETURN_TRACE_NUMBER, &self.return_trace_number)
            .set(RETURN_SETTLEMENT_DATE, &self.return_settlement_date)
            .set(RETURN_REASON_CODE, &self.return_reason_code);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_text(ADDENDA_INFORMATION, &mut self.addenda_information);
        row.apply_text(TRACE_NUMBER, &mut self.trace_number);
        row.apply_text(DISHONORED_RETURN_REASON_CODE, &mut self.dishonored_return_reason_code);
        row.apply_text(ORIGINAL_ENTRY_TRACE_NUMBER, &mut self.original_entry_trace_number);
        row.apply_text(
            ORIGINAL_RECEIVING_DFI_IDENTIFICATION,
            &mut self.original_receiving_dfi_identification,
        );
        row.apply_text(RETURN_TRACE_NUMBER, &mut self.return_trace_number);
        row.apply_text(RETURN_SETTLEMENT_DATE, &mut self.return_settlement_date);
        row.apply_text(RETURN_REASON_CODE, &mut self.return_reason_code);
        Ok(())
    }
}

impl AddendaRecord for Addenda99Contested {
    const KIND: AddendaType = AddendaType::ContestedDishonoredReturn;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(TRACE_NUMBER, &self.trace_number)
            .set(ORIGINAL_ENTRY_TRACE_NUMBER, &self.original_entry_trace_number)
            .set(
                ORIGINAL_RECEIVING_DFI_IDENTIFICATION,
                &self.original_receiving_dfi_identification,
            )
            .set(RETURN_TRACE_NUMBER, &self.return_trace_number)
            .set(RETURN_SETTLEMENT_DATE, &self.return_settlement_date)
            .set(RETURN_REASON_CODE, &self.return_reason_code)
            .set(CONTESTED_RETURN_CODE, &self.contested_return_code)
            .set(DATE_ORIGINAL_ENTRY_RETURNED, &self.date_original_entry_returned)
            .set(ORIGINAL_SETTLEMENT_DATE, &self.original_settlement_date)
            .set(DISHONORED_RETURN_TRACE_NUMBER, &self.dishonored_return_trace_number)
            .set(DISHONORED_RETURN_SETTLEMENT_DATE, &self.dishonored_return_settlement_date)
            .set(DISHONORED_RETURN_REASON_CODE, &self.dishonored_return_reason_code);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_text(TRACE_NUMBER, &mut self.trace_number);
        row.apply_text(ORIGINAL_ENTRY_TRACE_NUMBER, &mut self.original_entry_trace_number);
        row.apply_text(
            ORIGINAL_RECEIVING_DFI_IDENTIFICATION,
            &mut self.original_receiving_dfi_identification,
        );
        row.apply_text(RETURN_TRACE_NUMBER, &mut self.return_trace_number);
        row.apply_text(RETURN_SETTLEMENT_DATE, &mut self.return_settlement_date);
        row.apply_text(RETURN_REASON_CODE, &mut self.return_reason_code);
        row.apply_text(CONTESTED_RETURN_CODE, &mut self.contested_return_code);
        row.apply_text(DATE_ORIGINAL_ENTRY_RETURNED, &mut self.date_original_entry_returned);
        row.apply_text(ORIGINAL_SETTLEMENT_DATE, &mut self.original_settlement_date);
        row.apply_text(DISHONORED_RETURN_TRACE_NUMBER, &mut self.dishonored_return_trace_number);
        row.apply_text(
            DISHONORED_RETURN_SETTLEMENT_DATE,
            &mut self.dishonored_return_settlement_date,
        );
        row.apply_text(DISHONORED_RETURN_REASON_CODE, &mut self.dishonored_return_reason_code);
        Ok(())
    }
}

// =============================================================================
// IAT Variants
// =============================================================================

impl AddendaRecord for Addenda10 {
    const KIND: AddendaType = AddendaType::IatTransaction;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .set(TRANSACTION_TYPE_CODE, &self.transaction_type_code)
            .set(FOREIGN_PAYMENT_AMOUNT, self.foreign_payment_amount)
            .text(FOREIGN_TRACE_NUMBER, &self.foreign_trace_number)
            .text(RECEIVING_COMPANY_NAME, &self.name);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(TRANSACTION_TYPE_CODE, &mut self.transaction_type_code);
        row.apply_number(FOREIGN_PAYMENT_AMOUNT, &mut self.foreign_payment_amount)?;
        row.apply_text(FOREIGN_TRACE_NUMBER, &mut self.foreign_trace_number);
        row.apply_text(RECEIVING_COMPANY_NAME, &mut self.name);
        Ok(())
    }
}

impl AddendaRecord for Addenda11 {
    const KIND: AddendaType = AddendaType::IatOriginator;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .text(ORIGINATOR_NAME, &self.originator_name)
            .text(ORIGINATOR_STREET_ADDRESS, &self.originator_street_address);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(ORIGINATOR_NAME, &mut self.originator_name);
        row.apply_text(ORIGINATOR_STREET_ADDRESS, &mut self.originator_street_address);
        Ok(())
    }
}

impl AddendaRecord for Addenda12 {
    const KIND: AddendaType = AddendaType::IatOriginatorAddress;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .text(ORIGINATOR_CITY_STATE_PROVINCE, &self.originator_city_state_province)
            .text(ORIGINATOR_COUNTRY_POSTAL_CODE, &self.originator_country_postal_code);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(ORIGINATOR_CITY_STATE_PROVINCE, &mut self.originator_city_state_province);
        row.apply_text(ORIGINATOR_COUNTRY_POSTAL_CODE, &mut self.originator_country_postal_code);
        Ok(())
    }
}

impl AddendaRecord for Addenda13 {
    const KIND: AddendaType = AddendaType::IatOriginatingDfi;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .text(ODFI_NAME, &self.odfi_name)
            .text(ODFI_IDENTIFICATION_NUMBER_QUALIFIER, &self.odfi_id_number_qualifier)
            .text(ODFI_IDENTIFICATION, &self.odfi_identification)
            .text(ODFI_BRANCH_COUNTRY_CODE, &self.odfi_branch_country_code);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(ODFI_NAME, &mut self.odfi_name);
        row.apply_text(ODFI_IDENTIFICATION_NUMBER_QUALIFIER, &mut self.odfi_id_number_qualifier);
        row.apply_text(ODFI_IDENTIFICATION, &mut self.odfi_identification);
        row.apply_text(ODFI_BRANCH_COUNTRY_CODE, &mut self.odfi_branch_country_code);
        Ok(())
    }
}

impl AddendaRecord for Addenda14 {
    const KIND: AddendaType = AddendaType::IatReceivingDfi;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .text(RDFI_NAME, &self.rdfi_name)
            .text(RDFI_IDENTIFICATION_NUMBER_QUALIFIER, &self.rdfi_id_number_qualifier)
            .text(RDFI_IDENTIFICATION, &self.rdfi_identification)
            .text(RDFI_BRANCH_COUNTRY_CODE, &self.rdfi_branch_country_code);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(RDFI_NAME, &mut self.rdfi_name);
        row.apply_text(RDFI_IDENTIFICATION_NUMBER_QUALIFIER, &mut self.rdfi_id_number_qualifier);
        row.apply_text(RDFI_IDENTIFICATION, &mut self.rdfi_identification);
        row.apply_text(RDFI_BRANCH_COUNTRY_CODE, &mut self.rdfi_branch_country_code);
        Ok(())
    }
}

impl AddendaRecord for Addenda15 {
    const KIND: AddendaType = AddendaType::IatReceiver;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .text(RECEIVER_IDENTIFICATION_NUMBER, &self.receiver_id_number)
            .text(RECEIVER_STREET_ADDRESS, &self.receiver_street_address);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(RECEIVER_IDENTIFICATION_NUMBER, &mut self.receiver_id_number);
        row.apply_text(RECEIVER_STREET_ADDRESS, &mut self.receiver_street_address);
        Ok(())
    }
}

impl AddendaRecord for Addenda16 {
    const KIND: AddendaType = AddendaType::IatReceiverAddress;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .text(RECEIVER_CITY_STATE_PROVINCE, &self.receiver_city_state_province)
            .text(RECEIVER_COUNTRY_POSTAL_CODE, &self.receiver_country_postal_code);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(RECEIVER_CITY_STATE_PROVINCE, &mut self.receiver_city_state_province);
        row.apply_text(RECEIVER_COUNTRY_POSTAL_CODE, &mut self.receiver_country_postal_code);
        Ok(())
    }
}

impl AddendaRecord for Addenda17 {
    const KIND: AddendaType = AddendaType::IatPaymentInfo;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .text(PAYMENT_RELATED_INFORMATION, &self.payment_related_information)
            .set(SEQUENCE_NUMBER, self.sequence_number);
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_text(PAYMENT_RELATED_INFORMATION, &mut self.payment_related_information);
        row.apply_number(SEQUENCE_NUMBER, &mut self.sequence_number)
    }
}

impl AddendaRecord for Addenda18 {
    const KIND: AddendaType = AddendaType::IatCorrespondentBank;

    fn type_code(&self) -> &str {
        &self.type_code
    }

    fn encode(&self, row: &mut RowBuilder) {
        row.set(ENTRY_DETAIL_SEQUENCE_NUMBER, self.entry_detail_sequence_number)
            .set(SEQUENCE_NUMBER, self.sequence_number)
            .text(FOREIGN_CORRESPONDENT_BANK_NAME, &self.foreign_correspondent_bank_name)
            .text(
                FOREIGN_CORRESPONDENT_BANK_ID_NUMBER_QUALIFIER,
                &self.foreign_correspondent_bank_id_number_qualifier,
            )
            .text(
                FOREIGN_CORRESPONDENT_BANK_ID_NUMBER,
                &self.foreign_correspondent_bank_id_number,
            )
            .text(
                FOREIGN_CORRESPONDENT_BANK_BRANCH_COUNTRY_CODE,
                &self.foreign_correspondent_bank_branch_country_code,
            );
    }

    fn decode(&mut self, row: &RowReader<'_>) -> ReconstructResult<()> {
        row.apply_number(ENTRY_DETAIL_SEQUENCE_NUMBER, &mut self.entry_detail_sequence_number)?;
        row.apply_number(SEQUENCE_NUMBER, &mut self.sequence_number)?;
        row.apply_text(FOREIGN_CORRESPONDENT_BANK_NAME, &mut self.foreign_correspondent_bank_name);
        row.apply_text(
            FOREIGN_CORRESPONDENT_BANK_ID_NUMBER_QUALIFIER,
            &mut self.foreign_correspondent_bank_id_number_qualifier,
        );
        row.apply_text(
            FOREIGN_CORRESPONDENT_BANK_ID_NUMBER,
            &mut self.foreign_correspondent_bank_id_number,
        );
        row.apply_text(
            FOREIGN_CORRESPONDENT_BANK_BRANCH_COUNTRY_CODE,
            &mut self.foreign_correspondent_bank_branch_country_code,
        );
        Ok(())
    }
}

// =============================================================================
// Encoding (traversal)
// =============================================================================

/// Accumulates the addenda rows of one entry, numbering them as it goes.
struct AddendaRows<'a> {
    schema: &'static TableSchema,
    batch: BatchIndex,
    entry: EntryIndex,
    next: usize,
    rows: &'a mut Vec<Vec<String>>,
}

impl<'a> AddendaRows<'a> {
    fn push<R: AddendaRecord>(&mut self, record: &R) {
        let mut row = RowBuilder::new(self.schema);
        row.set(BATCH_INDEX, self.batch)
            .set(ENTRY_INDEX, self.entry)
            .set(ADDENDA_INDEX, self.next)
            .set(ADDENDA_TYPE, R::KIND.tag())
            .set(TYPE_CODE, record.type_code());
        record.encode(&mut row);
        self.rows.push(row.finish());
        self.next += 1;
    }

    fn push_opt<R: AddendaRecord>(&mut self, record: Option<&R>) {
        if let Some(record) = record {
            self.push(record);
        }
    }

    fn push_all<R: AddendaRecord>(&mut self, records: &[R]) {
        for record in records {
            self.push(record);
        }
    }
}

/// Append one row per addenda of a standard entry, in traversal order.
pub fn encode_standard(
    schema: &'static TableSchema,
    batch: BatchIndex,
    entry_index: EntryIndex,
    entry: &EntryDetail,
    rows: &mut Vec<Vec<String>>,
) {
    let mut out = AddendaRows { schema, batch, entry: entry_index, next: 0, rows };
    out.push_opt(entry.addenda02.as_ref());
    out.push_all(&entry.addenda05);
    out.push_opt(entry.addenda98.as_ref());
    out.push_opt(entry.addenda99.as_ref());
    out.push_opt(entry.addenda98_refused.as_ref());
    out.push_opt(entry.addenda99_dishonored.as_ref());
    out.push_opt(entry.addenda99_contested.as_ref());
}

/// Append one row per addenda of an IAT entry, in traversal order.
pub fn encode_iat(
    schema: &'static TableSchema,
    batch: BatchIndex,
    entry_index: EntryIndex,
    entry: &IatEntryDetail,
    rows: &mut Vec<Vec<String>>,
) {
    let mut out = AddendaRows { schema, batch, entry: entry_index, next: 0, rows };
    out.push_opt(entry.addenda10.as_ref());
    out.push_opt(entry.addenda11.as_ref());
    out.push_opt(entry.addenda12.as_ref());
    out.push_opt(entry.addenda13.as_ref());
    out.push_opt(entry.addenda14.as_ref());
    out.push_opt(entry.addenda15.as_ref());
    out.push_opt(entry.addenda16.as_ref());
    out.push_all(&entry.addenda17);
    out.push_all(&entry.addenda18);
    out.push_opt(entry.addenda98.as_ref());
    out.push_opt(entry.addenda99.as_ref());
}

// =============================================================================
// Decoding (lookup)
// =============================================================================

fn apply<R: AddendaRecord>(target: Option<&mut R>, row: &RowReader<'_>) -> ReconstructResult<bool> {
    match target {
        Some(record) => {
            record.decode(row)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Occurrence of a repeatable variant: `index` minus the addenda before it.
fn occurrence<R>(list: &mut [R], index: AddendaIndex, preceding: usize) -> Option<&mut R> {
    index
        .get()
        .checked_sub(preceding)
        .and_then(|i| list.get_mut(i))
}

/// Number of single-occurrence IAT addenda (10-16) attached to an entry.
fn iat_fixed_count(entry: &IatEntryDetail) -> usize {
    [
        entry.addenda10.is_some(),
        entry.addenda11.is_some(),
        entry.addenda12.is_some(),
        entry.addenda13.is_some(),
        entry.addenda14.is_some(),
        entry.addenda15.is_some(),
        entry.addenda16.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count()
}

/// Apply a row onto the matching addenda of a standard entry.
///
/// Returns `false` when the entry has no addenda of that variant at that
/// position.
pub fn decode_standard(
    entry: &mut EntryDetail,
    kind: AddendaType,
    index: AddendaIndex,
    row: &RowReader<'_>,
) -> ReconstructResult<bool> {
    match kind {
        AddendaType::Terminal => apply(entry.addenda02.as_mut(), row),
        AddendaType::PaymentInfo => {
            let preceding = usize::from(entry.addenda02.is_some());
            apply(occurrence(&mut entry.addenda05, index, preceding), row)
        }
        AddendaType::NotificationOfChange => apply(entry.addenda98.as_mut(), row),
        AddendaType::RefusedNotificationOfChange => apply(entry.addenda98_refused.as_mut(), row),
        AddendaType::Return => apply(entry.addenda99.as_mut(), row),
        AddendaType::DishonoredReturn => apply(entry.addenda99_dishonored.as_mut(), row),
        AddendaType::ContestedDishonoredReturn => apply(entry.addenda99_contested.as_mut(), row),
        _ => Ok(false),
    }
}

/// Apply a row onto the matching addenda of an IAT entry.
pub fn decode_iat(
    entry: &mut IatEntryDetail,
    kind: AddendaType,
    index: AddendaIndex,
    row: &RowReader<'_>,
) -> ReconstructResult<bool> {
    match kind {
        AddendaType::IatTransaction => apply(entry.addenda10.as_mut(), row),
        AddendaType::IatOriginator => apply(entry.addenda11.as_mut(), row),
        AddendaType::IatOriginatorAddress => apply(entry.addenda12.as_mut(), row),
        AddendaType::IatOriginatingDfi => apply(entry.addenda13.as_mut(), row),
        AddendaType::IatReceivingDfi => apply(entry.addenda14.as_mut(), row),
        AddendaType::IatReceiver => apply(entry.addenda15.as_mut(), row),
        AddendaType::IatReceiverAddress => apply(entry.addenda16.as_mut(), row),
        AddendaType::IatPaymentInfo => {
            let preceding = iat_fixed_count(entry);
            apply(occurrence(&mut entry.addenda17, index, preceding), row)
        }
        AddendaType::IatCorrespondentBank => {
            let preceding = iat_fixed_count(entry) + entry.addenda17.len();
            apply(occurrence(&mut entry.addenda18, index, preceding), row)
        }
        AddendaType::NotificationOfChange => apply(entry.addenda98.as_mut(), row),
        AddendaType::Return => apply(entry.addenda99.as_mut(), row),
        _ => Ok(false),
    }
}
