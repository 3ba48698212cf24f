//! International ACH transaction (IAT) batches and entries.

use serde::{Deserialize, Serialize};

use super::addenda::{
    Addenda, Addenda10, Addenda11, Addenda12, Addenda13, Addenda14, Addenda15, Addenda16,
    Addenda17, Addenda18, Addenda98, Addenda99, AddendaFamily, AddendaType,
};
use super::batch::fill_slot;
use super::control::BatchControl;
use crate::error::AttachError;

/// IAT batch header record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IatBatchHeader {
    pub service_class_code: u16,
    pub iat_indicator: String,
    pub foreign_exchange_indicator: String,
    pub foreign_exchange_reference_indicator: u8,
    pub foreign_exchange_reference: String,
    pub iso_destination_country_code: String,
    pub originator_identification: String,
    pub standard_entry_class_code: String,
    pub company_entry_description: String,
    pub iso_originating_currency_code: String,
    pub iso_destination_currency_code: String,
    pub effective_entry_date: String,
    /// Not projected to tables.
    pub settlement_date: String,
    /// Not projected to tables.
    pub originator_status_code: u8,
    pub odfi_identification: String,
    pub batch_number: u32,
}

/// IAT entry detail record with its mandatory and optional addenda.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IatEntryDetail {
    pub transaction_code: u16,
    pub rdfi_identification: String,
    pub check_digit: String,
    pub addenda_records: u16,
    pub amount: u64,
    pub dfi_account_number: String,
    pub ofac_screening_indicator: String,
    pub secondary_ofac_screening_indicator: String,
    pub addenda_record_indicator: u8,
    pub trace_number: String,
    pub category: String,

    pub addenda10: Option<Addenda10>,
    pub addenda11: Option<Addenda11>,
    pub addenda12: Option<Addenda12>,
    pub addenda13: Option<Addenda13>,
    pub addenda14: Option<Addenda14>,
    pub addenda15: Option<Addenda15>,
    pub addenda16: Option<Addenda16>,
    pub addenda17: Vec<Addenda17>,
    pub addenda18: Vec<Addenda18>,
    pub addenda98: Option<Addenda98>,
    pub addenda99: Option<Addenda99>,
}

/// Push onto a bounded list.
fn push_bounded<T>(
    list: &mut Vec<T>,
    value: T,
    max: usize,
    kind: AddendaType,
) -> Result<(), AttachError> {
    if list.len() >= max {
        return Err(AttachError::CapacityExceeded { kind, max });
    }
    list.push(value);
    Ok(())
}

impl IatEntryDetail {
    /// Attach an addenda record to its slot, enforcing the 17/18 limits.
    pub fn attach(&mut self, addenda: Addenda) -> Result<(), AttachError> {
        let kind = addenda.kind();
        if !kind.allowed_in(AddendaFamily::International) {
            return Err(AttachError::WrongFamily(kind));
        }
        let max = kind.max_per_entry().unwrap_or(usize::MAX);
        match addenda {
            Addenda::IatTransaction(a) => fill_slot(&mut self.addenda10, a, kind)?,
            Addenda::IatOriginator(a) => fill_slot(&mut self.addenda11, a, kind)?,
            Addenda::IatOriginatorAddress(a) => fill_slot(&mut self.addenda12, a, kind)?,
            Addenda::IatOriginatingDfi(a) => fill_slot(&mut self.addenda13, a, kind)?,
            Addenda::IatReceivingDfi(a) => fill_slot(&mut self.addenda14, a, kind)?,
            Addenda::IatReceiver(a) => fill_slot(&mut self.addenda15, a, kind)?,
            Addenda::IatReceiverAddress(a) => fill_slot(&mut self.addenda16, a, kind)?,
            Addenda::IatPaymentInfo(a) => push_bounded(&mut self.addenda17, a, max, kind)?,
            Addenda::IatCorrespondentBank(a) => push_bounded(&mut self.addenda18, a, max, kind)?,
            Addenda::NotificationOfChange(a) => fill_slot(&mut self.addenda98, a, kind)?,
            Addenda::Return(a) => fill_slot(&mut self.addenda99, a, kind)?,
            _ => return Err(AttachError::WrongFamily(kind)),
        }
        self.addenda_record_indicator = 1;
        Ok(())
    }

    /// Number of addenda records attached to this entry.
    pub fn addenda_count(&self) -> usize {
        [
            self.addenda10.is_some(),
            self.addenda11.is_some(),
            self.addenda12.is_some(),
            self.addenda13.is_some(),
            self.addenda14.is_some(),
            self.addenda15.is_some(),
            self.addenda16.is_some(),
            self.addenda98.is_some(),
            self.addenda99.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
            + self.addenda17.len()
            + self.addenda18.len()
    }
}

/// An IAT batch: header, entries and derived control record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IatBatch {
    pub header: IatBatchHeader,
    pub entries: Vec<IatEntryDetail>,
    pub control: BatchControl,
}

impl IatBatch {
    pub fn new(header: IatBatchHeader) -> Self {
        Self {
            header,
            entries: Vec::new(),
            control: BatchControl::default(),
        }
    }

    pub fn add_entry(&mut self, entry: IatEntryDetail) {
        self.entries.push(entry);
    }
}
