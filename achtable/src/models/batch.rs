//! Standard (non-IAT) batches and entry detail records.

use serde::{Deserialize, Serialize};

use super::addenda::{
    Addenda, Addenda02, Addenda05, Addenda98, Addenda98Refused, Addenda99, Addenda99Contested,
    Addenda99Dishonored, AddendaFamily, AddendaType,
};
use super::control::BatchControl;
use crate::error::AttachError;

/// Batch header record (type 5).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchHeader {
    pub service_class_code: u16,
    pub company_name: String,
    pub company_discretionary_data: String,
    pub company_identification: String,
    pub standard_entry_class_code: String,
    pub company_entry_description: String,
    pub company_descriptive_date: String,
    pub effective_entry_date: String,
    /// Filled by the receiving operator; not projected to tables.
    pub settlement_date: String,
    pub originator_status_code: u8,
    pub odfi_identification: String,
    pub batch_number: u32,
}

/// Entry detail record (type 6) with its attached addenda.
///
/// Single-occurrence variants live in `Option` slots, payment related
/// information (05) in an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryDetail {
    pub transaction_code: u16,
    pub rdfi_identification: String,
    pub check_digit: String,
    pub dfi_account_number: String,
    /// Amount in minor units (cents).
    pub amount: u64,
    pub identification_number: String,
    pub individual_name: String,
    pub discretionary_data: String,
    pub addenda_record_indicator: u8,
    pub trace_number: String,
    pub category: String,

    pub addenda02: Option<Addenda02>,
    pub addenda05: Vec<Addenda05>,
    pub addenda98: Option<Addenda98>,
    pub addenda98_refused: Option<Addenda98Refused>,
    pub addenda99: Option<Addenda99>,
    pub addenda99_dishonored: Option<Addenda99Dishonored>,
    pub addenda99_contested: Option<Addenda99Contested>,
}

/// Store `value` in `slot` unless it is already occupied.
pub(crate) fn fill_slot<T>(
    slot: &mut Option<T>,
    value: T,
    kind: AddendaType,
) -> Result<(), AttachError> {
    if slot.is_some() {
        return Err(AttachError::SlotOccupied(kind));
    }
    *slot = Some(value);
    Ok(())
}

impl EntryDetail {
    /// Attach an addenda record to its slot.
    ///
    /// Sets `addenda_record_indicator` to 1 on success.
    pub fn attach(&mut self, addenda: Addenda) -> Result<(), AttachError> {
        let kind = addenda.kind();
        if !kind.allowed_in(AddendaFamily::Standard) {
            return Err(AttachError::WrongFamily(kind));
        }
        match addenda {
            Addenda::Terminal(a) => fill_slot(&mut self.addenda02, a, kind)?,
            Addenda::PaymentInfo(a) => self.addenda05.push(a),
            Addenda::NotificationOfChange(a) => fill_slot(&mut self.addenda98, a, kind)?,
            Addenda::RefusedNotificationOfChange(a) => {
                fill_slot(&mut self.addenda98_refused, a, kind)?
            }
            Addenda::Return(a) => fill_slot(&mut self.addenda99, a, kind)?,
            Addenda::DishonoredReturn(a) => fill_slot(&mut self.addenda99_dishonored, a, kind)?,
            Addenda::ContestedDishonoredReturn(a) => {
                fill_slot(&mut self.addenda99_contested, a, kind)?
            }
            _ => return Err(AttachError::WrongFamily(kind)),
        }
        self.addenda_record_indicator = 1;
        Ok(())
    }

    /// Number of addenda records attached to this entry.
    pub fn addenda_count(&self) -> usize {
        usize::from(self.addenda02.is_some())
            + self.addenda05.len()
            + usize::from(self.addenda98.is_some())
            + usize::from(self.addenda98_refused.is_some())
            + usize::from(self.addenda99.is_some())
            + usize::from(self.addenda99_dishonored.is_some())
            + usize::from(self.addenda99_contested.is_some())
    }
}

/// A standard batch: header, entries and derived control record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Batch {
    pub header: BatchHeader,
    pub entries: Vec<EntryDetail>,
    pub control: BatchControl,
}

impl Batch {
    pub fn new(header: BatchHeader) -> Self {
        Self {
            header,
            entries: Vec::new(),
            control: BatchControl::default(),
        }
    }

    pub fn add_entry(&mut self, entry: EntryDetail) {
        self.entries.push(entry);
    }
}
