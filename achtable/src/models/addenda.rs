//! Addenda records and their type tags.
//!
//! Each NACHA addenda variant is its own struct carrying only its own fields.
//! [`Addenda`] is the closed sum over all sixteen of them and [`AddendaType`]
//! is the matching tag enumeration used at the table boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Tags
// =============================================================================

/// Which entry family an addenda table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddendaFamily {
    /// Standard entry detail records (addenda 02, 05, 98, 99 and variants).
    Standard,
    /// International ACH transaction entries (addenda 10-18, 98, 99).
    International,
}

/// Closed enumeration of addenda variants.
///
/// The tag strings are part of the table contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddendaType {
    /// 02: point-of-sale, machine transfer and shared network entries.
    Terminal,
    /// 05: payment related information.
    PaymentInfo,
    /// 98: notification of change.
    NotificationOfChange,
    /// 98 refused: refused notification of change.
    RefusedNotificationOfChange,
    /// 99: return.
    Return,
    /// 99 dishonored: dishonored return.
    DishonoredReturn,
    /// 99 contested: contested dishonored return.
    ContestedDishonoredReturn,
    /// 10: IAT transaction information.
    IatTransaction,
    /// 11: IAT originator name and street address.
    IatOriginator,
    /// 12: IAT originator city, state and country.
    IatOriginatorAddress,
    /// 13: IAT originating DFI.
    IatOriginatingDfi,
    /// 14: IAT receiving DFI.
    IatReceivingDfi,
    /// 15: IAT receiver identification and street address.
    IatReceiver,
    /// 16: IAT receiver city, state and country.
    IatReceiverAddress,
    /// 17: IAT payment related information (up to 2).
    IatPaymentInfo,
    /// 18: IAT foreign correspondent bank (up to 5).
    IatCorrespondentBank,
}

impl AddendaType {
    /// Every variant, standard family first.
    pub const ALL: [AddendaType; 16] = [
        Self::Terminal,
        Self::PaymentInfo,
        Self::NotificationOfChange,
        Self::RefusedNotificationOfChange,
        Self::Return,
        Self::DishonoredReturn,
        Self::ContestedDishonoredReturn,
        Self::IatTransaction,
        Self::IatOriginator,
        Self::IatOriginatorAddress,
        Self::IatOriginatingDfi,
        Self::IatReceivingDfi,
        Self::IatReceiver,
        Self::IatReceiverAddress,
        Self::IatPaymentInfo,
        Self::IatCorrespondentBank,
    ];

    /// Tag written to the `addenda_type` column.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Terminal => "02",
            Self::PaymentInfo => "05",
            Self::NotificationOfChange => "98",
            Self::RefusedNotificationOfChange => "98_refused",
            Self::Return => "99",
            Self::DishonoredReturn => "99_dishonored",
            Self::ContestedDishonoredReturn => "99_contested",
            Self::IatTransaction => "10",
            Self::IatOriginator => "11",
            Self::IatOriginatorAddress => "12",
            Self::IatOriginatingDfi => "13",
            Self::IatReceivingDfi => "14",
            Self::IatReceiver => "15",
            Self::IatReceiverAddress => "16",
            Self::IatPaymentInfo => "17",
            Self::IatCorrespondentBank => "18",
        }
    }

    /// Record type code carried by the variant itself.
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::RefusedNotificationOfChange => "98",
            Self::DishonoredReturn | Self::ContestedDishonoredReturn => "99",
            other => other.tag(),
        }
    }

    /// Parse a tag valid in the given family.
    pub fn from_tag(tag: &str, family: AddendaFamily) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag && kind.allowed_in(family))
    }

    /// Whether entries of `family` may carry this variant.
    pub fn allowed_in(&self, family: AddendaFamily) -> bool {
        match self {
            Self::NotificationOfChange | Self::Return => true,
            Self::Terminal
            | Self::PaymentInfo
            | Self::RefusedNotificationOfChange
            | Self::DishonoredReturn
            | Self::ContestedDishonoredReturn => family == AddendaFamily::Standard,
            _ => family == AddendaFamily::International,
        }
    }

    /// Maximum occurrences per entry, `None` when unbounded.
    pub fn max_per_entry(&self) -> Option<usize> {
        match self {
            Self::PaymentInfo => None,
            Self::IatPaymentInfo => Some(2),
            Self::IatCorrespondentBank => Some(5),
            _ => Some(1),
        }
    }

    /// Whether more than one occurrence may be attached to an entry.
    pub fn is_repeatable(&self) -> bool {
        self.max_per_entry() != Some(1)
    }
}

impl fmt::Display for AddendaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AddendaType {
    type Err = String;

    /// Parses any known tag; 98 and 99 resolve to their shared variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| format!("unknown addenda type '{}'", s))
    }
}

// =============================================================================
// Standard Addenda Records
// =============================================================================

/// Addenda 02: terminal information for POS, MTE and SHR entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda02 {
    pub type_code: String,
    pub reference_information_one: String,
    pub reference_information_two: String,
    pub terminal_identification_code: String,
    pub transaction_serial_number: String,
    pub transaction_date: String,
    pub authorization_code_or_expire_date: String,
    pub terminal_location: String,
    pub terminal_city: String,
    pub terminal_state: String,
    pub trace_number: String,
}

/// Addenda 05: free-form payment related information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda05 {
    pub type_code: String,
    pub payment_related_information: String,
    pub sequence_number: u32,
    pub entry_detail_sequence_number: u32,
}

impl Addenda05 {
    pub fn new(payment_related_information: impl Into<String>, sequence_number: u32) -> Self {
        Self {
            type_code: "05".to_string(),
            payment_related_information: payment_related_information.into(),
            sequence_number,
            entry_detail_sequence_number: 0,
        }
    }
}

/// Addenda 98: notification of change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda98 {
    pub type_code: String,
    pub change_code: String,
    pub original_trace: String,
    pub original_dfi: String,
    pub corrected_data: String,
    pub trace_number: String,
}

/// Addenda 98 refused: refused notification of change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda98Refused {
    pub type_code: String,
    pub refused_change_code: String,
    pub original_trace: String,
    pub original_dfi: String,
    pub corrected_data: String,
    pub change_code: String,
    pub trace_sequence_number: String,
    pub trace_number: String,
}

/// Addenda 99: return.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda99 {
    pub type_code: String,
    pub return_code: String,
    pub original_trace: String,
    /// Not projected to any table; preserved through the working copy.
    pub date_of_death: String,
    pub original_dfi: String,
    pub addenda_information: String,
    pub trace_number: String,
}

/// Addenda 99 dishonored: dishonored return.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda99Dishonored {
    pub type_code: String,
    pub dishonored_return_reason_code: String,
    pub original_entry_trace_number: String,
    pub original_receiving_dfi_identification: String,
    pub return_trace_number: String,
    pub return_settlement_date: String,
    pub return_reason_code: String,
    pub addenda_information: String,
    pub trace_number: String,
}

/// Addenda 99 contested: contested dishonored return.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda99Contested {
    pub type_code: String,
    pub contested_return_code: String,
    pub original_entry_trace_number: String,
    pub date_original_entry_returned: String,
    pub original_receiving_dfi_identification: String,
    pub original_settlement_date: String,
    pub return_trace_number: String,
    pub return_settlement_date: String,
    pub return_reason_code: String,
    pub dishonored_return_trace_number: String,
    pub dishonored_return_settlement_date: String,
    pub dishonored_return_reason_code: String,
    pub trace_number: String,
}

// =============================================================================
// IAT Addenda Records
// =============================================================================

/// Addenda 10: transaction type, foreign amount and receiver name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda10 {
    pub type_code: String,
    pub transaction_type_code: String,
    pub foreign_payment_amount: u64,
    pub foreign_trace_number: String,
    pub name: String,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 11: originator name and street address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda11 {
    pub type_code: String,
    pub originator_name: String,
    pub originator_street_address: String,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 12: originator city, state/province, country and postal code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda12 {
    pub type_code: String,
    pub originator_city_state_province: String,
    pub originator_country_postal_code: String,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 13: originating DFI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda13 {
    pub type_code: String,
    pub odfi_name: String,
    pub odfi_id_number_qualifier: String,
    pub odfi_identification: String,
    pub odfi_branch_country_code: String,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 14: receiving DFI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda14 {
    pub type_code: String,
    pub rdfi_name: String,
    pub rdfi_id_number_qualifier: String,
    pub rdfi_identification: String,
    pub rdfi_branch_country_code: String,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 15: receiver identification number and street address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda15 {
    pub type_code: String,
    pub receiver_id_number: String,
    pub receiver_street_address: String,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 16: receiver city, state/province, country and postal code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda16 {
    pub type_code: String,
    pub receiver_city_state_province: String,
    pub receiver_country_postal_code: String,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 17: IAT payment related information.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda17 {
    pub type_code: String,
    pub payment_related_information: String,
    pub sequence_number: u32,
    pub entry_detail_sequence_number: u32,
}

/// Addenda 18: foreign correspondent bank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Addenda18 {
    pub type_code: String,
    pub foreign_correspondent_bank_name: String,
    pub foreign_correspondent_bank_id_number_qualifier: String,
    pub foreign_correspondent_bank_id_number: String,
    pub foreign_correspondent_bank_branch_country_code: String,
    pub sequence_number: u32,
    pub entry_detail_sequence_number: u32,
}

// =============================================================================
// Tagged Union
// =============================================================================

/// Any addenda record, tagged by variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "record")]
pub enum Addenda {
    Terminal(Addenda02),
    PaymentInfo(Addenda05),
    NotificationOfChange(Addenda98),
    RefusedNotificationOfChange(Addenda98Refused),
    Return(Addenda99),
    DishonoredReturn(Addenda99Dishonored),
    ContestedDishonoredReturn(Addenda99Contested),
    IatTransaction(Addenda10),
    IatOriginator(Addenda11),
    IatOriginatorAddress(Addenda12),
    IatOriginatingDfi(Addenda13),
    IatReceivingDfi(Addenda14),
    IatReceiver(Addenda15),
    IatReceiverAddress(Addenda16),
    IatPaymentInfo(Addenda17),
    IatCorrespondentBank(Addenda18),
}

impl Addenda {
    /// The variant tag.
    pub fn kind(&self) -> AddendaType {
        match self {
            Self::Terminal(_) => AddendaType::Terminal,
            Self::PaymentInfo(_) => AddendaType::PaymentInfo,
            Self::NotificationOfChange(_) => AddendaType::NotificationOfChange,
            Self::RefusedNotificationOfChange(_) => AddendaType::RefusedNotificationOfChange,
            Self::Return(_) => AddendaType::Return,
            Self::DishonoredReturn(_) => AddendaType::DishonoredReturn,
            Self::ContestedDishonoredReturn(_) => AddendaType::ContestedDishonoredReturn,
            Self::IatTransaction(_) => AddendaType::IatTransaction,
            Self::IatOriginator(_) => AddendaType::IatOriginator,
            Self::IatOriginatorAddress(_) => AddendaType::IatOriginatorAddress,
            Self::IatOriginatingDfi(_) => AddendaType::IatOriginatingDfi,
            Self::IatReceivingDfi(_) => AddendaType::IatReceivingDfi,
            Self::IatReceiver(_) => AddendaType::IatReceiver,
            Self::IatReceiverAddress(_) => AddendaType::IatReceiverAddress,
            Self::IatPaymentInfo(_) => AddendaType::IatPaymentInfo,
            Self::IatCorrespondentBank(_) => AddendaType::IatCorrespondentBank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip_per_family() {
        for kind in AddendaType::ALL {
            let family = if kind.allowed_in(AddendaFamily::Standard) {
                AddendaFamily::Standard
            } else {
                AddendaFamily::International
            };
            assert_eq!(AddendaType::from_tag(kind.tag(), family), Some(kind));
        }
    }

    #[test]
    fn test_family_rejects_foreign_tags() {
        assert_eq!(AddendaType::from_tag("17", AddendaFamily::Standard), None);
        assert_eq!(AddendaType::from_tag("05", AddendaFamily::International), None);
        assert_eq!(AddendaType::from_tag("98_refused", AddendaFamily::International), None);
        assert_eq!(
            AddendaType::from_tag("99", AddendaFamily::International),
            Some(AddendaType::Return)
        );
    }

    #[test]
    fn test_repeatable_variants() {
        let repeatable: Vec<_> = AddendaType::ALL.iter().filter(|k| k.is_repeatable()).collect();
        assert_eq!(
            repeatable,
            vec![
                &AddendaType::PaymentInfo,
                &AddendaType::IatPaymentInfo,
                &AddendaType::IatCorrespondentBank
            ]
        );
    }

    #[test]
    fn test_type_code_of_refined_variants() {
        assert_eq!(AddendaType::RefusedNotificationOfChange.type_code(), "98");
        assert_eq!(AddendaType::ContestedDishonoredReturn.type_code(), "99");
        assert_eq!(AddendaType::IatCorrespondentBank.type_code(), "18");
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("99_disputed".parse::<AddendaType>().is_err());
        assert_eq!("99_dishonored".parse::<AddendaType>(), Ok(AddendaType::DishonoredReturn));
    }
}
