//! Fixed column layouts of the seven tables.
//!
//! The layouts are a versioned contract: bump [`SCHEMA_VERSION`] whenever a
//! column is added, renamed or moved. The addenda layouts are shared wide
//! rows, so columns used by related variants (for example `original_trace`
//! for 98 and 99) occupy a single position.

use super::{ColumnType, TableKind};

/// Version of the table layouts below.
///
/// In version 1 the standard addenda layout carries
/// `dishonored_return_reason_code` once, as a column shared by 99 dishonored
/// and 99 contested rows. A layout that repeats it as a trailing 38th column
/// is a different contract, not version 1.
pub const SCHEMA_VERSION: u32 = 1;

/// Column names shared by the schemas, the codec and reconstruction.
pub mod col {
    // Row identity
    pub const BATCH_INDEX: &str = "batch_index";
    pub const ENTRY_INDEX: &str = "entry_index";
    pub const ADDENDA_INDEX: &str = "addenda_index";
    pub const ADDENDA_TYPE: &str = "addenda_type";
    pub const TYPE_CODE: &str = "type_code";

    // File header
    pub const IMMEDIATE_DESTINATION: &str = "immediate_destination";
    pub const IMMEDIATE_ORIGIN: &str = "immediate_origin";
    pub const FILE_CREATION_DATE: &str = "file_creation_date";
    pub const FILE_CREATION_TIME: &str = "file_creation_time";
    pub const FILE_ID_MODIFIER: &str = "file_id_modifier";
    pub const IMMEDIATE_DESTINATION_NAME: &str = "immediate_destination_name";
    pub const IMMEDIATE_ORIGIN_NAME: &str = "immediate_origin_name";
    pub const REFERENCE_CODE: &str = "reference_code";

    // Batch headers
    pub const SERVICE_CLASS_CODE: &str = "service_class_code";
    pub const COMPANY_NAME: &str = "company_name";
    pub const COMPANY_DISCRETIONARY_DATA: &str = "company_discretionary_data";
    pub const COMPANY_IDENTIFICATION: &str = "company_identification";
    pub const STANDARD_ENTRY_CLASS_CODE: &str = "standard_entry_class_code";
    pub const COMPANY_ENTRY_DESCRIPTION: &str = "company_entry_description";
    pub const COMPANY_DESCRIPTIVE_DATE: &str = "company_descriptive_date";
    pub const EFFECTIVE_ENTRY_DATE: &str = "effective_entry_date";
    pub const ORIGINATOR_STATUS_CODE: &str = "originator_status_code";
    pub const ODFI_IDENTIFICATION: &str = "odfi_identification";
    pub const BATCH_NUMBER: &str = "batch_number";
    pub const ENTRY_ADDENDA_COUNT: &str = "entry_addenda_count";
    pub const ENTRY_HASH: &str = "entry_hash";
    pub const TOTAL_DEBIT: &str = "total_debit";
    pub const TOTAL_CREDIT: &str = "total_credit";

    // IAT batch headers
    pub const IAT_INDICATOR: &str = "iat_indicator";
    pub const FOREIGN_EXCHANGE_INDICATOR: &str = "foreign_exchange_indicator";
    pub const FOREIGN_EXCHANGE_REFERENCE_INDICATOR: &str = "foreign_exchange_reference_indicator";
    pub const FOREIGN_EXCHANGE_REFERENCE: &str = "foreign_exchange_reference";
    pub const ISO_DESTINATION_COUNTRY_CODE: &str = "iso_destination_country_code";
    pub const ORIGINATOR_IDENTIFICATION: &str = "originator_identification";
    pub const ISO_ORIGINATING_CURRENCY_CODE: &str = "iso_originating_currency_code";
    pub const ISO_DESTINATION_CURRENCY_CODE: &str = "iso_destination_currency_code";

    // Entries
    pub const TRANSACTION_CODE: &str = "transaction_code";
    pub const RDFI_IDENTIFICATION: &str = "rdfi_identification";
    pub const CHECK_DIGIT: &str = "check_digit";
    pub const DFI_ACCOUNT_NUMBER: &str = "dfi_account_number";
    pub const AMOUNT: &str = "amount";
    pub const IDENTIFICATION_NUMBER: &str = "identification_number";
    pub const INDIVIDUAL_NAME: &str = "individual_name";
    pub const DISCRETIONARY_DATA: &str = "discretionary_data";
    pub const ADDENDA_RECORD_INDICATOR: &str = "addenda_record_indicator";
    pub const TRACE_NUMBER: &str = "trace_number";
    pub const CATEGORY: &str = "category";
    pub const ADDENDA_RECORDS: &str = "addenda_records";
    pub const OFAC_SCREENING_INDICATOR: &str = "ofac_screening_indicator";
    pub const SECONDARY_OFAC_SCREENING_INDICATOR: &str = "secondary_ofac_screening_indicator";

    // Standard addenda
    pub const PAYMENT_RELATED_INFORMATION: &str = "payment_related_information";
    pub const SEQUENCE_NUMBER: &str = "sequence_number";
    pub const ENTRY_DETAIL_SEQUENCE_NUMBER: &str = "entry_detail_sequence_number";
    pub const ORIGINAL_TRACE: &str = "original_trace";
    pub const ORIGINAL_RDFI: &str = "original_rdfi";
    pub const CORRECTED_DATA: &str = "corrected_data";
    pub const CHANGE_CODE: &str = "change_code";
    pub const RETURN_CODE: &str = "return_code";
    pub const ADDENDA_INFORMATION: &str = "addenda_information";
    pub const REFERENCE_INFORMATION_ONE: &str = "reference_information_one";
    pub const REFERENCE_INFORMATION_TWO: &str = "reference_information_two";
    pub const TERMINAL_IDENTIFICATION: &str = "terminal_identification";
    pub const TRANSACTION_SERIAL: &str = "transaction_serial";
    pub const TRANSACTION_DATE: &str = "transaction_date";
    pub const AUTHORIZATION_CODE: &str = "authorization_code";
    pub const TERMINAL_LOCATION: &str = "terminal_location";
    pub const TERMINAL_CITY: &str = "terminal_city";
    pub const TERMINAL_STATE: &str = "terminal_state";
    pub const REFUSED_CHANGE_CODE: &str = "refused_change_code";
    pub const TRACE_SEQUENCE_NUMBER: &str = "trace_sequence_number";
    pub const DISHONORED_RETURN_REASON_CODE: &str = "dishonored_return_reason_code";
    pub const ORIGINAL_ENTRY_TRACE_NUMBER: &str = "original_entry_trace_number";
    pub const ORIGINAL_RECEIVING_DFI_IDENTIFICATION: &str = "original_receiving_dfi_identification";
    pub const RETURN_TRACE_NUMBER: &str = "return_trace_number";
    pub const RETURN_SETTLEMENT_DATE: &str = "return_settlement_date";
    pub const RETURN_REASON_CODE: &str = "return_reason_code";
    pub const CONTESTED_RETURN_CODE: &str = "contested_return_code";
    pub const DATE_ORIGINAL_ENTRY_RETURNED: &str = "date_original_entry_returned";
    pub const ORIGINAL_SETTLEMENT_DATE: &str = "original_settlement_date";
    pub const DISHONORED_RETURN_TRACE_NUMBER: &str = "dishonored_return_trace_number";
    pub const DISHONORED_RETURN_SETTLEMENT_DATE: &str = "dishonored_return_settlement_date";

    // IAT addenda
    pub const TRANSACTION_TYPE_CODE: &str = "transaction_type_code";
    pub const FOREIGN_PAYMENT_AMOUNT: &str = "foreign_payment_amount";
    pub const FOREIGN_TRACE_NUMBER: &str = "foreign_trace_number";
    pub const RECEIVING_COMPANY_NAME: &str = "receiving_company_name";
    pub const ORIGINATOR_NAME: &str = "originator_name";
    pub const ORIGINATOR_STREET_ADDRESS: &str = "originator_street_address";
    pub const ORIGINATOR_CITY_STATE_PROVINCE: &str = "originator_city_state_province";
    pub const ORIGINATOR_COUNTRY_POSTAL_CODE: &str = "originator_country_postal_code";
    pub const ODFI_NAME: &str = "odfi_name";
    pub const ODFI_IDENTIFICATION_NUMBER_QUALIFIER: &str = "odfi_identification_number_qualifier";
    pub const ODFI_BRANCH_COUNTRY_CODE: &str = "odfi_branch_country_code";
    pub const RDFI_NAME: &str = "rdfi_name";
    pub const RDFI_IDENTIFICATION_NUMBER_QUALIFIER: &str = "rdfi_identification_number_qualifier";
    pub const RDFI_BRANCH_COUNTRY_CODE: &str = "rdfi_branch_country_code";
    pub const RECEIVER_IDENTIFICATION_NUMBER: &str = "receiver_identification_number";
    pub const RECEIVER_STREET_ADDRESS: &str = "receiver_street_address";
    pub const RECEIVER_CITY_STATE_PROVINCE: &str = "receiver_city_state_province";
    pub const RECEIVER_COUNTRY_POSTAL_CODE: &str = "receiver_country_postal_code";
    pub const FOREIGN_CORRESPONDENT_BANK_NAME: &str = "foreign_correspondent_bank_name";
    pub const FOREIGN_CORRESPONDENT_BANK_ID_NUMBER_QUALIFIER: &str =
        "foreign_correspondent_bank_id_number_qualifier";
    pub const FOREIGN_CORRESPONDENT_BANK_ID_NUMBER: &str = "foreign_correspondent_bank_id_number";
    pub const FOREIGN_CORRESPONDENT_BANK_BRANCH_COUNTRY_CODE: &str =
        "foreign_correspondent_bank_branch_country_code";
}

// =============================================================================
// Schema Types
// =============================================================================

/// One column of a table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
}

const fn text(name: &'static str) -> ColumnDef {
    ColumnDef { name, column_type: ColumnType::Text }
}

const fn int(name: &'static str) -> ColumnDef {
    ColumnDef { name, column_type: ColumnType::Integer }
}

/// Static layout of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub kind: TableKind,
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.to_string()).collect()
    }

    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|c| c.column_type).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Type of a column by name; unknown columns are text.
    pub fn type_of(&self, name: &str) -> ColumnType {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.column_type)
            .unwrap_or(ColumnType::Text)
    }
}

// =============================================================================
// Layouts
// =============================================================================

use col::*;

pub static FILE_HEADER: TableSchema = TableSchema {
    kind: TableKind::FileHeader,
    columns: &[
        text(IMMEDIATE_DESTINATION),
        text(IMMEDIATE_ORIGIN),
        text(FILE_CREATION_DATE),
        text(FILE_CREATION_TIME),
        text(FILE_ID_MODIFIER),
        text(IMMEDIATE_DESTINATION_NAME),
        text(IMMEDIATE_ORIGIN_NAME),
        text(REFERENCE_CODE),
    ],
};

pub static BATCHES: TableSchema = TableSchema {
    kind: TableKind::Batches,
    columns: &[
        int(BATCH_INDEX),
        int(SERVICE_CLASS_CODE),
        text(COMPANY_NAME),
        text(COMPANY_DISCRETIONARY_DATA),
        text(COMPANY_IDENTIFICATION),
        text(STANDARD_ENTRY_CLASS_CODE),
        text(COMPANY_ENTRY_DESCRIPTION),
        text(COMPANY_DESCRIPTIVE_DATE),
        text(EFFECTIVE_ENTRY_DATE),
        int(ORIGINATOR_STATUS_CODE),
        text(ODFI_IDENTIFICATION),
        int(BATCH_NUMBER),
        // derived, read-only
        int(ENTRY_ADDENDA_COUNT),
        int(ENTRY_HASH),
        int(TOTAL_DEBIT),
        int(TOTAL_CREDIT),
    ],
};

pub static ENTRIES: TableSchema = TableSchema {
    kind: TableKind::Entries,
    columns: &[
        int(BATCH_INDEX),
        int(ENTRY_INDEX),
        int(TRANSACTION_CODE),
        text(RDFI_IDENTIFICATION),
        text(CHECK_DIGIT),
        text(DFI_ACCOUNT_NUMBER),
        int(AMOUNT),
        text(IDENTIFICATION_NUMBER),
        text(INDIVIDUAL_NAME),
        text(DISCRETIONARY_DATA),
        int(ADDENDA_RECORD_INDICATOR),
        text(TRACE_NUMBER),
        text(CATEGORY),
    ],
};

pub static ADDENDA: TableSchema = TableSchema {
    kind: TableKind::Addenda,
    columns: &[
        int(BATCH_INDEX),
        int(ENTRY_INDEX),
        int(ADDENDA_INDEX),
        text(ADDENDA_TYPE),
        text(TYPE_CODE),
        text(PAYMENT_RELATED_INFORMATION),
        int(SEQUENCE_NUMBER),
        int(ENTRY_DETAIL_SEQUENCE_NUMBER),
        // 98 / 99 family
        text(ORIGINAL_TRACE),
        text(ORIGINAL_RDFI),
        text(CORRECTED_DATA),
        text(CHANGE_CODE),
        text(RETURN_CODE),
        text(ADDENDA_INFORMATION),
        text(TRACE_NUMBER),
        // 02
        text(REFERENCE_INFORMATION_ONE),
        text(REFERENCE_INFORMATION_TWO),
        text(TERMINAL_IDENTIFICATION),
        text(TRANSACTION_SERIAL),
        text(TRANSACTION_DATE),
        text(AUTHORIZATION_CODE),
        text(TERMINAL_LOCATION),
        text(TERMINAL_CITY),
        text(TERMINAL_STATE),
        // 98 refused
        text(REFUSED_CHANGE_CODE),
        text(TRACE_SEQUENCE_NUMBER),
        // 99 dishonored / contested
        text(DISHONORED_RETURN_REASON_CODE),
        text(ORIGINAL_ENTRY_TRACE_NUMBER),
        text(ORIGINAL_RECEIVING_DFI_IDENTIFICATION),
        text(RETURN_TRACE_NUMBER),
        text(RETURN_SETTLEMENT_DATE),
        text(RETURN_REASON_CODE),
        // 99 contested
        text(CONTESTED_RETURN_CODE),
        text(DATE_ORIGINAL_ENTRY_RETURNED),
        text(ORIGINAL_SETTLEMENT_DATE),
        text(DISHONORED_RETURN_TRACE_NUMBER),
        text(DISHONORED_RETURN_SETTLEMENT_DATE),
    ],
};

pub static IAT_BATCHES: TableSchema = TableSchema {
    kind: TableKind::IatBatches,
    columns: &[
        int(BATCH_INDEX),
        int(SERVICE_CLASS_CODE),
        text(IAT_INDICATOR),
        text(FOREIGN_EXCHANGE_INDICATOR),
        int(FOREIGN_EXCHANGE_REFERENCE_INDICATOR),
        text(FOREIGN_EXCHANGE_REFERENCE),
        text(ISO_DESTINATION_COUNTRY_CODE),
        text(ORIGINATOR_IDENTIFICATION),
        text(STANDARD_ENTRY_CLASS_CODE),
        text(COMPANY_ENTRY_DESCRIPTION),
        text(ISO_ORIGINATING_CURRENCY_CODE),
        text(ISO_DESTINATION_CURRENCY_CODE),
        text(EFFECTIVE_ENTRY_DATE),
        text(ODFI_IDENTIFICATION),
        int(BATCH_NUMBER),
    ],
};

pub static IAT_ENTRIES: TableSchema = TableSchema {
    kind: TableKind::IatEntries,
    columns: &[
        int(BATCH_INDEX),
        int(ENTRY_INDEX),
        int(TRANSACTION_CODE),
        text(RDFI_IDENTIFICATION),
        text(CHECK_DIGIT),
        int(ADDENDA_RECORDS),
        int(AMOUNT),
        text(DFI_ACCOUNT_NUMBER),
        text(OFAC_SCREENING_INDICATOR),
        text(SECONDARY_OFAC_SCREENING_INDICATOR),
        int(ADDENDA_RECORD_INDICATOR),
        text(TRACE_NUMBER),
        text(CATEGORY),
    ],
};

pub static IAT_ADDENDA: TableSchema = TableSchema {
    kind: TableKind::IatAddenda,
    columns: &[
        int(BATCH_INDEX),
        int(ENTRY_INDEX),
        int(ADDENDA_INDEX),
        text(ADDENDA_TYPE),
        text(TYPE_CODE),
        int(ENTRY_DETAIL_SEQUENCE_NUMBER),
        // 10
        text(TRANSACTION_TYPE_CODE),
        int(FOREIGN_PAYMENT_AMOUNT),
        text(FOREIGN_TRACE_NUMBER),
        text(RECEIVING_COMPANY_NAME),
        // 11, 12
        text(ORIGINATOR_NAME),
        text(ORIGINATOR_STREET_ADDRESS),
        text(ORIGINATOR_CITY_STATE_PROVINCE),
        text(ORIGINATOR_COUNTRY_POSTAL_CODE),
        // 13
        text(ODFI_NAME),
        text(ODFI_IDENTIFICATION_NUMBER_QUALIFIER),
        text(ODFI_IDENTIFICATION),
        text(ODFI_BRANCH_COUNTRY_CODE),
        // 14
        text(RDFI_NAME),
        text(RDFI_IDENTIFICATION_NUMBER_QUALIFIER),
        text(RDFI_IDENTIFICATION),
        text(RDFI_BRANCH_COUNTRY_CODE),
        // 15, 16
        text(RECEIVER_IDENTIFICATION_NUMBER),
        text(RECEIVER_STREET_ADDRESS),
        text(RECEIVER_CITY_STATE_PROVINCE),
        text(RECEIVER_COUNTRY_POSTAL_CODE),
        // 17, 18
        text(PAYMENT_RELATED_INFORMATION),
        int(SEQUENCE_NUMBER),
        text(FOREIGN_CORRESPONDENT_BANK_NAME),
        text(FOREIGN_CORRESPONDENT_BANK_ID_NUMBER_QUALIFIER),
        text(FOREIGN_CORRESPONDENT_BANK_ID_NUMBER),
        text(FOREIGN_CORRESPONDENT_BANK_BRANCH_COUNTRY_CODE),
        // 98, 99
        text(ORIGINAL_TRACE),
        text(ORIGINAL_RDFI),
        text(CORRECTED_DATA),
        text(CHANGE_CODE),
        text(RETURN_CODE),
        text(ADDENDA_INFORMATION),
        text(TRACE_NUMBER),
    ],
};

/// Layout of a table.
pub fn schema_for(kind: TableKind) -> &'static TableSchema {
    match kind {
        TableKind::FileHeader => &FILE_HEADER,
        TableKind::Batches => &BATCHES,
        TableKind::Entries => &ENTRIES,
        TableKind::Addenda => &ADDENDA,
        TableKind::IatBatches => &IAT_BATCHES,
        TableKind::IatEntries => &IAT_ENTRIES,
        TableKind::IatAddenda => &IAT_ADDENDA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_column_names_unique() {
        for kind in TableKind::ALL {
            let schema = schema_for(kind);
            let names: HashSet<_> = schema.columns.iter().map(|c| c.name).collect();
            assert_eq!(names.len(), schema.len(), "duplicate column in {}", kind);
            assert_eq!(schema.kind, kind);
        }
    }

    #[test]
    fn test_dishonored_reason_code_is_shared() {
        let shared = ADDENDA
            .columns
            .iter()
            .filter(|c| c.name == DISHONORED_RETURN_REASON_CODE);
        assert_eq!(shared.count(), 1);
        assert_ne!(ADDENDA.columns[ADDENDA.len() - 1].name, DISHONORED_RETURN_REASON_CODE);
    }

    #[test]
    fn test_index_columns_lead() {
        assert_eq!(schema_for(TableKind::Batches).position(BATCH_INDEX), Some(0));
        for kind in [TableKind::Addenda, TableKind::IatAddenda] {
            let schema = schema_for(kind);
            assert_eq!(schema.position(ENTRY_INDEX), Some(1));
            assert_eq!(schema.position(ADDENDA_INDEX), Some(2));
            assert_eq!(schema.position(ADDENDA_TYPE), Some(3));
        }
    }

    #[test]
    fn test_types() {
        assert_eq!(ENTRIES.type_of(AMOUNT), ColumnType::Integer);
        assert_eq!(ENTRIES.type_of(INDIVIDUAL_NAME), ColumnType::Text);
        assert_eq!(IAT_ADDENDA.type_of(FOREIGN_PAYMENT_AMOUNT), ColumnType::Integer);
        assert_eq!(ADDENDA.type_of("not_a_column"), ColumnType::Text);
        assert!(FILE_HEADER.column_types().iter().all(|t| *t == ColumnType::Text));
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(FILE_HEADER.len(), 8);
        assert_eq!(BATCHES.len(), 16);
        assert_eq!(ENTRIES.len(), 13);
        assert_eq!(ADDENDA.len(), 37);
        assert_eq!(IAT_BATCHES.len(), 15);
        assert_eq!(IAT_ENTRIES.len(), 13);
        assert_eq!(IAT_ADDENDA.len(), 39);
    }
}
