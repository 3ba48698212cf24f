//! Sample files shared by the transform tests.

use crate::models::*;

pub fn file_header() -> FileHeader {
    FileHeader {
        immediate_destination: "231380104".into(),
        immediate_origin: "121042882".into(),
        file_creation_date: "261018".into(),
        file_creation_time: "0930".into(),
        file_id_modifier: "A".into(),
        immediate_destination_name: "Citadel".into(),
        immediate_origin_name: "Wells Fargo".into(),
        reference_code: "REF1".into(),
    }
}

pub fn batch_header(batch_number: u32) -> BatchHeader {
    BatchHeader {
        service_class_code: 200,
        company_name: "Acme Corp".into(),
        company_discretionary_data: "DISC".into(),
        company_identification: "1234567890".into(),
        standard_entry_class_code: "PPD".into(),
        company_entry_description: "PAYROLL".into(),
        company_descriptive_date: "OCT 26".into(),
        effective_entry_date: "261019".into(),
        settlement_date: "292".into(),
        originator_status_code: 1,
        odfi_identification: "12104288".into(),
        batch_number,
    }
}

pub fn entry(transaction_code: u16, amount: u64, trace: &str) -> EntryDetail {
    EntryDetail {
        transaction_code,
        rdfi_identification: "23138010".into(),
        check_digit: "4".into(),
        dfi_account_number: "81967038518".into(),
        amount,
        identification_number: "ID-77".into(),
        individual_name: "Jane Doe".into(),
        discretionary_data: "S".into(),
        trace_number: trace.into(),
        category: "Forward".into(),
        ..EntryDetail::default()
    }
}

/// An entry carrying every standard variant, with two 05 records.
pub fn full_standard_entry() -> EntryDetail {
    let mut e = entry(27, 4_200, "121042880000002");
    e.attach(Addenda::Terminal(Addenda02 {
        type_code: "02".into(),
        reference_information_one: "REF1".into(),
        reference_information_two: "R2".into(),
        terminal_identification_code: "TERM01".into(),
        transaction_serial_number: "123456".into(),
        transaction_date: "1018".into(),
        authorization_code_or_expire_date: "AUTH01".into(),
        terminal_location: "Main Street".into(),
        terminal_city: "Springfield".into(),
        terminal_state: "IL".into(),
        trace_number: "121042880000002".into(),
    }))
    .unwrap();
    e.attach(Addenda::PaymentInfo(Addenda05 {
        entry_detail_sequence_number: 2,
        ..Addenda05::new("first payment info", 1)
    }))
    .unwrap();
    e.attach(Addenda::PaymentInfo(Addenda05 {
        entry_detail_sequence_number: 2,
        ..Addenda05::new("second payment info", 2)
    }))
    .unwrap();
    e.attach(Addenda::NotificationOfChange(Addenda98 {
        type_code: "98".into(),
        change_code: "C01".into(),
        original_trace: "121042880000001".into(),
        original_dfi: "12104288".into(),
        corrected_data: "1918171614".into(),
        trace_number: "091012980000088".into(),
    }))
    .unwrap();
    e.attach(Addenda::Return(Addenda99 {
        type_code: "99".into(),
        return_code: "R07".into(),
        original_trace: "121042880000001".into(),
        date_of_death: "261001".into(),
        original_dfi: "12104288".into(),
        addenda_information: "Authorization revoked".into(),
        trace_number: "091012980000066".into(),
    }))
    .unwrap();
    e.attach(Addenda::RefusedNotificationOfChange(Addenda98Refused {
        type_code: "98".into(),
        refused_change_code: "C61".into(),
        original_trace: "121042880000001".into(),
        original_dfi: "12104288".into(),
        corrected_data: "1918171614".into(),
        change_code: "C01".into(),
        trace_sequence_number: "0000001".into(),
        trace_number: "091012980000089".into(),
    }))
    .unwrap();
    e.attach(Addenda::DishonoredReturn(Addenda99Dishonored {
        type_code: "99".into(),
        dishonored_return_reason_code: "R61".into(),
        original_entry_trace_number: "121042880000001".into(),
        original_receiving_dfi_identification: "23138010".into(),
        return_trace_number: "091012980000066".into(),
        return_settlement_date: "292".into(),
        return_reason_code: "R07".into(),
        addenda_information: "Misrouted return".into(),
        trace_number: "121042880000003".into(),
    }))
    .unwrap();
    e.attach(Addenda::ContestedDishonoredReturn(Addenda99Contested {
        type_code: "99".into(),
        contested_return_code: "R71".into(),
        original_entry_trace_number: "121042880000001".into(),
        date_original_entry_returned: "261010".into(),
        original_receiving_dfi_identification: "23138010".into(),
        original_settlement_date: "283".into(),
        return_trace_number: "091012980000066".into(),
        return_settlement_date: "292".into(),
        return_reason_code: "R07".into(),
        dishonored_return_trace_number: "121042880000003".into(),
        dishonored_return_settlement_date: "295".into(),
        dishonored_return_reason_code: "R61".into(),
        trace_number: "091012980000099".into(),
    }))
    .unwrap();
    e
}

pub fn iat_batch_header() -> IatBatchHeader {
    IatBatchHeader {
        service_class_code: 220,
        iat_indicator: "IAT".into(),
        foreign_exchange_indicator: "FF".into(),
        foreign_exchange_reference_indicator: 3,
        foreign_exchange_reference: "REF".into(),
        iso_destination_country_code: "US".into(),
        originator_identification: "123456789".into(),
        standard_entry_class_code: "IAT".into(),
        company_entry_description: "TRADEPAYMT".into(),
        iso_originating_currency_code: "CAD".into(),
        iso_destination_currency_code: "USD".into(),
        effective_entry_date: "261019".into(),
        settlement_date: "".into(),
        originator_status_code: 1,
        odfi_identification: "23138010".into(),
        batch_number: 3,
    }
}

/// An IAT entry carrying every international variant, two 17s and three 18s.
pub fn full_iat_entry() -> IatEntryDetail {
    let mut e = IatEntryDetail {
        transaction_code: 27,
        rdfi_identification: "12104288".into(),
        check_digit: "2".into(),
        addenda_records: 12,
        amount: 100_000,
        dfi_account_number: "123456789".into(),
        ofac_screening_indicator: "1".into(),
        secondary_ofac_screening_indicator: "0".into(),
        trace_number: "231380100000001".into(),
        category: "Forward".into(),
        ..IatEntryDetail::default()
    };
    let seq = 1;
    e.attach(Addenda::IatTransaction(Addenda10 {
        type_code: "10".into(),
        transaction_type_code: "ANN".into(),
        foreign_payment_amount: 100_000,
        foreign_trace_number: "928383-23938".into(),
        name: "BEK Enterprises".into(),
        entry_detail_sequence_number: seq,
    }))
    .unwrap();
    e.attach(Addenda::IatOriginator(Addenda11 {
        type_code: "11".into(),
        originator_name: "BEK Solutions".into(),
        originator_street_address: "15 West Place Street".into(),
        entry_detail_sequence_number: seq,
    }))
    .unwrap();
    e.attach(Addenda::IatOriginatorAddress(Addenda12 {
        type_code: "12".into(),
        originator_city_state_province: "JacobsTown*PA\\".into(),
        originator_country_postal_code: "US*19305\\".into(),
        entry_detail_sequence_number: seq,
    }))
    .unwrap();
    e.attach(Addenda::IatOriginatingDfi(Addenda13 {
        type_code: "13".into(),
        odfi_name: "Wells Fargo".into(),
        odfi_id_number_qualifier: "01".into(),
        odfi_identification: "121042882".into(),
        odfi_branch_country_code: "US".into(),
        entry_detail_sequence_number: seq,
    }))
    .unwrap();
    e.attach(Addenda::IatReceivingDfi(Addenda14 {
        type_code: "14".into(),
        rdfi_name: "Citadel Bank".into(),
        rdfi_id_number_qualifier: "01".into(),
        rdfi_identification: "231380104".into(),
        rdfi_branch_country_code: "CA".into(),
        entry_detail_sequence_number: seq,
    }))
    .unwrap();
    e.attach(Addenda::IatReceiver(Addenda15 {
        type_code: "15".into(),
        receiver_id_number: "987465493213987".into(),
        receiver_street_address: "2121 Front Street".into(),
        entry_detail_sequence_number: seq,
    }))
    .unwrap();
    e.attach(Addenda::IatReceiverAddress(Addenda16 {
        type_code: "16".into(),
        receiver_city_state_province: "LetterTown*AB\\".into(),
        receiver_country_postal_code: "CA*80014\\".into(),
        entry_detail_sequence_number: seq,
    }))
    .unwrap();
    for (n, text) in ["first 17", "second 17"].iter().enumerate() {
        e.attach(Addenda::IatPaymentInfo(Addenda17 {
            type_code: "17".into(),
            payment_related_information: text.to_string(),
            sequence_number: n as u32 + 1,
            entry_detail_sequence_number: seq,
        }))
        .unwrap();
    }
    for (n, bank) in ["Bank A", "Bank B", "Bank C"].iter().enumerate() {
        e.attach(Addenda::IatCorrespondentBank(Addenda18 {
            type_code: "18".into(),
            foreign_correspondent_bank_name: bank.to_string(),
            foreign_correspondent_bank_id_number_qualifier: "01".into(),
            foreign_correspondent_bank_id_number: format!("98765432{}", n),
            foreign_correspondent_bank_branch_country_code: "PL".into(),
            sequence_number: n as u32 + 1,
            entry_detail_sequence_number: seq,
        }))
        .unwrap();
    }
    e.attach(Addenda::Return(Addenda99 {
        type_code: "99".into(),
        return_code: "R01".into(),
        original_trace: "231380100000001".into(),
        original_dfi: "12104288".into(),
        addenda_information: "Insufficient funds".into(),
        trace_number: "121042880000001".into(),
        ..Addenda99::default()
    }))
    .unwrap();
    e
}

/// Two standard batches and one IAT batch, controls already computed.
pub fn sample_file() -> AchFile {
    let mut file = AchFile::new(file_header());

    let mut first = Batch::new(batch_header(1));
    first.add_entry(entry(22, 100_000, "121042880000001"));
    first.add_entry(full_standard_entry());
    file.add_batch(first);

    let mut second = Batch::new(batch_header(2));
    second.add_entry(entry(32, 7_500, "121042880000004"));
    file.add_batch(second);

    let mut iat = IatBatch::new(iat_batch_header());
    iat.add_entry(full_iat_entry());
    file.add_iat_batch(iat);

    file.recalculate().unwrap();
    file
}

/// One batch, one entry of 100000000 with a single 05 addenda.
pub fn single_payment_file() -> AchFile {
    let mut file = AchFile::new(file_header());
    let mut batch = Batch::new(batch_header(1));
    let mut e = entry(22, 100_000_000, "121042880000001");
    e.attach(Addenda::PaymentInfo(Addenda05::new("Original Payment Info", 1)))
        .unwrap();
    batch.add_entry(e);
    file.add_batch(batch);
    file.recalculate().unwrap();
    file
}
