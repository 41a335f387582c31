use pretty_assertions::assert_eq;

use crate::{enumerations::*, record_types, DataDictionary, Datadesc, PumpEnumeration};

#[test]
fn version() {
    assert_eq!(crate::FRAM_VERSION, "69");
    assert_eq!(Datadesc::VERSION, "69");
}

#[test]
fn log_bolus() {
    let record = Datadesc::record_type(0).unwrap();
    assert_eq!(record, &record_types::LOG_BOLUS);

    assert_eq!(record.ident, "LOG_BOLUS");
    assert_eq!(record.name, "Log Bolus");
    assert_eq!(record.max, 450);
    assert_eq!(record.rectype, "log");
    assert_eq!(record.structure, "s2i4si5b.");
    assert_eq!(
        record.fields,
        &[
            "crc",
            "DateTime",
            "SeqNmbr",
            "BolusID",
            "ClicksDelivered",
            "NowClicksRequested",
            "TimedClicksRequested",
            "EndTime",
            "Type",
            "CompletionCode",
            "duration15MinUnits",
            "SmartBolus",
            "SmartTotalOverride",
        ]
    );
}

#[test]
fn record_types_in_dictionary_order() {
    let idents: Vec<_> = Datadesc::RECORD_TYPES.iter().map(|r| (r.value, r.ident)).collect();
    assert_eq!(
        idents,
        vec![
            (0, "LOG_BOLUS"),
            (1, "LOG_SMART"),
            (2, "LOG_BASAL"),
            (3, "LOG_BASAL_CONFIG"),
            (4, "LOG_ALARM_ALERT"),
            (5, "LOG_PRIME"),
            (6, "LOG_PUMP"),
            (7, "LOG_MISSED_BASAL"),
            (8, "LOG_TIME_EDITS"),
            (9, "USER_SETTINGS"),
            (10, "TIME_MANAGER_DATA"),
        ]
    );
}

#[test]
fn record_lookups() {
    let settings = Datadesc::record_type_by_ident("USER_SETTINGS").unwrap();
    assert_eq!(settings.value, 9);
    assert_eq!(settings.rectype, "settings");
    assert_eq!(settings.fields.len(), 179);

    let time = Datadesc::record_type(10).unwrap();
    assert_eq!(time.structure, "s2is");
    assert_eq!(time.expanded_structure(), "siis");

    assert!(Datadesc::record_type(11).is_none());
    assert!(Datadesc::record_type_by_ident("LOG_UNKNOWN").is_none());
}

#[test]
fn padding_is_not_a_field() {
    // Character arrays expand to one code per character, so only records without them line up
    for record in Datadesc::RECORD_TYPES.iter().filter(|r| !r.structure.contains('z')) {
        let codes = record.expanded_structure().chars().filter(|&c| c != '.').count();
        assert_eq!(codes, record.fields.len(), "{}", record.ident);
    }

    let basal = Datadesc::record_type_by_ident("LOG_BASAL").unwrap();
    assert_eq!(basal.structure, "s2ib.");
    assert_eq!(basal.fields, &["crc", "DateTime", "SeqNmbr", "ClicksDelivered"]);
}

#[test]
fn user_lists() {
    assert_eq!(Datadesc::USER_LISTS.len(), 18);

    let bolus_types = Datadesc::user_list("bt_BolusTypes").unwrap();
    assert_eq!(bolus_types.datatype, "enum8");
    assert_eq!(bolus_types.entry("bt_Combo").map(|e| (e.value, e.name)), Some((2, "Combo")));

    let messages = Datadesc::user_list("aa_Messages").unwrap();
    let last = messages.by_value(35).unwrap();
    assert_eq!(last.ident, "No_active_message");
    assert_eq!(last.name, "No active message");

    let units = Datadesc::user_list("BGUnitsTypes").unwrap();
    assert_eq!(units.datatype, "enum16");
    assert_eq!(units.entry("mg_dL").map(|e| e.name), Some("dL"));
}

#[test]
fn enumerations() {
    assert_eq!(BtBolusTypes::from_value(1).unwrap(), BtBolusTypes::BtTimed);
    assert_eq!(BtBolusTypes::BtUndefined.value(), 3);
    assert_eq!(BtBolusTypes::BtUndefined as u32, 3);
    assert!(BtBolusTypes::from_value(4).is_err());

    assert_eq!(CcCompletionCode::from_value(9).unwrap(), CcCompletionCode::CcUndefined);
    assert_eq!(AcClearCondition::AcMaxLevel.value(), 15);

    let entry = BcEvtType::Bc1TempBasal.entry().unwrap();
    assert_eq!(entry.ident, "bc_1_TempBasal");
    assert_eq!(entry.name, "1_TempBasal");

    assert_eq!(AaMessages::DamagedPumpDropped.value(), 0);
    assert_eq!(AaMessages::NoActiveMessage.entry().map(|e| e.name), Some("No active message"));
}

#[test]
fn enumeration_values_are_positional() {
    for list in Datadesc::USER_LISTS {
        for (i, entry) in list.entries.iter().enumerate() {
            assert_eq!(entry.value, i as u32, "{}::{}", list.name, entry.ident);
        }
    }
}
