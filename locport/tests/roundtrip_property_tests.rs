use locport::types::{LocalizationTable, Platform};
use locport::{convert, decode, encode};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_.]{0,15}").expect("valid key regex")
}

fn plain_value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{1,30}").expect("valid value regex")
}

/// Values mixing every character some format reserves.
fn reserved_value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 '\"&<>@?\\\\\n\t%é😀]{0,30}").expect("valid value regex")
}

fn table_from(values: &BTreeMap<String, String>) -> LocalizationTable {
    values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn plain_values_round_trip_on_every_platform(
        values in prop::collection::btree_map(key_strategy(), plain_value_strategy(), 1..8)
    ) {
        let table = table_from(&values);
        for platform in Platform::ALL {
            let encoded = encode(platform, &table, "fr").map_err(|e| TestCaseError::fail(e.to_string()))?;
            let decoded = decode(platform, &encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(&decoded.table, &table);
        }
    }

    #[test]
    fn reserved_characters_round_trip_on_every_platform(
        values in prop::collection::btree_map(key_strategy(), reserved_value_strategy(), 1..8)
    ) {
        let table = table_from(&values);
        for platform in Platform::ALL {
            let encoded = encode(platform, &table, "fr").map_err(|e| TestCaseError::fail(e.to_string()))?;
            let decoded = decode(platform, &encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(&decoded.table, &table, "platform {}", platform);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn strings_android_portal_chain_preserves_entries(
        values in prop::collection::btree_map(key_strategy(), reserved_value_strategy(), 1..8)
    ) {
        let tmp = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let seed = tmp.path().join("seed.strings");
        let middle = tmp.path().join("middle.xml");
        let json = tmp.path().join("middle.json");
        let output = tmp.path().join("roundtrip.strings");

        let table = table_from(&values);
        std::fs::write(
            &seed,
            encode(Platform::Ios, &table, "en").map_err(|e| TestCaseError::fail(e.to_string()))?,
        )
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

        for (from, to) in [(&seed, &middle), (&middle, &json), (&json, &output)] {
            convert(from, None, to, None, "en").map_err(|e| TestCaseError::fail(e.to_string()))?;
        }

        let actual = locport::codec::read_file(&output, Platform::Ios)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(actual.table, table);
    }
}

#[test]
fn android_escaping_reproduces_literal_value() {
    let table: LocalizationTable = [("mixed", "l'heure \"exacte\" & co\nsuite")]
        .into_iter()
        .collect();
    let encoded = encode(Platform::Android, &table, "fr").unwrap();
    assert!(encoded.contains(r#"l\'heure \"exacte\" &amp; co\nsuite"#));
    assert_eq!(decode(Platform::Android, &encoded).unwrap().table, table);
}
