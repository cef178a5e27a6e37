//! Smoke tests: load, quote, and reload paths work together

use kaithari::{
    all_service_options, estimate, validate_table, RateTable, ServiceCode,
    BUILTIN_RATES_YAML,
};
use std::io::Write;

#[test]
fn builtin_yaml_matches_builtin_table() {
    let parsed = RateTable::from_yaml(BUILTIN_RATES_YAML).unwrap();
    assert_eq!(parsed.hash(), RateTable::builtin().hash());
}

#[test]
fn full_checkout_flow() {
    let table = RateTable::builtin();

    // Cart: two saris at 450g, one stole at 120g
    let weight = kaithari::cart_weight_grams(&[(0.45, 2), (0.12, 1)]);
    assert_eq!(weight, 1020);

    let quote = estimate(table, weight, Some("682001"), ServiceCode::Parcel).unwrap();
    assert_eq!(quote.zone.as_str(), "local");
    assert_eq!(quote.label, "Up to 2kg");

    let shown = kaithari::display_price(quote.total);
    assert!(shown >= quote.total);

    let options = all_service_options(table, weight, Some("682001")).unwrap();
    assert!(options.iter().any(|o| o.code == quote.service_code));
}

#[test]
fn table_round_trips_through_a_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(BUILTIN_RATES_YAML.as_bytes()).unwrap();

    let loaded = RateTable::from_path(file.path()).unwrap();
    assert!(!validate_table(&loaded).has_errors());

    let quote = estimate(&loaded, 750, None, ServiceCode::SpeedPost).unwrap();
    assert_eq!(quote.service_name, "Speed Post");
}

#[test]
fn json_form_is_equivalent() {
    let table = RateTable::builtin();
    let json = table.to_json().unwrap();
    let back = RateTable::from_json(&json).unwrap();

    let a = estimate(table, 3200, Some("400001"), ServiceCode::ParcelContractual).unwrap();
    let b = estimate(&back, 3200, Some("400001"), ServiceCode::ParcelContractual).unwrap();
    assert_eq!(a.total, b.total);
    assert_eq!(a.label, b.label);
}
