//! End-to-end behavior of the estimator against the builtin tariff

use kaithari::{
    all_service_options, display_price, district_for_pincode, estimate, is_local_zone,
    rate_for_slab, RateTable, ServiceCode, Zone,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("680001", true)] // Thrissur
#[case("682016", true)] // Ernakulam
#[case("695024", true)] // Thiruvananthapuram
#[case("400001", false)] // Mumbai
#[case("110001", false)] // Delhi
#[case("560038", false)] // Bengaluru
fn zone_classification_is_prefix_based(#[case] pincode: &str, #[case] local: bool) {
    assert_eq!(is_local_zone(RateTable::builtin(), pincode), local);
}

#[test]
fn zero_weight_charges_second_slab_not_first() {
    let table = RateTable::builtin();
    let quote = estimate(table, 0, Some("680001"), ServiceCode::Parcel).unwrap();
    let slabs = &table.service(ServiceCode::Parcel).unwrap().local.weight_slabs;
    assert_eq!(quote.total, slabs[1].total);
    assert_ne!(quote.total, slabs[0].total);
    assert_eq!(quote.label, slabs[1].label);
}

#[rstest]
#[case(ServiceCode::Parcel)]
#[case(ServiceCode::SpeedPost)]
#[case(ServiceCode::ParcelContractual)]
fn rates_are_monotone_in_weight(#[case] code: ServiceCode) {
    let table = RateTable::builtin();
    for zone in [Zone::Local, Zone::Outstation] {
        let mut last = 0;
        for weight in (250..12_000).step_by(250) {
            let total = rate_for_slab(table, code, zone, weight).unwrap();
            assert!(
                total >= last,
                "{} {} dropped from {} to {} at {}g",
                code,
                zone,
                last,
                total,
                weight
            );
            last = total;
        }
    }
}

#[test]
fn ceiling_extrapolation_rounds_partial_kg_up() {
    let table = RateTable::builtin();
    let rates = &table.service(ServiceCode::Parcel).unwrap().local;
    let ceiling = rates.weight_slabs.last().unwrap();
    let t = ceiling.total;
    let a = rates.additional_per_kg;
    assert_eq!(ceiling.max_grams, 5000);

    // 0.8kg over rounds to one full extra kg
    assert_eq!(
        rate_for_slab(table, ServiceCode::Parcel, Zone::Local, 5800).unwrap(),
        t + a
    );
    // exactly one kg over
    assert_eq!(
        rate_for_slab(table, ServiceCode::Parcel, Zone::Local, 6000).unwrap(),
        t + a
    );
    // one gram past it starts the second extra kg
    assert_eq!(
        rate_for_slab(table, ServiceCode::Parcel, Zone::Local, 6001).unwrap(),
        t + 2 * a
    );
}

#[test]
fn missing_pincode_defaults_to_local() {
    let quote = estimate(RateTable::builtin(), 1000, None, ServiceCode::Parcel).unwrap();
    assert_eq!(quote.zone, Zone::Local);
}

#[test]
fn options_are_cheapest_first_and_cover_all_codes() {
    let options = all_service_options(RateTable::builtin(), 1000, Some("680001")).unwrap();
    assert_eq!(options.len(), 3);
    assert!(options.windows(2).all(|w| w[0].total <= w[1].total));

    let mut codes: Vec<&str> = options.iter().map(|o| o.code.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["parcel", "parcel_contractual", "speed_post"]);
}

#[test]
fn display_buffer_is_rounded_multiple_of_ten() {
    for raw in [0, 1, 7, 45, 60, 99, 140, 215, 999] {
        let shown = display_price(raw);
        assert_eq!(shown % 10, 0);
        assert!(shown >= raw);
    }
    // Spot-check the formula against hand-computed values
    assert_eq!(display_price(45), 60);
    assert_eq!(display_price(90), 120);
}

#[test]
fn district_lookup_never_affects_price() {
    let table = RateTable::builtin();

    // Local prefix, but not enumerated under any district
    let unlisted = "680777";
    assert!(is_local_zone(table, unlisted));
    assert_eq!(district_for_pincode(table, unlisted), None);

    let listed_quote = estimate(table, 1000, Some("680001"), ServiceCode::Parcel).unwrap();
    let unlisted_quote = estimate(table, 1000, Some(unlisted), ServiceCode::Parcel).unwrap();
    assert_eq!(listed_quote.total, unlisted_quote.total);
    assert_eq!(listed_quote.zone, unlisted_quote.zone);
}

#[test]
fn estimate_serializes_with_wire_field_values() {
    let quote = estimate(RateTable::builtin(), 750, Some("400001"), ServiceCode::SpeedPost)
        .unwrap();
    let json: serde_json::Value = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["zone"], "outstation");
    assert_eq!(json["service_code"], "speed_post");
    assert_eq!(json["service_name"], "Speed Post");
    assert!(json["total"].is_u64());
}
