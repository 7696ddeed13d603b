use std::f64::consts::PI;

use neo_core::normalize::estimate_mass_kg;
use neo_core::{normalize, normalize_entry, RawFeedPage, RawNeo};
use serde_json::json;

fn raw(value: serde_json::Value) -> RawNeo {
    serde_json::from_value(value).unwrap()
}

fn with_miss(id: &str, miss: Option<&str>) -> serde_json::Value {
    match miss {
        Some(km) => json!({
            "id": id,
            "name": format!("({id})"),
            "close_approach_data": [{ "miss_distance": { "kilometers": km } }]
        }),
        None => json!({ "id": id, "name": format!("({id})") }),
    }
}

#[test]
fn entry_without_optional_fields_degrades_to_none() {
    let neo = normalize_entry(&raw(json!({ "id": "3542519", "name": "(2010 PK9)" })), "2024-01-03");

    assert_eq!(neo.id, "3542519");
    assert_eq!(neo.miss_km, None);
    assert_eq!(neo.velocity_kph, None);
    assert_eq!(neo.diameter_km, None);
    assert_eq!(neo.mass_kg, None);
    assert_eq!(neo.magnitude, None);
    assert!(!neo.is_hazardous);
    assert_eq!(neo.orbiting_body, "Earth");
    assert_eq!(neo.approach_date, "2024-01-03");
}

#[test]
fn full_upstream_entry_is_mapped() {
    let entry = raw(json!({
        "id": "2465633",
        "name": "465633 (2009 JR5)",
        "absolute_magnitude_h": 20.48,
        "estimated_diameter": {
            "kilometers": { "estimated_diameter_min": 0.2130860292, "estimated_diameter_max": 0.4764748465 }
        },
        "is_potentially_hazardous_asteroid": true,
        "close_approach_data": [{
            "close_approach_date": "2024-01-05",
            "close_approach_date_full": "2024-Jan-05 20:34",
            "relative_velocity": { "kilometers_per_hour": "65260.5557118576" },
            "miss_distance": { "kilometers": "45290298.225725659" },
            "orbiting_body": "Mars"
        }]
    }));

    let neo = normalize_entry(&entry, "2024-01-05");
    assert_eq!(neo.name, "465633 (2009 JR5)");
    assert_eq!(neo.magnitude, Some(20.48));
    assert_eq!(neo.diameter_km, Some(0.4764748465));
    assert!(neo.is_hazardous);
    assert!((neo.miss_km.unwrap() - 45_290_298.225725659).abs() < 1e-6);
    assert!((neo.velocity_kph.unwrap() - 65_260.5557118576).abs() < 1e-6);
    assert_eq!(neo.orbiting_body, "Mars");
    assert_eq!(neo.approach_date, "2024-Jan-05 20:34");
    assert!(neo.mass_kg.is_some());
}

#[test]
fn approach_date_falls_back_to_date_only_field() {
    let entry = raw(json!({
        "id": "1",
        "name": "a",
        "close_approach_data": [{ "close_approach_date": "2024-01-02", "close_approach_date_full": "" }]
    }));
    assert_eq!(normalize_entry(&entry, "2024-01-01").approach_date, "2024-01-02");
}

#[test]
fn malformed_numbers_become_none() {
    let entry = raw(json!({
        "id": "1",
        "name": "a",
        "absolute_magnitude_h": "bright",
        "estimated_diameter": { "kilometers": { "estimated_diameter_max": "NaN" } },
        "close_approach_data": [{
            "relative_velocity": { "kilometers_per_hour": "inf" },
            "miss_distance": { "kilometers": "not a number" }
        }]
    }));

    let neo = normalize_entry(&entry, "2024-01-01");
    assert_eq!(neo.miss_km, None);
    assert_eq!(neo.velocity_kph, None);
    assert_eq!(neo.diameter_km, None);
    assert_eq!(neo.mass_kg, None);
    assert_eq!(neo.magnitude, None);
}

#[test]
fn numeric_ids_are_accepted() {
    let neo = normalize_entry(&raw(json!({ "id": 54016, "name": "x" })), "2024-01-01");
    assert_eq!(neo.id, "54016");
}

#[test]
fn mass_of_one_kilometre_body() {
    let expected = (4.0 / 3.0) * PI * 500f64.powi(3) * 3000.0;
    let mass = estimate_mass_kg(1.0);
    assert!((mass - expected).abs() / expected < 1e-12);
    assert!((mass - 1.5708e12).abs() < 1e8);

    let neo = normalize_entry(
        &raw(json!({
            "id": "1",
            "name": "a",
            "estimated_diameter": { "kilometers": { "estimated_diameter_max": 1.0 } }
        })),
        "2024-01-01",
    );
    assert!((neo.mass_kg.unwrap() - expected).abs() / expected < 1e-12);
}

#[test]
fn output_sorted_by_miss_distance_with_missing_last() {
    let page: RawFeedPage = serde_json::from_value(json!({
        "element_count": 5,
        "near_earth_objects": {
            "2024-01-01": [
                with_miss("a", None),
                with_miss("b", Some("500")),
                with_miss("c", Some("100")),
                with_miss("d", None),
                with_miss("e", Some("50"))
            ]
        }
    }))
    .unwrap();

    let objects = normalize(&page);
    let misses: Vec<Option<f64>> = objects.iter().map(|n| n.miss_km).collect();
    assert_eq!(misses, vec![Some(50.0), Some(100.0), Some(500.0), None, None]);

    let ids: Vec<&str> = objects.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["e", "c", "b", "a", "d"]);
}

#[test]
fn repeated_objects_across_dates_are_kept() {
    let page: RawFeedPage = serde_json::from_value(json!({
        "element_count": 2,
        "near_earth_objects": {
            "2024-01-01": [with_miss("same", Some("10"))],
            "2024-01-02": [with_miss("same", Some("20"))]
        }
    }))
    .unwrap();

    let objects = normalize(&page);
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].approach_date, "2024-01-01");
    assert_eq!(objects[1].approach_date, "2024-01-02");
}

#[test]
fn empty_page_normalizes_to_empty_list() {
    assert!(normalize(&RawFeedPage::default()).is_empty());
}

#[test]
fn null_name_and_approach_list_do_not_reject_the_page() {
    let page: RawFeedPage = serde_json::from_value(json!({
        "element_count": 2,
        "near_earth_objects": {
            "2024-01-04": [
                { "id": "1", "name": null, "close_approach_data": [{ "miss_distance": { "kilometers": "900" } }] },
                { "id": "2", "name": "(2024 AB)", "close_approach_data": null }
            ]
        }
    }))
    .expect("nulls degrade instead of failing");

    let objects = normalize(&page);
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0].id, "1");
    assert_eq!(objects[0].name, "");
    assert_eq!(objects[0].miss_km, Some(900.0));
    assert_eq!(objects[1].name, "(2024 AB)");
    assert_eq!(objects[1].miss_km, None);
    assert_eq!(objects[1].approach_date, "2024-01-04");
}
