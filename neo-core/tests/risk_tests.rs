use neo_core::risk::label_for;
use neo_core::{score, NearEarthObject, RiskLabel};

fn blank() -> NearEarthObject {
    NearEarthObject {
        id: "1".into(),
        name: "test".into(),
        magnitude: None,
        diameter_km: None,
        mass_kg: None,
        is_hazardous: false,
        miss_km: None,
        velocity_kph: None,
        orbiting_body: "Earth".into(),
        approach_date: "2024-01-01".into(),
    }
}

#[test]
fn all_absent_fields_score_low() {
    let risk = score(&blank());
    assert_eq!(risk.tier, 0);
    assert_eq!(risk.label, RiskLabel::Low);
}

#[test]
fn close_approach_is_floored_to_medium() {
    let neo = NearEarthObject {
        miss_km: Some(900_000.0),
        ..blank()
    };
    let risk = score(&neo);
    assert_eq!(risk.tier, 3);
    assert_eq!(risk.label, RiskLabel::Medium);
}

#[test]
fn floor_applies_even_when_slow_velocity_subtracts() {
    let neo = NearEarthObject {
        miss_km: Some(150_000.0),
        velocity_kph: Some(10_000.0),
        ..blank()
    };
    assert_eq!(score(&neo).tier, 3);
}

#[test]
fn ceiling_example_is_high() {
    let neo = NearEarthObject {
        miss_km: Some(10_000.0),
        diameter_km: Some(1.2),
        mass_kg: Some(2e12),
        is_hazardous: true,
        ..blank()
    };
    let risk = score(&neo);
    assert_eq!(risk.tier, 10);
    assert_eq!(risk.label, RiskLabel::High);
}

#[test]
fn far_objects_get_no_floor() {
    let neo = NearEarthObject {
        miss_km: Some(1_000_000.0),
        velocity_kph: Some(15_000.0),
        ..blank()
    };
    let risk = score(&neo);
    assert_eq!(risk.tier, -1);
    assert_eq!(risk.label, RiskLabel::Low);
}

#[test]
fn band_boundaries() {
    let miss = |km: f64| score(&NearEarthObject { miss_km: Some(km), diameter_km: Some(1.0), ..blank() }).tier;
    // diameter contributes 3 in every case below
    assert_eq!(miss(49_999.0), 6);
    assert_eq!(miss(50_000.0), 5);
    assert_eq!(miss(199_999.0), 5);
    assert_eq!(miss(200_000.0), 4);
    assert_eq!(miss(999_999.0), 4);

    let diameter = |d: f64| score(&NearEarthObject { diameter_km: Some(d), ..blank() }).tier;
    assert_eq!(diameter(0.3), 2);
    assert_eq!(diameter(0.29), 1);
    assert_eq!(diameter(0.14), 1);
    assert_eq!(diameter(0.13), 0);

    let mass = |m: f64| score(&NearEarthObject { mass_kg: Some(m), ..blank() }).tier;
    assert_eq!(mass(1e12), 2);
    assert_eq!(mass(1e10), 1);
    assert_eq!(mass(9e9), 0);

    let velocity = |v: f64| score(&NearEarthObject { velocity_kph: Some(v), ..blank() }).tier;
    assert_eq!(velocity(70_000.0), 1);
    assert_eq!(velocity(20_000.0), -1);
    assert_eq!(velocity(45_000.0), 0);
}

#[test]
fn non_finite_inputs_contribute_nothing() {
    let neo = NearEarthObject {
        miss_km: Some(f64::NAN),
        diameter_km: Some(f64::INFINITY),
        mass_kg: Some(f64::INFINITY),
        velocity_kph: Some(f64::NEG_INFINITY),
        ..blank()
    };
    assert_eq!(score(&neo).tier, 0);
}

#[test]
fn hazard_flag_adds_two() {
    let neo = NearEarthObject {
        is_hazardous: true,
        ..blank()
    };
    assert_eq!(score(&neo).tier, 2);
}

#[test]
fn labels_are_inclusive_on_lower_bound() {
    assert_eq!(label_for(6), RiskLabel::High);
    assert_eq!(label_for(5), RiskLabel::Medium);
    assert_eq!(label_for(3), RiskLabel::Medium);
    assert_eq!(label_for(2), RiskLabel::Low);
    assert_eq!(label_for(-1), RiskLabel::Low);
}
