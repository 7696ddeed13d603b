use crate::models::{NearEarthObject, RiskAssessment, RiskLabel};

pub const HIGH_THRESHOLD: i32 = 6;
pub const MEDIUM_THRESHOLD: i32 = 3;

/// Any approach closer than this is reported as at least `Medium`.
pub const CLOSE_APPROACH_KM: f64 = 1_000_000.0;

/// Additive point score over distance, size, mass, speed and the upstream
/// hazard flag. Absent or non-finite inputs contribute nothing.
pub fn score(neo: &NearEarthObject) -> RiskAssessment {
    let miss = finite(neo.miss_km);

    let mut tier = miss_points(miss)
        + diameter_points(finite(neo.diameter_km))
        + mass_points(finite(neo.mass_kg))
        + velocity_points(finite(neo.velocity_kph));
    if neo.is_hazardous {
        tier += 2;
    }

    if matches!(miss, Some(km) if km < CLOSE_APPROACH_KM) {
        tier = tier.max(MEDIUM_THRESHOLD);
    }

    RiskAssessment {
        label: label_for(tier),
        tier,
    }
}

pub fn label_for(tier: i32) -> RiskLabel {
    if tier >= HIGH_THRESHOLD {
        RiskLabel::High
    } else if tier >= MEDIUM_THRESHOLD {
        RiskLabel::Medium
    } else {
        RiskLabel::Low
    }
}

fn miss_points(miss_km: Option<f64>) -> i32 {
    match miss_km {
        Some(km) if km < 50_000.0 => 3,
        Some(km) if km < 200_000.0 => 2,
        Some(km) if km < CLOSE_APPROACH_KM => 1,
        _ => 0,
    }
}

fn diameter_points(diameter_km: Option<f64>) -> i32 {
    match diameter_km {
        Some(d) if d >= 1.0 => 3,
        Some(d) if d >= 0.3 => 2,
        Some(d) if d >= 0.14 => 1,
        _ => 0,
    }
}

fn mass_points(mass_kg: Option<f64>) -> i32 {
    match mass_kg {
        Some(m) if m >= 1e12 => 2,
        Some(m) if m >= 1e10 => 1,
        _ => 0,
    }
}

fn velocity_points(velocity_kph: Option<f64>) -> i32 {
    match velocity_kph {
        Some(v) if v >= 70_000.0 => 1,
        Some(v) if v <= 20_000.0 => -1,
        _ => 0,
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
