//! Conversion of raw feed entries into canonical [`NearEarthObject`] records.
//!
//! Normalization never fails. Missing or malformed numeric fields become
//! `None`; a malformed value is reported as a debug event and nothing more.

use std::cmp::Ordering;
use std::f64::consts::PI;

use serde_json::Value;
use tracing::debug;

use crate::feed::{RawApproach, RawFeedPage, RawNeo};
use crate::models::NearEarthObject;

/// Bulk density assumed for every body when estimating mass, in kg/m³.
pub const ASSUMED_DENSITY_KG_M3: f64 = 3000.0;

pub const DEFAULT_ORBITING_BODY: &str = "Earth";

/// Normalizes every entry of the page and orders the result by miss distance.
pub fn normalize(page: &RawFeedPage) -> Vec<NearEarthObject> {
    let mut objects: Vec<NearEarthObject> = page
        .near_earth_objects
        .iter()
        .flat_map(|(date_key, entries)| {
            entries
                .iter()
                .map(move |raw| normalize_entry(raw, date_key))
        })
        .collect();
    sort_by_miss_distance(&mut objects);
    objects
}

pub fn normalize_entry(raw: &RawNeo, date_key: &str) -> NearEarthObject {
    let empty = RawApproach::default();
    let approach = raw.close_approach_data.first().unwrap_or(&empty);

    let miss_km = numeric_field(
        &raw.id,
        "miss_distance.kilometers",
        approach.miss_distance.as_ref().and_then(|m| m.kilometers.as_ref()),
    );
    let velocity_kph = numeric_field(
        &raw.id,
        "relative_velocity.kilometers_per_hour",
        approach
            .relative_velocity
            .as_ref()
            .and_then(|v| v.kilometers_per_hour.as_ref()),
    );
    let diameter_km = numeric_field(
        &raw.id,
        "estimated_diameter.kilometers.estimated_diameter_max",
        raw.estimated_diameter
            .as_ref()
            .and_then(|d| d.kilometers.as_ref())
            .and_then(|km| km.estimated_diameter_max.as_ref()),
    );
    let magnitude = numeric_field(
        &raw.id,
        "absolute_magnitude_h",
        raw.absolute_magnitude_h.as_ref(),
    );

    let approach_date = non_empty(approach.close_approach_date_full.as_deref())
        .or_else(|| non_empty(approach.close_approach_date.as_deref()))
        .unwrap_or(date_key)
        .to_owned();

    let orbiting_body = non_empty(approach.orbiting_body.as_deref())
        .unwrap_or(DEFAULT_ORBITING_BODY)
        .to_owned();

    NearEarthObject {
        id: raw.id.clone(),
        name: raw.name.clone(),
        magnitude,
        diameter_km,
        mass_kg: diameter_km.map(estimate_mass_kg),
        is_hazardous: raw.is_potentially_hazardous_asteroid.unwrap_or(false),
        miss_km,
        velocity_kph,
        orbiting_body,
        approach_date,
    }
}

/// Sphere of diameter `diameter_km` at [`ASSUMED_DENSITY_KG_M3`]. This is an
/// order-of-magnitude approximation only.
pub fn estimate_mass_kg(diameter_km: f64) -> f64 {
    let radius_m = diameter_km * 500.0;
    (4.0 / 3.0) * PI * radius_m.powi(3) * ASSUMED_DENSITY_KG_M3
}

/// Stable ascending sort on `miss_km`; records without a distance go last.
pub fn sort_by_miss_distance(objects: &mut [NearEarthObject]) {
    objects.sort_by(|a, b| match (a.miss_km, b.miss_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn numeric_field(id: &str, field: &'static str, value: Option<&Value>) -> Option<f64> {
    let value = value?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Some(v),
        _ => {
            debug!(id, field, raw = %value, "malformed numeric field, treating as absent");
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
