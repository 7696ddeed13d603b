use std::fmt::Write;

use neo_core::view::{group_thousands, CLOSE_APPROACH_ROWS};
use neo_core::{
    apply_filters, closest_approaches, format_km, score, DashboardStats, Filter, NearEarthObject,
    RiskAssessment, TrackedItem,
};
use serde::Serialize;

#[derive(Serialize)]
struct ScoredObject<'a> {
    #[serde(flatten)]
    neo: &'a NearEarthObject,
    risk: RiskAssessment,
}

pub fn json_report(objects: &[NearEarthObject]) -> serde_json::Result<String> {
    let scored: Vec<ScoredObject<'_>> = objects
        .iter()
        .map(|neo| ScoredObject {
            neo,
            risk: score(neo),
        })
        .collect();
    serde_json::to_string_pretty(&scored)
}

pub fn dashboard(objects: &[NearEarthObject], filter: Filter, search: &str) -> String {
    let mut out = String::new();
    let stats = DashboardStats::from_objects(objects);
    let _ = writeln!(
        out,
        "Objects: {}  Hazardous: {}  Closest: {}  Largest: {}",
        group_thousands(stats.total as i64),
        group_thousands(stats.hazardous as i64),
        format_km(stats.closest_km),
        stats
            .largest_km
            .map(|d| format!("{d:.3} km"))
            .unwrap_or_else(|| "--".to_owned()),
    );
    out.push('\n');

    let filtered = apply_filters(objects, filter, search);
    if filtered.is_empty() {
        let _ = writeln!(out, "No objects match the filters.");
        let _ = writeln!(out, "Try changing the filter or search term.");
    } else {
        let _ = writeln!(
            out,
            "{:<28} {:<8} {:>16} {:>14} {:>12} {:<18} {:<8} {:>6}",
            "Name", "Risk", "Miss distance", "Velocity", "Diameter", "Approach", "Body", "Mag"
        );
        for neo in filtered {
            let risk = score(neo);
            let _ = writeln!(
                out,
                "{:<28} {:<8} {:>16} {:>14} {:>12} {:<18} {:<8} {:>6}",
                neo.name,
                risk.label,
                format_km(neo.miss_km),
                velocity(neo.velocity_kph),
                neo.diameter_km
                    .map(|d| format!("{d:.3} km"))
                    .unwrap_or_else(|| "--".to_owned()),
                neo.approach_date,
                neo.orbiting_body,
                neo.magnitude
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "--".to_owned()),
            );
        }
    }

    let closest = closest_approaches(objects, CLOSE_APPROACH_ROWS);
    if !closest.is_empty() {
        let _ = writeln!(out, "\nClosest approaches");
        for neo in closest {
            let _ = writeln!(
                out,
                "  {:<28} ID {:<10} {:>16} {:>14} {:<18} {}",
                neo.name,
                neo.id,
                format_km(neo.miss_km),
                velocity(neo.velocity_kph),
                neo.approach_date,
                score(neo).label,
            );
        }
    }
    out
}

pub fn tracked_list(user: &str, items: &[TrackedItem]) -> String {
    let mut out = String::new();
    if items.is_empty() {
        let _ = writeln!(out, "{user} is not tracking any objects.");
        return out;
    }
    let _ = writeln!(out, "Tracked by {user}:");
    for item in items {
        let _ = writeln!(
            out,
            "  {:<10} {:<28} {:<18} {:>16} {:<6} saved {}",
            item.id,
            item.name,
            item.approach_date,
            format_km(item.miss_km),
            item.hazard_label,
            item.saved_at.format("%Y-%m-%d %H:%M UTC"),
        );
    }
    out
}

fn velocity(kph: Option<f64>) -> String {
    match kph {
        Some(v) => format!("{} km/h", group_thousands(v.round() as i64)),
        None => "--".to_owned(),
    }
}
