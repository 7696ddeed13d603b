use std::str::FromStr;

use crate::models::NearEarthObject;
use crate::risk::CLOSE_APPROACH_KM;

/// Rows shown in the closest-approach panel.
pub const CLOSE_APPROACH_ROWS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub hazardous: usize,
    pub closest_km: Option<f64>,
    pub largest_km: Option<f64>,
}

impl DashboardStats {
    pub fn from_objects(objects: &[NearEarthObject]) -> Self {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        Self {
            total: objects.len(),
            hazardous: objects.iter().filter(|neo| neo.is_hazardous).count(),
            closest_km: objects
                .iter()
                .filter_map(|neo| finite(neo.miss_km))
                .reduce(f64::min),
            largest_km: objects
                .iter()
                .filter_map(|neo| finite(neo.diameter_km))
                .filter(|d| *d > 0.0)
                .reduce(f64::max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Hazardous,
    Close,
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "hazardous" => Ok(Self::Hazardous),
            "close" => Ok(Self::Close),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

impl Filter {
    pub fn accepts(&self, neo: &NearEarthObject) -> bool {
        match self {
            Filter::All => true,
            Filter::Hazardous => neo.is_hazardous,
            Filter::Close => matches!(neo.miss_km, Some(km) if km < CLOSE_APPROACH_KM),
        }
    }
}

/// Keeps the records passing `filter` whose name or id contains `search`
/// (trimmed, case-insensitive). Input order is preserved.
pub fn apply_filters<'a>(
    objects: &'a [NearEarthObject],
    filter: Filter,
    search: &str,
) -> Vec<&'a NearEarthObject> {
    let query = search.trim().to_lowercase();
    objects
        .iter()
        .filter(|neo| filter.accepts(neo))
        .filter(|neo| {
            query.is_empty()
                || neo.name.to_lowercase().contains(&query)
                || neo.id.to_lowercase().contains(&query)
        })
        .collect()
}

/// The first `n` records; callers pass the miss-distance ordered list.
pub fn closest_approaches(objects: &[NearEarthObject], n: usize) -> &[NearEarthObject] {
    &objects[..objects.len().min(n)]
}

pub fn format_km(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        None => "--".to_owned(),
        Some(km) if km >= 1_000_000.0 => format!("{:.2}M km", km / 1_000_000.0),
        Some(km) => format!("{} km", group_thousands(km.round() as i64)),
    }
}

pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}
