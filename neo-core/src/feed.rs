use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One upstream feed response: approach records bucketed by ISO calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RawFeedPage {
    #[serde(default)]
    pub links: PageLinks,
    #[serde(default)]
    pub element_count: usize,
    #[serde(default)]
    pub near_earth_objects: BTreeMap<String, Vec<RawNeo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RawNeo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_magnitude_h: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_potentially_hazardous_asteroid: Option<bool>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub close_approach_data: Vec<RawApproach>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EstimatedDiameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<DiameterRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DiameterRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter_min: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_diameter_max: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RawApproach {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_approach_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_approach_date_full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_velocity: Option<RelativeVelocity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miss_distance: Option<MissDistance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbiting_body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RelativeVelocity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers_per_hour: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MissDistance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<Value>,
}

impl RawFeedPage {
    /// Folds `page` into this aggregate. Entries under a date key already
    /// present are appended after the existing ones, never replaced.
    pub fn merge(&mut self, page: RawFeedPage) {
        self.element_count += page.element_count;
        for (date, entries) in page.near_earth_objects {
            self.near_earth_objects
                .entry(date)
                .or_default()
                .extend(entries);
        }
        self.links = page.links;
    }

    pub fn entry_count(&self) -> usize {
        self.near_earth_objects.values().map(Vec::len).sum()
    }
}

/// Upstream ids and names are strings; numbers are stringified and `null`
/// reads as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
