use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical record for one close-approach event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    pub magnitude: Option<f64>,
    pub diameter_km: Option<f64>,
    /// Rough estimate from `diameter_km`, never supplied upstream.
    pub mass_kg: Option<f64>,
    pub is_hazardous: bool,
    pub miss_km: Option<f64>,
    pub velocity_kph: Option<f64>,
    pub orbiting_body: String,
    pub approach_date: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskLabel {
    Low,
    Medium,
    High,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low",
            RiskLabel::Medium => "Medium",
            RiskLabel::High => "High",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskAssessment {
    pub label: RiskLabel,
    pub tier: i32,
}

/// A user's bookmark of one approach record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackedItem {
    pub id: String,
    pub name: String,
    pub approach_date: String,
    pub miss_km: Option<f64>,
    pub is_hazardous: bool,
    pub hazard_label: RiskLabel,
    pub user: String,
    pub saved_at: DateTime<Utc>,
}

impl TrackedItem {
    pub fn from_assessment(
        neo: &NearEarthObject,
        risk: &RiskAssessment,
        user: &str,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: neo.id.clone(),
            name: neo.name.clone(),
            approach_date: neo.approach_date.clone(),
            miss_km: neo.miss_km,
            is_hazardous: neo.is_hazardous,
            hazard_label: risk.label,
            user: user.to_owned(),
            saved_at,
        }
    }

    pub fn key_matches(&self, user: &str, id: &str) -> bool {
        self.user == user && self.id == id
    }
}
