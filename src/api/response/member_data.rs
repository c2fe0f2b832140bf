use serde::Deserialize;
use serde_json::Value;

use std::collections::HashMap;

/* Earned/generated pair reported for every historical time bucket */
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub earned: f64,
    pub generated: f64,
}

/* Current reading; upstream sends `null` when no reading is available yet */
#[derive(Debug, Clone, Deserialize)]
pub struct LatestReading {
    pub estimated_savings: f64,
    pub generation: f64,
}

/// Most recent instantaneous readings for an asset. Everything except the
/// timestamp is vendor-defined and passed through untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Telemetry {
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub readings: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Generation {
    pub generation_unit: String,
    pub latest_telemetry: Telemetry,
    #[serde(default)]
    pub latest: Option<LatestReading>,
    pub today: Bucket,
    pub yesterday: Bucket,
    pub this_week: Bucket,
    pub last_week: Bucket,
    pub this_month: Bucket,
    pub last_month: Bucket,
    pub this_year: Bucket,
    pub last_year: Bucket,
    pub total: Bucket,
}

impl Generation {
    /// Upstream bucket name paired with the parsed field, in the API's
    /// reporting order.
    pub fn buckets(&self) -> [(&'static str, &Bucket); 9] {
        [
            ("today", &self.today),
            ("yesterday", &self.yesterday),
            ("this_week", &self.this_week),
            ("last_week", &self.last_week),
            ("this_month", &self.this_month),
            ("last_month", &self.last_month),
            ("this_year", &self.this_year),
            ("last_year", &self.last_year),
            ("total", &self.total),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub status: String,
    pub member_capacity: f64,
    pub member_capacity_units: String,
    pub member_expected_annual_generation: f64,
    pub member_expected_annual_generation_units: String,
    pub generation: Generation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberData {
    pub generation_assets: Vec<AssetRecord>,
}
