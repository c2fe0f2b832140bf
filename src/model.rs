use crate::api;
use crate::api::response::member_data::{AssetRecord, Generation, MemberData};
use chrono::NaiveDateTime;
use serde_json::Value;

use std::collections::{HashMap, HashSet};

/// Currency symbol reported alongside estimated savings. The upstream API
/// only serves UK members.
pub const ESTIMATED_SAVINGS_UNIT: &str = "£";

/// Sentinel timestamp emitted when the API has no telemetry for an asset yet.
pub const NO_TELEMETRY_TIMESTAMP: &str = "0001/01/01 00:00:00";

const UPSTREAM_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug)]
pub struct Api {
    pub api_url: String,
    pub auth_token: String,
    pub client: reqwest::Client,
}

/// Snapshot pair returned by a refresh: both maps are empty when the asset
/// was absent from the scoped response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetData {
    pub telemetry: HashMap<String, Value>,
    pub generation_data: HashMap<String, f64>,
}

/// One physical generation device (e.g. a member's share of a wind farm).
///
/// Static fields are copied at construction and refreshed on every update;
/// `name`, `generation_unit` and `estimated_savings_unit` never change after
/// construction. The two snapshot maps are replaced wholesale on each
/// refresh, never merged field by field.
#[derive(Debug, Clone)]
pub struct GenerationAsset {
    pub name: String,
    pub asset_type: String,
    pub status: String,
    pub member_capacity: f64,
    pub member_capacity_units: String,
    pub member_expected_annual_generation: f64,
    pub member_expected_annual_generation_units: String,
    pub generation_unit: String,
    pub account: String,
    pub estimated_savings_unit: String,
    pub latest_telemetry: HashMap<String, Value>,
    pub generation_data: HashMap<String, f64>,
}

fn format_timestamp(timestamp: Option<&str>) -> String {
    match timestamp {
        None => String::from(NO_TELEMETRY_TIMESTAMP),
        Some(raw) => match NaiveDateTime::parse_from_str(raw, UPSTREAM_TIMESTAMP_FORMAT) {
            Ok(parsed) => parsed.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
            /* not ISO-8601; pass it through rather than losing the reading */
            Err(_) => String::from(raw),
        },
    }
}

impl GenerationAsset {
    /// Build an asset from a discovery record. Field presence was already
    /// validated when the record was deserialized.
    pub fn new(record: &AssetRecord, account: &str) -> GenerationAsset {
        GenerationAsset {
            name: record.name.clone(),
            asset_type: record.asset_type.clone(),
            status: record.status.clone(),
            member_capacity: record.member_capacity,
            member_capacity_units: record.member_capacity_units.clone(),
            member_expected_annual_generation: record.member_expected_annual_generation,
            member_expected_annual_generation_units: record
                .member_expected_annual_generation_units
                .clone(),
            generation_unit: record.generation.generation_unit.clone(),
            account: String::from(account),
            estimated_savings_unit: String::from(ESTIMATED_SAVINGS_UNIT),
            latest_telemetry: HashMap::new(),
            generation_data: HashMap::new(),
        }
    }

    /// Overwrite the mutable static fields from a fresh record.
    pub fn update_asset_info(&mut self, record: &AssetRecord) {
        self.status = record.status.clone();
        self.member_capacity = record.member_capacity;
        self.member_capacity_units = record.member_capacity_units.clone();
        self.member_expected_annual_generation = record.member_expected_annual_generation;
        self.member_expected_annual_generation_units = record
            .member_expected_annual_generation_units
            .clone();
    }

    /// Replace the telemetry snapshot: vendor readings pass through
    /// untouched, the timestamp is reformatted for display.
    pub fn get_telemetry(&mut self, generation: &Generation) {
        let telemetry = &generation.latest_telemetry;
        let mut snapshot = telemetry.readings.clone();
        snapshot.insert(
            String::from("timestamp"),
            Value::String(format_timestamp(telemetry.timestamp.as_deref())),
        );

        self.latest_telemetry = snapshot;
    }

    /// Replace the generation snapshot with flattened `{bucket}_earned` /
    /// `{bucket}_generated` keys. `latest_earned` and `latest_generated` are
    /// only present when the API reported a current reading; absence means
    /// "no current reading", not zero.
    pub fn get_generation(&mut self, generation: &Generation) {
        let mut snapshot = HashMap::new();

        for (name, bucket) in generation.buckets() {
            snapshot.insert(format!("{}_earned", name), bucket.earned);
            snapshot.insert(format!("{}_generated", name), bucket.generated);
        }

        if let Some(latest) = &generation.latest {
            snapshot.insert(String::from("latest_earned"), latest.estimated_savings);
            snapshot.insert(String::from("latest_generated"), latest.generation);
        }

        self.generation_data = snapshot;
    }

    /// Apply a (scoped) member_data response to this asset. When the asset's
    /// name is absent the stored snapshots are left untouched and both
    /// returned maps are empty.
    pub fn apply(&mut self, data: &MemberData) -> AssetData {
        match data
            .generation_assets
            .iter()
            .find(|record| record.name == self.name)
        {
            None => AssetData::default(),
            Some(record) => {
                self.update_asset_info(record);
                self.get_telemetry(&record.generation);
                self.get_generation(&record.generation);

                AssetData {
                    telemetry: self.latest_telemetry.clone(),
                    generation_data: self.generation_data.clone(),
                }
            }
        }
    }

    /// Refresh this asset with a request scoped to its own name. Client
    /// failures propagate untouched.
    pub async fn update_data(&mut self, api: &Api) -> Result<AssetData, api::Error> {
        log::info!("Updating data for asset {}", self.name);

        let names = HashSet::from([self.name.clone()]);
        let data = api::request(api, &names).await?;

        Ok(self.apply(&data))
    }
}
