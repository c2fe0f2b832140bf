use prometheus::{Encoder, GaugeVec, TextEncoder};
use rippleapi_rs::api;
use rippleapi_rs::model::{Api, GenerationAsset};

lazy_static! {
    static ref ASSET_GENERATED_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "asset_generated",
            "energy generated by the member's share of an asset, per period (in the asset's generation unit)",
        ),
        &["asset_name", "period"],
    )
    .unwrap();
    static ref ASSET_EARNED_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "asset_earned",
            "savings earned by the member's share of an asset, per period (in GBP)",
        ),
        &["asset_name", "period"],
    )
    .unwrap();
    static ref MEMBER_CAPACITY_GAUGE: GaugeVec = register_gauge_vec!(
        opts!("member_capacity", "capacity of the member's share of an asset",),
        &["asset_name", "units"],
    )
    .unwrap();
}

/// Feed one asset's refreshed snapshots to the Prometheus gauges. Snapshot
/// keys are `{period}_earned` / `{period}_generated`; the period becomes a
/// label so new buckets never require new metrics.
fn process_asset(asset: &GenerationAsset) {
    for (key, value) in &asset.generation_data {
        if let Some(period) = key.strip_suffix("_generated") {
            ASSET_GENERATED_GAUGE
                .with_label_values(&[&asset.name, period])
                .set(*value);
        } else if let Some(period) = key.strip_suffix("_earned") {
            ASSET_EARNED_GAUGE
                .with_label_values(&[&asset.name, period])
                .set(*value);
        }
    }

    MEMBER_CAPACITY_GAUGE
        .with_label_values(&[&asset.name, &asset.member_capacity_units])
        .set(asset.member_capacity);
}

/// Collect all supported metrics from `api`, updating Prometheus exporter
/// registry. Discovers the member's assets and refreshes each one.
pub async fn collect(api: &Api, account: &str) -> Result<(), rippleapi_rs::Error> {
    let mut assets = api::assets(api, account).await?;

    for asset in assets.iter_mut() {
        let data = asset.update_data(api).await?;

        if data.generation_data.is_empty() {
            log::warn!("No generation data returned for asset: {}", asset.name);
        } else {
            process_asset(asset);
        }
    }

    Ok(())
}

/// Read metrics from Prometheus exporter registry.
pub async fn read() -> Result<String, rippleapi_rs::Error> {
    // Gather the metrics.
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).or(Err(rippleapi_rs::Error::FormatError))
}
