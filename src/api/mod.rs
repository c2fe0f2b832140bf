pub mod endpoint;
pub mod error;
pub mod response;

use crate::model;
pub use error::Error;
use response::member_data::MemberData;
use serde_json::Value;

use std::collections::{HashMap, HashSet};

/// Build an `Api` with an owned HTTP client created with default settings.
pub fn api(api_url: String, auth_token: String) -> Result<model::Api, Error> {
    let client = reqwest::ClientBuilder::new()
        .build()
        .or(Err(Error::InternalError))?;

    Ok(model::Api {
        api_url,
        auth_token,
        client,
    })
}

/// Build an `Api` around a caller-supplied client, for callers that want to
/// control pooling or timeouts themselves.
pub fn api_with_client(
    api_url: String,
    auth_token: String,
    client: reqwest::Client,
) -> model::Api {
    model::Api {
        api_url,
        auth_token,
        client,
    }
}

/// Consume the `Api`, dropping the owned client and its pooled connections.
/// Taking ownership means a second close cannot be expressed.
pub fn close(api: model::Api) {
    drop(api);
}

async fn get_str(api: &model::Api) -> Result<String, Error> {
    let url = format!("{}{}{}", api.api_url, endpoint::MEMBER_DATA, api.auth_token);

    let response = api
        .client
        .get(url)
        .header("Accept", endpoint::ACCEPT)
        .header("Accept-Encoding", endpoint::ACCEPT_ENCODING)
        .header("Accept-Language", endpoint::ACCEPT_LANGUAGE)
        .header("User-Agent", endpoint::USER_AGENT)
        .send()
        .await
        .map_err(|e| Error::ConnectionError(e.to_string()))?;

    if response.status() != reqwest::StatusCode::OK {
        return Err(Error::ConnectionError(String::from("error sending request")));
    }

    response
        .text()
        .await
        .map_err(|e| Error::ConnectionError(format!("Error reading API response: {}", e)))
}

/// Decode a member_data body and filter it to `asset_names`. An empty name
/// set means discovery mode: every asset is returned.
fn decode_member_data(body: &str, asset_names: &HashSet<String>) -> Result<MemberData, Error> {
    let value = serde_json::from_str::<Value>(body)
        .map_err(|e| Error::InvalidResponse(body.to_string(), e.to_string()))?;

    /* Upstream never pairs `error` with usable data; check it before looking
    at the assets at all. */
    if value.get("error").is_some() {
        return Err(Error::AuthenticationError(String::from("invalid API key")));
    }

    let mut data = serde_json::from_value::<MemberData>(value)
        .map_err(|e| Error::InvalidResponse(body.to_string(), e.to_string()))?;

    if data.generation_assets.is_empty() {
        return Err(Error::DevicesError(String::from(
            "no generation assets found",
        )));
    }

    if !asset_names.is_empty() {
        data.generation_assets
            .retain(|record| asset_names.contains(&record.name));
    }

    Ok(data)
}

/// Fetch the member_data snapshot, scoped to `asset_names`.
pub async fn request(
    api: &model::Api,
    asset_names: &HashSet<String>,
) -> Result<MemberData, Error> {
    let response_text = get_str(api).await?;

    log::trace!(
        "asset_names: {:#?}, response_text: {}",
        asset_names,
        response_text
    );

    decode_member_data(&response_text, asset_names)
}

/// Discover every generation asset belonging to the member identified by the
/// auth token, and build one `GenerationAsset` per record.
pub async fn assets(
    api: &model::Api,
    account: &str,
) -> Result<Vec<model::GenerationAsset>, Error> {
    let data = request(api, &HashSet::new()).await?;

    Ok(data
        .generation_assets
        .iter()
        .map(|record| model::GenerationAsset::new(record, account))
        .collect())
}

/// Dump raw generation JSON
///
/// Collect the raw `generation` subtree of every asset, keyed by asset name,
/// for feature reporting purposes.
pub async fn dump_assets(api: &model::Api) -> Result<HashMap<String, Value>, Error> {
    let response_text = get_str(api).await?;
    let value = serde_json::from_str::<Value>(&response_text)
        .map_err(|e| Error::InvalidResponse(response_text.clone(), e.to_string()))?;

    let mut dump: HashMap<String, Value> = HashMap::new();

    if let Some(records) = value.get("generation_assets").and_then(Value::as_array) {
        for record in records {
            match (
                record.get("name").and_then(Value::as_str),
                record.get("generation"),
            ) {
                (Some(name), Some(generation)) => {
                    dump.insert(String::from(name), generation.to_owned());
                }
                _ => log::warn!("No generation data returned for asset: {}", record),
            }
        }
    }

    Ok(dump)
}
