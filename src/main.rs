#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate rocket;

use config::Config;
use rippleapi_rs::api;
use rippleapi_rs::model::Api;
use rocket::{Build, Rocket, State};
use std::sync::Mutex;
use std::time::Instant;

mod metrics;

const API_URL: &str = "https://rippleenergy.com";
const DEFAULT_INTERVAL_SECS: u64 = 300;

#[derive(Clone, serde::Deserialize)]
pub struct RippleConfig {
    api_url: String,
    auth_token: String,
    /// Member account identifier (e.g. email) attached to discovered assets.
    account: String,
    interval: u64,
}

/// Structure containing state for API handlers.
pub struct StateData {
    api: Api,
    account: String,
    interval: u64,
    /// Timestamp of last successful metric collection via `metrics::collect()`
    timestamp: Mutex<Option<Instant>>,
}

impl StateData {
    /// Updates `timestamp` to `now()`.
    fn touch(&self) {
        if let Ok(mut ts) = self.timestamp.lock() {
            *ts = Some(Instant::now());
        } else {
            log::trace!("Unable to lock timestamp mutex, will refresh again")
        }
    }

    /// Checks whether `interval_secs` elapsed since last `touch()`
    fn interval_elapsed(&self, interval_secs: u64) -> bool {
        let elapsed_opt = self
            .timestamp
            .lock()
            .ok()
            .and_then(|a| a.map(|b| b.elapsed().as_secs()));

        if let Some(elapsed) = elapsed_opt {
            elapsed > interval_secs
        } else {
            /* If there is None timestamp/elapsed, always return true to trigger action */
            true
        }
    }
}

pub fn read_settings() -> RippleConfig {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("RIPPLE"))
        .unwrap()
        .set_default("api_url", API_URL)
        .unwrap()
        .set_default("account", "")
        .unwrap()
        .set_default("interval", DEFAULT_INTERVAL_SECS as i64)
        .unwrap();

    settings.try_into().expect("Configuration error")
}

#[get("/metrics")]
async fn metrics_route(state: &State<StateData>) -> Result<String, api::Error> {
    if state.interval_elapsed(state.interval) {
        metrics::collect(&state.api, &state.account).await?;
        state.touch();
    } else {
        log::info!("interval time not yet elapsed since last run; returning cached result")
    }
    metrics::read().await
}

#[get("/dump-assets")]
async fn dump_assets_route(state: &State<StateData>) -> Result<String, api::Error> {
    let dump = api::dump_assets(&state.api).await?;

    Ok(format!("{:#?}", dump))
}

#[launch]
fn rocket() -> Rocket<Build> {
    env_logger::init();

    let settings = read_settings();
    let api = api::api(settings.api_url, settings.auth_token).expect("Unable to build HTTP client");
    let state = StateData {
        api,
        account: settings.account,
        interval: settings.interval,
        timestamp: Mutex::new(None),
    };

    rocket::build()
        .manage(state)
        .mount("/", routes![metrics_route, dump_assets_route])
}
