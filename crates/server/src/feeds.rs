use reqwest::header::ACCEPT_ENCODING;
use std::time::Instant;
use tracing::{debug, info, warn};
use waymark::{feed::FeedWaypoint, prelude::*};

use crate::{
    error::Result,
    settings::{Settings, Source},
};

async fn fetch(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}

/// Fetched once at startup. Any failure leaves the engine without an
/// itinerary, so it keeps reporting the pre-journey state.
pub async fn load_engine(client: &reqwest::Client, settings: &Settings) -> EngineState {
    let config = TrackerConfig::default();
    let Some(source) = &settings.route else {
        warn!("No itinerary source configured");
        return EngineState::new(config, None);
    };
    let engine: Result<EngineState> = match load_route(client, source).await {
        Ok(route) => EngineState::load(config.clone(), route, Timestamp::now()).map_err(Into::into),
        Err(err) => Err(err),
    };
    engine.unwrap_or_else(|err| {
        warn!("Tracking without an itinerary: {err}");
        EngineState::new(config, None)
    })
}

async fn load_route(client: &reqwest::Client, source: &Source) -> Result<Vec<FeedWaypoint>> {
    info!("Loading itinerary from {source:?}...");
    let now = Instant::now();
    let json = match source {
        Source::Url(url) => fetch(client, url).await?,
        Source::Path(path) => tokio::fs::read_to_string(path).await?,
    };
    let route = Feed::default().route_from_str(&json)?;
    debug!("Loading {} waypoints took {:?}", route.len(), now.elapsed());
    Ok(route)
}

/// An unreachable or malformed status feed only means no updates are shown.
pub async fn load_status(client: &reqwest::Client, settings: &Settings) -> StatusFeed {
    let Some(url) = &settings.status_url else {
        return StatusFeed::default();
    };
    let status: Result<StatusFeed> = match fetch(client, url).await {
        Ok(json) => Feed::default().status_from_str(&json).map_err(Into::into),
        Err(err) => Err(err),
    };
    match status {
        Ok(status) => {
            info!("Loaded {} status updates", status.updates().len());
            status
        }
        Err(err) => {
            warn!("Status feed unavailable: {err}");
            StatusFeed::default()
        }
    }
}
