mod api;
mod dto;
mod error;
mod feeds;
mod settings;
mod state;

use crate::{settings::Settings, state::AppState};
use axum::routing::get;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use waymark::shared::Timestamp;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting server...");
    let settings = Settings::from_env();
    let client = reqwest::Client::new();

    info!("Loading data...");
    let now = Instant::now();
    let engine = feeds::load_engine(&client, &settings).await;
    let status = feeds::load_status(&client, &settings).await;
    let state = Arc::new(AppState::new(engine, status));
    info!("Loading data took {:?}", now.elapsed());

    tokio::spawn(run_ticks(state.clone(), settings.tick));

    let app = axum::Router::new()
        .route("/status", get(api::status))
        .route("/near", get(api::near))
        .route("/updates", get(api::updates))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", settings.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {}: {err}", settings.port);
            std::process::exit(1);
        }
    };
    info!("Listening to port {}", settings.port);
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}

/// The only writer of the engine and the published snapshot.
async fn run_ticks(state: Arc<AppState>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let now = Timestamp::now();
        let result = state.engine.write().await.tick(now);
        match result {
            Ok(snapshot) => {
                *state.snapshot.write().await = Some(snapshot);
            }
            Err(err) => warn!("Skipping tick at {now}: {err}"),
        }
    }
}
