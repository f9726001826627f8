use std::sync::Arc;

use crate::{dto::StatusDto, state::AppState};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use waymark::shared::Timestamp;

pub async fn status(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let snapshot = state.snapshot.read().await;
    match snapshot.as_ref() {
        Some(snapshot) => Ok(Json(StatusDto::from(snapshot, Timestamp::now())).into_response()),
        // Before the first tick has completed.
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
