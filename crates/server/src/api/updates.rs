use std::sync::Arc;

use crate::{dto::UpdateDto, state::AppState};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;
use waymark::{calendar, shared::Timestamp};

/// The status update due now, or `null` outside the pre-tracking window.
pub async fn updates(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let now = Timestamp::now();
    let (start, end) = calendar::tracking_year(now)
        .and_then(calendar::pre_tracking_window)
        .map_err(|err| {
            error!("Failed to resolve pre-tracking window: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    let update = if start <= now && now < end {
        state.status.current(now).map(UpdateDto::from)
    } else {
        None
    };
    Ok(Json(update).into_response())
}
