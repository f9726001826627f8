use std::{collections::HashMap, sync::Arc};

use crate::{dto::NearDto, state::AppState};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use waymark::shared::{Coordinate, Timestamp};

pub async fn near(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    if let Some(query) = params.get("q") {
        let observer = coordinate_from_str(query).ok_or(StatusCode::BAD_REQUEST)?;
        let engine = state.engine.read().await;
        let (stop, visit) = engine
            .visit(&observer, Timestamp::now())
            .ok_or(StatusCode::NOT_FOUND)?;
        Ok(Json(NearDto::from(stop, visit, &observer)).into_response())
    } else {
        Err(StatusCode::BAD_REQUEST)
    }
}

/// `lat,lon` in decimal degrees.
fn coordinate_from_str(value: &str) -> Option<Coordinate> {
    let (latitude, longitude) = value.split_once(',')?;
    let latitude: f64 = latitude.trim().parse().ok()?;
    let longitude: f64 = longitude.trim().parse().ok()?;
    let coordinate = Coordinate::new(latitude, longitude);
    let in_range = latitude.abs() <= 90.0 && longitude.abs() <= 180.0;
    (coordinate.is_finite() && in_range).then_some(coordinate)
}
