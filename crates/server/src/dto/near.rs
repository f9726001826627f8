use serde::{Deserialize, Serialize};
use waymark::{itinerary::Stop, shared::Coordinate, tracker::Visit};

use crate::dto::StopDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearDto {
    pub stop: StopDto,
    pub distance_km: f64,
    pub visit: Visit,
}

impl NearDto {
    pub fn from(stop: &Stop, visit: Visit, observer: &Coordinate) -> Self {
        Self {
            distance_km: observer.haversine(&stop.coordinate).as_kilometers(),
            stop: StopDto::from(stop),
            visit,
        }
    }
}
