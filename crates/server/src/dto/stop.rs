use serde::{Deserialize, Serialize};
use waymark::{
    itinerary::Stop,
    shared::{Coordinate, Timestamp},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub index: u32,
    pub city: String,
    pub region: String,
    pub timezone: String,
    pub coordinate: Coordinate,
    pub arrival: Timestamp,
    pub departure: Timestamp,
    pub population: Option<u64>,
    pub wikipedia: Option<String>,
}

impl StopDto {
    pub fn from(stop: &Stop) -> Self {
        Self {
            index: stop.index,
            city: stop.city.to_string(),
            region: stop.region.to_string(),
            timezone: stop.timezone.to_string(),
            coordinate: stop.coordinate,
            arrival: stop.arrival,
            departure: stop.departure,
            population: stop.population.map(|population| population.count),
            wikipedia: stop.wikipedia.as_deref().map(str::to_string),
        }
    }
}
