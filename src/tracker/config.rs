use std::sync::Arc;

use crate::{calendar, itinerary::FINAL_DELIVERED_TOTAL, shared::geo::Coordinate};

/// Where the traveler waits before and after the journey.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub city: Arc<str>,
    pub region: Arc<str>,
    pub timezone: Arc<str>,
    pub coordinate: Coordinate,
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            city: "Easter Bunny's Workshop".into(),
            region: "Easter Island, Chile".into(),
            timezone: "Pacific/Easter".into(),
            coordinate: Coordinate::new(-27.1044228, -109.2489683),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub origin: Origin,
    pub reference_year: i32,
    pub final_delivered: u64,
    pub speed_window: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            origin: Origin::default(),
            reference_year: calendar::REFERENCE_YEAR,
            final_delivered: FINAL_DELIVERED_TOTAL,
            speed_window: 5,
        }
    }
}
