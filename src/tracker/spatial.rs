use serde::{Deserialize, Serialize};

use crate::{
    itinerary::Stop,
    shared::{
        geo::Coordinate,
        time::{Duration, Timestamp},
    },
};

/// Closest stop to `observer` by great-circle distance. The first stop in
/// itinerary order wins a tie. `None` when there are no stops.
pub fn nearest<'a>(stops: &'a [Stop], observer: &Coordinate) -> Option<&'a Stop> {
    let mut best: Option<(&Stop, f64)> = None;
    for stop in stops {
        let distance = observer.haversine(&stop.coordinate).as_meters();
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((stop, distance)),
        }
    }
    best.map(|(stop, _)| stop)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visit {
    Visited {
        arrival: Timestamp,
    },
    Upcoming {
        arrival: Timestamp,
        remaining: Duration,
        /// The traveler is heading straight for this stop.
        is_next: bool,
    },
}

/// How long until the traveler reaches `stop`, or when it already did.
pub fn visit_estimate(stops: &[Stop], stop: &Stop, now: Timestamp) -> Visit {
    if now >= stop.arrival {
        return Visit::Visited {
            arrival: stop.arrival,
        };
    }
    let is_next = stops
        .iter()
        .filter(|candidate| candidate.arrival > now)
        .min_by_key(|candidate| candidate.arrival)
        .is_some_and(|next| next.index == stop.index);
    Visit::Upcoming {
        arrival: stop.arrival,
        remaining: stop.arrival - now,
        is_next,
    }
}
