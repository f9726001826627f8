use serde::{Deserialize, Serialize};

use crate::{
    itinerary::Stop,
    shared::{
        geo::{Coordinate, Distance},
        time::Timestamp,
    },
    tracker::{Classification, Phase},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub delivered: u64,
    pub consumed: u64,
}

impl From<&Stop> for Counters {
    fn from(value: &Stop) -> Self {
        Self {
            delivered: value.delivered,
            consumed: value.consumed,
        }
    }
}

/// Fraction of `[start, end]` covered at `now`, clamped to `[0, 1]`.
/// An empty or inverted span counts as complete.
pub fn progress(start: Timestamp, end: Timestamp, now: Timestamp) -> f64 {
    let span = (end - start).as_seconds();
    if span <= 0 {
        return 1.0;
    }
    let elapsed = (now - start).as_seconds();
    (elapsed as f64 / span as f64).clamp(0.0, 1.0)
}

pub fn interpolate_position(classification: &Classification, origin: Coordinate) -> Coordinate {
    match classification.phase {
        Phase::PreJourney | Phase::AtOriginPostJourney => origin,
        Phase::AtStop => classification
            .current
            .map_or(origin, |stop| stop.coordinate),
        Phase::InTransit => {
            let Some(next) = classification.next else {
                return origin;
            };
            let from = classification
                .previous
                .map_or(origin, |previous| previous.coordinate);
            let p = progress(classification.departed(), next.arrival, classification.now);
            from.lerp(&next.coordinate, p)
        }
    }
}

pub fn interpolate_counters(classification: &Classification, final_delivered: u64) -> Counters {
    let lower = classification
        .previous
        .map(Counters::from)
        .unwrap_or_default();
    match classification.phase {
        Phase::PreJourney => Counters::default(),
        Phase::AtOriginPostJourney => Counters {
            delivered: final_delivered,
            consumed: lower.consumed,
        },
        Phase::AtStop => match classification.current {
            Some(current) => {
                let p = progress(current.arrival, current.departure, classification.now);
                blend(lower, current.into(), p)
            }
            None => lower,
        },
        Phase::InTransit => match classification.next {
            Some(next) => {
                let p = progress(classification.departed(), next.arrival, classification.now);
                blend(lower, next.into(), p)
            }
            None => lower,
        },
    }
}

fn blend(lower: Counters, upper: Counters, p: f64) -> Counters {
    let step = |from: u64, to: u64| -> u64 {
        let difference = to.saturating_sub(from) as f64;
        (from as f64 + difference * p).round() as u64
    };
    Counters {
        delivered: step(lower.delivered, upper.delivered),
        consumed: step(lower.consumed, upper.consumed),
    }
}

/// Great-circle length of the path flown so far: origin to every stop already
/// reached at `now`, then on to `in_transit` if the traveler is between stops.
pub fn accumulate_distance(
    stops: &[Stop],
    origin: Coordinate,
    now: Timestamp,
    in_transit: Option<Coordinate>,
) -> Distance {
    let mut last = origin;
    let mut total = Distance::default();
    for stop in stops.iter().take_while(|stop| stop.arrival <= now) {
        total += last.haversine(&stop.coordinate);
        last = stop.coordinate;
    }
    if let Some(position) = in_transit {
        total += last.haversine(&position);
    }
    total
}

#[test]
fn progress_clamps_test() {
    let start = Timestamp::from_seconds(100);
    let end = Timestamp::from_seconds(200);
    assert_eq!(progress(start, end, Timestamp::from_seconds(50)), 0.0);
    assert_eq!(progress(start, end, Timestamp::from_seconds(150)), 0.5);
    assert_eq!(progress(start, end, Timestamp::from_seconds(250)), 1.0);
    assert_eq!(progress(end, end, end), 1.0);
}
