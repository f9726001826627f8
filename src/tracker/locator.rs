use serde::{Deserialize, Serialize};

use crate::{itinerary::Stop, shared::time::Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting at the origin for the journey to start.
    PreJourney,
    /// Back at the origin, every stop visited.
    AtOriginPostJourney,
    AtStop,
    InTransit,
}

impl Phase {
    pub fn at_origin(&self) -> bool {
        matches!(self, Phase::PreJourney | Phase::AtOriginPostJourney)
    }
}

/// Where `now` falls in the itinerary.
///
/// `previous` is the stop the traveler most recently left, or the stop before
/// `current` while visiting. It is `None` when the traveler is coming from the
/// origin, whose counters are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<'a> {
    pub phase: Phase,
    pub now: Timestamp,
    pub anchor: Timestamp,
    pub previous: Option<&'a Stop>,
    pub current: Option<&'a Stop>,
    pub next: Option<&'a Stop>,
}

impl<'a> Classification<'a> {
    fn at_origin(phase: Phase, now: Timestamp, anchor: Timestamp) -> Self {
        Self {
            phase,
            now,
            anchor,
            previous: None,
            current: None,
            next: None,
        }
    }

    /// Stop the traveler is at, or heading for.
    pub fn focus(&self) -> Option<&'a Stop> {
        match self.phase {
            Phase::AtStop => self.current,
            Phase::InTransit => self.next,
            Phase::PreJourney | Phase::AtOriginPostJourney => None,
        }
    }

    /// When the traveler left for the segment currently being flown.
    pub fn departed(&self) -> Timestamp {
        self.previous
            .map_or(self.anchor, |previous| previous.departure)
    }
}

/// Recomputed from scratch on every call; no state is carried between ticks.
pub fn classify(stops: &[Stop], anchor: Timestamp, now: Timestamp) -> Classification<'_> {
    if stops.is_empty() || now < anchor {
        return Classification::at_origin(Phase::PreJourney, now, anchor);
    }

    if let Some(position) = stops.iter().position(|stop| stop.is_visiting(now)) {
        return Classification {
            phase: Phase::AtStop,
            now,
            anchor,
            previous: position.checked_sub(1).and_then(|i| stops.get(i)),
            current: stops.get(position),
            next: stops.get(position + 1),
        };
    }

    // max_by_key keeps the last of equal departures, min_by_key the first of
    // equal arrivals.
    let previous = stops
        .iter()
        .filter(|stop| stop.departure <= now)
        .max_by_key(|stop| stop.departure);
    let next = stops
        .iter()
        .filter(|stop| stop.arrival > now)
        .min_by_key(|stop| stop.arrival);

    match next {
        Some(next) => Classification {
            phase: Phase::InTransit,
            now,
            anchor,
            previous,
            current: None,
            next: Some(next),
        },
        None => Classification {
            previous,
            ..Classification::at_origin(Phase::AtOriginPostJourney, now, anchor)
        },
    }
}
