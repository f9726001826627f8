use serde::{Deserialize, Serialize};

use crate::{
    calendar,
    error::{Error, Result},
    itinerary::{Itinerary, Stop},
    shared::{
        geo::{Coordinate, Distance},
        time::Timestamp,
    },
    tracker::{
        Counters, Origin, Phase, TrackerConfig, accumulate_distance, classify,
        interpolate_counters, interpolate_position,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRef {
    pub city: String,
    pub region: String,
    pub timezone: String,
}

impl From<&Stop> for StopRef {
    fn from(value: &Stop) -> Self {
        Self {
            city: value.city.to_string(),
            region: value.region.to_string(),
            timezone: value.timezone.to_string(),
        }
    }
}

impl From<&Origin> for StopRef {
    fn from(value: &Origin) -> Self {
        Self {
            city: value.city.to_string(),
            region: value.region.to_string(),
            timezone: value.timezone.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub delivered: u64,
    pub consumed: u64,
    pub distance_km: u64,
    pub distance_mi: u64,
    pub speed_kmh: u64,
}

impl Stats {
    pub(crate) fn new(counters: Counters, distance: Distance, speed_kmh: f64) -> Self {
        Self {
            delivered: counters.delivered,
            consumed: counters.consumed,
            distance_km: distance.as_kilometers().round() as u64,
            distance_mi: distance.as_miles().round() as u64,
            speed_kmh: speed_kmh.max(0.0).round() as u64,
        }
    }
}

/// Everything a display needs for one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub year: i32,
    pub at: Timestamp,
    pub phase: Phase,
    pub position: Coordinate,
    /// The stop the traveler is at or heading for; the origin before and after the journey.
    pub stop: StopRef,
    pub last_seen: Option<StopRef>,
    /// Instant the current countdown runs to.
    pub boundary: Timestamp,
    pub stats: Stats,
}

impl Snapshot {
    /// Shown while no itinerary is loaded.
    pub fn idle(config: &TrackerConfig, now: Timestamp) -> Result<Self> {
        let year = calendar::tracking_year(now)?;
        Ok(Self {
            year,
            at: now,
            phase: Phase::PreJourney,
            position: config.origin.coordinate,
            stop: (&config.origin).into(),
            last_seen: None,
            boundary: calendar::anchor(year)?,
            stats: Stats::default(),
        })
    }

    /// Pure computation from the itinerary alone. Speed is left at zero.
    pub fn observe(itinerary: &Itinerary, config: &TrackerConfig, now: Timestamp) -> Result<Self> {
        locate(itinerary, config, now).map(|(snapshot, _)| snapshot)
    }
}

/// The snapshot together with the unrounded distance flown.
pub(crate) fn locate(
    itinerary: &Itinerary,
    config: &TrackerConfig,
    now: Timestamp,
) -> Result<(Snapshot, Distance)> {
    let origin = &config.origin;
    let classification = classify(itinerary.stops(), itinerary.anchor(), now);
    let position = interpolate_position(&classification, origin.coordinate);
    if !position.is_finite() {
        return Err(Error::Tick(format!("position {position} at {now}")));
    }
    let counters = interpolate_counters(&classification, config.final_delivered);
    let in_transit = (classification.phase == Phase::InTransit).then_some(position);
    let distance = accumulate_distance(itinerary.stops(), origin.coordinate, now, in_transit);
    if !distance.as_meters().is_finite() {
        return Err(Error::Tick(format!("distance at {now}")));
    }

    let boundary = match (classification.phase, classification.focus()) {
        (Phase::AtOriginPostJourney, _) => calendar::anchor(itinerary.year() + 1)?,
        (Phase::AtStop, Some(stop)) => stop.departure,
        (Phase::InTransit, Some(stop)) => stop.arrival,
        _ => itinerary.anchor(),
    };
    let stop = classification
        .focus()
        .map_or_else(|| origin.into(), StopRef::from);

    let snapshot = Snapshot {
        year: itinerary.year(),
        at: now,
        phase: classification.phase,
        position,
        stop,
        last_seen: classification.previous.map(StopRef::from),
        boundary,
        stats: Stats::new(counters, distance, 0.0),
    };
    Ok((snapshot, distance))
}
