use std::{sync::Arc, time::Instant};

mod models;
pub use models::*;
use tracing::debug;

use crate::{
    calendar,
    error::{Error, Result},
    feed::FeedWaypoint,
    shared::time::{Duration, Timestamp},
};

/// Delivered total reported once the journey is over. Independent of the last
/// stop's cumulative count, the two are known not to agree.
pub const FINAL_DELIVERED_TOTAL: u64 = 7_706_250_000;

/// The base itinerary projected onto one tracked year.
#[derive(Debug, Clone)]
pub struct Itinerary {
    year: i32,
    reference_year: i32,
    anchor: Timestamp,
    offset: Duration,
    waypoints: Arc<[Waypoint]>,
    stops: Box<[Stop]>,
}

impl Itinerary {
    /// Validates every feed entry before anything is projected. Any bad entry
    /// fails the whole itinerary with an [`Error::Aggregate`] listing every
    /// bad entry, even when there is only one.
    pub fn from_feed(route: Vec<FeedWaypoint>, year: i32) -> Result<Self> {
        Self::from_feed_with(route, year, calendar::REFERENCE_YEAR)
    }

    pub fn from_feed_with(
        route: Vec<FeedWaypoint>,
        year: i32,
        reference_year: i32,
    ) -> Result<Self> {
        let mut errors = Vec::new();
        let mut waypoints = Vec::with_capacity(route.len());
        for value in route.into_iter().enumerate() {
            match Waypoint::try_from(value) {
                Ok(waypoint) => waypoints.push(waypoint),
                Err(err) => errors.push(err),
            }
        }
        if errors.is_empty() {
            Self::normalize_from(waypoints.into(), year, reference_year)
        } else {
            Err(Error::Aggregate(errors))
        }
    }

    /// Shifts every waypoint by the re-anchor offset for `year` and derives
    /// departures and cumulative counters.
    pub fn normalize(waypoints: Arc<[Waypoint]>, year: i32) -> Result<Self> {
        Self::normalize_from(waypoints, year, calendar::REFERENCE_YEAR)
    }

    pub fn normalize_from(
        waypoints: Arc<[Waypoint]>,
        year: i32,
        reference_year: i32,
    ) -> Result<Self> {
        debug!("Normalizing itinerary for {year}...");
        let now = Instant::now();
        if waypoints.is_empty() {
            return Err(Error::EmptyItinerary);
        }
        let anchor = calendar::anchor(year)?;
        let offset = calendar::reanchor_offset_from(year, reference_year)?;

        let mut stops: Vec<Stop> = Vec::with_capacity(waypoints.len());
        for (i, waypoint) in waypoints.iter().enumerate() {
            let stop = project(waypoint, i as u32, offset)?;
            if let Some(previous) = stops.last() {
                if stop.arrival < previous.arrival || stop.departure < previous.departure {
                    return Err(Error::OutOfOrder { index: i });
                }
                if stop.delivered < previous.delivered {
                    return Err(Error::DecreasingCounter {
                        index: i,
                        field: "Eggs Delivered",
                    });
                }
                if stop.consumed < previous.consumed {
                    return Err(Error::DecreasingCounter {
                        index: i,
                        field: "Carrots eaten",
                    });
                }
            }
            stops.push(stop);
        }

        if let Some(last) = stops.last() {
            if last.delivered != FINAL_DELIVERED_TOTAL {
                debug!(
                    "Final stop delivers {} in total, journey end reports {}",
                    last.delivered, FINAL_DELIVERED_TOTAL
                );
            }
        }

        debug!(
            "Normalizing {} stops took {:?}",
            stops.len(),
            now.elapsed()
        );
        Ok(Self {
            year,
            reference_year,
            anchor,
            offset,
            waypoints,
            stops: stops.into(),
        })
    }

    /// Same waypoints, projected onto another year.
    pub fn renormalize(&self, year: i32) -> Result<Self> {
        Self::normalize_from(self.waypoints.clone(), year, self.reference_year)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Start of the journey in the tracked year.
    pub fn anchor(&self) -> Timestamp {
        self.anchor
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&Stop> {
        self.stops.get(index as usize)
    }

    pub fn first(&self) -> Option<&Stop> {
        self.stops.first()
    }

    pub fn last(&self) -> Option<&Stop> {
        self.stops.last()
    }

    pub fn is_last(&self, stop: &Stop) -> bool {
        stop.index as usize + 1 == self.stops.len()
    }

    /// Stop visited before `stop`. `None` for the first stop, which counts
    /// from zero.
    pub fn previous(&self, stop: &Stop) -> Option<&Stop> {
        let index = (stop.index as usize).checked_sub(1)?;
        self.stops.get(index)
    }

    pub fn next(&self, stop: &Stop) -> Option<&Stop> {
        self.stops.get(stop.index as usize + 1)
    }

    /// Deliveries made at this stop alone.
    pub fn delivered_at(&self, index: u32) -> Option<u64> {
        let stop = self.get(index)?;
        let before = self.previous(stop).map_or(0, |previous| previous.delivered);
        Some(stop.delivered - before)
    }

    pub fn find_by_city(&self, city: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| &*stop.city == city)
    }
}

fn project(waypoint: &Waypoint, position: u32, offset: Duration) -> Result<Stop> {
    let index = position as usize;
    let delivered = uplift(waypoint.delivered).ok_or_else(|| Error::InvalidNumber {
        index,
        field: "Eggs Delivered",
        value: waypoint.delivered.to_string(),
    })?;
    let consumed = uplift(waypoint.consumed).ok_or_else(|| Error::InvalidNumber {
        index,
        field: "Carrots eaten",
        value: waypoint.consumed.to_string(),
    })?;
    let arrival = waypoint
        .arrival
        .checked_add(offset)
        .ok_or_else(|| Error::InvalidNumber {
            index,
            field: "Unix Arrival",
            value: waypoint.arrival.as_seconds().to_string(),
        })?;
    let departure = arrival
        .checked_add(waypoint.stoppage)
        .ok_or_else(|| Error::InvalidNumber {
            index,
            field: "Arrival Stoppage Time",
            value: waypoint.stoppage.as_seconds().to_string(),
        })?;
    Ok(Stop {
        index: position,
        city: waypoint.city.clone(),
        region: waypoint.region.clone(),
        coordinate: waypoint.coordinate,
        timezone: waypoint.timezone.clone(),
        population: waypoint.population,
        wikipedia: waypoint.wikipedia.clone(),
        arrival,
        departure,
        delivered,
        consumed,
    })
}
