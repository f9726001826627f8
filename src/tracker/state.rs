use tracing::{debug, info};

use crate::{
    calendar,
    error::Result,
    feed::FeedWaypoint,
    itinerary::{Itinerary, Stop},
    shared::{
        geo::{Coordinate, Distance},
        time::Timestamp,
    },
    tracker::{
        Phase, Sample, Snapshot, SpeedWindow, Stats, TrackerConfig, Visit, nearest, snapshot,
        visit_estimate,
    },
};

/// State owned by the polling loop. Only [`EngineState::tick`] mutates it;
/// other readers should work from the returned snapshot.
#[derive(Debug, Clone)]
pub struct EngineState {
    config: TrackerConfig,
    itinerary: Option<Itinerary>,
    speed: SpeedWindow,
    distance: Distance,
    phase: Option<Phase>,
}

impl EngineState {
    pub fn new(config: TrackerConfig, itinerary: Option<Itinerary>) -> Self {
        let speed = SpeedWindow::new(config.speed_window);
        Self {
            config,
            itinerary,
            speed,
            distance: Distance::default(),
            phase: None,
        }
    }

    /// Normalizes `route` for the journey that is current at `now`.
    pub fn load(config: TrackerConfig, route: Vec<FeedWaypoint>, now: Timestamp) -> Result<Self> {
        let year = calendar::tracking_year(now)?;
        let itinerary = Itinerary::from_feed_with(route, year, config.reference_year)?;
        info!(
            "Loaded itinerary with {} stops for {}",
            itinerary.len(),
            itinerary.year()
        );
        Ok(Self::new(config, Some(itinerary)))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.itinerary.as_ref()
    }

    /// Distance flown so far as of the last tick.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn speed(&self) -> &SpeedWindow {
        &self.speed
    }

    /// One poll. Nothing is mutated when the tick fails, so the caller can
    /// skip it and try again on the next cycle.
    pub fn tick(&mut self, now: Timestamp) -> Result<Snapshot> {
        let fresh = self.reprojected(now)?;
        let Some(itinerary) = fresh.as_ref().or(self.itinerary.as_ref()) else {
            return Snapshot::idle(&self.config, now);
        };

        let (mut snapshot, distance) = snapshot::locate(itinerary, &self.config, now)?;

        if let Some(fresh) = fresh {
            info!(
                "Re-anchored itinerary to {} (offset {:?})",
                fresh.year(),
                fresh.offset()
            );
            self.itinerary = Some(fresh);
            self.distance = Distance::default();
            self.speed.clear();
            self.phase = None;
        }

        self.distance = self.distance.max(distance);
        let speed = if snapshot.phase == Phase::InTransit {
            self.speed.push(Sample {
                coordinate: snapshot.position,
                at: now,
            })
        } else {
            self.speed.clear();
            0.0
        };
        snapshot.stats = Stats {
            speed_kmh: speed.max(0.0).round() as u64,
            distance_km: self.distance.as_kilometers().round() as u64,
            distance_mi: self.distance.as_miles().round() as u64,
            ..snapshot.stats
        };

        if self.phase != Some(snapshot.phase) {
            info!(
                "Phase {:?} -> {:?} at {} ({}, {})",
                self.phase, snapshot.phase, now, snapshot.stop.city, snapshot.stop.region
            );
            self.phase = Some(snapshot.phase);
        }
        Ok(snapshot)
    }

    /// The itinerary projected onto the tracked year, once that year changes.
    fn reprojected(&self, now: Timestamp) -> Result<Option<Itinerary>> {
        let Some(itinerary) = &self.itinerary else {
            return Ok(None);
        };
        let year = calendar::tracking_year(now)?;
        if year == itinerary.year() {
            return Ok(None);
        }
        itinerary.renormalize(year).map(Some)
    }

    pub fn nearest(&self, observer: &Coordinate) -> Option<&Stop> {
        let itinerary = self.itinerary.as_ref()?;
        let stop = nearest(itinerary.stops(), observer);
        debug!("Nearest stop to {observer}: {:?}", stop.map(|stop| &stop.city));
        stop
    }

    pub fn visit(&self, observer: &Coordinate, now: Timestamp) -> Option<(&Stop, Visit)> {
        let itinerary = self.itinerary.as_ref()?;
        let stop = nearest(itinerary.stops(), observer)?;
        Some((stop, visit_estimate(itinerary.stops(), stop, now)))
    }
}
