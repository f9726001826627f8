use std::sync::Arc;

use crate::{
    error::{Error, Result},
    feed::{FeedWaypoint, Scalar},
    shared::{
        geo::Coordinate,
        time::{Duration, Timestamp},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Population {
    pub count: u64,
    pub year: Option<i32>,
}

/// One entry of the base itinerary, timestamps still in the reference year.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub index: u32,
    pub city: Arc<str>,
    pub region: Arc<str>,
    pub coordinate: Coordinate,
    pub timezone: Arc<str>,
    pub population: Option<Population>,
    pub wikipedia: Option<Arc<str>>,
    pub arrival: Timestamp,
    pub stoppage: Duration,
    pub delivered: u64,
    pub consumed: u64,
}

/// A waypoint projected onto the tracked year.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub index: u32,
    pub city: Arc<str>,
    pub region: Arc<str>,
    pub coordinate: Coordinate,
    pub timezone: Arc<str>,
    pub population: Option<Population>,
    pub wikipedia: Option<Arc<str>>,
    pub arrival: Timestamp,
    pub departure: Timestamp,
    /// Cumulative, including this stop.
    pub delivered: u64,
    /// Cumulative, including this stop.
    pub consumed: u64,
}

impl Stop {
    pub fn is_visiting(&self, now: Timestamp) -> bool {
        self.arrival <= now && now < self.departure
    }

    pub fn stoppage(&self) -> Duration {
        self.departure - self.arrival
    }
}

/// Raw counts in the feed are scaled up by a quarter and rounded up.
pub(crate) fn uplift(raw: u64) -> Option<u64> {
    raw.checked_mul(5)?.checked_add(3).map(|value| value / 4)
}

struct Fields {
    index: usize,
}

impl Fields {
    fn text(&self, value: Option<String>, field: &'static str) -> Result<Arc<str>> {
        match value {
            Some(value) if !value.trim().is_empty() => Ok(value.into()),
            _ => Err(Error::MissingField {
                index: self.index,
                field,
            }),
        }
    }

    fn integer(&self, value: Option<Scalar>, field: &'static str) -> Result<i64> {
        let value = value
            .filter(|value| !value.is_blank())
            .ok_or(Error::MissingField {
                index: self.index,
                field,
            })?;
        value.as_i64().ok_or_else(|| Error::InvalidNumber {
            index: self.index,
            field,
            value: value.raw(),
        })
    }

    fn count(&self, value: Option<Scalar>, field: &'static str) -> Result<u64> {
        let raw = value.as_ref().map(Scalar::raw).unwrap_or_default();
        let count = self.integer(value, field)?;
        u64::try_from(count).map_err(|_| Error::InvalidNumber {
            index: self.index,
            field,
            value: raw,
        })
    }

    fn float(&self, value: Option<Scalar>, field: &'static str) -> Result<f64> {
        let value = value
            .filter(|value| !value.is_blank())
            .ok_or(Error::MissingField {
                index: self.index,
                field,
            })?;
        let number = value.as_f64().ok_or_else(|| Error::InvalidNumber {
            index: self.index,
            field,
            value: value.raw(),
        })?;
        if number.is_finite() {
            Ok(number)
        } else {
            Err(Error::NonFinite {
                index: self.index,
                field,
            })
        }
    }

    /// An angle in degrees within `[-limit, limit]`.
    fn degrees(&self, value: Option<Scalar>, field: &'static str, limit: f64) -> Result<f64> {
        let degrees = self.float(value, field)?;
        if degrees.abs() <= limit {
            Ok(degrees)
        } else {
            Err(Error::OutOfRange {
                index: self.index,
                field,
                value: degrees,
                limit,
            })
        }
    }

    fn optional_count(&self, value: Option<Scalar>, field: &'static str) -> Result<Option<u64>> {
        match value {
            Some(value) if !value.is_blank() => self.count(Some(value), field).map(Some),
            _ => Ok(None),
        }
    }
}

impl TryFrom<(usize, FeedWaypoint)> for Waypoint {
    type Error = Error;

    fn try_from((index, value): (usize, FeedWaypoint)) -> Result<Self> {
        let fields = Fields { index };
        let latitude = fields.degrees(value.latitude, "Latitude", 90.0)?;
        let longitude = fields.degrees(value.longitude, "Longitude", 180.0)?;
        let stoppage = fields.integer(value.stoppage_time, "Arrival Stoppage Time")?;
        if stoppage < 0 {
            return Err(Error::InvalidNumber {
                index,
                field: "Arrival Stoppage Time",
                value: stoppage.to_string(),
            });
        }

        // The census year is informational, anything unparsable is dropped.
        let population_year = value
            .population_year
            .and_then(|year| year.as_i64())
            .and_then(|year| i32::try_from(year).ok());
        let population = fields
            .optional_count(value.population, "Population Num")?
            .map(|count| Population {
                count,
                year: population_year,
            });

        Ok(Self {
            index: index as u32,
            city: fields.text(value.city, "City")?,
            region: fields.text(value.region, "Region")?,
            coordinate: Coordinate::new(latitude, longitude),
            timezone: fields.text(value.timezone, "Timezone")?,
            population,
            wikipedia: value
                .wikipedia
                .filter(|link| !link.trim().is_empty())
                .map(Into::into),
            arrival: Timestamp::from_seconds(fields.integer(value.unix_arrival, "Unix Arrival")?),
            stoppage: Duration::from_seconds(stoppage),
            delivered: fields.count(value.delivered, "Eggs Delivered")?,
            consumed: fields.count(value.consumed, "Carrots eaten")?,
        })
    }
}
