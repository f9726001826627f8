use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    error::{Error, Result},
    feed::models::FeedStatusUpdate,
    shared::time::Timestamp,
};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// A pre-journey bulletin. Only month, day and time of day matter; the year
/// it was written in is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub month: u32,
    pub day: u32,
    pub time: NaiveTime,
    pub text: String,
}

impl StatusUpdate {
    /// The update's instant replayed in `year`. `None` for Feb 29 in common years.
    pub fn in_year(&self, year: i32) -> Option<Timestamp> {
        let date = NaiveDate::from_ymd_opt(year, self.month, self.day)?;
        Some(date.and_time(self.time).and_utc().into())
    }

    fn key(&self) -> (u32, u32, NaiveTime) {
        (self.month, self.day, self.time)
    }
}

impl TryFrom<FeedStatusUpdate> for StatusUpdate {
    type Error = Error;

    fn try_from(value: FeedStatusUpdate) -> Result<Self> {
        let datetime = parse_timestamp(&value.timestamp)?;
        Ok(Self {
            month: datetime.month(),
            day: datetime.day(),
            time: datetime.time(),
            text: value.update,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidTimestamp(raw.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bulletin<'a> {
    pub current: &'a StatusUpdate,
    pub since: Timestamp,
    pub next: Option<(&'a StatusUpdate, Timestamp)>,
}

#[derive(Debug, Clone, Default)]
pub struct StatusFeed {
    updates: Box<[StatusUpdate]>,
}

impl StatusFeed {
    pub fn new(mut updates: Vec<StatusUpdate>) -> Self {
        updates.sort_by(|a, b| a.key().cmp(&b.key()));
        Self {
            updates: updates.into(),
        }
    }

    pub fn updates(&self) -> &[StatusUpdate] {
        &self.updates
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Latest update already due at `now`, with `now`'s year substituted into
    /// every update before comparing.
    pub fn current(&self, now: Timestamp) -> Option<Bulletin<'_>> {
        let year = now.to_datetime()?.year();
        let projected: Vec<(&StatusUpdate, Timestamp)> = self
            .updates
            .iter()
            .filter_map(|update| update.in_year(year).map(|at| (update, at)))
            .collect();

        let position = projected
            .iter()
            .rposition(|(_, at)| *at <= now)?;
        let (current, since) = projected[position];
        Some(Bulletin {
            current,
            since,
            next: projected.get(position + 1).copied(),
        })
    }
}
