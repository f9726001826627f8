//! Yearly anchor instants.
//!
//! The itinerary is authored against one year's Easter Eve and replayed on
//! every later Easter Eve. Everything in here is a pure function of the year.

use chrono::{Datelike, NaiveDate, TimeDelta};
use tracing::debug;

use crate::{
    error::{Error, Result},
    shared::time::{Duration, Timestamp},
};

/// First year of the Gregorian computus.
pub const FIRST_YEAR: i32 = 1583;
/// Year the base itinerary timestamps were recorded in.
pub const REFERENCE_YEAR: i32 = 2023;
/// Hour and minute (UTC) of the anchor on Easter Eve.
pub const ANCHOR_TIME: (u32, u32) = (10, 0);
pub const PRE_TRACKING_TIME: (u32, u32) = (8, 30);
pub const TRACKING_LENGTH: Duration = Duration::from_days(1);
/// How long after tracking ends the finished journey stays on display.
pub const LINGER: Duration = Duration::from_days(7);

/// Gregorian Easter Sunday (Meeus/Jones/Butcher).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < FIRST_YEAR {
        return None;
    }
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn easter_eve_at(year: i32, (hour, minute): (u32, u32)) -> Result<Timestamp> {
    let eve = easter_sunday(year)
        .and_then(|sunday| sunday.checked_sub_signed(TimeDelta::days(1)))
        .and_then(|eve| eve.and_hms_opt(hour, minute, 0))
        .ok_or(Error::InvalidYear(year))?;
    Ok(eve.and_utc().into())
}

/// Easter Eve at [`ANCHOR_TIME`] UTC. The journey starts here.
pub fn anchor(year: i32) -> Result<Timestamp> {
    easter_eve_at(year, ANCHOR_TIME)
}

/// Seconds to add to a `reference_year` timestamp to replay it in `year`.
pub fn reanchor_offset_from(year: i32, reference_year: i32) -> Result<Duration> {
    let offset = anchor(year)? - anchor(reference_year)?;
    debug!("Re-anchor offset {reference_year} -> {year}: {offset:?}");
    Ok(offset)
}

pub fn reanchor_offset(year: i32) -> Result<Duration> {
    reanchor_offset_from(year, REFERENCE_YEAR)
}

pub fn tracking_end(year: i32) -> Result<Timestamp> {
    Ok(anchor(year)? + TRACKING_LENGTH)
}

/// Status feed updates are shown from 08:30 UTC on Easter Eve until the anchor.
pub fn pre_tracking_window(year: i32) -> Result<(Timestamp, Timestamp)> {
    Ok((easter_eve_at(year, PRE_TRACKING_TIME)?, anchor(year)?))
}

/// Year whose journey is current at `now`: the calendar year, rolled forward
/// once a week has passed since that year's tracking ended.
pub fn tracking_year(now: Timestamp) -> Result<i32> {
    let year = now
        .to_datetime()
        .map(|datetime| datetime.year())
        .ok_or_else(|| Error::InvalidTimestamp(now.as_seconds().to_string()))?;
    if now >= tracking_end(year)? + LINGER {
        Ok(year + 1)
    } else {
        Ok(year)
    }
}
