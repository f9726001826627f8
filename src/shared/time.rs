use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whole seconds since the Unix epoch, UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp())
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0 - rhs.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(datetime) => f.write_fmt(format_args!("{}", datetime.format("%Y-%m-%d %H:%M:%S"))),
            None => f.write_fmt(format_args!("@{}", self.0)),
        }
    }
}

impl Timestamp {
    pub fn now() -> Self {
        Utc::now().into()
    }

    pub const fn from_seconds(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// `None` on overflow or when the result has no calendar date.
    pub fn checked_add(self, duration: Duration) -> Option<Self> {
        let stamp = Self(self.0.checked_add(duration.0)?);
        stamp.to_datetime().map(|_| stamp)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(i64);

impl From<i64> for Duration {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_seconds(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes * 60)
    }

    pub const fn from_hours(hours: i64) -> Self {
        Self(hours * 60 * 60)
    }

    pub const fn from_days(days: i64) -> Self {
        Self(days * 60 * 60 * 24)
    }

    pub const fn as_seconds(&self) -> i64 {
        self.0
    }

    pub fn as_hours(&self) -> f64 {
        self.0 as f64 / 3600.0
    }

    pub fn to_hms_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let secs = self.0.unsigned_abs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        let s = secs % 60;
        format!("{}{:02}:{:02}:{:02}", sign, h, m, s)
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

#[test]
fn hms_string_test() {
    assert_eq!(Duration::from_seconds(0).to_hms_string(), "00:00:00");
    assert_eq!(Duration::from_seconds(3690).to_hms_string(), "01:01:30");
    assert_eq!(Duration::from_hours(30).to_hms_string(), "30:00:00");
    assert_eq!(Duration::from_seconds(-90).to_hms_string(), "-00:01:30");
}

#[test]
fn timestamp_arithmetic_test() {
    let a = Timestamp::from_seconds(1_000);
    let b = a + Duration::from_minutes(2);
    assert_eq!(b.as_seconds(), 1_120);
    assert_eq!(b - a, Duration::from_seconds(120));
    assert_eq!(b - Duration::from_seconds(120), a);
}

#[test]
fn timestamp_display_test() {
    let stamp = Timestamp::from_seconds(1_681_034_400);
    assert_eq!(stamp.to_string(), "2023-04-09 10:00:00");
}

#[test]
fn timestamp_checked_add_test() {
    let a = Timestamp::from_seconds(1_000);
    assert_eq!(a.checked_add(Duration::from_seconds(60)), Some(Timestamp::from_seconds(1_060)));
    assert_eq!(Timestamp::from_seconds(i64::MAX).checked_add(Duration::from_seconds(1)), None);
    // Representable as i64 but far past any calendar date.
    assert_eq!(Timestamp::from_seconds(i64::MAX - 10).checked_add(Duration::from_seconds(1)), None);
}
