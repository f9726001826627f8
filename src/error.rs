use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Feed document has no {0:?} list")]
    MissingKey(String),
    #[error("Waypoint {index} is missing field {field}")]
    MissingField { index: usize, field: &'static str },
    #[error("Waypoint {index} has non-numeric {field}: {value:?}")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("Waypoint {index} has non-finite {field}")]
    NonFinite { index: usize, field: &'static str },
    #[error("Waypoint {index} has {field} {value} outside [-{limit}, {limit}]")]
    OutOfRange {
        index: usize,
        field: &'static str,
        value: f64,
        limit: f64,
    },
    #[error("Waypoint {index} arrives or departs before its predecessor")]
    OutOfOrder { index: usize },
    #[error("Waypoint {index} has a lower cumulative {field} than its predecessor")]
    DecreasingCounter { index: usize, field: &'static str },
    #[error("Itinerary feed has {} invalid waypoints", .0.len())]
    Aggregate(Vec<Error>),
    #[error("Itinerary has no waypoints")]
    EmptyItinerary,
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Year {0} is outside the supported calendar")]
    InvalidYear(i32),
    #[error("Tick skipped: {0}")]
    Tick(String),
}

impl Error {
    /// Malformed or missing feed data. Fatal to normalization.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Error::Tick(_) | Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
