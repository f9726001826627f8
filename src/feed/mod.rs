use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::debug;

mod config;
pub mod models;
mod status;
pub use config::*;
pub use models::*;
pub use status::*;

use crate::error::{Error, Result};

/// Reads the itinerary and status documents. Field values are kept raw here;
/// validation happens when the itinerary is normalized.
#[derive(Default)]
pub struct Feed {
    config: Config,
}

impl Feed {
    pub fn new(config: self::Config) -> Self {
        Self { config }
    }

    pub fn route_from_str(&self, json: &str) -> Result<Vec<FeedWaypoint>> {
        let document: Value = serde_json::from_str(json)?;
        self.route_from_value(document)
    }

    pub fn route_from_reader<R: Read>(&self, reader: R) -> Result<Vec<FeedWaypoint>> {
        let document: Value = serde_json::from_reader(reader)?;
        self.route_from_value(document)
    }

    pub fn route_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<FeedWaypoint>> {
        let file = File::open(path)?;
        self.route_from_reader(BufReader::new(file))
    }

    pub fn route_from_value(&self, document: Value) -> Result<Vec<FeedWaypoint>> {
        let route: Vec<FeedWaypoint> = take_list(document, &self.config.route_key)?;
        debug!("Read {} waypoints from feed", route.len());
        Ok(route)
    }

    pub fn status_from_str(&self, json: &str) -> Result<StatusFeed> {
        let document: Value = serde_json::from_str(json)?;
        self.status_from_value(document)
    }

    pub fn status_from_value(&self, document: Value) -> Result<StatusFeed> {
        let updates: Vec<FeedStatusUpdate> = take_list(document, &self.config.status_key)?;
        let updates = updates
            .into_iter()
            .map(StatusUpdate::try_from)
            .collect::<Result<Vec<_>>>()?;
        debug!("Read {} status updates from feed", updates.len());
        Ok(StatusFeed::new(updates))
    }
}

fn take_list<T>(mut document: Value, key: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let list = document
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| Error::MissingKey(key.to_string()))?;
    Ok(serde_json::from_value(list)?)
}
