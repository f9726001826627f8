pub mod calendar;
pub mod error;
pub mod feed;
pub mod itinerary;
pub mod shared;
pub mod tracker;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::calendar;
    pub use crate::error::{Error, Result};
    pub use crate::feed::{Feed, StatusFeed, StatusUpdate};
    pub use crate::itinerary::{FINAL_DELIVERED_TOTAL, Itinerary, Stop, Waypoint};
    pub use crate::shared::{Coordinate, Distance, Duration, Timestamp};
    pub use crate::tracker::{
        EngineState, Origin, Phase, Snapshot, Stats, StopRef, TrackerConfig, Visit,
    };
}
