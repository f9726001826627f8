//! Where the traveler is at a given instant.
//!
//! Every function here is a pure function of the stops and the query instant,
//! apart from [`EngineState`] which owns the speed window and the running
//! distance for a polling loop.

mod config;
mod interpolate;
mod locator;
mod snapshot;
mod spatial;
mod speed;
mod state;

pub use config::*;
pub use interpolate::*;
pub use locator::*;
pub use snapshot::{Snapshot, Stats, StopRef};
pub use spatial::*;
pub use speed::*;
pub use state::*;
