use tokio::sync::RwLock;
use waymark::prelude::*;

pub struct AppState {
    /// Written by the tick task only.
    pub engine: RwLock<EngineState>,
    pub snapshot: RwLock<Option<Snapshot>>,
    pub status: StatusFeed,
}

impl AppState {
    pub fn new(engine: EngineState, status: StatusFeed) -> Self {
        Self {
            engine: RwLock::new(engine),
            snapshot: RwLock::new(None),
            status,
        }
    }
}
