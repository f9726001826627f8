use serde::{Deserialize, Serialize};
use waymark::{
    shared::{Duration, Timestamp},
    tracker::Snapshot,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDto {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    /// Time left until `boundary`, as `HH:MM:SS`.
    pub countdown: String,
}

impl StatusDto {
    pub fn from(snapshot: &Snapshot, now: Timestamp) -> Self {
        let remaining = (snapshot.boundary - now).as_seconds().max(0);
        Self {
            snapshot: snapshot.clone(),
            countdown: Duration::from_seconds(remaining).to_hms_string(),
        }
    }
}
