use serde::{Deserialize, Serialize};
use waymark::{feed::Bulletin, shared::Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDto {
    pub text: String,
    pub since: Timestamp,
    pub next_at: Option<Timestamp>,
}

impl From<Bulletin<'_>> for UpdateDto {
    fn from(value: Bulletin<'_>) -> Self {
        Self {
            text: value.current.text.clone(),
            since: value.since,
            next_at: value.next.map(|(_, at)| at),
        }
    }
}
