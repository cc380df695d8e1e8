pub mod import;
pub mod player;
pub mod reader;
pub mod writer;

use common::{Participant, ParticipantDirectory, Timeline, DEFAULT_FRAME_INTERVAL_MS};
use serde::{Deserialize, Serialize};

/// First line of a replay file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayMetadata {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

fn default_frame_interval() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

impl ReplayMetadata {
    pub fn new(match_id: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            participants: Vec::new(),
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

#[derive(Debug)]
pub struct ReplayData {
    pub metadata: ReplayMetadata,
    pub timeline: Timeline,
}

impl ReplayData {
    pub fn directory(&self) -> ParticipantDirectory {
        ParticipantDirectory::from_participants(self.metadata.participants.iter().cloned())
    }
}
