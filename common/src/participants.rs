use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Team;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Participant {
    pub participant_id: u32,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub champion: String,
}

/// Lookup from participant id to display metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDirectory {
    by_id: BTreeMap<u32, Participant>,
}

impl ParticipantDirectory {
    pub fn from_participants(participants: impl IntoIterator<Item = Participant>) -> Self {
        let by_id = participants
            .into_iter()
            .map(|p| (p.participant_id, p))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, participant_id: u32) -> Option<&Participant> {
        self.by_id.get(&participant_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.by_id.values()
    }

    /// Champion name, falling back to the summoner name and then the id.
    pub fn display_name(&self, participant_id: u32) -> String {
        match self.by_id.get(&participant_id) {
            Some(p) if !p.champion.is_empty() => p.champion.clone(),
            Some(p) if !p.summoner_name.is_empty() => p.summoner_name.clone(),
            _ => format!("Participant {}", participant_id),
        }
    }
}
