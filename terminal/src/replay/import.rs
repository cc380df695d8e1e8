//! Conversion from the match API's JSON documents into replay files.

use super::*;
use anyhow::{Context, Result};
use common::{
    BuildingKill, BuildingType, Event, EventKind, LaneType, ParticipantFrame, Position, Snapshot,
    Team, TowerType,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct ApiTimeline {
    metadata: ApiMetadata,
    info: ApiTimelineInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMetadata {
    match_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTimelineInfo {
    #[serde(default = "default_frame_interval")]
    frame_interval: u64,
    frames: Vec<ApiFrame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFrame {
    timestamp: u64,
    #[serde(default)]
    participant_frames: BTreeMap<String, ApiParticipantFrame>,
    #[serde(default)]
    events: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiParticipantFrame {
    participant_id: u32,
    position: Option<ApiPosition>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ApiPosition {
    x: i32,
    y: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    timestamp: u64,
    killer_id: Option<u32>,
    victim_id: Option<u32>,
    position: Option<ApiPosition>,
    monster_type: Option<String>,
    team_id: Option<i32>,
    building_type: Option<BuildingType>,
    lane_type: Option<LaneType>,
    tower_type: Option<TowerType>,
}

#[derive(Debug, Deserialize)]
struct ApiMatch {
    info: ApiMatchInfo,
}

#[derive(Debug, Deserialize)]
struct ApiMatchInfo {
    participants: Vec<ApiParticipant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiParticipant {
    participant_id: u32,
    team_id: i32,
    #[serde(default)]
    summoner_name: String,
    #[serde(default)]
    riot_id_name: Option<String>,
    #[serde(default)]
    champion_name: String,
}

impl From<ApiEvent> for Event {
    fn from(api: ApiEvent) -> Self {
        let kind = match api.kind.as_str() {
            EventKind::CHAMPION_KILL => EventKind::ChampionKill,
            EventKind::ELITE_MONSTER_KILL => EventKind::EliteMonsterKill {
                monster_type: api.monster_type,
            },
            EventKind::BUILDING_KILL => EventKind::BuildingKill(BuildingKill {
                team_id: api.team_id.unwrap_or_default(),
                building_type: api.building_type.unwrap_or(BuildingType::Unknown),
                lane_type: api.lane_type.unwrap_or(LaneType::Unknown),
                tower_type: api.tower_type,
            }),
            _ => EventKind::Other(api.kind.clone()),
        };

        Event {
            timestamp: api.timestamp,
            kind,
            // The API uses 0 for "no champion" (minions, turrets)
            killer_id: api.killer_id.filter(|id| *id != 0),
            victim_id: api.victim_id.filter(|id| *id != 0),
            position: api
                .position
                .and_then(|p| Position::from_event_coordinates(p.x, p.y)),
        }
    }
}

/// Convert a match API timeline document into replay metadata and snapshots.
pub fn import_api_timeline(json: &str) -> Result<(ReplayMetadata, Vec<Snapshot>)> {
    let timeline: ApiTimeline =
        serde_json::from_str(json).context("Failed to parse match API timeline")?;

    let snapshots: Vec<Snapshot> = timeline
        .info
        .frames
        .into_iter()
        .map(|frame| {
            let mut participant_frames: Vec<ParticipantFrame> = frame
                .participant_frames
                .into_values()
                .filter_map(|pf| match pf.position {
                    Some(p) => Some(ParticipantFrame {
                        participant_id: pf.participant_id,
                        x: p.x,
                        y: p.y,
                    }),
                    None => {
                        debug!(participant_id = pf.participant_id, "Frame without position");
                        None
                    }
                })
                .collect();
            participant_frames.sort_by_key(|f| f.participant_id);

            Snapshot {
                timestamp: frame.timestamp,
                events: frame.events.into_iter().map(Event::from).collect(),
                participant_frames,
            }
        })
        .collect();

    let metadata = ReplayMetadata {
        match_id: timeline.metadata.match_id,
        participants: Vec::new(),
        frame_interval_ms: timeline.info.frame_interval,
    };
    Ok((metadata, snapshots))
}

/// Participant display metadata from a match API match document.
pub fn import_api_participants(json: &str) -> Result<Vec<Participant>> {
    let api_match: ApiMatch =
        serde_json::from_str(json).context("Failed to parse match API match document")?;

    Ok(api_match
        .info
        .participants
        .into_iter()
        .map(|p| {
            let summoner_name = match p.riot_id_name {
                Some(name) if !name.is_empty() => name,
                _ => p.summoner_name,
            };
            Participant {
                participant_id: p.participant_id,
                team: Team::from_team_id(p.team_id),
                summoner_name,
                champion: p.champion_name,
            }
        })
        .collect())
}

/// Read a timeline document, and optionally its match document for
/// participant names, from disk.
pub fn load_api_documents(
    timeline_path: &Path,
    match_path: Option<&Path>,
) -> Result<(ReplayMetadata, Vec<Snapshot>)> {
    let timeline_json = fs::read_to_string(timeline_path)
        .with_context(|| format!("Failed to read timeline document {:?}", timeline_path))?;
    let (mut metadata, snapshots) = import_api_timeline(&timeline_json)?;

    if let Some(match_path) = match_path {
        let match_json = fs::read_to_string(match_path)
            .with_context(|| format!("Failed to read match document {:?}", match_path))?;
        metadata.participants = import_api_participants(&match_json)?;
    }

    info!("Imported match {} from {:?}", metadata.match_id, timeline_path);
    Ok((metadata, snapshots))
}
