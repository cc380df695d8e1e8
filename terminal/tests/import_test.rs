use anyhow::Result;
use common::{
    BuildingType, EventKind, LaneType, Position, ReplayCursor, StructureKey, Team, Timeline,
    TowerType,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use terminal::replay::import::{import_api_participants, import_api_timeline, load_api_documents};
use terminal::replay::reader::ReplayReader;
use terminal::replay::writer::ReplayWriter;

fn timeline_document() -> String {
    json!({
        "metadata": { "matchId": "EUW1_6543210" },
        "info": {
            "frameInterval": 60000,
            "frames": [
                {
                    "timestamp": 0,
                    "participantFrames": {
                        "2": { "participantId": 2, "position": { "x": 14340, "y": 14390 } },
                        "1": { "participantId": 1, "position": { "x": 560, "y": 560 } }
                    },
                    "events": [{ "type": "PAUSE_END", "timestamp": 0 }]
                },
                {
                    "timestamp": 60012,
                    "participantFrames": {
                        "1": { "participantId": 1, "position": { "x": 4000, "y": 12000 } },
                        "2": { "participantId": 2 }
                    },
                    "events": [
                        {
                            "type": "BUILDING_KILL",
                            "timestamp": 59000,
                            "killerId": 0,
                            "teamId": 200,
                            "buildingType": "TOWER_BUILDING",
                            "laneType": "TOP_LANE",
                            "towerType": "OUTER_TURRET",
                            "position": { "x": 4318, "y": 13875 }
                        },
                        {
                            "type": "WARD_PLACED",
                            "timestamp": 59700,
                            "position": { "x": 0, "y": 7200 }
                        },
                        {
                            "type": "ELITE_MONSTER_KILL",
                            "timestamp": 59500,
                            "killerId": 2,
                            "monsterType": "DRAGON",
                            "position": { "x": 9866, "y": 4414 }
                        },
                        {
                            "type": "BUILDING_KILL",
                            "timestamp": 59900,
                            "killerId": 1,
                            "teamId": 100,
                            "buildingType": "INHIBITOR_BUILDING",
                            "laneType": "MID_LANE",
                            "towerType": "UNDEFINED_TURRET",
                            "position": { "x": 3203, "y": 3208 }
                        }
                    ]
                }
            ]
        }
    })
    .to_string()
}

fn match_document() -> String {
    json!({
        "metadata": { "matchId": "EUW1_6543210" },
        "info": {
            "participants": [
                {
                    "participantId": 1,
                    "teamId": 100,
                    "summonerName": "old name",
                    "riotIdName": "Caps",
                    "championName": "Sylas"
                },
                {
                    "participantId": 2,
                    "teamId": 200,
                    "summonerName": "Jankos",
                    "riotIdName": "",
                    "championName": "LeeSin"
                }
            ]
        }
    })
    .to_string()
}

#[test]
fn test_import_timeline_frames_and_events() -> Result<()> {
    let (metadata, snapshots) = import_api_timeline(&timeline_document())?;

    assert_eq!(metadata.match_id, "EUW1_6543210");
    assert_eq!(metadata.frame_interval_ms, 60_000);
    assert_eq!(snapshots.len(), 2);

    // Frames come out ordered by participant id
    let ids: Vec<u32> = snapshots[0].participant_frames.iter().map(|f| f.participant_id).collect();
    assert_eq!(ids, vec![1, 2]);
    // A participant without a position is skipped
    assert_eq!(snapshots[1].participant_frames.len(), 1);

    assert_eq!(snapshots[0].events[0].kind, EventKind::Other("PAUSE_END".to_string()));

    let events = &snapshots[1].events;
    let tower = events[0].building_kill().expect("building kill");
    assert_eq!(tower.building_type, BuildingType::Tower);
    assert_eq!(tower.lane_type, LaneType::Top);
    assert_eq!(tower.tower_type, Some(TowerType::Outer));
    assert_eq!(events[0].killer_id, None, "killer id 0 means minions");
    assert_eq!(events[0].position, Some(Position::new(4318, 13875)));

    assert_eq!(events[1].kind, EventKind::Other("WARD_PLACED".to_string()));
    assert_eq!(events[1].position, None, "a zero coordinate means no position");

    assert_eq!(
        events[2].kind,
        EventKind::EliteMonsterKill { monster_type: Some("DRAGON".to_string()) }
    );
    assert_eq!(events[2].killer_id, Some(2));
    Ok(())
}

#[test]
fn test_imported_kills_drive_the_cursor() -> Result<()> {
    let (_, snapshots) = import_api_timeline(&timeline_document())?;
    let mut cursor = ReplayCursor::with_default_structures(Timeline::new(snapshots)?);

    cursor.step_forward();
    let registry = cursor.registry();
    assert_eq!(
        registry.is_alive(&StructureKey::tower(Team::Red, LaneType::Top, TowerType::Outer)),
        Some(false)
    );
    assert_eq!(registry.is_alive(&StructureKey::inhibitor(Team::Blue, LaneType::Mid)), Some(false));
    assert_eq!(registry.alive_count(), 24);
    Ok(())
}

#[test]
fn test_import_participants_prefers_riot_id() -> Result<()> {
    let participants = import_api_participants(&match_document())?;

    assert_eq!(participants.len(), 2);
    assert_eq!(participants[0].summoner_name, "Caps");
    assert_eq!(participants[0].team, Some(Team::Blue));
    assert_eq!(participants[1].summoner_name, "Jankos");
    assert_eq!(participants[1].champion, "LeeSin");
    assert_eq!(participants[1].team, Some(Team::Red));
    Ok(())
}

#[test]
fn test_import_rejects_malformed_documents() {
    let err = import_api_timeline("{\"info\": {}}").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse match API timeline"));
}

#[test]
fn test_imported_documents_load_as_replay() -> Result<()> {
    let dir = TempDir::new()?;
    let timeline_path = dir.path().join("timeline.json");
    let match_path = dir.path().join("match.json");
    fs::write(&timeline_path, timeline_document())?;
    fs::write(&match_path, match_document())?;

    let (metadata, snapshots) = load_api_documents(&timeline_path, Some(&match_path))?;
    let out = dir.path().join("EUW1_6543210.timeline");
    ReplayWriter::save(&out, &metadata, &snapshots)?;

    let replay = ReplayReader::load_replay(&out)?;
    assert_eq!(replay.timeline.len(), 2);
    // Positions survive the trip through the replay file unchanged
    assert_eq!(replay.timeline.snapshots(), snapshots.as_slice());
    assert_eq!(replay.directory().display_name(2), "LeeSin");
    Ok(())
}
