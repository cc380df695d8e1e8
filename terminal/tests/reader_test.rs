use anyhow::Result;
use common::{Event, EventKind, Participant, Snapshot, Team};
use std::fs::{self, File};
use std::io::Cursor;
use std::time::{Duration, SystemTime};
use terminal::replay::reader::ReplayReader;
use terminal::replay::writer::ReplayWriter;
use terminal::replay::ReplayMetadata;
use tempfile::TempDir;

fn sample_metadata() -> ReplayMetadata {
    let mut metadata = ReplayMetadata::new("NA1_4242");
    metadata.participants = vec![Participant {
        participant_id: 1,
        team: Some(Team::Blue),
        summoner_name: "Faker".to_string(),
        champion: "Ahri".to_string(),
    }];
    metadata
}

fn sample_snapshots() -> Vec<Snapshot> {
    vec![
        Snapshot::new(0).with_frame(1, 560, 560),
        Snapshot::new(60_000)
            .with_frame(1, 7000, 7200)
            .with_event(
                Event::new(EventKind::ChampionKill, 55_000)
                    .with_killer(1)
                    .with_victim(6)
                    .at(7000, 7200),
            ),
    ]
}

#[test]
fn test_gzip_replay_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("match.timeline");

    ReplayWriter::save(&path, &sample_metadata(), &sample_snapshots())?;
    let replay = ReplayReader::load_replay(&path)?;

    assert_eq!(replay.metadata, sample_metadata());
    assert_eq!(replay.timeline.snapshots(), sample_snapshots().as_slice());
    assert_eq!(replay.timeline.event_count(), 1);
    assert_eq!(replay.directory().display_name(1), "Ahri");
    Ok(())
}

#[test]
fn test_plain_replay_is_readable_text() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("match.jsonl");

    ReplayWriter::save(&path, &sample_metadata(), &sample_snapshots())?;
    let text = fs::read_to_string(&path)?;
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().next().unwrap_or_default().contains("NA1_4242"));

    let replay = ReplayReader::load_replay(&path)?;
    assert_eq!(replay.timeline.len(), 2);
    Ok(())
}

#[test]
fn test_empty_replay_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("empty.jsonl");
    fs::write(&path, "")?;

    let err = ReplayReader::load_replay(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Replay file is empty"));
    Ok(())
}

#[test]
fn test_metadata_without_snapshots_is_an_error() {
    let input = "{\"match_id\":\"KR_1\"}\n\n";
    let err = ReplayReader::read_replay(Cursor::new(input)).err().unwrap();
    assert!(format!("{:#}", err).contains("no snapshots"));
}

#[test]
fn test_malformed_snapshot_names_the_line() {
    let input = "{\"match_id\":\"KR_1\"}\n{\"timestamp\":0}\nnot json\n";
    let err = ReplayReader::read_replay(Cursor::new(input)).err().unwrap();
    assert!(format!("{:#}", err).contains("line 3"));
}

#[test]
fn test_list_replays_recurses_and_sorts_newest_first() -> Result<()> {
    let dir = TempDir::new()?;
    let older = dir.path().join("old.jsonl");
    let newer = dir.path().join("season").join("new.timeline");

    ReplayWriter::save(&older, &sample_metadata(), &sample_snapshots())?;
    ReplayWriter::save(&newer, &sample_metadata(), &sample_snapshots())?;
    File::options()
        .write(true)
        .open(&older)?
        .set_modified(SystemTime::now() - Duration::from_secs(3600))?;
    fs::write(dir.path().join("notes.txt"), "ignored")?;

    let replays = ReplayReader::list_replays(dir.path())?;
    assert_eq!(replays, vec![newer, older]);

    assert!(ReplayReader::list_replays(&dir.path().join("missing"))?.is_empty());
    Ok(())
}
