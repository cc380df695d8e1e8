use super::*;
use anyhow::{Context, Result};
use common::Snapshot;
use flate2::read::GzDecoder;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

/// Gzip-compressed replay files.
pub const COMPRESSED_EXTENSION: &str = "timeline";
/// Plain newline-delimited JSON replay files.
pub const PLAIN_EXTENSION: &str = "jsonl";

pub struct ReplayReader;

impl ReplayReader {
    pub fn load_replay(path: &Path) -> Result<ReplayData> {
        let file =
            File::open(path).with_context(|| format!("Failed to open replay file: {:?}", path))?;
        let source: Box<dyn Read> = if is_compressed(path) {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        let replay = Self::read_replay(BufReader::new(source))
            .with_context(|| format!("Failed to load replay {:?}", path))?;

        info!(
            "Loaded replay {}: {} snapshots, {} events",
            replay.metadata.match_id,
            replay.timeline.len(),
            replay.timeline.event_count()
        );
        Ok(replay)
    }

    /// Parse a replay from newline-delimited JSON: metadata on the first
    /// line, then one snapshot per line. Blank lines are skipped.
    pub fn read_replay<R: BufRead>(reader: R) -> Result<ReplayData> {
        let mut lines = reader
            .lines()
            .enumerate()
            .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()));

        let (_, metadata_line) = lines.next().context("Replay file is empty")?;
        let metadata_line = metadata_line.context("Failed to read metadata line")?;
        let metadata: ReplayMetadata =
            serde_json::from_str(&metadata_line).context("Failed to parse replay metadata")?;

        let mut snapshots = Vec::new();
        for (i, line_result) in lines {
            let line = line_result.with_context(|| format!("Failed to read line {}", i + 1))?;
            let snapshot: Snapshot = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse snapshot on line {}", i + 1))?;
            snapshots.push(snapshot);
        }

        let timeline = Timeline::new(snapshots)
            .context("Replay file has no snapshots")?
            .with_frame_interval(metadata.frame_interval_ms)
            .context("Invalid frame interval in replay metadata")?;

        Ok(ReplayData { metadata, timeline })
    }

    pub fn list_replays(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut replays = Vec::new();

        fn find_replay_files(dir: &Path, replays: &mut Vec<PathBuf>) -> Result<()> {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();

                if path.is_dir() {
                    if let Err(e) = find_replay_files(&path, replays) {
                        warn!("Skipping unreadable directory {:?}: {}", path, e);
                    }
                } else if is_replay_file(&path) {
                    replays.push(path);
                }
            }
            Ok(())
        }

        find_replay_files(dir, &mut replays)?;

        // Newest first
        replays.sort_by(|a, b| {
            let a_time = a
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            let b_time = b
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            b_time.cmp(&a_time)
        });

        Ok(replays)
    }
}

pub fn is_compressed(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(COMPRESSED_EXTENSION))
}

pub fn is_replay_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some(COMPRESSED_EXTENSION) | Some(PLAIN_EXTENSION)
    )
}
