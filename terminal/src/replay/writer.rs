use super::reader::is_compressed;
use super::*;
use anyhow::{Context, Result};
use common::Snapshot;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub struct ReplayWriter;

impl ReplayWriter {
    /// Write a replay file, gzip-compressed when the path has the
    /// `.timeline` extension.
    pub fn save(path: &Path, metadata: &ReplayMetadata, snapshots: &[Snapshot]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context("Failed to create replay output directory")?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create replay file: {:?}", path))?;

        if is_compressed(path) {
            let mut encoder = GzEncoder::new(file, Compression::default());
            Self::write_replay(&mut encoder, metadata, snapshots)?;
            encoder.finish().context("Failed to finish gzip stream")?;
        } else {
            let mut writer = BufWriter::new(file);
            Self::write_replay(&mut writer, metadata, snapshots)?;
            writer.flush().context("Failed to flush replay file")?;
        }

        info!(
            "Saved replay {} ({} snapshots) to {:?}",
            metadata.match_id,
            snapshots.len(),
            path
        );
        Ok(())
    }

    pub fn write_replay<W: Write>(
        writer: &mut W,
        metadata: &ReplayMetadata,
        snapshots: &[Snapshot],
    ) -> Result<()> {
        let metadata_json = serde_json::to_string(metadata)?;
        writeln!(writer, "{}", metadata_json)?;

        for snapshot in snapshots {
            let snapshot_json = serde_json::to_string(snapshot)?;
            writeln!(writer, "{}", snapshot_json)?;
        }
        Ok(())
    }
}
