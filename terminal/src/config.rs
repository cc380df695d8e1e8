use clap::{Parser, Subcommand};
use common::{MapProjection, DEFAULT_DISPLAY_SIZE, DEFAULT_MAP_MAX_X, DEFAULT_MAP_MAX_Y};
use std::path::PathBuf;

pub const DEFAULT_REPLAY_DIR: &str = "/tmp/riftreplay";
pub const DEFAULT_LOG_FILE: &str = "riftreplay.log";

#[derive(Parser, Debug)]
#[command(name = "riftreplay", about = "Step through recorded match timelines in the terminal")]
pub struct Args {
    /// Directory scanned for `.timeline` and `.jsonl` replay files
    #[arg(long, env = "RIFTREPLAY_DIR", default_value = DEFAULT_REPLAY_DIR)]
    pub replay_dir: PathBuf,

    /// Largest x coordinate of the map
    #[arg(long, env = "RIFTREPLAY_MAP_MAX_X", default_value_t = DEFAULT_MAP_MAX_X)]
    pub map_max_x: f64,

    /// Largest y coordinate of the map
    #[arg(long, env = "RIFTREPLAY_MAP_MAX_Y", default_value_t = DEFAULT_MAP_MAX_Y)]
    pub map_max_y: f64,

    /// Where log output goes while the viewer owns the terminal
    #[arg(long, env = "RIFTREPLAY_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a match API timeline document into a replay file
    Import {
        /// Timeline document (`/lol/match/v5/matches/{id}/timeline` response)
        #[arg(long)]
        timeline: PathBuf,

        /// Match document, used for participant names and teams
        #[arg(long = "match")]
        match_doc: Option<PathBuf>,

        /// Output path; defaults to `<replay-dir>/<match id>.timeline`
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Args {
    pub fn projection(&self) -> anyhow::Result<MapProjection> {
        Ok(MapProjection::new(self.map_max_x, self.map_max_y, DEFAULT_DISPLAY_SIZE)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_standard_map_bounds() {
        let args = Args::parse_from(["riftreplay"]);
        let projection = args.projection().unwrap();
        assert_eq!(projection.max_x(), DEFAULT_MAP_MAX_X);
        assert_eq!(projection.max_y(), DEFAULT_MAP_MAX_Y);
        assert!(args.command.is_none());
    }

    #[test]
    fn import_subcommand_parses_paths() {
        let args = Args::parse_from([
            "riftreplay",
            "import",
            "--timeline",
            "tl.json",
            "--match",
            "match.json",
        ]);
        match args.command {
            Some(Command::Import { timeline, match_doc, out }) => {
                assert_eq!(timeline, PathBuf::from("tl.json"));
                assert_eq!(match_doc, Some(PathBuf::from("match.json")));
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_bounds() {
        let args = Args::parse_from(["riftreplay", "--map-max-x", "0"]);
        assert!(args.projection().is_err());
    }
}
