use anyhow::Result;
use common::MapProjection;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::replay::reader::ReplayReader;
use crate::views::{ReplaySelectorState, ReplayViewerState, View};

/// Navigation between views, raised by a view and carried out by `App`.
#[derive(Debug)]
pub enum AppCommand {
    Quit,
    BackToSelector,
    OpenReplay(PathBuf),
}

pub enum AppState {
    ReplaySelector(Box<ReplaySelectorState>),
    ReplayViewer(Box<ReplayViewerState>),
}

/// Routes input and drawing to the active view. Replays are loaded from disk
/// only when one is opened, and the selector rescans the replay directory
/// every time it is shown.
pub struct App {
    pub state: AppState,
    pub replay_dir: PathBuf,
    projection: MapProjection,
}

impl App {
    pub fn new(replay_dir: PathBuf, projection: MapProjection) -> Result<Self> {
        let state = Self::selector(&replay_dir)?;
        Ok(Self {
            state,
            replay_dir,
            projection,
        })
    }

    fn selector(replay_dir: &Path) -> Result<AppState> {
        let selector = ReplaySelectorState::new(replay_dir.to_path_buf())?;
        Ok(AppState::ReplaySelector(Box::new(selector)))
    }

    fn view(&self) -> &dyn View {
        match &self.state {
            AppState::ReplaySelector(selector) => &**selector,
            AppState::ReplayViewer(viewer) => &**viewer,
        }
    }

    fn view_mut(&mut self) -> &mut dyn View {
        match &mut self.state {
            AppState::ReplaySelector(selector) => &mut **selector,
            AppState::ReplayViewer(viewer) => &mut **viewer,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        self.view_mut().handle_input(key)
    }

    pub fn update(&mut self, dt: Duration) {
        self.view_mut().update(dt);
    }

    pub fn render(&self, frame: &mut Frame) {
        self.view().render(frame);
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::OpenReplay(path) => {
                let replay_data = ReplayReader::load_replay(&path)?;
                let viewer = ReplayViewerState::new(replay_data, self.projection);
                self.state = AppState::ReplayViewer(Box::new(viewer));
            }
            AppCommand::BackToSelector => {
                self.state = Self::selector(&self.replay_dir)?;
            }
            // Handled in main loop
            AppCommand::Quit => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::writer::ReplayWriter;
    use crate::replay::ReplayMetadata;
    use common::Snapshot;
    use crossterm::event::KeyCode;

    #[test]
    fn opening_a_replay_switches_to_the_viewer_and_back() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("KR_1.timeline");
        let snapshots = vec![Snapshot::new(0), Snapshot::new(60_000)];
        ReplayWriter::save(&path, &ReplayMetadata::new("KR_1"), &snapshots)?;

        let mut app = App::new(dir.path().to_path_buf(), MapProjection::default())?;
        let command = app.handle_input(KeyEvent::from(KeyCode::Enter));
        assert!(matches!(&command, Some(AppCommand::OpenReplay(p)) if *p == path));

        app.handle_command(command.unwrap())?;
        match &app.state {
            AppState::ReplayViewer(viewer) => assert_eq!(viewer.player().max_index(), 1),
            AppState::ReplaySelector(_) => panic!("replay was not opened"),
        }

        let command = app.handle_input(KeyEvent::from(KeyCode::Char('q')));
        app.handle_command(command.unwrap())?;
        assert!(matches!(app.state, AppState::ReplaySelector(_)));
        Ok(())
    }

    #[test]
    fn opening_a_missing_replay_fails_and_keeps_the_selector() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let mut app = App::new(dir.path().to_path_buf(), MapProjection::default())?;

        let missing = dir.path().join("gone.jsonl");
        assert!(app.handle_command(AppCommand::OpenReplay(missing)).is_err());
        assert!(matches!(app.state, AppState::ReplaySelector(_)));
        Ok(())
    }
}
