//! Full-screen views of the replay browser. Each one consumes key presses,
//! advances on the frame clock and draws itself from its own state.

pub mod replay_selector;
pub mod replay_viewer;

pub use replay_selector::ReplaySelectorState;
pub use replay_viewer::ReplayViewerState;

use crate::app::AppCommand;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::Duration;

pub trait View {
    /// Returns a command when the key asks to leave this view.
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand>;

    /// Called once per frame with the time since the previous frame.
    fn update(&mut self, dt: Duration);

    /// Draws from current state only; views never change the replay here.
    fn render(&self, frame: &mut Frame);
}
