use super::*;
use common::{ParticipantDirectory, ReplayCursor};

/// Available playback speeds, in snapshots per second.
pub const PLAY_SPEEDS: [f32; 5] = [0.5, 1.0, 2.0, 4.0, 8.0];

pub struct ReplayPlayer {
    pub metadata: ReplayMetadata,
    pub directory: ParticipantDirectory,
    pub cursor: ReplayCursor,
    pub is_playing: bool,
    speed_index: usize,
}

impl ReplayPlayer {
    pub fn new(replay: ReplayData) -> Self {
        let directory = replay.directory();
        Self {
            metadata: replay.metadata,
            directory,
            cursor: ReplayCursor::with_default_structures(replay.timeline),
            is_playing: false,
            speed_index: 1,
        }
    }

    /// Move forward by n snapshots, one step at a time.
    pub fn step_forward(&mut self, steps: usize) {
        for _ in 0..steps {
            if self.cursor.is_at_end() {
                break;
            }
            self.cursor.step_forward();
        }
    }

    /// Move backward by n snapshots, one step at a time.
    pub fn step_backward(&mut self, steps: usize) {
        for _ in 0..steps {
            if self.cursor.is_at_start() {
                break;
            }
            self.cursor.step_backward();
        }
    }

    pub fn seek(&mut self, index: usize) {
        self.cursor.seek(index);
    }

    pub fn jump_to_start(&mut self) {
        self.cursor.seek(0);
    }

    pub fn jump_to_end(&mut self) {
        self.is_playing = false;
        self.cursor.seek(self.cursor.timeline().last_index());
    }

    /// Toggle play/pause
    pub fn toggle_play(&mut self) {
        // Don't allow playing from the last snapshot
        if self.cursor.is_at_end() {
            self.is_playing = false;
        } else {
            self.is_playing = !self.is_playing;
        }
    }

    pub fn speed_up(&mut self) {
        if self.speed_index < PLAY_SPEEDS.len() - 1 {
            self.speed_index += 1;
        }
    }

    pub fn speed_down(&mut self) {
        self.speed_index = self.speed_index.saturating_sub(1);
    }

    pub fn play_speed(&self) -> f32 {
        PLAY_SPEEDS[self.speed_index]
    }

    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn max_index(&self) -> usize {
        self.cursor.timeline().last_index()
    }
}
