use serde::{Deserialize, Serialize};

use crate::{Event, Position, TimelineError};

/// Interval between snapshots in the match API's timelines.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantFrame {
    pub participant_id: u32,
    pub x: i32,
    pub y: i32,
}

impl ParticipantFrame {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Events and participant positions recorded for one time index.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, alias = "participantframes")]
    pub participant_frames: Vec<ParticipantFrame>,
}

impl Snapshot {
    pub fn new(timestamp: u64) -> Self {
        Snapshot {
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_frame(mut self, participant_id: u32, x: i32, y: i32) -> Self {
        self.participant_frames.push(ParticipantFrame { participant_id, x, y });
        self
    }
}

/// The ordered, never-empty sequence of snapshots for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    frame_interval_ms: u64,
}

impl Timeline {
    pub fn new(snapshots: Vec<Snapshot>) -> Result<Self, TimelineError> {
        if snapshots.is_empty() {
            return Err(TimelineError::Empty);
        }
        Ok(Timeline {
            snapshots,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        })
    }

    pub fn with_frame_interval(mut self, frame_interval_ms: u64) -> Result<Self, TimelineError> {
        if frame_interval_ms == 0 {
            return Err(TimelineError::ZeroFrameInterval);
        }
        self.frame_interval_ms = frame_interval_ms;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.snapshots.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    pub fn event_count(&self) -> usize {
        self.snapshots.iter().map(|s| s.events.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_timeline_is_rejected() {
        assert_eq!(Timeline::new(Vec::new()), Err(TimelineError::Empty));
    }

    #[test]
    fn zero_frame_interval_is_rejected() {
        let timeline = Timeline::new(vec![Snapshot::default()]).unwrap();
        assert_eq!(
            timeline.with_frame_interval(0),
            Err(TimelineError::ZeroFrameInterval)
        );
    }

    #[test]
    fn reads_legacy_participantframes_key() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"events": [], "participantframes": [{"participant_id": 1, "x": 554, "y": 581}]}"#,
        )
        .unwrap();

        assert_eq!(snapshot.timestamp, 0);
        assert_eq!(snapshot.participant_frames.len(), 1);
        assert_eq!(snapshot.participant_frames[0].position(), Position::new(554, 581));
    }

    #[test]
    fn accessors() {
        let timeline = Timeline::new(vec![
            Snapshot::new(0),
            Snapshot::new(60_000).with_frame(1, 100, 200),
        ])
        .unwrap();

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.last_index(), 1);
        assert!(!timeline.is_empty());
        assert_eq!(timeline.get(1).map(|s| s.timestamp), Some(60_000));
        assert!(timeline.get(2).is_none());
        assert_eq!(timeline.event_count(), 0);
    }
}
