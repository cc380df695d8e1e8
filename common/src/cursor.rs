use tracing::debug;

use crate::{ParticipantFrame, Snapshot, StructureKey, StructureRegistry, Timeline};

/// Position in a match timeline together with the structure state it implies.
///
/// The cursor owns the registry and is the only thing that changes structure
/// state. It moves one snapshot per step: stepping forward applies the kills
/// of the snapshot being entered, stepping backward reverts the kills of the
/// snapshot being left. A structure killed twice stays down until both kills
/// are reverted. Jumps go through `seek`, which replays from a fresh registry.
#[derive(Debug, Clone)]
pub struct ReplayCursor {
    timeline: Timeline,
    registry: StructureRegistry,
    index: usize,
}

impl ReplayCursor {
    pub fn new(timeline: Timeline, mut registry: StructureRegistry) -> Self {
        registry.reset();
        Self {
            timeline,
            registry,
            index: 0,
        }
    }

    pub fn with_default_structures(timeline: Timeline) -> Self {
        Self::new(timeline, StructureRegistry::default())
    }

    /// Advance one snapshot. Saturates at the last index.
    pub fn step_forward(&mut self) -> usize {
        let next = self.index + 1;
        if next >= self.timeline.len() {
            return self.index;
        }

        self.index = next;
        if let Some(snapshot) = self.timeline.get(next) {
            apply_structure_kills(&mut self.registry, snapshot, false);
        }
        self.index
    }

    /// Go back one snapshot. Saturates at index 0.
    pub fn step_backward(&mut self) -> usize {
        if self.index == 0 {
            return self.index;
        }

        let leaving = self.index;
        self.index -= 1;
        if let Some(snapshot) = self.timeline.get(leaving) {
            apply_structure_kills(&mut self.registry, snapshot, true);
        }
        self.index
    }

    /// Jump to `target` (clamped to the last index) by resetting the
    /// registry and replaying every step from index 0.
    pub fn seek(&mut self, target: usize) -> usize {
        let target = target.min(self.timeline.last_index());

        self.registry.reset();
        self.index = 0;
        while self.index < target {
            self.step_forward();
        }
        self.index
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index == self.timeline.last_index()
    }

    /// Whole game minutes elapsed at the current index.
    pub fn minute(&self) -> u64 {
        self.index as u64 * self.timeline.frame_interval_ms() / 60_000
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn registry(&self) -> &StructureRegistry {
        &self.registry
    }

    pub fn current_snapshot(&self) -> &Snapshot {
        // index < len is upheld by every mutator and Timeline is never empty
        &self.timeline.snapshots()[self.index]
    }

    pub fn participant_frames(&self) -> &[ParticipantFrame] {
        &self.current_snapshot().participant_frames
    }
}

fn apply_structure_kills(registry: &mut StructureRegistry, snapshot: &Snapshot, alive: bool) {
    for event in &snapshot.events {
        let Some(kill) = event.building_kill() else {
            continue;
        };

        let Some(key) = StructureKey::from_kill(kill) else {
            debug!(team_id = kill.team_id, "Ignoring structure kill for unknown team");
            continue;
        };

        let found = if alive {
            registry.mark_alive(&key)
        } else {
            registry.mark_destroyed(&key)
        };
        if !found {
            debug!(%key, "Ignoring structure kill for unregistered structure");
        }
    }
}
