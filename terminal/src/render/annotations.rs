use common::{
    Event, EventKind, ParticipantDirectory, Position, ReplayCursor, StructureKey, Team,
};

/// Something the map draws for the current snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    Structure {
        key: StructureKey,
        position: Position,
        alive: bool,
    },
    Participant {
        participant_id: u32,
        team: Option<Team>,
        label: char,
        position: Position,
    },
    Event {
        kind: EventKind,
        position: Position,
        description: String,
    },
}

pub const UNKNOWN_LABEL: char = '?';

/// Collect everything visible at the cursor's current index.
///
/// Structures come first, then participants, then events, which is also the
/// order they are layered when drawn.
pub fn present(cursor: &ReplayCursor, directory: &ParticipantDirectory) -> Vec<Annotation> {
    let mut annotations: Vec<Annotation> = cursor
        .registry()
        .iter()
        .map(|structure| Annotation::Structure {
            key: structure.key(),
            position: structure.position(),
            alive: structure.is_alive(),
        })
        .collect();

    annotations.extend(cursor.participant_frames().iter().map(|frame| {
        let participant = directory.get(frame.participant_id);
        Annotation::Participant {
            participant_id: frame.participant_id,
            team: participant.and_then(|p| p.team),
            label: participant
                .and_then(|p| p.champion.chars().next())
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(UNKNOWN_LABEL),
            position: frame.position(),
        }
    }));

    annotations.extend(cursor.current_snapshot().events.iter().filter_map(|event| {
        event.position.map(|position| Annotation::Event {
            kind: event.kind.clone(),
            position,
            description: describe_event(event, directory),
        })
    }));

    annotations
}

/// One-line tooltip text for an event.
pub fn describe_event(event: &Event, directory: &ParticipantDirectory) -> String {
    let killer = event.killer_id.map(|id| directory.display_name(id));
    match &event.kind {
        EventKind::ChampionKill => {
            let victim = event
                .victim_id
                .map(|id| directory.display_name(id))
                .unwrap_or_else(|| "unknown".to_string());
            format!("{} killed {}", killer.as_deref().unwrap_or("unknown"), victim)
        }
        EventKind::EliteMonsterKill { monster_type } => format!(
            "{} killed {}",
            killer.as_deref().unwrap_or("unknown"),
            monster_type.as_deref().unwrap_or("monster")
        ),
        EventKind::BuildingKill(_) => {
            format!("{} killed structure", killer.as_deref().unwrap_or("minions"))
        }
        EventKind::Other(name) => name.clone(),
    }
}
