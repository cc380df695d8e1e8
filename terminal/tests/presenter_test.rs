use common::{
    BuildingKill, BuildingType, Event, EventKind, LaneType, Participant, ParticipantDirectory,
    Position, ReplayCursor, Snapshot, StructureKey, Team, Timeline, TowerType,
};
use terminal::render::annotations::{describe_event, present, Annotation, UNKNOWN_LABEL};

fn directory() -> ParticipantDirectory {
    ParticipantDirectory::from_participants([
        Participant {
            participant_id: 1,
            team: Some(Team::Blue),
            summoner_name: "Zeus".to_string(),
            champion: "jayce".to_string(),
        },
        Participant {
            participant_id: 6,
            team: Some(Team::Red),
            summoner_name: "Bin".to_string(),
            champion: "Gwen".to_string(),
        },
    ])
}

fn inhibitor_kill() -> Event {
    Event::new(
        EventKind::BuildingKill(BuildingKill {
            team_id: 200,
            building_type: BuildingType::Inhibitor,
            lane_type: LaneType::Bot,
            tower_type: None,
        }),
        61_000,
    )
    .at(13604, 11316)
}

fn cursor() -> ReplayCursor {
    let timeline = Timeline::new(vec![
        Snapshot::new(0).with_frame(1, 560, 560),
        Snapshot::new(60_000)
            .with_frame(1, 9000, 9000)
            .with_frame(6, 9100, 9100)
            .with_frame(9, 8000, 8000)
            .with_event(
                Event::new(EventKind::ChampionKill, 59_000)
                    .with_killer(1)
                    .with_victim(6)
                    .at(9100, 9100),
            )
            .with_event(Event::new(EventKind::Other("LEVEL_UP".to_string()), 59_500))
            .with_event(inhibitor_kill()),
    ])
    .unwrap();
    ReplayCursor::with_default_structures(timeline)
}

#[test]
fn test_one_structure_annotation_per_registry_entry() {
    let cursor = cursor();
    let annotations = present(&cursor, &directory());

    let structures = annotations
        .iter()
        .filter(|a| matches!(a, Annotation::Structure { .. }))
        .count();
    assert_eq!(structures, cursor.registry().len());
}

#[test]
fn test_dead_structures_are_marked() {
    let mut cursor = cursor();
    cursor.step_forward();
    let annotations = present(&cursor, &directory());

    let red_bot_inhibitor = StructureKey::inhibitor(Team::Red, LaneType::Bot);
    let dead: Vec<&StructureKey> = annotations
        .iter()
        .filter_map(|a| match a {
            Annotation::Structure { key, alive: false, .. } => Some(key),
            _ => None,
        })
        .collect();
    assert_eq!(dead, vec![&red_bot_inhibitor]);

    let outer = StructureKey::tower(Team::Red, LaneType::Bot, TowerType::Outer);
    assert!(annotations.iter().any(|a| matches!(
        a,
        Annotation::Structure { key, alive: true, .. } if *key == outer
    )));
}

#[test]
fn test_participants_are_labelled_by_champion() {
    let mut cursor = cursor();
    cursor.step_forward();
    let annotations = present(&cursor, &directory());

    let participants: Vec<(u32, Option<Team>, char)> = annotations
        .iter()
        .filter_map(|a| match a {
            Annotation::Participant { participant_id, team, label, .. } => {
                Some((*participant_id, *team, *label))
            }
            _ => None,
        })
        .collect();

    assert_eq!(
        participants,
        vec![
            (1, Some(Team::Blue), 'J'),
            (6, Some(Team::Red), 'G'),
            (9, None, UNKNOWN_LABEL),
        ]
    );
}

#[test]
fn test_only_positioned_events_are_annotated() {
    let mut cursor = cursor();
    let at_start = present(&cursor, &directory());
    assert!(!at_start.iter().any(|a| matches!(a, Annotation::Event { .. })));

    cursor.step_forward();
    let events: Vec<(Position, String)> = present(&cursor, &directory())
        .into_iter()
        .filter_map(|a| match a {
            Annotation::Event { position, description, .. } => Some((position, description)),
            _ => None,
        })
        .collect();

    assert_eq!(
        events,
        vec![
            (Position::new(9100, 9100), "jayce killed Gwen".to_string()),
            (Position::new(13604, 11316), "minions killed structure".to_string()),
        ]
    );
}

#[test]
fn test_event_descriptions() {
    let directory = directory();

    let baron = Event::new(
        EventKind::EliteMonsterKill { monster_type: Some("BARON_NASHOR".to_string()) },
        1_500_000,
    )
    .with_killer(6);
    assert_eq!(describe_event(&baron, &directory), "Gwen killed BARON_NASHOR");

    let tower_by_champion = inhibitor_kill().with_killer(1);
    assert_eq!(describe_event(&tower_by_champion, &directory), "jayce killed structure");

    let unknown_killer = Event::new(EventKind::ChampionKill, 0).with_killer(42).with_victim(6);
    assert_eq!(describe_event(&unknown_killer, &directory), "Participant 42 killed Gwen");
}

#[test]
fn test_presenting_does_not_move_the_cursor() {
    let cursor = cursor();
    let before = cursor.registry().clone();
    let _ = present(&cursor, &directory());
    assert_eq!(cursor.index(), 0);
    assert_eq!(cursor.registry(), &before);
}
