use common::{
    BuildingKill, BuildingType, Event, EventKind, LaneType, MapProjection, Participant,
    ParticipantDirectory, ReplayCursor, Snapshot, Team, Timeline, TowerType,
};
use terminal::render::{
    annotations::{present, Annotation},
    map::MapRenderer,
    standard_renderer::StandardRenderer,
    types::{CharDimensions, RenderConfig},
};

fn tower_kill(team_id: i32, lane_type: LaneType, tower_type: TowerType, x: i32, y: i32) -> Event {
    Event::new(
        EventKind::BuildingKill(BuildingKill {
            team_id,
            building_type: BuildingType::Tower,
            lane_type,
            tower_type: Some(tower_type),
        }),
        0,
    )
    .at(x, y)
}

fn main() {
    let timeline = Timeline::new(vec![
        Snapshot::new(0).with_frame(1, 560, 560).with_frame(6, 14340, 14390),
        Snapshot::new(60_000)
            .with_frame(1, 4000, 13000)
            .with_frame(6, 10000, 4000)
            .with_event(tower_kill(200, LaneType::Top, TowerType::Outer, 4318, 13875))
            .with_event(tower_kill(100, LaneType::Bot, TowerType::Outer, 10504, 1029)),
        Snapshot::new(120_000)
            .with_frame(1, 7500, 7500)
            .with_frame(6, 7600, 7400)
            .with_event(
                Event::new(EventKind::ChampionKill, 110_000)
                    .with_killer(1)
                    .with_victim(6)
                    .at(7550, 7450),
            ),
    ])
    .expect("demo timeline is not empty");

    let directory = ParticipantDirectory::from_participants([
        Participant {
            participant_id: 1,
            team: Some(Team::Blue),
            summoner_name: "Blue mid".to_string(),
            champion: "Orianna".to_string(),
        },
        Participant {
            participant_id: 6,
            team: Some(Team::Red),
            summoner_name: "Red mid".to_string(),
            champion: "Azir".to_string(),
        },
    ]);

    let mut cursor = ReplayCursor::with_default_structures(timeline);
    let map = MapRenderer::new(StandardRenderer::new(CharDimensions::new(2, 1)), MapProjection::default());
    let config = RenderConfig { width: 30, height: 30 };

    loop {
        println!(
            "Minute {} (snapshot {} / {}), structures alive: {}",
            cursor.minute(),
            cursor.index(),
            cursor.len() - 1,
            cursor.registry().alive_count()
        );

        let annotations = present(&cursor, &directory);
        for annotation in &annotations {
            if let Annotation::Event { description, .. } = annotation {
                println!("  {}", description);
            }
        }

        let grid = map.render(&annotations, &config);
        println!("┌{}┐", "─".repeat(grid.physical_width()));
        for line in grid.into_lines() {
            println!("│{}│", line.into_iter().collect::<String>());
        }
        println!("└{}┘", "─".repeat(config.width * 2));
        println!();

        if cursor.is_at_end() {
            break;
        }
        cursor.step_forward();
    }
}
