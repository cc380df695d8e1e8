use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::Position;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    pub const BLUE_ID: i32 = 100;
    pub const RED_ID: i32 = 200;

    pub fn from_team_id(team_id: i32) -> Option<Self> {
        match team_id {
            Self::BLUE_ID => Some(Team::Blue),
            Self::RED_ID => Some(Team::Red),
            _ => None,
        }
    }

    pub fn team_id(self) -> i32 {
        match self {
            Team::Blue => Self::BLUE_ID,
            Team::Red => Self::RED_ID,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Blue => "BLUE",
            Team::Red => "RED",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The match API spells these with a suffix (TOWER_BUILDING, TOP_LANE,
// OUTER_TURRET); both spellings are accepted. Anything else becomes Unknown.
macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal | $alias:literal),* $(,)? }) => {
        impl $ty {
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($name | $alias => $ty::$variant,)*
                    _ => $ty::Unknown,
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)*
                    $ty::Unknown => "UNKNOWN",
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                Ok(Self::from_name(&name))
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuildingType {
    Tower,
    Inhibitor,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaneType {
    Top,
    Mid,
    Bot,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TowerType {
    Outer,
    Inner,
    Base,
    Nexus,
    Unknown,
}

wire_names!(BuildingType {
    Tower => "TOWER" | "TOWER_BUILDING",
    Inhibitor => "INHIBITOR" | "INHIBITOR_BUILDING",
});
wire_names!(LaneType {
    Top => "TOP" | "TOP_LANE",
    Mid => "MID" | "MID_LANE",
    Bot => "BOT" | "BOT_LANE",
});
wire_names!(TowerType {
    Outer => "OUTER" | "OUTER_TURRET",
    Inner => "INNER" | "INNER_TURRET",
    Base => "BASE" | "BASE_TURRET",
    Nexus => "NEXUS" | "NEXUS_TURRET",
});

/// Structure identification carried by a `BUILDING_KILL` event.
///
/// `team_id` is the owner of the destroyed structure, not the killer's team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingKill {
    pub team_id: i32,
    pub building_type: BuildingType,
    pub lane_type: LaneType,
    pub tower_type: Option<TowerType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    ChampionKill,
    EliteMonsterKill { monster_type: Option<String> },
    BuildingKill(BuildingKill),
    /// Any event kind the replay does not interpret, with its raw tag.
    Other(String),
}

impl EventKind {
    pub const CHAMPION_KILL: &'static str = "CHAMPION_KILL";
    pub const ELITE_MONSTER_KILL: &'static str = "ELITE_MONSTER_KILL";
    pub const BUILDING_KILL: &'static str = "BUILDING_KILL";

    pub fn name(&self) -> &str {
        match self {
            EventKind::ChampionKill => Self::CHAMPION_KILL,
            EventKind::EliteMonsterKill { .. } => Self::ELITE_MONSTER_KILL,
            EventKind::BuildingKill(_) => Self::BUILDING_KILL,
            EventKind::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEvent", into = "RawEvent")]
pub struct Event {
    /// Milliseconds since the start of the game.
    pub timestamp: u64,
    pub kind: EventKind,
    pub killer_id: Option<u32>,
    pub victim_id: Option<u32>,
    pub position: Option<Position>,
}

impl Event {
    pub fn new(kind: EventKind, timestamp: u64) -> Self {
        Event {
            timestamp,
            kind,
            killer_id: None,
            victim_id: None,
            position: None,
        }
    }

    pub fn with_killer(mut self, killer_id: u32) -> Self {
        self.killer_id = Some(killer_id);
        self
    }

    pub fn with_victim(mut self, victim_id: u32) -> Self {
        self.victim_id = Some(victim_id);
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn building_kill(&self) -> Option<&BuildingKill> {
        match &self.kind {
            EventKind::BuildingKill(kill) => Some(kill),
            _ => None,
        }
    }
}

/// Flat wire shape of an event: a `_type` tag plus every optional field.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawEvent {
    #[serde(rename = "_type")]
    kind: String,
    #[serde(default)]
    timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    killer_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    victim_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monster_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    building_type: Option<BuildingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lane_type: Option<LaneType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tower_type: Option<TowerType>,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let kind = match raw.kind.as_str() {
            EventKind::CHAMPION_KILL => EventKind::ChampionKill,
            EventKind::ELITE_MONSTER_KILL => EventKind::EliteMonsterKill {
                monster_type: raw.monster_type,
            },
            EventKind::BUILDING_KILL => EventKind::BuildingKill(BuildingKill {
                team_id: raw.team_id.unwrap_or_default(),
                building_type: raw.building_type.unwrap_or(BuildingType::Unknown),
                lane_type: raw.lane_type.unwrap_or(LaneType::Unknown),
                tower_type: raw.tower_type,
            }),
            _ => EventKind::Other(raw.kind.clone()),
        };

        let position = match (raw.x, raw.y) {
            (Some(x), Some(y)) => Position::from_event_coordinates(x, y),
            _ => None,
        };

        Event {
            timestamp: raw.timestamp,
            kind,
            killer_id: raw.killer_id,
            victim_id: raw.victim_id,
            position,
        }
    }
}

impl From<Event> for RawEvent {
    fn from(event: Event) -> Self {
        let mut raw = RawEvent {
            kind: event.kind.name().to_string(),
            timestamp: event.timestamp,
            killer_id: event.killer_id,
            victim_id: event.victim_id,
            x: event.position.map(|p| p.x),
            y: event.position.map(|p| p.y),
            ..RawEvent::default()
        };

        match event.kind {
            EventKind::EliteMonsterKill { monster_type } => raw.monster_type = monster_type,
            EventKind::BuildingKill(kill) => {
                raw.team_id = Some(kill.team_id);
                raw.building_type = Some(kill.building_type);
                raw.lane_type = Some(kill.lane_type);
                raw.tower_type = kill.tower_type;
            }
            EventKind::ChampionKill | EventKind::Other(_) => {}
        }

        raw
    }
}
