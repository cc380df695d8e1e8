use std::collections::BTreeMap;
use std::fmt;

use crate::{BuildingKill, BuildingType, LaneType, Position, Team, TowerType};

/// Identifies one destructible structure on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureKey {
    pub team: Team,
    pub building_type: BuildingType,
    pub lane_type: LaneType,
    /// `None` for buildings that are not towers.
    pub tower_type: Option<TowerType>,
}

impl StructureKey {
    pub const fn tower(team: Team, lane_type: LaneType, tower_type: TowerType) -> Self {
        StructureKey {
            team,
            building_type: BuildingType::Tower,
            lane_type,
            tower_type: Some(tower_type),
        }
    }

    pub const fn inhibitor(team: Team, lane_type: LaneType) -> Self {
        StructureKey {
            team,
            building_type: BuildingType::Inhibitor,
            lane_type,
            tower_type: None,
        }
    }

    /// Key of the structure a kill event refers to, or `None` when the
    /// owning team id is neither blue (100) nor red (200).
    ///
    /// Any other team id is dropped rather than treated as blue, so a
    /// malformed kill never destroys a blue structure.
    pub fn from_kill(kill: &BuildingKill) -> Option<Self> {
        let team = Team::from_team_id(kill.team_id)?;
        // Inhibitor kills carry a placeholder tower type in some exports.
        let tower_type = match kill.building_type {
            BuildingType::Inhibitor => None,
            _ => kill.tower_type,
        };
        Some(StructureKey {
            team,
            building_type: kill.building_type,
            lane_type: kill.lane_type,
            tower_type,
        })
    }
}

impl fmt::Display for StructureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.team, self.building_type, self.lane_type)?;
        if let Some(tower_type) = self.tower_type {
            write!(f, "-{}", tower_type)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    key: StructureKey,
    position: Position,
    /// Applied kills not yet reverted. Two nexus turrets share one key and
    /// inhibitors respawn, so a key can be destroyed more than once.
    destroyed: u32,
}

impl Structure {
    pub fn key(&self) -> StructureKey {
        self.key
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.destroyed == 0
    }

    pub fn destroyed_count(&self) -> u32 {
        self.destroyed
    }
}

// Standard map layout. The match API reports both nexus turrets of a team
// under the same key, so each team has a single nexus turret entry.
fn standard_map_layout() -> Vec<(StructureKey, Position)> {
    use LaneType::{Bot, Mid, Top};
    use Team::{Blue, Red};
    use TowerType::{Base, Inner, Nexus, Outer};
    vec![
        (StructureKey::tower(Blue, Top, Outer), Position::new(981, 10441)),
        (StructureKey::tower(Blue, Top, Inner), Position::new(1512, 6699)),
        (StructureKey::tower(Blue, Top, Base), Position::new(1169, 4287)),
        (StructureKey::tower(Blue, Mid, Outer), Position::new(5846, 6396)),
        (StructureKey::tower(Blue, Mid, Inner), Position::new(5048, 4812)),
        (StructureKey::tower(Blue, Mid, Base), Position::new(3651, 3696)),
        (StructureKey::tower(Blue, Bot, Outer), Position::new(10504, 1029)),
        (StructureKey::tower(Blue, Bot, Inner), Position::new(6919, 1483)),
        (StructureKey::tower(Blue, Bot, Base), Position::new(4281, 1253)),
        (StructureKey::tower(Blue, Mid, Nexus), Position::new(1748, 2270)),
        (StructureKey::inhibitor(Blue, Top), Position::new(1171, 3571)),
        (StructureKey::inhibitor(Blue, Mid), Position::new(3203, 3208)),
        (StructureKey::inhibitor(Blue, Bot), Position::new(3452, 1236)),
        (StructureKey::tower(Red, Top, Outer), Position::new(4318, 13875)),
        (StructureKey::tower(Red, Top, Inner), Position::new(7943, 13411)),
        (StructureKey::tower(Red, Top, Base), Position::new(10481, 13650)),
        (StructureKey::tower(Red, Mid, Outer), Position::new(8955, 8510)),
        (StructureKey::tower(Red, Mid, Inner), Position::new(9767, 10113)),
        (StructureKey::tower(Red, Mid, Base), Position::new(11134, 11207)),
        (StructureKey::tower(Red, Bot, Outer), Position::new(13866, 4505)),
        (StructureKey::tower(Red, Bot, Inner), Position::new(13327, 8226)),
        (StructureKey::tower(Red, Bot, Base), Position::new(13624, 10572)),
        (StructureKey::tower(Red, Mid, Nexus), Position::new(12611, 13084)),
        (StructureKey::inhibitor(Red, Top), Position::new(11261, 13676)),
        (StructureKey::inhibitor(Red, Mid), Position::new(11598, 11667)),
        (StructureKey::inhibitor(Red, Bot), Position::new(13604, 11316)),
    ]
}

/// Every destructible structure of a match with its destruction count.
///
/// Flags are only flipped through the crate-private mutators, which the
/// replay cursor drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRegistry {
    structures: BTreeMap<StructureKey, Structure>,
}

impl Default for StructureRegistry {
    fn default() -> Self {
        Self::new(Self::default_catalog())
    }
}

impl StructureRegistry {
    pub fn new(catalog: impl IntoIterator<Item = (StructureKey, Position)>) -> Self {
        let structures = catalog
            .into_iter()
            .map(|(key, position)| {
                let structure = Structure { key, position, destroyed: 0 };
                (key, structure)
            })
            .collect();
        StructureRegistry { structures }
    }

    pub fn default_catalog() -> Vec<(StructureKey, Position)> {
        standard_map_layout()
    }

    pub fn get(&self, key: &StructureKey) -> Option<&Structure> {
        self.structures.get(key)
    }

    /// `None` when the key is not registered.
    pub fn is_alive(&self, key: &StructureKey) -> Option<bool> {
        self.structures.get(key).map(Structure::is_alive)
    }

    /// Structures in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.values()
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.structures.values().filter(|s| s.is_alive()).count()
    }

    pub fn alive_count_for(&self, team: Team) -> usize {
        self.structures
            .values()
            .filter(|s| s.is_alive() && s.key.team == team)
            .count()
    }

    pub(crate) fn mark_destroyed(&mut self, key: &StructureKey) -> bool {
        self.update(key, |destroyed| destroyed + 1)
    }

    pub(crate) fn mark_alive(&mut self, key: &StructureKey) -> bool {
        self.update(key, |destroyed| destroyed.saturating_sub(1))
    }

    pub(crate) fn reset(&mut self) {
        for structure in self.structures.values_mut() {
            structure.destroyed = 0;
        }
    }

    fn update(&mut self, key: &StructureKey, f: impl FnOnce(u32) -> u32) -> bool {
        match self.structures.get_mut(key) {
            Some(structure) => {
                structure.destroyed = f(structure.destroyed);
                true
            }
            None => false,
        }
    }
}
