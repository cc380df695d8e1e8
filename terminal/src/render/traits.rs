use common::{BuildingType, EventKind, Team};
use super::types::{CharPattern, CharDimensions};

pub trait MapObjectRenderer {
    fn char_dimensions(&self) -> CharDimensions;

    fn render_structure(&self, building_type: BuildingType, team: Team, alive: bool) -> CharPattern;

    fn render_participant(&self, label: char, team: Option<Team>) -> CharPattern;

    fn render_event(&self, kind: &EventKind) -> CharPattern;
}
