use common::{BuildingType, EventKind, Team};
use ratatui::style::{Color, Modifier, Style};
use super::traits::MapObjectRenderer;
use super::types::{CharPattern, CharDimensions};

pub const TOWER_ALIVE: char = '▲';
pub const TOWER_DEAD: char = '△';
pub const INHIBITOR_ALIVE: char = '◆';
pub const INHIBITOR_DEAD: char = '◇';
pub const CHAMPION_KILL: char = '✖';
pub const MONSTER_KILL: char = '◉';
pub const STRUCTURE_KILL: char = '✦';
pub const OTHER_EVENT: char = '•';

pub struct StandardRenderer {
    char_dims: CharDimensions,
}

impl StandardRenderer {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }
}

pub fn team_color(team: Option<Team>) -> Color {
    match team {
        Some(Team::Blue) => Color::LightBlue,
        Some(Team::Red) => Color::LightRed,
        None => Color::White,
    }
}

impl MapObjectRenderer for StandardRenderer {
    fn char_dimensions(&self) -> CharDimensions {
        self.char_dims
    }

    fn render_structure(&self, building_type: BuildingType, team: Team, alive: bool) -> CharPattern {
        let ch = match (building_type, alive) {
            (BuildingType::Inhibitor, true) => INHIBITOR_ALIVE,
            (BuildingType::Inhibitor, false) => INHIBITOR_DEAD,
            (_, true) => TOWER_ALIVE,
            (_, false) => TOWER_DEAD,
        };
        // Destroyed structures fade out regardless of team
        let style = if alive {
            Style::default().fg(team_color(Some(team)))
        } else {
            Style::default().fg(Color::DarkGray)
        };
        CharPattern::glyph(ch, self.char_dims, style)
    }

    fn render_participant(&self, label: char, team: Option<Team>) -> CharPattern {
        let style = Style::default()
            .fg(Color::Black)
            .bg(team_color(team))
            .add_modifier(Modifier::BOLD);
        CharPattern::glyph(label, self.char_dims, style)
    }

    fn render_event(&self, kind: &EventKind) -> CharPattern {
        let (ch, color) = match kind {
            EventKind::ChampionKill => (CHAMPION_KILL, Color::Yellow),
            EventKind::EliteMonsterKill { .. } => (MONSTER_KILL, Color::Magenta),
            EventKind::BuildingKill(_) => (STRUCTURE_KILL, Color::LightYellow),
            EventKind::Other(_) => (OTHER_EVENT, Color::Gray),
        };
        CharPattern::glyph(ch, self.char_dims, Style::default().fg(color))
    }
}
