use serde::{Deserialize, Serialize};

use crate::ProjectionError;

/// Horizontal extent of the map in game units.
pub const DEFAULT_MAP_MAX_X: f64 = 15300.0;
/// Vertical extent of the map in game units.
pub const DEFAULT_MAP_MAX_Y: f64 = 15000.0;
/// Side length of the square display space.
pub const DEFAULT_DISPLAY_SIZE: f64 = 500.0;

/// A point in raw map coordinates. The origin is the bottom-left corner
/// (blue side fountain), y grows towards the top of the map.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Event coordinates as recorded. A zero on either axis means the
    /// event has no position.
    pub fn from_event_coordinates(x: i32, y: i32) -> Option<Self> {
        (x != 0 && y != 0).then_some(Position { x, y })
    }
}

/// Scale raw map coordinates into a square display of `display_size` units.
pub fn project(x: f64, y: f64, max_x: f64, max_y: f64, display_size: f64) -> (f64, f64) {
    (x / max_x * display_size, y / max_y * display_size)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    max_x: f64,
    max_y: f64,
    display_size: f64,
}

impl Default for MapProjection {
    fn default() -> Self {
        MapProjection {
            max_x: DEFAULT_MAP_MAX_X,
            max_y: DEFAULT_MAP_MAX_Y,
            display_size: DEFAULT_DISPLAY_SIZE,
        }
    }
}

impl MapProjection {
    pub fn new(max_x: f64, max_y: f64, display_size: f64) -> Result<Self, ProjectionError> {
        if max_x.is_nan() || max_x <= 0.0 {
            return Err(ProjectionError::NonPositiveBound { axis: "x", value: max_x });
        }
        if max_y.is_nan() || max_y <= 0.0 {
            return Err(ProjectionError::NonPositiveBound { axis: "y", value: max_y });
        }
        if display_size.is_nan() || display_size <= 0.0 {
            return Err(ProjectionError::NonPositiveDisplay(display_size));
        }
        Ok(MapProjection { max_x, max_y, display_size })
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn display_size(&self) -> f64 {
        self.display_size
    }

    pub fn project(&self, position: Position) -> (f64, f64) {
        project(
            position.x as f64,
            position.y as f64,
            self.max_x,
            self.max_y,
            self.display_size,
        )
    }

    /// Map a position onto a `width` x `height` cell grid.
    ///
    /// Row 0 is the top of the grid, so the y axis is flipped relative to map
    /// coordinates. Positions outside the map are clamped onto the border.
    pub fn project_to_grid(&self, position: Position, width: usize, height: usize) -> (usize, usize) {
        if width == 0 || height == 0 {
            return (0, 0);
        }

        let fx = (position.x as f64 / self.max_x).clamp(0.0, 1.0);
        let fy = (position.y as f64 / self.max_y).clamp(0.0, 1.0);

        let col = (fx * (width - 1) as f64).round() as usize;
        let row = ((1.0 - fy) * (height - 1) as f64).round() as usize;
        (col.min(width - 1), row.min(height - 1))
    }
}
