use super::annotations::Annotation;
use super::traits::MapObjectRenderer;
use super::types::{CharGrid, RenderConfig};
use common::MapProjection;

pub struct MapRenderer<R: MapObjectRenderer> {
    renderer: R,
    projection: MapProjection,
}

impl<R: MapObjectRenderer> MapRenderer<R> {
    pub fn new(renderer: R, projection: MapProjection) -> Self {
        Self { renderer, projection }
    }

    /// Draw annotations in order, later ones overwriting earlier ones on the
    /// same cell.
    pub fn render(&self, annotations: &[Annotation], config: &RenderConfig) -> CharGrid {
        let mut grid = CharGrid::new(config.width, config.height, self.renderer.char_dimensions());
        if config.width == 0 || config.height == 0 {
            return grid;
        }

        for annotation in annotations {
            let (position, pattern) = match annotation {
                Annotation::Structure { key, position, alive } => (
                    *position,
                    self.renderer.render_structure(key.building_type, key.team, *alive),
                ),
                Annotation::Participant { team, label, position, .. } => {
                    (*position, self.renderer.render_participant(*label, *team))
                }
                Annotation::Event { kind, position, .. } => {
                    (*position, self.renderer.render_event(kind))
                }
            };

            let (x, y) = self.projection.project_to_grid(position, config.width, config.height);
            grid.set_logical_point(x, y, &pattern);
        }

        grid
    }
}
