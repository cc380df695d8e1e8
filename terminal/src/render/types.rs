use ratatui::style::Style;

/// Size of the rendered map in logical points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDimensions {
    pub horizontal: usize,
    pub vertical: usize,
}

impl CharDimensions {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self { horizontal, vertical }
    }
}

pub struct CharGrid {
    grid: Vec<Vec<(char, Style)>>,
    logical_width: usize,
    logical_height: usize,
    char_dims: CharDimensions,
}

impl CharGrid {
    pub fn new(logical_width: usize, logical_height: usize, char_dims: CharDimensions) -> Self {
        let physical_width = logical_width * char_dims.horizontal;
        let physical_height = logical_height * char_dims.vertical;
        let grid = vec![vec![(' ', Style::default()); physical_width]; physical_height];
        Self {
            grid,
            logical_width,
            logical_height,
            char_dims,
        }
    }

    pub fn set_logical_point(&mut self, x: usize, y: usize, pattern: &CharPattern) {
        let start_x = x * self.char_dims.horizontal;
        let start_y = y * self.char_dims.vertical;

        for (dy, row) in pattern.chars.iter().enumerate() {
            for (dx, &ch) in row.iter().enumerate() {
                if let Some(grid_row) = self.grid.get_mut(start_y + dy) {
                    if let Some(cell) = grid_row.get_mut(start_x + dx) {
                        *cell = (ch, pattern.style);
                    }
                }
            }
        }
    }

    pub fn logical_width(&self) -> usize {
        self.logical_width
    }

    pub fn logical_height(&self) -> usize {
        self.logical_height
    }

    pub fn into_lines(self) -> Vec<Vec<char>> {
        self.grid
            .into_iter()
            .map(|row| row.into_iter().map(|(ch, _)| ch).collect())
            .collect()
    }

    pub fn into_styled_lines(self) -> Vec<(Vec<char>, Vec<Style>)> {
        self.grid.into_iter().map(|row| row.into_iter().unzip()).collect()
    }

    pub fn physical_width(&self) -> usize {
        self.logical_width * self.char_dims.horizontal
    }

    pub fn physical_height(&self) -> usize {
        self.logical_height * self.char_dims.vertical
    }
}

#[derive(Clone, Debug)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
    pub style: Style,
}

impl CharPattern {
    /// `ch` in the top-left cell, the rest of the point left blank.
    pub fn glyph(ch: char, dims: CharDimensions, style: Style) -> Self {
        let mut chars = vec![vec![' '; dims.horizontal]; dims.vertical];
        if let Some(cell) = chars.first_mut().and_then(|row| row.first_mut()) {
            *cell = ch;
        }
        Self { chars, style }
    }
}
