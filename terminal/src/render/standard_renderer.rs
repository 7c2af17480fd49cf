use common::Direction;
use ratatui::style::{Color, Modifier, Style};

use super::traits::GameObjectRenderer;
use super::types::{CharDimensions, CharPattern};

pub struct StandardRenderer {
    char_dims: CharDimensions,
}

impl StandardRenderer {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }
}

impl GameObjectRenderer for StandardRenderer {
    fn render_snake_segment(&self, direction: Option<Direction>, is_head: bool) -> CharPattern {
        if !is_head {
            return CharPattern::single('▓', self.char_dims, Style::default().fg(Color::Cyan));
        }

        let style = Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD);
        let mut pattern = CharPattern::single('█', self.char_dims, style);

        // 2x1 heads get an eye on the leading side.
        if self.char_dims == CharDimensions::new(2, 1) {
            pattern.chars = match direction {
                Some(Direction::Left) => vec![vec!['◀', '█']],
                Some(Direction::Right) => vec![vec!['█', '▶']],
                Some(Direction::Up) => vec![vec!['▲', '▲']],
                Some(Direction::Down) => vec![vec!['▼', '▼']],
                None => vec![vec!['█', '█']],
            };
        }
        pattern
    }

    fn render_food(&self) -> CharPattern {
        let style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        if self.char_dims.horizontal == 2 && self.char_dims.vertical == 1 {
            return CharPattern::new(vec![vec!['●', ' ']], style);
        }

        // Checkerboard for larger cells
        let mut chars = vec![vec![' '; self.char_dims.horizontal]; self.char_dims.vertical];
        for (y, row) in chars.iter_mut().enumerate() {
            for (x, ch) in row.iter_mut().enumerate() {
                if (x + y) % 2 == 0 {
                    *ch = '●';
                }
            }
        }
        CharPattern::new(chars, style)
    }

    fn render_empty(&self) -> CharPattern {
        let style = Style::default().fg(Color::DarkGray);
        let mut chars = vec![vec![' '; self.char_dims.horizontal]; self.char_dims.vertical];
        chars[0][0] = '·';
        CharPattern::new(chars, style)
    }
}
