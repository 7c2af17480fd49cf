use common::Direction;
use super::types::CharPattern;

pub trait GameObjectRenderer {
    fn render_snake_segment(&self, direction: Option<Direction>, is_head: bool) -> CharPattern;

    fn render_food(&self) -> CharPattern;

    fn render_empty(&self) -> CharPattern;
}
