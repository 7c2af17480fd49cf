use common::Snapshot;

use super::traits::GameObjectRenderer;
use super::types::{CharGrid, RenderConfig};

pub struct ArenaRenderer<R: GameObjectRenderer> {
    renderer: R,
}

impl<R: GameObjectRenderer> ArenaRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn render(&self, snapshot: &Snapshot, config: &RenderConfig) -> CharGrid {
        let size = snapshot.grid_size as usize;
        let mut grid = CharGrid::new(size, size, config.chars_per_point);

        let empty = self.renderer.render_empty();
        for y in 0..size {
            for x in 0..size {
                grid.set_logical_point(x, y, &empty);
            }
        }

        let in_bounds = |x: i16, y: i16| x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size;

        if let Some(food) = snapshot.food_cell {
            if in_bounds(food.x, food.y) {
                grid.set_logical_point(food.x as usize, food.y as usize, &self.renderer.render_food());
            }
        }

        // Tail first so the head always ends up on top.
        for (i, pos) in snapshot.snake_cells.iter().enumerate().rev() {
            if !in_bounds(pos.x, pos.y) {
                continue;
            }
            let is_head = i == 0;
            let direction = if is_head { Some(snapshot.heading) } else { None };
            let pattern = self.renderer.render_snake_segment(direction, is_head);
            grid.set_logical_point(pos.x as usize, pos.y as usize, &pattern);
        }

        grid
    }
}
