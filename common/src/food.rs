use std::collections::HashSet;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Grid, Position};

/// Picks unoccupied cells for food.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    grid: Grid,
    max_attempts: u32,
}

impl FoodSpawner {
    pub fn new(grid: Grid, max_attempts: u32) -> Self {
        FoodSpawner { grid, max_attempts }
    }

    /// Chooses a cell uniformly among those not in `occupied`.
    ///
    /// Draws random cells until a free one turns up, giving up after
    /// `max_attempts` draws and scanning the board for the remaining free
    /// cells instead. Returns `None` when nothing is free.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Position>,
    ) -> Option<Position> {
        if occupied.len() >= self.grid.cell_count() {
            return None;
        }

        let n = self.grid.size() as i16;
        for _ in 0..self.max_attempts {
            let candidate = Position {
                x: rng.gen_range(0..n),
                y: rng.gen_range(0..n),
            };
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }

        let free: Vec<Position> = self
            .grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .collect();
        debug!(
            "food placement fell back to scanning {} free cells",
            free.len()
        );
        free.choose(rng).copied()
    }
}
