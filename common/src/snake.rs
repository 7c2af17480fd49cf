use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::{Direction, Grid, Position};

/// Result of moving the snake one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Head moved, tail followed.
    Moved { head: Position },
    /// Head landed on the food; the tail stays so the body is one longer.
    Grew { head: Position },
    /// The new head would overlap the body. Nothing was changed.
    Collided { at: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// Builds a snake from its cells, head first. The body must be non-empty,
    /// on the board and free of repeated cells.
    pub fn new(
        grid: &Grid,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> GameResult<Self> {
        let body: VecDeque<Position> = body.into_iter().collect();
        if body.is_empty() {
            return Err(GameError::EmptySnake);
        }

        let mut seen = HashSet::with_capacity(body.len());
        for cell in &body {
            grid.check_bounds(cell)?;
            if !seen.insert(*cell) {
                return Err(GameError::OverlappingBody(*cell));
            }
        }

        Ok(Snake {
            body,
            direction,
            pending_direction: None,
        })
    }

    pub fn head(&self) -> GameResult<&Position> {
        self.body.front().ok_or(GameError::EmptySnake)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn contains_point(&self, pos: &Position) -> bool {
        self.body.contains(pos)
    }

    pub fn occupied(&self) -> HashSet<Position> {
        self.body.iter().copied().collect()
    }

    /// Records the direction to apply on the next move. A later call before
    /// that move replaces it.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Consumes the pending direction. It becomes current unless it is the
    /// exact reverse of the current one, in which case it is dropped.
    /// Returns the new direction if it changed.
    pub fn resolve_direction(&mut self) -> Option<Direction> {
        let pending = self.pending_direction.take()?;
        if pending == self.direction || pending.is_opposite(&self.direction) {
            return None;
        }
        self.direction = pending;
        Some(pending)
    }

    /// Moves one cell in the current direction.
    ///
    /// Collision is checked against the body as it was before the move,
    /// tail included, so the head may never step onto the tail cell even
    /// though the tail would vacate it this tick.
    pub fn advance(&mut self, grid: &Grid, food: Option<&Position>) -> GameResult<Advance> {
        let head = grid.step(self.head()?, self.direction);

        if self.contains_point(&head) {
            return Ok(Advance::Collided { at: head });
        }

        self.body.push_front(head);

        if food == Some(&head) {
            Ok(Advance::Grew { head })
        } else {
            self.body.pop_back();
            Ok(Advance::Moved { head })
        }
    }
}
