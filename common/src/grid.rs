use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Position { x, y }
    }
}

impl From<(i16, i16)> for Position {
    fn from((x, y): (i16, i16)) -> Self {
        Position { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector, y grows downwards.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

/// Fixed-size toroidal board. Every coordinate that leaves one edge
/// re-enters from the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: u16,
}

impl Grid {
    pub fn new(size: u16) -> GameResult<Self> {
        // i16 coordinates must be able to hold size - 1 plus a one-step move.
        if size == 0 || size > i16::MAX as u16 {
            return Err(GameError::InvalidConfig(format!(
                "grid size must be between 1 and {}, got {}",
                i16::MAX,
                size
            )));
        }
        Ok(Grid { size })
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    pub fn contains(&self, pos: &Position) -> bool {
        let n = self.size as i16;
        (0..n).contains(&pos.x) && (0..n).contains(&pos.y)
    }

    pub fn check_bounds(&self, pos: &Position) -> GameResult<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds { position: *pos, size: self.size })
        }
    }

    /// Maps any pair of integers onto the board with modulo-N arithmetic on
    /// each axis independently.
    pub fn wrap(&self, x: i32, y: i32) -> Position {
        let n = self.size as i32;
        Position {
            x: x.rem_euclid(n) as i16,
            y: y.rem_euclid(n) as i16,
        }
    }

    /// The neighbouring cell one step in `direction`, wrapped.
    pub fn step(&self, pos: &Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.wrap(pos.x as i32 + dx as i32, pos.y as i32 + dy as i32)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let n = self.size as i16;
        (0..n).flat_map(move |y| (0..n).map(move |x| Position { x, y }))
    }
}
