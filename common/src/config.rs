use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::{Direction, Grid, Position};

/// Tick interval tier, chosen before a round starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Speed::Slow, Speed::Normal, Speed::Fast];

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(match self {
            Speed::Slow => SLOW_TICK_INTERVAL_MS,
            Speed::Normal => NORMAL_TICK_INTERVAL_MS,
            Speed::Fast => FAST_TICK_INTERVAL_MS,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Speed::Slow => "Slow",
            Speed::Normal => "Normal",
            Speed::Fast => "Fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Speed {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(Speed::Slow),
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            other => Err(GameError::UnknownSpeed(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: u16,
    pub food_reward: u32,
    /// Cells of a fresh snake, head first.
    pub start_body: Vec<Position>,
    pub initial_direction: Direction,
    pub spawn_attempts: u32,
    pub speed: Speed,
    /// Fixed RNG seed. Random when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: DEFAULT_GRID_SIZE,
            food_reward: DEFAULT_FOOD_REWARD,
            start_body: vec![Position::from(DEFAULT_START_CELL)],
            initial_direction: Direction::Right,
            spawn_attempts: DEFAULT_SPAWN_ATTEMPTS,
            speed: Speed::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config {:?}", path))?;
        Self::from_json(&json)
    }

    pub fn grid(&self) -> GameResult<Grid> {
        Grid::new(self.grid_size)
    }

    pub fn validate(&self) -> GameResult<()> {
        let grid = self.grid()?;
        // Building the snake checks emptiness, bounds and overlap.
        crate::Snake::new(&grid, self.start_body.iter().copied(), self.initial_direction)?;
        if self.start_body.len() >= grid.cell_count() {
            return Err(GameError::InvalidConfig(
                "starting snake leaves no room for food".to_string(),
            ));
        }
        Ok(())
    }
}
