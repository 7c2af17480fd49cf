use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::{Advance, Direction, FoodSpawner, GameConfig, Grid, Position, Snake};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No round has been started yet.
    #[default]
    Idle,
    Playing,
    /// The snake ran into itself.
    GameOver,
    /// The snake filled every cell of the board.
    Won,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Won)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCommand {
    Tick,
    Turn { direction: Direction },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SnakeTurned { direction: Direction },
    SnakeMoved { head: Position },
    FoodEaten { position: Position, reward: u32 },
    FoodSpawned { position: Position },
    SnakeDied { at: Position },
    BoardFilled,
}

/// One play session: the snake, its food and the round's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    tick: u32,
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    status: GameStatus,
    food_reward: u32,
    spawner_attempts: u32,
}

impl Round {
    /// Fresh round from the configured starting layout, with food placed
    /// off the snake.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> GameResult<Self> {
        let grid = config.grid()?;
        let snake = Snake::new(&grid, config.start_body.iter().copied(), config.initial_direction)?;
        let food = FoodSpawner::new(grid, config.spawn_attempts).spawn(rng, &snake.occupied());
        Self::assemble(config, grid, snake, food)
    }

    /// Round with an explicit snake and food cell, already playing.
    pub fn with_layout(
        config: &GameConfig,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
        food: Position,
    ) -> GameResult<Self> {
        let grid = config.grid()?;
        grid.check_bounds(&food)?;
        let snake = Snake::new(&grid, body, direction)?;
        if snake.contains_point(&food) {
            return Err(GameError::FoodOnSnake(food));
        }
        Self::assemble(config, grid, snake, Some(food))
    }

    fn assemble(
        config: &GameConfig,
        grid: Grid,
        snake: Snake,
        food: Option<Position>,
    ) -> GameResult<Self> {
        Ok(Round {
            tick: 0,
            grid,
            snake,
            food,
            status: GameStatus::Playing,
            food_reward: config.food_reward,
            spawner_attempts: config.spawn_attempts,
        })
    }

    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Applies one command. `Turn` only stores the pending direction, which
    /// the next `Tick` resolves.
    pub fn exec_command<R: Rng + ?Sized>(
        &mut self,
        command: GameCommand,
        rng: &mut R,
    ) -> GameResult<Vec<GameEvent>> {
        match command {
            GameCommand::Tick => self.tick_forward(rng),
            GameCommand::Turn { direction } => {
                if self.status == GameStatus::Playing {
                    self.snake.set_pending_direction(direction);
                }
                Ok(Vec::new())
            }
        }
    }

    /// Advances the simulation by one step. Does nothing once the round is
    /// over.
    pub fn tick_forward<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameResult<Vec<GameEvent>> {
        let mut out = Vec::new();
        if self.status != GameStatus::Playing {
            return Ok(out);
        }

        if let Some(direction) = self.snake.resolve_direction() {
            out.push(GameEvent::SnakeTurned { direction });
        }

        match self.snake.advance(&self.grid, self.food.as_ref())? {
            Advance::Collided { at } => {
                info!("snake ran into itself at {:?} on tick {}", at, self.tick);
                self.status = GameStatus::GameOver;
                out.push(GameEvent::SnakeDied { at });
            }
            Advance::Moved { head } => {
                out.push(GameEvent::SnakeMoved { head });
            }
            Advance::Grew { head } => {
                out.push(GameEvent::SnakeMoved { head });
                out.push(GameEvent::FoodEaten { position: head, reward: self.food_reward });

                let spawner = FoodSpawner::new(self.grid, self.spawner_attempts);
                self.food = spawner.spawn(rng, &self.snake.occupied());
                match self.food {
                    Some(position) => {
                        debug!("food respawned at {:?}", position);
                        out.push(GameEvent::FoodSpawned { position });
                    }
                    None => {
                        info!("snake filled the board on tick {}", self.tick);
                        self.status = GameStatus::Won;
                        out.push(GameEvent::BoardFilled);
                    }
                }
            }
        }

        self.tick += 1;
        Ok(out)
    }
}
