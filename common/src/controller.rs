use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::{
    Direction, GameCommand, GameConfig, GameEvent, GameStatus, InputRouter, Position,
    PseudoRandom, Round, ScoreTracker, Speed,
};

/// Read-only view of the game handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub snake_cells: Vec<Position>,
    pub food_cell: Option<Position>,
    pub heading: Direction,
    pub score: u32,
    pub best_score: u32,
    pub is_playing: bool,
    pub is_game_over: bool,
    pub is_won: bool,
    pub speed: Speed,
    pub round_id: u64,
    pub tick: u32,
    pub grid_size: u16,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn status(&self) -> GameStatus {
        if self.is_playing {
            GameStatus::Playing
        } else if self.is_won {
            GameStatus::Won
        } else if self.is_game_over {
            GameStatus::GameOver
        } else {
            GameStatus::Idle
        }
    }
}

/// Owns the current round, the session's best score and the speed setting.
///
/// Fully synchronous: whoever drives it decides when `tick` runs. See
/// `service` for the timer-driven wrapper.
pub struct GameController {
    config: GameConfig,
    speed: Speed,
    round: Option<Round>,
    round_id: u64,
    scores: ScoreTracker,
    input: InputRouter,
    rng: PseudoRandom,
}

impl GameController {
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => PseudoRandom::new(seed),
            None => PseudoRandom::from_entropy(),
        };
        Ok(GameController {
            speed: config.speed,
            config,
            round: None,
            round_id: 0,
            scores: ScoreTracker::new(),
            input: InputRouter::new(),
            rng,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.round.as_ref().map(Round::status).unwrap_or_default()
    }

    pub fn is_playing(&self) -> bool {
        self.status() == GameStatus::Playing
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    /// Begins a fresh round. Returns false, changing nothing, if one is
    /// already playing.
    pub fn start(&mut self) -> GameResult<bool> {
        if self.is_playing() {
            debug!("start ignored, round {} is still playing", self.round_id);
            return Ok(false);
        }

        let round = Round::new(&self.config, &mut self.rng)?;
        self.round_id += 1;
        self.scores.begin_round();
        info!(
            "round {} started at {} speed, food at {:?}",
            self.round_id,
            self.speed,
            round.food()
        );
        self.round = Some(round);
        Ok(true)
    }

    /// Starts a round from an explicit layout instead of the configured one.
    pub fn start_with_layout(
        &mut self,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
        food: Position,
    ) -> GameResult<bool> {
        if self.is_playing() {
            return Ok(false);
        }
        let round = Round::with_layout(&self.config, body, direction, food)?;
        self.round_id += 1;
        self.scores.begin_round();
        self.round = Some(round);
        Ok(true)
    }

    pub fn set_speed(&mut self, speed: Speed) -> GameResult<()> {
        if self.is_playing() {
            return Err(GameError::SpeedLocked);
        }
        self.speed = speed;
        Ok(())
    }

    /// Returns true if the request was kept for the next tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        let status = self.status();
        let Some(command) = self.input.request(status, direction) else {
            return false;
        };
        match self.round.as_mut() {
            Some(round) => round.exec_command(command, &mut self.rng).is_ok(),
            None => false,
        }
    }

    /// Runs one simulation step, applying score changes from its events.
    pub fn tick(&mut self) -> GameResult<Vec<GameEvent>> {
        let Some(round) = self.round.as_mut() else {
            return Ok(Vec::new());
        };

        let events = round.exec_command(GameCommand::Tick, &mut self.rng)?;
        for event in &events {
            match event {
                GameEvent::FoodEaten { reward, .. } => {
                    self.scores.award(*reward);
                }
                GameEvent::SnakeDied { .. } | GameEvent::BoardFilled => {
                    if self.scores.finish_round() {
                        info!("new best score {}", self.scores.best());
                    }
                    info!(
                        "round {} ended with score {}, {} turn requests ignored so far",
                        self.round_id,
                        self.scores.current(),
                        self.input.ignored()
                    );
                }
                _ => {}
            }
        }
        Ok(events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let status = self.status();
        let (snake_cells, food_cell, heading, tick) = match &self.round {
            Some(round) => (
                round.snake().body().iter().copied().collect(),
                round.food(),
                round.snake().direction(),
                round.current_tick(),
            ),
            None => (
                self.config.start_body.clone(),
                None,
                self.config.initial_direction,
                0,
            ),
        };

        Snapshot {
            snake_cells,
            food_cell,
            heading,
            score: self.scores.current(),
            best_score: self.scores.best(),
            is_playing: status == GameStatus::Playing,
            is_game_over: status.is_terminal(),
            is_won: status == GameStatus::Won,
            speed: self.speed,
            round_id: self.round_id,
            tick,
            grid_size: self.config.grid_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> GameController {
        GameController::new(GameConfig { seed: Some(17), ..GameConfig::default() }).unwrap()
    }

    #[test]
    fn idle_snapshot_shows_the_starting_snake() {
        let c = controller();
        let snap = c.snapshot();
        assert_eq!(snap.status(), GameStatus::Idle);
        assert_eq!(snap.snake_cells, vec![Position::new(7, 7)]);
        assert_eq!(snap.food_cell, None);
        assert_eq!(snap.round_id, 0);
    }

    #[test]
    fn start_is_a_no_op_while_playing() {
        let mut c = controller();
        assert!(c.start().unwrap());
        let first = c.snapshot();
        assert!(!c.start().unwrap());
        assert_eq!(c.snapshot(), first);
        assert_eq!(c.round_id(), 1);
    }

    #[test]
    fn speed_locked_while_playing() {
        let mut c = controller();
        c.set_speed(Speed::Fast).unwrap();
        c.start().unwrap();
        assert_eq!(c.set_speed(Speed::Slow), Err(GameError::SpeedLocked));
        assert_eq!(c.speed(), Speed::Fast);
    }

    #[test]
    fn direction_requests_before_any_round_are_ignored() {
        let mut c = controller();
        assert!(!c.request_direction(Direction::Up));
        c.start().unwrap();
        assert!(c.request_direction(Direction::Up));
    }

    #[test]
    fn turns_go_through_the_router_into_the_round() {
        let mut c = controller();
        c.start_with_layout(vec![Position::new(5, 5)], Direction::Right, Position::new(0, 0))
            .unwrap();

        assert!(c.request_direction(Direction::Down));
        let round = c.round().unwrap();
        assert_eq!(round.snake().pending_direction(), Some(Direction::Down));
        assert_eq!(round.snake().direction(), Direction::Right);

        c.tick().unwrap();
        assert_eq!(c.snapshot().snake_cells[0], Position::new(5, 6));
        assert_eq!(c.snapshot().heading, Direction::Down);
    }

    #[test]
    fn layout_with_food_on_the_snake_is_refused() {
        let mut c = controller();
        let result = c.start_with_layout(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Position::new(4, 5),
        );
        assert_eq!(result, Err(GameError::FoodOnSnake(Position::new(4, 5))));
        assert_eq!(c.status(), GameStatus::Idle);
        assert_eq!(c.round_id(), 0);
    }

    #[test]
    fn filling_the_board_is_a_win_and_records_best() {
        let mut c = GameController::new(GameConfig {
            grid_size: 2,
            start_body: vec![Position::new(0, 0)],
            seed: Some(3),
            ..GameConfig::default()
        })
        .unwrap();
        c.start_with_layout(
            vec![Position::new(1, 0), Position::new(0, 0), Position::new(0, 1)],
            Direction::Down,
            Position::new(1, 1),
        )
        .unwrap();

        let events = c.tick().unwrap();
        assert_eq!(events.last(), Some(&GameEvent::BoardFilled));

        let snap = c.snapshot();
        assert!(snap.is_won);
        assert!(!snap.is_playing);
        assert!(snap.is_game_over);
        assert_eq!(snap.food_cell, None);
        assert_eq!(snap.score, 10);
        assert_eq!(snap.best_score, 10);
        assert_eq!(snap.status(), GameStatus::Won);

        assert!(!c.request_direction(Direction::Left));
    }

    #[test]
    fn snapshot_json_has_read_model_fields() {
        let mut c = controller();
        c.start().unwrap();
        let json = c.snapshot().to_json().unwrap();
        for field in ["snake_cells", "food_cell", "score", "best_score", "is_playing", "is_game_over"] {
            assert!(json.contains(field), "missing {field}");
        }
    }
}
