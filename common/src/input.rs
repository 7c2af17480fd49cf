use log::trace;

use crate::{Direction, GameCommand, GameStatus};

/// Turns direction requests into `Turn` commands for the current round.
///
/// Requests only land while a round is playing, and never touch the current
/// direction: the tick resolves the pending one, so rapid input still yields
/// at most one turn per tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputRouter {
    ignored: u64,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the command to apply, or `None` if the request is dropped.
    pub fn request(&mut self, status: GameStatus, requested: Direction) -> Option<GameCommand> {
        if status != GameStatus::Playing {
            self.ignored += 1;
            trace!("ignoring {:?} request while {:?}", requested, status);
            return None;
        }
        Some(GameCommand::Turn { direction: requested })
    }

    /// Requests dropped because no round was playing.
    pub fn ignored(&self) -> u64 {
        self.ignored
    }
}
