use anyhow::Result;
use common::{Direction, GameError, GameHandle, Speed};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::Duration;
use tracing::{debug, warn};

use crate::views::{GameViewState, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Quit,
    Start,
    Turn(Direction),
    SetSpeed(Speed),
}

pub struct App {
    pub view: GameViewState,
    game: GameHandle,
}

impl App {
    pub fn new(game: GameHandle) -> Self {
        Self {
            view: GameViewState::new(game.subscribe()),
            game,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        self.view.handle_input(key)
    }

    pub fn update(&mut self, dt: Duration) {
        self.view.update(dt);
    }

    pub fn render(&self, frame: &mut Frame) {
        self.view.render(frame);
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        debug!(?command, "handling command");
        let sent = match command {
            AppCommand::Start => self.game.start(),
            AppCommand::Turn(direction) => self.game.request_direction(direction),
            AppCommand::SetSpeed(speed) => self.game.try_set_speed(speed),
            AppCommand::Quit => {
                // Handled in main loop
                Ok(())
            }
        };

        match sent {
            // Dropping a key press under load is harmless.
            Err(GameError::MailboxFull) => {
                warn!(?command, "game mailbox full, input dropped");
                Ok(())
            }
            other => Ok(other?),
        }
    }
}
