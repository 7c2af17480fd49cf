pub mod game_view;

pub use game_view::GameViewState;

use crate::app::AppCommand;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use std::time::Duration;

pub trait View {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand>;
    fn update(&mut self, dt: Duration);
    fn render(&self, frame: &mut Frame);
}
