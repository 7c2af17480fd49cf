use super::View;
use crate::app::AppCommand;
use crate::render::arena::ArenaRenderer;
use crate::render::standard_renderer::StandardRenderer;
use crate::render::types::{CharDimensions, RenderConfig};
use common::{Direction as Heading, Snapshot, Speed};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;
use tokio::sync::watch;

/// Maps a key press to an app command given what is on screen.
///
/// Speed keys and start only work between rounds, matching the disabled
/// controls of a running game.
pub fn command_for_key(key: KeyEvent, snapshot: &Snapshot) -> Option<AppCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppCommand::Quit);
    }

    let heading = match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Heading::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Heading::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Heading::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Heading::Right),
        _ => None,
    };
    if let Some(heading) = heading {
        return snapshot.is_playing.then_some(AppCommand::Turn(heading));
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
        KeyCode::Char(' ') | KeyCode::Enter if !snapshot.is_playing => Some(AppCommand::Start),
        KeyCode::Char('1') if !snapshot.is_playing => Some(AppCommand::SetSpeed(Speed::Slow)),
        KeyCode::Char('2') if !snapshot.is_playing => Some(AppCommand::SetSpeed(Speed::Normal)),
        KeyCode::Char('3') if !snapshot.is_playing => Some(AppCommand::SetSpeed(Speed::Fast)),
        _ => None,
    }
}

pub struct GameViewState {
    snapshots: watch::Receiver<Snapshot>,
    snapshot: Snapshot,
}

impl GameViewState {
    pub fn new(mut snapshots: watch::Receiver<Snapshot>) -> Self {
        let snapshot = snapshots.borrow_and_update().clone();
        Self { snapshots, snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl View for GameViewState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        command_for_key(key, &self.snapshot)
    }

    fn update(&mut self, _dt: Duration) {
        if self.snapshots.has_changed().unwrap_or(false) {
            self.snapshot = self.snapshots.borrow_and_update().clone();
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Score header
                Constraint::Length(3), // Speed selector
                Constraint::Min(10),   // Board
                Constraint::Length(4), // Prompt / controls
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(), chunks[0]);
        frame.render_widget(self.render_speed_selector(), chunks[1]);
        self.render_board(frame, chunks[2]);
        frame.render_widget(self.render_footer(), chunks[3]);
    }
}

impl GameViewState {
    fn render_header(&self) -> Paragraph<'_> {
        let line = Line::from(vec![
            Span::styled("Snake Game", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled(format!("Score: {}", self.snapshot.score), Style::default().fg(Color::Magenta)),
            Span::raw("  "),
            Span::styled(format!("Best: {}", self.snapshot.best_score), Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_speed_selector(&self) -> Paragraph<'_> {
        let mut spans = Vec::new();
        for (i, speed) in Speed::ALL.iter().enumerate() {
            let mut style = if *speed == self.snapshot.speed {
                Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if self.snapshot.is_playing {
                style = style.add_modifier(Modifier::DIM);
            }
            spans.push(Span::styled(format!(" {} {} ", i + 1, speed.label()), style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Speed"))
    }

    fn render_board(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let char_dims = CharDimensions::new(2, 1);
        let arena_renderer = ArenaRenderer::new(StandardRenderer::new(char_dims));
        let config = RenderConfig { chars_per_point: char_dims };
        let char_grid = arena_renderer.render(&self.snapshot, &config);

        let board_width = char_grid.physical_width();
        let board_height = char_grid.physical_height();
        let x_offset = inner.width.saturating_sub(board_width as u16 + 2) / 2;
        let y_offset = inner.height.saturating_sub(board_height as u16 + 2) / 2;
        let padding = " ".repeat(x_offset as usize);
        let border = Style::default().fg(Color::DarkGray);

        let mut lines: Vec<Line> = Vec::new();
        for _ in 0..y_offset {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(format!("{}┌{}┐", padding, "─".repeat(board_width)), border)));
        for (chars, styles) in char_grid.into_styled_lines() {
            let mut spans = vec![Span::raw(padding.clone()), Span::styled("│", border)];
            for (ch, style) in chars.into_iter().zip(styles) {
                spans.push(Span::styled(ch.to_string(), style));
            }
            spans.push(Span::styled("│", border));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(Span::styled(format!("{}└{}┘", padding, "─".repeat(board_width)), border)));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_footer(&self) -> Paragraph<'_> {
        let mut lines = Vec::new();

        if self.snapshot.is_playing {
            lines.push(Line::from(vec![
                Span::raw("Use "),
                Span::styled("Arrow Keys", Style::default().fg(Color::Magenta)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Magenta)),
                Span::raw(" to move"),
            ]));
        } else {
            let prompt = if self.snapshot.is_game_over { "Play Again" } else { "Start Game" };
            lines.push(Line::from(vec![
                Span::styled("Space", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
                Span::raw(format!(": {} | 1/2/3: speed | q: quit", prompt)),
            ]));
        }

        if self.snapshot.is_won {
            lines.push(Line::from(Span::styled(
                format!("Board cleared! Final Score: {}", self.snapshot.score),
                Style::default().fg(Color::Green),
            )));
        } else if self.snapshot.is_game_over {
            lines.push(Line::from(Span::styled(
                format!("Game Over! Final Score: {}", self.snapshot.score),
                Style::default().fg(Color::Red),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }
}
