use anyhow::{anyhow, Context, Result};
use common::{spawn_game, GameController};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal::app::{App, AppCommand};
use terminal::config::TerminalConfig;

fn init_logging(log_file: &Path) -> Result<()> {
    // The terminal belongs to the UI, so logs go to a file.
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    let config = TerminalConfig::from_env()?;
    init_logging(&config.log_file)?;
    info!(speed = %config.game.speed, seed = ?config.game.seed, "starting snake terminal");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let _guard = runtime.enter();

    let controller = GameController::new(config.game)?;
    let (game, service) = spawn_game(controller);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game.clone());
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    game.shutdown().ok();
    drop(app);
    drop(game);
    if let Err(e) = runtime.block_on(service) {
        eprintln!("Game service ended abnormally: {:?}", e);
    }

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }
    info!("snake terminal exited");

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_update = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_update);
        last_update = now;

        app.update(dt);

        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = app.handle_input(key) {
                    match command {
                        AppCommand::Quit => return Ok(()),
                        _ => app.handle_command(command)?,
                    }
                }
            }
        }
    }
}
