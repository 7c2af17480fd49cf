use anyhow::{Context, Result};
use common::{GameConfig, Speed};
use std::path::PathBuf;

const DEFAULT_LOG_FILE: &str = "snake-terminal.log";

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    pub game: GameConfig,
    pub log_file: PathBuf,
}

impl TerminalConfig {
    /// Reads `SNAKE_CONFIG`, `SNAKE_SPEED`, `SNAKE_SEED` and `SNAKE_LOG_FILE`
    /// from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut game = match lookup("SNAKE_CONFIG") {
            Some(path) => GameConfig::load(&PathBuf::from(path))?,
            None => GameConfig::default(),
        };

        if let Some(speed) = lookup("SNAKE_SPEED") {
            game.speed = speed
                .parse::<Speed>()
                .context("SNAKE_SPEED must be slow, normal or fast")?;
        }

        if let Some(seed) = lookup("SNAKE_SEED") {
            let seed = seed
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SNAKE_SEED must be an unsigned integer, got {:?}", seed))?;
            game.seed = Some(seed);
        }

        let log_file = lookup("SNAKE_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(TerminalConfig { game, log_file })
    }
}
