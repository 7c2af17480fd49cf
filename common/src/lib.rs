mod config;
mod constants;
mod controller;
mod food;
mod game_state;
mod grid;
mod input;
mod score;
mod snake;

pub mod clock;
pub mod error;
pub mod service;
pub mod util;

pub use config::*;
pub use constants::*;
pub use controller::*;
pub use error::{GameError, GameResult};
pub use food::*;
pub use game_state::*;
pub use grid::*;
pub use input::*;
pub use score::*;
pub use service::{GameHandle, spawn_game};
pub use snake::*;
pub use util::PseudoRandom;
