use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("speed cannot be changed while a round is playing")]
    SpeedLocked,

    #[error("snake body must contain at least one cell")]
    EmptySnake,

    #[error("snake body overlaps itself at {0:?}")]
    OverlappingBody(Position),

    #[error("food at {0:?} sits on the snake")]
    FoodOnSnake(Position),

    #[error("cell {position:?} lies outside a {size}x{size} grid")]
    OutOfBounds { position: Position, size: u16 },

    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    #[error("unknown speed tier '{0}', expected slow, normal or fast")]
    UnknownSpeed(String),

    #[error("game service has shut down")]
    ServiceClosed,

    #[error("game service mailbox is full")]
    MailboxFull,
}

pub type GameResult<T> = Result<T, GameError>;
