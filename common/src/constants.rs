/// Side length of the default square board
pub const DEFAULT_GRID_SIZE: u16 = 15;

/// Points awarded for each piece of food eaten
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Starting cell of a fresh snake on the default board
pub const DEFAULT_START_CELL: (i16, i16) = (7, 7);

/// Rejection-sampling draws before food placement falls back to a full scan
pub const DEFAULT_SPAWN_ATTEMPTS: u32 = 64;

/// Tick intervals for each speed tier, in milliseconds
pub const SLOW_TICK_INTERVAL_MS: u64 = 300;
pub const NORMAL_TICK_INTERVAL_MS: u64 = 200;
pub const FAST_TICK_INTERVAL_MS: u64 = 120;

/// Capacity of the game service mailbox
pub const SERVICE_MAILBOX_CAPACITY: usize = 64;
