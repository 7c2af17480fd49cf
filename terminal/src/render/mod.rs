pub mod arena;
pub mod standard_renderer;
pub mod traits;
pub mod types;
