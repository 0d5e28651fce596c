//! Application wiring

pub mod registry;
pub mod state;

pub use registry::{BotHandle, BotRegistry};
pub use state::AppState;
