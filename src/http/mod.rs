//! HTTP host adapter exposing the bot lifecycle to the game engine

pub mod routes;

pub use routes::{build_router, AppError};
