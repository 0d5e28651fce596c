//! Wire types exchanged with the game engine

pub mod action;
pub mod state;

pub use action::{Action, ProtocolError, SavePayload, Weapon, SAVE_LEN};
pub use state::{Coin, GameState, MapState, Player, Position, COORD_SCALE};
