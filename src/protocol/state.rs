//! World state as supplied by the game engine

use serde::{Deserialize, Deserializer, Serialize};

use super::action::SavePayload;

/// Raw engine units per scaled unit
pub const COORD_SCALE: f64 = 30.0;

/// A point in raw engine coordinates (or scaled, see [`Position::scaled`])
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert raw engine units into the scaled space (raw / 30)
    pub fn scaled(self) -> Self {
        Self {
            x: self.x / COORD_SCALE,
            y: self.y / COORD_SCALE,
        }
    }

    /// Euclidean distance to another point in the same space
    pub fn distance(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A player entry in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player name
    pub name: String,
    /// Position in raw engine units
    pub pos: Position,
}

/// A coin pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Position,
}

/// Per-tick world snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    /// Engine tick counter
    #[serde(default)]
    pub tick: u64,
    /// Players in engine order (self included)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub players: Vec<Player>,
    /// Coins in engine order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub coins: Vec<Coin>,
}

/// Static map configuration handed over once at game start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapState {
    /// Most recent Save payload the engine kept for this bot, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<SavePayload>,
    /// Everything else the engine sends; stored but not interpreted
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Treat an explicit `null` sequence the same as a missing one
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
