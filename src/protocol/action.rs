//! Actions returned to the game engine each tick

use serde::{Deserialize, Serialize};

use super::state::Position;

/// Size of the engine-persisted Save payload in bytes
pub const SAVE_LEN: usize = 100;

/// Weapons a bot can hold; the wire form is the numeric id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Weapon {
    #[default]
    None,
    Gun,
    Blade,
}

impl From<Weapon> for u8 {
    fn from(weapon: Weapon) -> u8 {
        match weapon {
            Weapon::None => 0,
            Weapon::Gun => 1,
            Weapon::Blade => 2,
        }
    }
}

impl TryFrom<u8> for Weapon {
    type Error = ProtocolError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Weapon::None),
            1 => Ok(Weapon::Gun),
            2 => Ok(Weapon::Blade),
            other => Err(ProtocolError::UnknownWeapon(other)),
        }
    }
}

/// Exactly [`SAVE_LEN`] bytes handed to the engine for safekeeping
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct SavePayload([u8; SAVE_LEN]);

impl SavePayload {
    pub fn new(bytes: [u8; SAVE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SAVE_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SavePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.0.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        write!(f, "SavePayload({} of {} bytes used)", used, SAVE_LEN)
    }
}

impl TryFrom<Vec<u8>> for SavePayload {
    type Error = ProtocolError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        let len = bytes.len();
        <[u8; SAVE_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| ProtocolError::SaveLength(len))
    }
}

impl From<SavePayload> for Vec<u8> {
    fn from(payload: SavePayload) -> Vec<u8> {
        payload.0.to_vec()
    }
}

/// A single engine action; the engine executes a batch in list order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Head towards a point at constant speed
    Move { x: f64, y: f64 },

    /// Fire the gun at a point
    Shoot { x: f64, y: f64 },

    /// Change the held weapon
    SwitchWeapon {
        #[serde(rename = "weapon_id")]
        weapon: Weapon,
    },

    /// Set the blade rotation in radians
    BladeRotate { radians: f64 },

    /// Persist bytes on the engine side, replayed on reconnect
    Save { bytes: SavePayload },
}

impl Action {
    pub fn move_to(pos: Position) -> Self {
        Action::Move { x: pos.x, y: pos.y }
    }

    pub fn shoot_at(pos: Position) -> Self {
        Action::Shoot { x: pos.x, y: pos.y }
    }
}

/// Wire format errors
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Unknown weapon id: {0}")]
    UnknownWeapon(u8),

    #[error("Save payload must be exactly 100 bytes, got {0}")]
    SaveLength(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn switch_weapon_uses_numeric_id() {
        let action = Action::SwitchWeapon { weapon: Weapon::Gun };
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "switch_weapon", "weapon_id": 1})
        );

        let blade: Action =
            serde_json::from_value(json!({"type": "switch_weapon", "weapon_id": 2})).unwrap();
        assert_eq!(blade, Action::SwitchWeapon { weapon: Weapon::Blade });
    }

    #[test]
    fn unknown_weapon_id_is_rejected() {
        let result: Result<Action, _> =
            serde_json::from_value(json!({"type": "switch_weapon", "weapon_id": 9}));
        assert!(result.is_err());
    }

    #[test]
    fn move_and_blade_wire_shape() {
        assert_eq!(
            serde_json::to_value(Action::move_to(Position::new(1.0, 2.5))).unwrap(),
            json!({"type": "move", "x": 1.0, "y": 2.5})
        );
        assert_eq!(
            serde_json::to_value(Action::BladeRotate { radians: 1.5 }).unwrap(),
            json!({"type": "blade_rotate", "radians": 1.5})
        );
    }

    #[test]
    fn save_payload_must_be_exactly_100_bytes() {
        assert!(SavePayload::try_from(vec![0u8; SAVE_LEN]).is_ok());
        assert!(matches!(
            SavePayload::try_from(vec![0u8; 99]),
            Err(ProtocolError::SaveLength(99))
        ));

        let short: Result<Action, _> =
            serde_json::from_value(json!({"type": "save", "bytes": [1, 2, 3]}));
        assert!(short.is_err());
    }
}
