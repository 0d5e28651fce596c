//! Self resolution and the state a bot keeps between ticks

use tracing::debug;

use crate::protocol::{GameState, Player, Position, SavePayload};

/// Everything a bot instance carries from one tick to the next
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotState {
    /// The one-time weapon switch has been emitted
    pub weapon_switch_issued: bool,
    /// Name of the enemy targeted last tick, re-resolved against each snapshot
    pub last_enemy: Option<String>,
    /// First tick this instance resolved itself in
    pub first_tick: Option<u64>,
    /// Self position from the last resolved tick, scaled
    pub last_self_position: Option<Position>,
    /// Last payload handed to the engine via a Save action
    pub last_save: Option<SavePayload>,
}

impl BotState {
    /// Drop per-game references at game end
    pub fn clear_transient(&mut self) {
        self.last_enemy = None;
    }
}

/// Per-tick decision failures; none of these are fatal
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TickError {
    #[error("Player '{name}' not found in snapshot")]
    SelfNotFound { name: String },

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

/// Resolves self from each snapshot and owns the persistent [`BotState`]
#[derive(Debug)]
pub struct StateTracker {
    name: String,
    state: BotState,
}

impl StateTracker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: BotState::default(),
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BotState {
        &mut self.state
    }

    /// Replace the tracked state, e.g. with one decoded from a Save payload
    pub fn restore(&mut self, state: BotState) {
        self.state = state;
    }

    /// Find self in the snapshot and advance tick bookkeeping.
    ///
    /// Nothing is mutated when self is missing.
    pub fn resolve_self<'a>(&mut self, snapshot: &'a GameState) -> Result<&'a Player, TickError> {
        let me = find_player(&snapshot.players, &self.name).ok_or_else(|| {
            TickError::SelfNotFound {
                name: self.name.clone(),
            }
        })?;

        if self.state.first_tick.is_none() {
            debug!(bot = %self.name, tick = snapshot.tick, "First tick seen");
            self.state.first_tick = Some(snapshot.tick);
        }
        self.state.last_self_position = Some(me.pos.scaled());

        Ok(me)
    }

    /// Look up last tick's enemy by name in the fresh snapshot
    pub fn resolve_last_enemy<'a>(&self, snapshot: &'a GameState) -> Option<&'a Player> {
        self.state
            .last_enemy
            .as_deref()
            .and_then(|name| find_player(&snapshot.players, name))
    }
}

/// First player with an exactly matching name
pub fn find_player<'a>(players: &'a [Player], name: &str) -> Option<&'a Player> {
    players.iter().find(|p| p.name == name)
}
