//! Bot instance and its lifecycle: start, one decision per tick, end

pub mod composer;
pub mod persist;
pub mod selector;
pub mod stats;
pub mod tracker;

pub use composer::ActionComposer;
pub use persist::SaveError;
pub use selector::select_nearest;
pub use stats::TickStats;
pub use tracker::{BotState, StateTracker, TickError};

use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::protocol::{Action, GameState, MapState};
use crate::util::time::{Timer, DEFAULT_TICK_BUDGET_MS};

/// Settings for one bot instance
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Name matched against snapshot players to find self
    pub name: String,
    /// Move towards the nearest coin when no enemy is present
    pub seek_coins: bool,
    /// Mirror the persistent state into engine Save payloads
    pub persist_state: bool,
    /// Decision time after which a tick is reported as over budget
    pub tick_budget: Duration,
}

impl BotConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seek_coins: false,
            persist_state: false,
            tick_budget: Duration::from_millis(DEFAULT_TICK_BUDGET_MS),
        }
    }
}

/// A single bot, driven by the engine through `on_start`, `on_tick`, `on_end`
pub struct Bot {
    config: BotConfig,
    tracker: StateTracker,
    composer: ActionComposer,
    map: Option<MapState>,
    session_id: Option<Uuid>,
    stats: TickStats,
}

impl Bot {
    pub fn new(config: BotConfig) -> Self {
        Self {
            tracker: StateTracker::new(config.name.clone()),
            composer: ActionComposer::new(config.seek_coins, config.persist_state),
            config,
            map: None,
            session_id: None,
            stats: TickStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn state(&self) -> &BotState {
        self.tracker.state()
    }

    pub fn map_state(&self) -> Option<&MapState> {
        self.map.as_ref()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Store the map and restore persisted state from its Save payload, if any
    pub fn on_start(&mut self, map: MapState) {
        let session_id = Uuid::new_v4();
        self.session_id = Some(session_id);

        if let Some(save) = &map.save {
            match persist::decode(save) {
                Ok(restored) => {
                    info!(
                        bot = %self.config.name,
                        session_id = %session_id,
                        weapon_switch_issued = restored.weapon_switch_issued,
                        first_tick = ?restored.first_tick,
                        "Restored state from save"
                    );
                    self.tracker.restore(restored);
                }
                Err(e) => {
                    warn!(bot = %self.config.name, error = %e, "Ignoring save payload");
                }
            }
        }

        info!(bot = %self.config.name, session_id = %session_id, "Game started");
        self.map = Some(map);
    }

    /// Decide this tick's actions; never fails, a bad tick yields an empty batch
    pub fn on_tick(&mut self, snapshot: &GameState) -> Vec<Action> {
        let timer = Timer::new();

        let actions = match self.decide(snapshot) {
            Ok(actions) => actions,
            Err(e) => {
                warn!(bot = %self.config.name, tick = snapshot.tick, error = %e, "Skipping tick");
                Vec::new()
            }
        };

        let elapsed = timer.elapsed();
        let over_budget = elapsed > self.config.tick_budget;
        if over_budget {
            warn!(
                bot = %self.config.name,
                tick = snapshot.tick,
                elapsed_micros = elapsed.as_micros() as u64,
                "Tick decision over budget"
            );
        }
        self.stats.record(
            snapshot.tick,
            actions.len(),
            elapsed.as_micros() as u64,
            over_budget,
        );

        actions
    }

    /// Clear per-game references
    pub fn on_end(&mut self) {
        self.tracker.state_mut().clear_transient();
        info!(
            bot = %self.config.name,
            session_id = ?self.session_id,
            ticks = self.stats.total_ticks,
            "Game ended"
        );
        self.session_id = None;
    }

    fn decide(&mut self, snapshot: &GameState) -> Result<Vec<Action>, TickError> {
        let me = self.tracker.resolve_self(snapshot)?;
        let previous = self.tracker.resolve_last_enemy(snapshot);
        let enemy = select_nearest(&snapshot.players, me);

        match (previous, enemy) {
            (_, None) => {
                debug!(bot = %self.config.name, tick = snapshot.tick, "No enemy available");
            }
            (Some(prev), Some(next)) if prev.name == next.name => {}
            (_, Some(next)) => {
                debug!(
                    bot = %self.config.name,
                    tick = snapshot.tick,
                    enemy = %next.name,
                    "Switching target"
                );
            }
        }

        Ok(self
            .composer
            .build(self.tracker.state_mut(), me, enemy, &snapshot.coins))
    }
}
