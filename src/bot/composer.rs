//! Builds the ordered action batch for one tick

use crate::protocol::{Action, Coin, Player, Weapon};

use super::persist;
use super::selector::nearest_coin;
use super::tracker::BotState;

/// Offset added to the target's scaled position when shooting, aims at the cell center
pub const AIM_OFFSET: f64 = 0.5;

/// Composes actions from the persistent state and the selected enemy.
///
/// Order within a batch: weapon switch, shoot, move, save.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionComposer {
    /// Head for the nearest coin when no enemy is around
    seek_coins: bool,
    /// Append a Save action whenever the persistent state changes
    persist_state: bool,
}

impl ActionComposer {
    pub fn new(seek_coins: bool, persist_state: bool) -> Self {
        Self {
            seek_coins,
            persist_state,
        }
    }

    pub fn build(
        &self,
        state: &mut BotState,
        me: &Player,
        enemy: Option<&Player>,
        coins: &[Coin],
    ) -> Vec<Action> {
        let mut actions = Vec::with_capacity(4);

        if !state.weapon_switch_issued {
            actions.push(Action::SwitchWeapon { weapon: Weapon::Gun });
            state.weapon_switch_issued = true;
        }

        match enemy {
            Some(enemy) => {
                let target = enemy.pos.scaled();
                actions.push(Action::shoot_at(target.offset(AIM_OFFSET, AIM_OFFSET)));
                actions.push(Action::move_to(target));

                if state.last_enemy.as_deref() != Some(enemy.name.as_str()) {
                    state.last_enemy = Some(enemy.name.clone());
                }
            }
            None => {
                state.last_enemy = None;
                if self.seek_coins {
                    if let Some(coin) = nearest_coin(coins, me) {
                        actions.push(Action::move_to(coin.pos.scaled()));
                    }
                }
            }
        }

        if self.persist_state {
            let payload = persist::encode(state);
            if state.last_save.as_ref() != Some(&payload) {
                state.last_save = Some(payload.clone());
                actions.push(Action::Save { bytes: payload });
            }
        }

        actions
    }
}
