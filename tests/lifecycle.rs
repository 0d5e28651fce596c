use arena_bot::bot::{Bot, BotConfig};
use arena_bot::protocol::{Action, GameState, MapState, Weapon, SAVE_LEN};
use serde_json::{json, Value};

/// Stand-in for the engine side: keeps the latest Save payload per bot as raw
/// JSON and hands it back on the next start
#[derive(Default)]
struct Engine {
    stored_save: Option<Value>,
}

impl Engine {
    fn tick(&mut self, bot: &mut Bot, snapshot: Value) -> Vec<Action> {
        let state: GameState = serde_json::from_value(snapshot).unwrap();
        let actions = bot.on_tick(&state);

        let wire = serde_json::to_value(&actions).unwrap();
        for action in wire.as_array().unwrap() {
            if action["type"] == "save" {
                self.stored_save = Some(action["bytes"].clone());
            }
        }
        actions
    }

    fn start(&self, bot: &mut Bot) {
        let mut map = json!({"width": 32, "height": 32});
        if let Some(save) = &self.stored_save {
            map["save"] = save.clone();
        }
        bot.on_start(serde_json::from_value(map).unwrap());
    }
}

fn persisting(name: &str) -> BotConfig {
    let mut config = BotConfig::new(name);
    config.persist_state = true;
    config
}

#[test]
fn save_payload_survives_reconnect_unchanged() {
    let mut engine = Engine::default();
    let mut bot = Bot::new(persisting("EarthIsFlat"));
    engine.start(&mut bot);

    engine.tick(
        &mut bot,
        json!({
            "tick": 40,
            "players": [
                {"name": "EarthIsFlat", "pos": {"x": 0.0, "y": 0.0}},
                {"name": "rival", "pos": {"x": 60.0, "y": 30.0}}
            ],
            "coins": []
        }),
    );
    let submitted = engine.stored_save.clone().expect("bot should have saved");
    assert_eq!(submitted.as_array().unwrap().len(), SAVE_LEN);

    // disconnect, then a fresh instance reconnects
    bot.on_end();
    let mut reconnected = Bot::new(persisting("EarthIsFlat"));
    engine.start(&mut reconnected);

    let replayed = reconnected.map_state().and_then(|m| m.save.clone()).unwrap();
    assert_eq!(serde_json::to_value(&replayed).unwrap(), submitted);
    assert_eq!(reconnected.state().first_tick, Some(40));
    assert_eq!(reconnected.state().last_enemy.as_deref(), Some("rival"));

    let actions = engine.tick(
        &mut reconnected,
        json!({
            "tick": 41,
            "players": [
                {"name": "EarthIsFlat", "pos": {"x": 0.0, "y": 0.0}},
                {"name": "rival", "pos": {"x": 60.0, "y": 30.0}}
            ]
        }),
    );
    assert_eq!(
        actions,
        vec![Action::Shoot { x: 2.5, y: 1.5 }, Action::Move { x: 2.0, y: 1.0 }]
    );
}

#[test]
fn full_game_issues_weapon_switch_once() {
    let mut engine = Engine::default();
    let mut bot = Bot::new(BotConfig::new("me"));
    engine.start(&mut bot);

    let mut switches = 0;
    for tick in 0..50u64 {
        let players = if tick % 10 == 9 {
            json!([{"name": "me", "pos": {"x": 300.0, "y": 300.0}}])
        } else {
            json!([
                {"name": "me", "pos": {"x": 300.0, "y": 300.0}},
                {"name": "a", "pos": {"x": 300.0 + tick as f64, "y": 0.0}},
                {"name": "b", "pos": {"x": 0.0, "y": 300.0 + tick as f64}}
            ])
        };
        let actions = engine.tick(&mut bot, json!({"tick": tick, "players": players, "coins": null}));

        switches += actions
            .iter()
            .filter(|a| matches!(a, Action::SwitchWeapon { weapon: Weapon::Gun }))
            .count();
        assert!(actions.len() <= 3);
        if tick % 10 == 9 {
            assert!(actions.iter().all(|a| !matches!(a, Action::Shoot { .. } | Action::Move { .. })));
        }
    }

    assert_eq!(switches, 1);
    assert!(engine.stored_save.is_none());
    bot.on_end();
    assert_eq!(bot.state().last_enemy, None);
}

#[test]
fn map_state_is_kept_for_later_ticks() {
    let mut bot = Bot::new(BotConfig::new("me"));
    let map: MapState = serde_json::from_value(json!({"width": 20, "walls": [[1, 2]]})).unwrap();
    bot.on_start(map);

    let kept = bot.map_state().unwrap();
    assert_eq!(kept.extra["walls"], json!([[1, 2]]));
    assert!(kept.save.is_none());
}
