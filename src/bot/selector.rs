//! Nearest-target selection in the scaled coordinate space

use crate::protocol::{Coin, Player, Position};

/// Pick the opponent closest to `me`.
///
/// Entries named like `me` are skipped. Ties keep the earliest entry in engine
/// order; `None` when no opponent is left.
pub fn select_nearest<'a>(players: &'a [Player], me: &Player) -> Option<&'a Player> {
    nearest_by(
        players.iter().filter(|p| p.name != me.name),
        me.pos.scaled(),
        |p| p.pos,
    )
}

/// Pick the coin closest to `me`, same tie rule as [`select_nearest`]
pub fn nearest_coin<'a>(coins: &'a [Coin], me: &Player) -> Option<&'a Coin> {
    nearest_by(coins.iter(), me.pos.scaled(), |c| c.pos)
}

/// Single pass with a running minimum; only a strictly smaller distance replaces
/// the current best
fn nearest_by<'a, T>(
    candidates: impl Iterator<Item = &'a T>,
    origin: Position,
    position: impl Fn(&T) -> Position,
) -> Option<&'a T> {
    let mut best: Option<(&'a T, f64)> = None;

    for candidate in candidates {
        let dist = origin.distance(position(candidate).scaled());
        if dist.is_nan() {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, x: f64, y: f64) -> Player {
        Player {
            name: name.to_string(),
            pos: Position::new(x, y),
        }
    }

    #[test]
    fn picks_closest_opponent() {
        let me = player("me", 0.0, 0.0);
        let players = vec![
            me.clone(),
            player("far", 90.0, 120.0),
            player("near", 30.0, 30.0),
        ];

        let enemy = select_nearest(&players, &me).unwrap();
        assert_eq!(enemy.name, "near");
    }

    #[test]
    fn never_selects_self() {
        let me = player("me", 0.0, 0.0);
        let players = vec![player("me", 0.0, 0.0), player("other", 3000.0, 3000.0)];

        let enemy = select_nearest(&players, &me).unwrap();
        assert_eq!(enemy.name, "other");
    }

    #[test]
    fn alone_means_no_enemy() {
        let me = player("me", 0.0, 0.0);
        assert!(select_nearest(&[me.clone()], &me).is_none());
        assert!(select_nearest(&[], &me).is_none());
    }

    #[test]
    fn ties_resolve_to_earliest_entry() {
        let me = player("me", 0.0, 0.0);
        let players = vec![
            player("east", 30.0, 0.0),
            me.clone(),
            player("north", 0.0, 30.0),
            player("west", -30.0, 0.0),
        ];

        assert_eq!(select_nearest(&players, &me).unwrap().name, "east");
    }

    #[test]
    fn closer_wins_regardless_of_order() {
        let me = player("me", 150.0, 150.0);
        let a = player("a", 180.0, 150.0);
        let b = player("b", 300.0, 300.0);

        let forward = vec![a.clone(), b.clone(), me.clone()];
        let backward = vec![me.clone(), b, a];

        assert_eq!(select_nearest(&forward, &me).unwrap().name, "a");
        assert_eq!(select_nearest(&backward, &me).unwrap().name, "a");
    }

    #[test]
    fn nearest_coin_uses_same_scan() {
        let me = player("me", 0.0, 0.0);
        let coins = vec![
            Coin { pos: Position::new(300.0, 0.0) },
            Coin { pos: Position::new(0.0, 60.0) },
            Coin { pos: Position::new(60.0, 0.0) },
        ];

        let coin = nearest_coin(&coins, &me).unwrap();
        assert_eq!(coin.pos, Position::new(0.0, 60.0));
        assert!(nearest_coin(&[], &me).is_none());
    }
}
