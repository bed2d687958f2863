//! Shared scenario fixtures for the `game` test suites.

use crate::scenario::{GridSpec, PlayerSpec, Scenario, UnitSpec};
use crate::state::UnitStats;

use super::*;

pub(super) fn stats(
    key: &str,
    max_length: u32,
    range: u32,
    movement: u32,
    attack: u32,
) -> UnitStats {
    UnitStats {
        key: key.to_string(),
        name: key.to_uppercase(),
        max_length,
        range,
        movement,
        attack,
        color: "grey".to_string(),
        head_color: "black".to_string(),
    }
}

pub(super) fn unit(stats: UnitStats, body: &[(i32, i32)]) -> UnitSpec {
    UnitSpec { stats, body: body.iter().map(|(x, y)| Pos::new(*x, *y)).collect() }
}

pub(super) fn player(name: &str, kind: PlayerKind, units: &[&str]) -> PlayerSpec {
    PlayerSpec {
        name: name.to_string(),
        kind,
        units: units.iter().map(|key| key.to_string()).collect(),
    }
}

pub(super) fn open_scenario(
    width: u32,
    height: u32,
    units: Vec<UnitSpec>,
    players: Vec<PlayerSpec>,
) -> Scenario {
    Scenario { grid: GridSpec { width, height, holes: Vec::new() }, units, players }
}

/// Human "Blue" owns `h`, AI "Red" owns `r`, on an open board.
pub(super) fn duel(human: UnitSpec, ai: UnitSpec) -> Game {
    let scenario = open_scenario(
        10,
        10,
        vec![human, ai],
        vec![player("Blue", PlayerKind::Human, &["h"]), player("Red", PlayerKind::Ai, &["r"])],
    );
    Game::new(scenario).expect("duel scenario is valid")
}

pub(super) fn unit_by_key<'a>(game: &'a Game, key: &str) -> Option<&'a Unit> {
    game.state.units.values().find(|unit| unit.stats.key == key)
}
