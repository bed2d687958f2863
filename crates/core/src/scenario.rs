//! Static starting configuration: grid layout, unit roster and players.
//! This module owns placement validation so a built `GameState` always has
//! disjoint, in-grid bodies and a consistent ownership table.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::grid::Grid;
use crate::state::{GameState, Player, Unit, UnitStats};
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub holes: Vec<Pos>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub stats: UnitStats,
    /// Initial body, tail first.
    pub body: Vec<Pos>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub kind: PlayerKind,
    /// Unit keys, in selection order.
    pub units: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub grid: GridSpec,
    pub units: Vec<UnitSpec>,
    pub players: Vec<PlayerSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("scenario has no players")]
    NoPlayers,
    #[error("unit key '{0}' is used more than once")]
    DuplicateUnit(String),
    #[error("unit '{0}' has an empty body")]
    EmptyBody(String),
    #[error("unit '{unit}' has {len} segments but a max length of {max_length}")]
    BodyTooLong { unit: String, len: usize, max_length: u32 },
    #[error("unit '{unit}' covers {pos} more than once")]
    SelfOverlap { unit: String, pos: Pos },
    #[error("unit '{unit}' has a segment off the grid at {pos}")]
    OffGrid { unit: String, pos: Pos },
    #[error("units '{unit}' and '{other}' both cover {pos}")]
    Overlap { unit: String, other: String, pos: Pos },
    #[error("player '{player}' lists unknown unit '{unit}'")]
    UnknownUnit { player: String, unit: String },
    #[error("unit '{0}' is not owned by any player")]
    Unowned(String),
    #[error("unit '{0}' is owned by more than one player")]
    MultipleOwners(String),
    #[error("player '{0}' has no units")]
    PlayerWithoutUnits(String),
}

impl Scenario {
    pub fn grid(&self) -> Grid {
        let mut grid = Grid::rect(self.grid.width, self.grid.height);
        for hole in &self.grid.holes {
            grid.carve(*hole);
        }
        grid
    }

    /// Validates placement and ownership, then builds the turn-0 state.
    pub fn build(&self) -> Result<GameState, ScenarioError> {
        if self.players.is_empty() {
            return Err(ScenarioError::NoPlayers);
        }

        let grid = self.grid();
        let mut units = SlotMap::with_key();
        let mut ids_by_key: BTreeMap<&str, UnitId> = BTreeMap::new();
        let mut covered: BTreeMap<Pos, &str> = BTreeMap::new();

        for spec in &self.units {
            let key = spec.stats.key.as_str();
            if ids_by_key.contains_key(key) {
                return Err(ScenarioError::DuplicateUnit(key.to_string()));
            }
            validate_body(spec, &grid)?;
            for pos in &spec.body {
                if let Some(other) = covered.insert(*pos, key) {
                    return Err(ScenarioError::Overlap {
                        unit: key.to_string(),
                        other: other.to_string(),
                        pos: *pos,
                    });
                }
            }

            let id = units.insert(Unit {
                id: UnitId::default(),
                stats: spec.stats.clone(),
                positions: spec.body.clone(),
                moves_used: 0,
                attack_used: false,
            });
            units[id].id = id;
            ids_by_key.insert(key, id);
        }

        let mut owned: BTreeSet<&str> = BTreeSet::new();
        let mut players = Vec::with_capacity(self.players.len());
        for spec in &self.players {
            if spec.units.is_empty() {
                return Err(ScenarioError::PlayerWithoutUnits(spec.name.clone()));
            }
            let mut roster = Vec::with_capacity(spec.units.len());
            for key in &spec.units {
                let Some(id) = ids_by_key.get(key.as_str()) else {
                    return Err(ScenarioError::UnknownUnit {
                        player: spec.name.clone(),
                        unit: key.clone(),
                    });
                };
                if !owned.insert(key.as_str()) {
                    return Err(ScenarioError::MultipleOwners(key.clone()));
                }
                roster.push(*id);
            }
            players.push(Player { name: spec.name.clone(), units: roster, kind: spec.kind });
        }

        if let Some(unowned) = ids_by_key.keys().find(|key| !owned.contains(*key)) {
            return Err(ScenarioError::Unowned(unowned.to_string()));
        }

        Ok(GameState {
            turn: 0,
            units,
            selected: None,
            grid,
            players,
            phase: Phase::Move,
            winner: None,
        })
    }
}

fn validate_body(spec: &UnitSpec, grid: &Grid) -> Result<(), ScenarioError> {
    let key = &spec.stats.key;
    if spec.body.is_empty() {
        return Err(ScenarioError::EmptyBody(key.clone()));
    }
    if spec.body.len() > spec.stats.max_length as usize {
        return Err(ScenarioError::BodyTooLong {
            unit: key.clone(),
            len: spec.body.len(),
            max_length: spec.stats.max_length,
        });
    }
    let mut seen = BTreeSet::new();
    for pos in &spec.body {
        if !seen.insert(*pos) {
            return Err(ScenarioError::SelfOverlap { unit: key.clone(), pos: *pos });
        }
        if !grid.in_grid(*pos) {
            return Err(ScenarioError::OffGrid { unit: key.clone(), pos: *pos });
        }
    }
    Ok(())
}

fn stats(
    key: &str,
    name: &str,
    [max_length, range, movement, attack]: [u32; 4],
    color: &str,
    head_color: &str,
) -> UnitStats {
    UnitStats {
        key: key.to_string(),
        name: name.to_string(),
        max_length,
        range,
        movement,
        attack,
        color: color.to_string(),
        head_color: head_color.to_string(),
    }
}

impl Default for Scenario {
    /// The built-in skirmish: a 10x10 board with two holes, two human units and one AI unit.
    fn default() -> Self {
        Self {
            grid: GridSpec {
                width: 10,
                height: 10,
                holes: vec![Pos::new(6, 6), Pos::new(6, 5)],
            },
            units: vec![
                UnitSpec {
                    stats: stats("a", "Red", [5, 1, 2, 3], "red", "brown"),
                    body: vec![Pos::new(0, 0)],
                },
                UnitSpec {
                    stats: stats("b", "Yellow", [2, 3, 1, 1], "yellow", "rgb(228, 208, 34)"),
                    body: vec![Pos::new(4, 4)],
                },
                UnitSpec {
                    stats: stats("p", "Purple", [1, 1, 5, 2], "purple", "pink"),
                    body: vec![Pos::new(9, 9)],
                },
            ],
            players: vec![
                PlayerSpec {
                    name: "Player".to_string(),
                    kind: PlayerKind::Human,
                    units: vec!["a".to_string(), "b".to_string()],
                },
                PlayerSpec {
                    name: "Computer".to_string(),
                    kind: PlayerKind::Ai,
                    units: vec!["p".to_string()],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_unit_scenario(first: Vec<Pos>, second: Vec<Pos>) -> Scenario {
        let mut scenario = Scenario::default();
        scenario.units.truncate(2);
        scenario.units[0].body = first;
        scenario.units[1].body = second;
        scenario.players[0].units = vec!["a".to_string()];
        scenario.players[1].units = vec!["b".to_string()];
        scenario
    }

    #[test]
    fn default_scenario_builds() {
        let state = Scenario::default().build().expect("built-in scenario is valid");
        assert_eq!(state.turn, 0);
        assert_eq!(state.phase, Phase::Move);
        assert_eq!(state.units.len(), 3);
        assert_eq!(state.players.len(), 2);
        assert!(state.selected.is_none());
        assert!(!state.grid.in_grid(Pos::new(6, 6)));
        assert_eq!(state.grid.dimensions(), (10, 10));
    }

    #[test]
    fn unit_order_follows_scenario_order() {
        let state = Scenario::default().build().expect("valid");
        let keys: Vec<&str> = state.units.values().map(|unit| unit.stats.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "p"]);
    }

    #[test]
    fn overlapping_bodies_are_rejected() {
        let scenario =
            two_unit_scenario(vec![Pos::new(1, 1)], vec![Pos::new(1, 2), Pos::new(1, 1)]);
        assert_eq!(
            scenario.build().err(),
            Some(ScenarioError::Overlap {
                unit: "b".to_string(),
                other: "a".to_string(),
                pos: Pos::new(1, 1)
            })
        );
    }

    #[test]
    fn off_grid_and_hole_segments_are_rejected() {
        let scenario = two_unit_scenario(vec![Pos::new(10, 0)], vec![Pos::new(4, 4)]);
        assert!(matches!(scenario.build(), Err(ScenarioError::OffGrid { .. })));

        let scenario = two_unit_scenario(vec![Pos::new(6, 6)], vec![Pos::new(4, 4)]);
        assert!(matches!(scenario.build(), Err(ScenarioError::OffGrid { .. })));
    }

    #[test]
    fn body_longer_than_max_length_is_rejected() {
        let long_body = vec![Pos::new(4, 4), Pos::new(4, 5), Pos::new(4, 6)];
        let scenario = two_unit_scenario(vec![Pos::new(0, 0)], long_body);
        assert!(matches!(scenario.build(), Err(ScenarioError::BodyTooLong { len: 3, .. })));
    }

    #[test]
    fn body_revisiting_a_cell_is_rejected() {
        let looped_body = vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 0)];
        let scenario = two_unit_scenario(looped_body, vec![Pos::new(4, 4)]);
        assert!(matches!(scenario.build(), Err(ScenarioError::SelfOverlap { .. })));
    }

    #[test]
    fn ownership_must_be_total_and_unique() {
        let mut scenario = Scenario::default();
        scenario.players[1].units.push("a".to_string());
        assert_eq!(scenario.build().err(), Some(ScenarioError::MultipleOwners("a".to_string())));

        let mut scenario = Scenario::default();
        scenario.players[0].units = vec!["a".to_string()];
        assert_eq!(scenario.build().err(), Some(ScenarioError::Unowned("b".to_string())));

        let mut scenario = Scenario::default();
        scenario.players[1].units = vec!["zz".to_string()];
        assert!(matches!(scenario.build(), Err(ScenarioError::UnknownUnit { .. })));
    }

    #[test]
    fn scenario_survives_json() {
        let scenario = Scenario::default();
        let json = serde_json::to_string(&scenario).expect("serialize");
        let decoded: Scenario = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, scenario);
    }
}
