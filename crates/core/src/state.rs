use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::grid::Grid;
use crate::types::*;

/// Combat stats fixed for a unit's lifetime. `key` is the unit's stable identity
/// in scenario files and hashes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub key: String,
    pub name: String,
    pub max_length: u32,
    pub range: u32,
    pub movement: u32,
    pub attack: u32,
    pub color: String,
    pub head_color: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub stats: UnitStats,
    /// Body from tail (index 0) to head (last).
    pub positions: Vec<Pos>,
    pub moves_used: u32,
    pub attack_used: bool,
}

impl Unit {
    pub fn head(&self) -> Pos {
        *self.positions.last().expect("live unit has at least one segment")
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.positions.contains(&pos)
    }

    pub fn moves_left(&self) -> u32 {
        self.stats.movement.saturating_sub(self.moves_used)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub units: Vec<UnitId>,
    pub kind: PlayerKind,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub turn: u64,
    pub units: SlotMap<UnitId, Unit>,
    pub selected: Option<UnitId>,
    pub grid: Grid,
    pub players: Vec<Player>,
    pub phase: Phase,
    pub winner: Option<String>,
}

impl GameState {
    /// `players[turn mod players.len()]`; `None` only if every player was removed.
    pub fn active_player(&self) -> Option<&Player> {
        if self.players.is_empty() {
            return None;
        }
        let index = (self.turn % self.players.len() as u64) as usize;
        self.players.get(index)
    }

    pub fn owner_of(&self, unit: UnitId) -> Option<&Player> {
        self.players.iter().find(|player| player.units.contains(&unit))
    }

    pub fn is_active_players_unit(&self, unit: UnitId) -> bool {
        self.active_player().is_some_and(|player| player.units.contains(&unit))
    }

    pub fn selected_unit(&self) -> Option<&Unit> {
        self.selected.and_then(|id| self.units.get(id))
    }
}
