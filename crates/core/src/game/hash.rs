//! Stable snapshot hashing for deterministic verification.
//! Units are identified by scenario key so hashes compare across games.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        let state = &self.state;
        hasher.write_u64(state.turn);
        hasher.write_u8(phase_tag(state.phase));
        write_str(&mut hasher, state.selected_unit().map_or("", |unit| unit.stats.key.as_str()));
        write_str(&mut hasher, state.winner.as_deref().unwrap_or(""));

        hasher.write_usize(state.players.len());
        for player in &state.players {
            write_str(&mut hasher, &player.name);
            hasher.write_u8(match player.kind {
                PlayerKind::Human => 0,
                PlayerKind::Ai => 1,
            });
            for unit in player.units.iter().filter_map(|id| state.units.get(*id)) {
                write_str(&mut hasher, &unit.stats.key);
            }
        }

        hasher.write_usize(state.units.len());
        for unit in state.units.values() {
            write_str(&mut hasher, &unit.stats.key);
            hasher.write_u32(unit.moves_used);
            hasher.write_u8(u8::from(unit.attack_used));
            hasher.write_usize(unit.positions.len());
            for pos in &unit.positions {
                hasher.write_i32(pos.x);
                hasher.write_i32(pos.y);
            }
        }
        hasher.finish()
    }
}

fn phase_tag(phase: Phase) -> u8 {
    match phase {
        Phase::Move => 0,
        Phase::Attack => 1,
        Phase::GameOver => 2,
    }
}

fn write_str(hasher: &mut Xxh3, text: &str) {
    hasher.write_usize(text.len());
    hasher.write(text.as_bytes());
}
