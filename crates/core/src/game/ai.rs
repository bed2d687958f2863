//! Greedy single-ply planner for AI-controlled players.
//! Enemies are handled in slot order; for each, the uncommitted AI unit with
//! the shortest approach to any of its segments moves and fires. Units that
//! cannot reach a firing position this turn stay put.

use std::collections::BTreeSet;

use super::*;
use crate::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Engagement {
    attacker: UnitId,
    path: Vec<Pos>,
    target: Pos,
}

impl Game {
    /// Plays the whole turn for `player`, which must be the active AI player.
    pub fn ai_turn(&mut self, player: &str) {
        if let Err(reason) = self.check_ai_turn(player) {
            return reject(Action::AiTurn { player: player.to_string() }, reason);
        }

        let own: Vec<UnitId> =
            self.state.active_player().map(|active| active.units.clone()).unwrap_or_default();
        let enemies: Vec<UnitId> =
            self.state.units.keys().filter(|id| !own.contains(id)).collect();
        let mut committed = BTreeSet::new();

        for enemy in enemies {
            if self.state.phase == Phase::GameOver {
                return;
            }
            let Some(engagement) = plan_engagement(&self.state, &own, &committed, enemy) else {
                continue;
            };
            committed.insert(engagement.attacker);
            self.execute(&engagement);
        }

        self.end_turn();
    }

    pub(super) fn check_ai_turn(&self, player: &str) -> Result<(), Rejection> {
        self.check_not_over()?;
        let active = self.state.active_player().ok_or(Rejection::NotActivePlayer)?;
        if active.name != player {
            return Err(Rejection::NotActivePlayer);
        }
        if active.kind != PlayerKind::Ai {
            return Err(Rejection::NotAiPlayer);
        }
        Ok(())
    }

    fn execute(&mut self, engagement: &Engagement) {
        let head = self.state.units[engagement.attacker].head();
        self.select(head);
        self.set_phase(Phase::Move);
        for step in &engagement.path {
            self.move_unit(*step);
        }
        self.set_phase(Phase::Attack);
        self.attack(engagement.target);
    }
}

/// Shortest approach among uncommitted units against any segment of `enemy`.
/// Earlier units and segments win ties.
fn plan_engagement(
    state: &GameState,
    own: &[UnitId],
    committed: &BTreeSet<UnitId>,
    enemy: UnitId,
) -> Option<Engagement> {
    let enemy_body = &state.units.get(enemy)?.positions;
    let occupied = occupied_cells(&state.units);
    let mut best: Option<Engagement> = None;

    for id in own {
        if committed.contains(id) {
            continue;
        }
        let Some(unit) = state.units.get(*id) else {
            continue;
        };
        if unit.attack_used {
            continue;
        }

        for segment in enemy_body {
            let target = SearchTarget { pos: *segment, tolerance: unit.stats.range };
            let outcome = unit_movement(&state.grid, &occupied, unit, Some(target));
            if !outcome.reached {
                continue;
            }
            if best.as_ref().is_none_or(|current| outcome.path.len() < current.path.len()) {
                best = Some(Engagement { attacker: *id, path: outcome.path, target: *segment });
            }
        }
    }

    best
}
