//! The combat state machine. `Game` owns the only mutable `GameState`; every
//! inbound action either commits atomically or is absorbed as a no-op.

use crate::scenario::{Scenario, ScenarioError};
use crate::state::{GameState, Player, Unit};
use crate::types::*;

mod actions;
mod ai;
mod combat;
mod hash;
mod occupancy;
mod pathfinding;
mod turn;
mod view;

#[cfg(test)]
mod test_support;

pub use occupancy::{occupied_cells, overlaps, overlaps_anything, unit_at};
pub use pathfinding::{SearchOutcome, SearchTarget, search, shortest_path, unit_movement};
pub use view::CellView;

pub struct Game {
    scenario: Scenario,
    initial: GameState,
    state: GameState,
    log: Vec<LogEvent>,
}

impl Game {
    pub fn new(scenario: Scenario) -> Result<Self, ScenarioError> {
        let initial = scenario.build()?;
        Ok(Self { scenario, state: initial.clone(), initial, log: Vec::new() })
    }

    /// Dispatches one inbound action. Invalid actions leave the state untouched.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Select(pos) => self.select(*pos),
            Action::Move(pos) => self.move_unit(*pos),
            Action::SetPhase(phase) => self.set_phase(*phase),
            Action::Attack(pos) => self.attack(*pos),
            Action::EndTurn => self.end_turn(),
            Action::Reset => self.reset(),
            Action::AiTurn { player } => self.ai_turn(player),
        }
    }

    /// Reports whether `action` would commit, without changing anything.
    pub fn check(&self, action: &Action) -> Result<(), Rejection> {
        match action {
            Action::Select(pos) => self.check_select(*pos).map(drop),
            Action::Move(pos) => self.check_move(*pos).map(drop),
            Action::SetPhase(phase) => self.check_set_phase(*phase),
            Action::Attack(pos) => self.check_attack(*pos).map(drop),
            Action::EndTurn => self.check_end_turn(),
            Action::Reset => Ok(()),
            Action::AiTurn { player } => self.check_ai_turn(player),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn turn(&self) -> u64 {
        self.state.turn
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn winner(&self) -> Option<&str> {
        self.state.winner.as_deref()
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.state.active_player()
    }

    pub fn selected_unit(&self) -> Option<&Unit> {
        self.state.selected_unit()
    }

    fn set_phase_logged(&mut self, phase: Phase) {
        if self.state.phase != phase {
            self.state.phase = phase;
            self.log.push(LogEvent::PhaseChanged { phase });
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Scenario::default()).expect("built-in scenario is valid")
    }
}

fn reject(action: Action, reason: Rejection) {
    tracing::debug!(?action, ?reason, "action rejected");
}
