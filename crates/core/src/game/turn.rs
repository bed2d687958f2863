//! Turn rotation and reset.

use super::*;

impl Game {
    /// Clears per-turn counters, rotates the active player and selects its first unit.
    /// Eliminations rebase `turn` onto the acting player's new seat, so rotation
    /// never skips a surviving player.
    pub fn end_turn(&mut self) {
        if let Err(reason) = self.check_end_turn() {
            return reject(Action::EndTurn, reason);
        }

        for unit in self.state.units.values_mut() {
            unit.moves_used = 0;
            unit.attack_used = false;
        }
        self.state.turn += 1;
        self.log.push(LogEvent::TurnEnded { turn: self.state.turn });
        self.set_phase_logged(Phase::Move);

        let first_unit =
            self.state.active_player().and_then(|player| player.units.first().copied());
        self.state.selected = first_unit;
        if let Some(unit) = first_unit {
            self.log.push(LogEvent::UnitSelected { unit });
        }
    }

    /// Restores the starting state of this game's scenario from any phase.
    pub fn reset(&mut self) {
        self.state = self.initial.clone();
        self.log.push(LogEvent::GameReset);
    }

    pub(super) fn check_end_turn(&self) -> Result<(), Rejection> {
        self.check_not_over()
    }
}
