//! Select, move and phase-switch actions. Each action runs a read-only check
//! that either yields what the commit needs or a `Rejection`.

use super::*;

impl Game {
    pub fn select(&mut self, pos: Pos) {
        match self.check_select(pos) {
            Ok(unit) => {
                self.state.selected = Some(unit);
                self.log.push(LogEvent::UnitSelected { unit });
                let selected = &self.state.units[unit];
                let phase = if selected.moves_used < selected.stats.movement {
                    Phase::Move
                } else {
                    Phase::Attack
                };
                self.set_phase_logged(phase);
            }
            Err(reason) => reject(Action::Select(pos), reason),
        }
    }

    pub fn move_unit(&mut self, to: Pos) {
        let unit_id = match self.check_move(to) {
            Ok(unit_id) => unit_id,
            Err(reason) => return reject(Action::Move(to), reason),
        };

        let unit = &mut self.state.units[unit_id];
        let from = unit.head();
        unit.positions.push(to);
        unit.moves_used += 1;
        let dropped_tail = if unit.positions.len() > unit.stats.max_length as usize {
            Some(unit.positions.remove(0))
        } else {
            None
        };
        let out_of_moves = unit.moves_used >= unit.stats.movement;

        self.log.push(LogEvent::UnitMoved { unit: unit_id, from, to, dropped_tail });
        if out_of_moves {
            self.set_phase_logged(Phase::Attack);
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        match self.check_set_phase(phase) {
            Ok(()) => self.set_phase_logged(phase),
            Err(reason) => reject(Action::SetPhase(phase), reason),
        }
    }

    pub(super) fn check_select(&self, pos: Pos) -> Result<UnitId, Rejection> {
        self.check_not_over()?;
        let unit = unit_at(&self.state.units, pos).ok_or(Rejection::NotActivePlayerUnit)?;
        if !self.state.is_active_players_unit(unit.id) {
            return Err(Rejection::NotActivePlayerUnit);
        }
        Ok(unit.id)
    }

    pub(super) fn check_move(&self, to: Pos) -> Result<UnitId, Rejection> {
        let unit = self.acting_unit(Phase::Move)?;
        if unit.moves_used >= unit.stats.movement {
            return Err(Rejection::NoMovesLeft);
        }
        if unit.head().manhattan(to) != 1 {
            return Err(Rejection::NotAdjacent);
        }
        if overlaps_anything(&self.state.units, to) {
            return Err(Rejection::Occupied);
        }
        if !self.state.grid.in_grid(to) {
            return Err(Rejection::OffGrid);
        }
        Ok(unit.id)
    }

    pub(super) fn check_set_phase(&self, phase: Phase) -> Result<(), Rejection> {
        self.check_not_over()?;
        if phase == Phase::GameOver {
            return Err(Rejection::InvalidPhase);
        }
        let unit = self.state.selected_unit().ok_or(Rejection::NoUnitSelected)?;
        if !self.state.is_active_players_unit(unit.id) {
            return Err(Rejection::NotActivePlayerUnit);
        }
        Ok(())
    }

    pub(super) fn check_not_over(&self) -> Result<(), Rejection> {
        if self.state.phase == Phase::GameOver {
            return Err(Rejection::GameOver);
        }
        Ok(())
    }

    /// The selected unit, provided the game is in `phase` and the unit belongs to
    /// the active player.
    pub(super) fn acting_unit(&self, phase: Phase) -> Result<&Unit, Rejection> {
        self.check_not_over()?;
        if self.state.phase != phase {
            return Err(Rejection::WrongPhase);
        }
        let unit = self.state.selected_unit().ok_or(Rejection::NoUnitSelected)?;
        if !self.state.is_active_players_unit(unit.id) {
            return Err(Rejection::NotActivePlayerUnit);
        }
        Ok(unit)
    }
}
