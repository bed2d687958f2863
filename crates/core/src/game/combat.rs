//! Attack resolution: tail truncation, unit destruction and player elimination.

use super::*;

impl Game {
    pub fn attack(&mut self, target: Pos) {
        match self.check_attack(target) {
            Ok((attacker, victim)) => self.resolve_attack(attacker, victim),
            Err(reason) => reject(Action::Attack(target), reason),
        }
    }

    pub(super) fn check_attack(&self, target: Pos) -> Result<(UnitId, UnitId), Rejection> {
        let attacker = self.acting_unit(Phase::Attack)?;
        let victim = unit_at(&self.state.units, target).ok_or(Rejection::NoEnemyAtTarget)?;
        if victim.id == attacker.id {
            return Err(Rejection::SelfTarget);
        }
        if self.state.is_active_players_unit(victim.id) {
            return Err(Rejection::NoEnemyAtTarget);
        }
        if attacker.attack_used {
            return Err(Rejection::AttackAlreadyUsed);
        }
        if attacker.head().manhattan(target) > attacker.stats.range {
            return Err(Rejection::OutOfRange);
        }
        Ok((attacker.id, victim.id))
    }

    fn resolve_attack(&mut self, attacker: UnitId, victim: UnitId) {
        let damage = {
            let unit = &mut self.state.units[attacker];
            unit.attack_used = true;
            unit.stats.attack
        };
        self.log.push(LogEvent::UnitAttacked { attacker, target: victim, damage });

        let body = &mut self.state.units[victim].positions;
        if damage as usize >= body.len() {
            self.destroy_unit(victim);
        } else {
            body.drain(..damage as usize);
        }
    }

    fn destroy_unit(&mut self, victim: UnitId) {
        if let Some(unit) = self.state.units.remove(victim) {
            tracing::info!(unit = %unit.stats.name, "unit destroyed");
        }
        for player in &mut self.state.players {
            player.units.retain(|id| *id != victim);
        }
        self.log.push(LogEvent::UnitDestroyed { unit: victim });
        self.eliminate_defeated_players();
    }

    /// Drops players with no surviving units; a single survivor wins.
    /// `turn` is rebased so the acting player keeps the turn.
    fn eliminate_defeated_players(&mut self) {
        let active = (self.state.turn % self.state.players.len().max(1) as u64) as usize;
        let removed_before_active = self.state.players[..active.min(self.state.players.len())]
            .iter()
            .filter(|player| player.units.is_empty())
            .count();

        let (survivors, defeated): (Vec<_>, Vec<_>) =
            self.state.players.drain(..).partition(|player| !player.units.is_empty());
        self.state.players = survivors;
        if !defeated.is_empty() && !self.state.players.is_empty() {
            self.state.turn = rebase_turn(
                self.state.turn,
                active - removed_before_active,
                self.state.players.len(),
            );
        }

        for player in defeated {
            tracing::info!(player = %player.name, "player eliminated");
            self.log.push(LogEvent::PlayerEliminated { player: player.name });
        }

        if let [winner] = self.state.players.as_slice() {
            let winner = winner.name.clone();
            tracing::info!(winner = %winner, "game over");
            self.state.winner = Some(winner.clone());
            self.set_phase_logged(Phase::GameOver);
            self.log.push(LogEvent::GameOver { winner });
        }
    }
}

/// Largest turn not after `turn` whose seat in a `len`-player rotation is `index`.
pub(super) fn rebase_turn(turn: u64, index: usize, len: usize) -> u64 {
    let len = len as u64;
    let index = (index as u64).min(len - 1);
    let candidate = turn - turn % len + index;
    if candidate > turn && candidate >= len { candidate - len } else { candidate }
}
