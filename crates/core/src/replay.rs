use crate::{
    Phase, Rejection,
    game::Game,
    journal::ActionJournal,
    scenario::ScenarioError,
};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("journal scenario is invalid: {0}")]
    InvalidScenario(#[from] ScenarioError),
    #[error("action #{seq} was rejected: {reason:?}")]
    RejectedAction { seq: u64, reason: Rejection },
}

/// `Strict` fails on the first rejected action; `Lenient` absorbs rejections
/// the same way a live game does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayMode {
    #[default]
    Lenient,
    Strict,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_turn: u64,
    pub final_phase: Phase,
    pub winner: Option<String>,
    pub final_snapshot_hash: u64,
    pub applied: usize,
    pub rejected: usize,
}

pub fn replay_to_end(
    journal: &ActionJournal,
    mode: ReplayMode,
) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::new(journal.scenario.clone())?;
    let mut applied = 0;
    let mut rejected = 0;

    for record in &journal.actions {
        match game.check(&record.action) {
            Ok(()) => {
                game.apply(&record.action);
                applied += 1;
            }
            Err(reason) if mode == ReplayMode::Strict => {
                return Err(ReplayError::RejectedAction { seq: record.seq, reason });
            }
            Err(_) => rejected += 1,
        }
    }

    Ok(ReplayResult {
        final_turn: game.turn(),
        final_phase: game.phase(),
        winner: game.winner().map(str::to_string),
        final_snapshot_hash: game.snapshot_hash(),
        applied,
        rejected,
    })
}
