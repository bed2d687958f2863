use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use game_core::{
    Action, ActionJournal, Direction, Game, Phase, PlayerKind, ReplayMode, Scenario,
    replay::replay_to_end,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    turns: u64,
    /// Scenario JSON to start from instead of the built-in skirmish
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Write the recorded action journal here
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn human_action(game: &Game, rng: &mut ChaCha8Rng) -> Action {
    let state = game.state();
    let head = game.selected_unit().map(|unit| unit.head());
    match rng.next_u64() % 10 {
        0..=1 => {
            let own: Vec<_> = game
                .active_player()
                .map(|player| player.units.iter().filter_map(|id| state.units.get(*id)).collect())
                .unwrap_or_default();
            match own.as_slice() {
                [] => Action::EndTurn,
                units => Action::Select(choose(rng, units).head()),
            }
        }
        2..=5 => match head {
            Some(head) => Action::Move(head.step(choose(rng, &Direction::SEARCH_ORDER))),
            None => Action::EndTurn,
        },
        6 => Action::SetPhase(choose(rng, &[Phase::Move, Phase::Attack])),
        7..=8 => {
            let cells: Vec<_> =
                state.units.values().flat_map(|unit| unit.positions.iter().copied()).collect();
            Action::Attack(choose(rng, &cells))
        }
        _ => Action::EndTurn,
    }
}

fn assert_invariants(game: &Game) {
    let state = game.state();
    let mut covered = BTreeSet::new();
    for unit in state.units.values() {
        let len = unit.positions.len();
        assert!(len >= 1 && len <= unit.stats.max_length as usize, "Invariant failed: body length");
        for pos in &unit.positions {
            assert!(state.grid.in_grid(*pos), "Invariant failed: segment off the grid at {pos}");
            assert!(covered.insert(*pos), "Invariant failed: overlapping segments at {pos}");
        }
    }
    assert!(
        state.players.iter().all(|player| !player.units.is_empty()),
        "Invariant failed: player without units still in rotation"
    );
    if game.phase() == Phase::GameOver {
        assert_eq!(state.players.len(), 1, "Invariant failed: game over with several players");
    }
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let scenario = match &args.scenario {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
            serde_json::from_str::<Scenario>(&text)
                .with_context(|| "Failed to deserialize scenario JSON")?
        }
        None => Scenario::default(),
    };

    println!("Starting Fuzz harness on seed {} for max {} turns...", args.seed, args.turns);
    let mut game = Game::new(scenario.clone()).context("Scenario is invalid")?;
    let mut journal = ActionJournal::new(scenario);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut rejected = 0usize;

    while game.turn() < args.turns && game.phase() != Phase::GameOver {
        let Some(active) = game.active_player() else {
            bail!("no active player on turn {}", game.turn());
        };
        let action = match active.kind {
            PlayerKind::Ai => Action::AiTurn { player: active.name.clone() },
            PlayerKind::Human => human_action(&game, &mut rng),
        };

        if game.check(&action).is_err() {
            rejected += 1;
        }
        journal.append(action.clone());
        game.apply(&action);
        assert_invariants(&game);
    }

    match game.winner() {
        Some(winner) => println!("Finished with winner {} on turn {}", winner, game.turn()),
        None => println!("Stopped on turn {} without a winner", game.turn()),
    }
    println!("{} actions recorded, {} rejected", journal.actions.len(), rejected);

    let replayed = replay_to_end(&journal, ReplayMode::Lenient).context("Replay failed")?;
    if replayed.final_snapshot_hash != game.snapshot_hash() {
        bail!("replay diverged from the live game");
    }

    if let Some(out) = &args.out {
        journal
            .write_atomic(out)
            .with_context(|| format!("Failed to write journal file: {}", out.display()))?;
        println!("Journal written to {}", out.display());
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
