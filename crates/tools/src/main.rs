use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{ActionJournal, ReplayMode, ReplayResult, replay::replay_to_end};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Fail on the first rejected action instead of skipping it
    #[arg(long)]
    strict: bool,
    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let journal = ActionJournal::load(&args.journal)
        .with_context(|| format!("Failed to load journal file: {}", args.journal.display()))?;
    tracing::info!(actions = journal.actions.len(), strict = args.strict, "replaying journal");

    let mode = if args.strict { ReplayMode::Strict } else { ReplayMode::Lenient };
    let result: ReplayResult =
        replay_to_end(&journal, mode).context("Replay failed during execution")?;

    if args.json {
        let summary = serde_json::json!({
            "final_turn": result.final_turn,
            "final_phase": format!("{:?}", result.final_phase),
            "winner": result.winner,
            "snapshot_hash": format!("{:#018x}", result.final_snapshot_hash),
            "applied": result.applied,
            "rejected": result.rejected,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Replay complete.");
    println!("Final Turn: {}", result.final_turn);
    println!("Phase: {:?}", result.final_phase);
    println!("Winner: {}", result.winner.as_deref().unwrap_or("-"));
    println!("Actions: {} applied, {} rejected", result.applied, result.rejected);
    println!("Snapshot Hash: {:#018x}", result.final_snapshot_hash);

    Ok(())
}
