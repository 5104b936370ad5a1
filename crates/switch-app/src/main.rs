#![deny(warnings)]

mod repl;
mod stats;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use switch_core::game::engine::GameEngine;
use switch_core::game::state::{GameConfig, GameState};
use switch_core::model::player::Player;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "switch")]
#[command(about = "Play Switch against automated opponents in the terminal")]
struct Args {
    /// Your player name
    #[arg(long, default_value = "You")]
    name: String,

    /// Number of automated opponents
    #[arg(long, default_value = "3")]
    bots: usize,

    /// Deal seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Cards dealt to each player
    #[arg(long, default_value = "5")]
    hand_size: usize,

    /// Reshuffle buried discards into the pile when it runs out
    #[arg(long)]
    recycle: bool,

    /// Win/loss statistics file (JSON), updated when a game ends
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut players = vec![Player::human(args.name.clone())];
    for i in 1..=args.bots {
        players.push(Player::automated(format!("Bot {i}")));
    }
    let config = GameConfig {
        starting_hand_size: args.hand_size,
        recycle_discards: args.recycle,
    };
    let game = match args.seed {
        Some(seed) => GameState::with_seed(players, config, seed)?,
        None => GameState::new(players, config)?,
    };
    tracing::info!(seed = game.seed(), players = game.players().len(), "dealt a new game");

    let mut engine = GameEngine::new(game);
    repl::run(&mut engine, &args.name)?;

    if let Some(path) = &args.stats {
        if engine.game().has_winner() {
            let mut store = stats::StatsStore::load(path)?;
            store.absorb(engine.game());
            store.save(path)?;
            if let Some(record) = store.record(&args.name) {
                println!(
                    "{}: {} wins, {} losses all time",
                    args.name, record.wins, record.losses
                );
            }
        }
    }
    Ok(())
}
