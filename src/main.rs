use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use arrow_chain::{ArrowGame, CommandRunner, EngineConfig, RandomPlayer, Scheduler};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "arrow-chain", version, about = "Arrow chain reaction puzzle engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a command stream (PLACE, TICK, UNDO, RESET, STATE, ...).
    Run {
        /// Script file; reads stdin when omitted.
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Play random legal moves and print the final board.
    Demo {
        /// JSON engine configuration (tick periods, seed).
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 10)]
        moves: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arrow_chain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { script } => {
            let mut runner = CommandRunner::new();
            let mut stdout = io::stdout().lock();
            let summary = match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("opening script {}", path.display()))?;
                    runner.run(BufReader::new(file), &mut stdout)?
                }
                None => runner.run(io::stdin().lock(), &mut stdout)?,
            };
            tracing::info!(commands = summary.commands, errors = summary.errors, "script finished");
        }
        Commands::Demo { config, moves, seed } => {
            let config = load_config(config.as_ref())?;
            let config = match seed {
                Some(seed) => config.with_seed(seed),
                None => config,
            };
            demo(&config, moves)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Random play on virtual time: each chain advances one step per chain period.
fn demo(config: &EngineConfig, moves: usize) -> anyhow::Result<()> {
    let mut game = ArrowGame::new();
    let mut scheduler = Scheduler::new(config);
    let mut player = RandomPlayer::from_config(config);

    tracing::info!(seed = config.seed, moves, "starting demo");

    for turn in 1..=moves {
        let Some(mv) = player.choose_move(game.grid()) else {
            println!("no legal moves left");
            break;
        };
        game.place(mv)?;

        let mut ticks = 0;
        while game.engine().is_in_progress() {
            ticks += scheduler.advance(&mut game, config.chain_tick_ms).chain_ticks;
        }
        println!("#{turn} {mv}: chain of {ticks} ticks at t={}ms", scheduler.now_ms());
    }

    let frame = game.on_render_tick();
    print!("{}", game.grid());
    println!("{}", frame.counts);
    Ok(())
}
