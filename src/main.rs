#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    cli::{self, Input},
    init_logging, FileStore, GameApi, GameState, Mode, Phase, Session, SessionConfig,
    SessionHandle, Side,
};
#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(
            long,
            default_value = "normal",
            help = "normal (two-sided) or easy (target practice)"
        )]
        mode: Mode,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(
            long,
            default_value = "broadside-save.json",
            help = "Snapshot file; *.bin uses bincode"
        )]
        save: PathBuf,
        #[arg(long, default_value_t = broadside::AI_THINK_DELAY_MS)]
        ai_delay_ms: u64,
    },
    /// Play headless games of a random shooter against the AI and print a JSON summary.
    Simulate {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            mode,
            seed,
            save,
            ai_delay_ms,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let config = SessionConfig {
                mode,
                seed,
                ai_delay: Duration::from_millis(ai_delay_ms),
                ..SessionConfig::default()
            };
            let (handle, task) = Session::spawn(config, FileStore::new(save));
            let result = play(&handle).await;
            // The session may already be gone if it failed; the task result says why.
            let _ = handle.shutdown().await;
            task.await?;
            result?;
        }
        Commands::Simulate { seed, games } => {
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                SmallRng::from_rng(&mut rand::rng())
            };
            let mut results = Vec::with_capacity(games);
            for _ in 0..games {
                results.push(cli::run_headless_game(Mode::Standard, &mut rng)?);
            }
            let ai_wins = results.iter().filter(|r| r.winner == Side::Ai).count();
            let summary = serde_json::json!({
                "games": games,
                "playerWins": games - ai_wins,
                "aiWins": ai_wins,
                "results": results,
            });
            println!("{}", serde_json::to_string(&summary)?);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn play(handle: &SessionHandle) -> anyhow::Result<()> {
    println!("{}", cli::HELP);
    println!("\n{}", cli::render_state(&handle.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match cli::parse_input(&line) {
            Ok(input) => input,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };
        match input {
            Input::Quit => break,
            Input::Help => {
                println!("{}", cli::HELP);
                continue;
            }
            Input::Status => {}
            Input::Place {
                ship,
                row,
                col,
                orientation,
            } => {
                if !handle.request_placement(ship, row, col, orientation).await? {
                    println!("Cannot place {} at {}", ship, cli::coord_to_string(row, col));
                }
            }
            Input::Remove(ship) => {
                if !handle.request_remove(ship).await? {
                    println!("{} is not on the board", ship);
                }
            }
            Input::Clear => {
                handle.request_clear_placements().await?;
            }
            Input::Auto => {
                if !handle.request_auto_place().await? {
                    println!("Auto placement failed. Please try again.");
                }
            }
            Input::Done => {
                if !handle.request_complete_setup().await? {
                    println!("Please place all ships before starting the game.");
                }
            }
            Input::Fire(row, col) => fire(handle, row, col).await?,
            Input::New(mode) => {
                let mode = mode.unwrap_or_else(|| handle.snapshot().mode());
                handle.new_game(mode).await?;
            }
        }
        println!("\n{}", cli::render_state(&handle.snapshot()));
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn fire(handle: &SessionHandle, row: usize, col: usize) -> anyhow::Result<()> {
    let before = handle.snapshot();
    let outcome = match handle.request_shot(Side::Ai, row, col).await? {
        Ok(outcome) => outcome,
        Err(rejected) => {
            println!("{}", rejected);
            return Ok(());
        }
    };
    let target = cli::coord_to_string(row, col);
    match (outcome.hit, outcome.sunk, outcome.ship) {
        (true, true, Some(ship)) => println!("{}: hit - you sank the {}!", target, ship),
        (true, _, _) => println!("{}: hit!", target),
        (false, _, _) => println!("{}: miss.", target),
    }
    if handle.snapshot().phase() == Phase::AiTurn {
        let mut updates = handle.updates();
        updates.wait_for(|s| s.phase() != Phase::AiTurn).await?;
        report_ai_shot(&before, &handle.snapshot());
    }
    Ok(())
}

#[cfg(feature = "std")]
fn report_ai_shot(before: &GameState, after: &GameState) {
    if let Some((r, c)) = cli::newly_tried(before.player_board(), after.player_board()) {
        let hit = after
            .player_board()
            .cell(r, c)
            .is_some_and(|cell| cell.is_hit);
        println!(
            "AI fires at {}: {}",
            cli::coord_to_string(r, c),
            if hit { "hit!" } else { "miss." }
        );
    }
}
