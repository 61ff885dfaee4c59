//! headless: a snake race with no window.
//!
//! Builds a board, drops N snakes on it, runs the race for a fixed time with
//! one pause in the middle, and prints the standings.  Set `RUST_LOG=debug`
//! to watch spawns and roster changes, `trace` for every step.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake_board::{BoardBuilder, MoveResult, Snake};
use snake_core::{AgentId, BoardConfig, ClockConfig, Direction, RunnerConfig};
use snake_runner::{GameClock, Race, RaceStats};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a snake race without a UI", long_about = None)]
struct Args {
    /// Number of snakes.
    #[arg(short, long, default_value_t = 2)]
    snakes: u32,

    /// Board width in cells.
    #[arg(long, default_value_t = BoardConfig::default().width)]
    width: i32,

    /// Board height in cells.
    #[arg(long, default_value_t = BoardConfig::default().height)]
    height: i32,

    /// Wall-clock length of the race.
    #[arg(long, default_value_t = 5)]
    seconds: u64,

    /// Seed for the board and every worker.  Omit for a fresh race each run.
    #[arg(long, env = "SNAKE_SEED")]
    seed: Option<u64>,

    /// Frame clock period.
    #[arg(long, default_value_t = ClockConfig::default().period_ms)]
    frame_ms: u64,
}

/// Frames between two progress lines.
const REPORT_EVERY: u64 = 25;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    if args.snakes == 0 {
        bail!("--snakes must be at least 1");
    }

    // 1. Board with the stock feature counts and N snakes.
    let mut builder = BoardBuilder::from_config(BoardConfig {
        seed: args.seed,
        ..BoardConfig::new(args.width, args.height)
    });
    for i in 0..args.snakes {
        builder = builder.agent(starting_snake(i, args.width, args.height));
    }
    let board = Arc::new(builder.build()?);
    info!(
        width = board.width(),
        height = board.height(),
        snakes = board.agent_count(),
        mice = board.mice().len(),
        "board ready"
    );

    // 2. Frame clock that reports progress.
    let watched = Arc::clone(&board);
    let clock = GameClock::from_config(&ClockConfig { period_ms: args.frame_ms }, move |frame: u64| {
        if frame % REPORT_EVERY == 0 {
            info!(frame, "{}", RaceStats::collect(&watched));
        }
    })?;

    // 3. Race.
    let mut race = Race::new(Arc::clone(&board), RunnerConfig::default(), clock)?
        .with_seed(args.seed);
    race.spawn_all()?;

    let total = Duration::from_secs(args.seconds);
    let t0 = Instant::now();
    race.start();
    thread::sleep(total / 2);

    let halfway = race.pause();
    println!("Paused at {:.1} s: {halfway}", t0.elapsed().as_secs_f64());
    thread::sleep(Duration::from_millis(250));
    race.resume();
    thread::sleep(total - total / 2);

    let finish = race.pause();
    let summaries = race.shutdown()?;

    // 4. Results.
    println!();
    println!("Race over after {:.1} s: {finish}", t0.elapsed().as_secs_f64());
    println!();
    println!(
        "{:<12} {:>7} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Snake", "Length", "Steps", "Mice", "Turbo", "Telep", "Hits"
    );
    println!("{}", "-".repeat(56));
    for s in &summaries {
        let len = board
            .live_agents()
            .iter()
            .find(|snake| snake.id() == s.agent)
            .map_or(0, |snake| snake.len());
        println!(
            "{:<12} {:>7} {:>6} {:>6} {:>6} {:>6} {:>6}",
            s.agent.to_string(),
            len,
            s.steps,
            s.count(MoveResult::AteMouse),
            s.count(MoveResult::AteTurbo),
            s.count(MoveResult::Teleported),
            s.count(MoveResult::HitObstacle),
        );
    }
    Ok(())
}

/// Snake `i` starts at `(2 + 3i, 2 + 2i)` wrapped onto the board, heading
/// `Direction::ALL[i % 4]`.
fn starting_snake(i: u32, width: i32, height: i32) -> Snake {
    let n = i as i32;
    let x = (2 + 3 * n).rem_euclid(width.max(1));
    let y = (2 + 2 * n).rem_euclid(height.max(1));
    Snake::at(x, y, Direction::ALL[i as usize % Direction::ALL.len()], AgentId(i))
}
