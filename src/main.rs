//! Headless driver: plays autopilot runs against the simulation and prints a
//! leaderboard.
//!
//! Usage:
//!   flap-run --variant focus --difficulty hard --runs 5
//!   RUST_LOG=debug flap-run --config my-balance.json

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;

use flap_run::consts::SIM_DT;
use flap_run::highscores::{HighScoreEntry, RunOutcome};
use flap_run::sim::{FrameClock, GameEvent, GamePhase, GameState, TickInput, autopilot_input, tick};
use flap_run::{Difficulty, GameConfig, HighScores, Variant};

#[derive(Parser)]
#[command(name = "flap-run")]
#[command(about = "Play autopilot runs of the flap game headlessly")]
struct Args {
    /// Seed for the first run; later runs use seed + run index
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Built-in balance preset (classic, focus)
    #[arg(long, default_value = "classic", value_parser = parse_variant)]
    variant: Variant,

    /// Difficulty picked in the menu before each run (easy, medium, hard)
    #[arg(long, default_value = "medium", value_parser = parse_difficulty)]
    difficulty: Difficulty,

    /// Number of runs to play
    #[arg(long, default_value_t = 3)]
    runs: u32,

    /// Abandon a run after this much simulated time
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f64,

    /// JSON balance file; overrides --variant
    #[arg(long)]
    config: Option<String>,

    /// Synthetic frame rate fed to the frame clock
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::parse(s).ok_or_else(|| format!("unknown variant '{s}'"))
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn load_config(args: &Args) -> Result<GameConfig> {
    match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            GameConfig::from_json(&json).with_context(|| format!("loading config {path}"))
        }
        None => Ok(GameConfig::preset(args.variant)),
    }
}

/// Result of one run as seen by the driver
struct RunReport {
    score: u32,
    outcome: Option<RunOutcome>,
    seconds: f64,
    pickups: u32,
}

fn play_run(state: &mut GameState, args: &Args) -> RunReport {
    let start = TickInput {
        restart: true,
        set_difficulty: Some(args.difficulty),
        ..Default::default()
    };
    tick(state, &start, SIM_DT);

    let mut clock = FrameClock::new();
    let frame = 1.0 / args.fps;
    let mut now = 0.0;
    let mut seconds = 0.0;
    let mut pickups = 0;

    while state.phase() == GamePhase::Playing && seconds < args.max_seconds {
        now += frame;
        for _ in 0..clock.substeps(now) {
            let input = autopilot_input(state);
            for event in tick(state, &input, SIM_DT) {
                match event {
                    GameEvent::Flapped => {}
                    GameEvent::Scored => log::debug!("scored: {}", state.score()),
                    GameEvent::Collected(kind) => {
                        pickups += 1;
                        log::debug!("collected {:?}", kind);
                    }
                    GameEvent::GameOver => log::info!("game over at {:.1}s", seconds),
                    GameEvent::Won => log::info!("won at {:.1}s", seconds),
                }
            }
            seconds += SIM_DT;
            if state.phase() != GamePhase::Playing {
                break;
            }
        }
    }

    let outcome = match state.phase() {
        GamePhase::GameOver => Some(RunOutcome::Crashed),
        GamePhase::Win => Some(RunOutcome::Won),
        _ => None,
    };
    let report = RunReport {
        score: state.score(),
        outcome,
        seconds,
        pickups,
    };
    tick(state, &TickInput::return_to_menu(), SIM_DT);
    report
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("--fps must be positive, got {}", args.fps);
    }

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let mut state = GameState::new(config, args.seed).context("invalid game config")?;
    let mut leaderboard = HighScores::new();

    for run in 1..=args.runs {
        let seed = args.seed.wrapping_add(u64::from(run - 1));
        state.reseed(seed);
        let report = play_run(&mut state, &args);

        let outcome = match report.outcome {
            Some(RunOutcome::Won) => "won",
            Some(RunOutcome::Crashed) => "crashed",
            None => "timed out",
        };
        println!(
            "run {:>3}  seed {:<8} score {:>3}  {:<9}  {:>6.1}s  {} pickups",
            run, seed, report.score, outcome, report.seconds, report.pickups
        );

        if let Some(outcome) = report.outcome {
            leaderboard.add_score(HighScoreEntry {
                score: report.score,
                difficulty: args.difficulty,
                outcome,
                run,
            });
        }
    }

    println!();
    println!("=== LEADERBOARD ===");
    if leaderboard.is_empty() {
        println!("  (no scoring runs)");
    }
    for (i, entry) in leaderboard.entries.iter().enumerate() {
        println!(
            "  #{:<2} {:>3}  run {:<3} {:<6} {:?}",
            i + 1,
            entry.score,
            entry.run,
            entry.difficulty.as_str(),
            entry.outcome
        );
    }
    if let Some(best) = leaderboard.best_for(args.difficulty) {
        println!(
            "  best on {}: {} (run {})",
            args.difficulty.as_str(),
            best.score,
            best.run
        );
    }
    println!(
        "  top score: {}  session high score: {}",
        leaderboard.top_score().unwrap_or(0),
        state.high_score()
    );

    Ok(())
}
