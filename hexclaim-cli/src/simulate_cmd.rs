//! Simulate command - many automated games in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;

use hexclaim_core::{Game, GameConfig, PacingConfig};

use crate::game_args::GameArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    turns: u32,
    /// Tiles per seat, in turn order
    tiles: Vec<usize>,
    /// Seats sharing the highest tile count
    leaders: Vec<usize>,
}

/// Per-seat aggregate
#[derive(Clone, Debug, Default, Serialize)]
struct SeatStats {
    seat: usize,
    outright_wins: usize,
    shared_wins: usize,
    mean_tiles: f32,
}

#[derive(Clone, Debug, Serialize)]
struct SimulationResults {
    total_games: usize,
    avg_turns: f32,
    seats: Vec<SeatStats>,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
///
/// 1. Build an all-automated config
/// 2. Play the games
/// 3. Report results
pub fn run(args: SimulateArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args)?;
    let base_seed = seed.unwrap_or(42);

    tracing::info!(
        "Simulating {} games: {} bots, radius {}, {:?} spawn",
        args.games,
        config.bots,
        config.radius,
        config.spawn_mode
    );

    let records = play_games(&config, args.games, base_seed, args.sequential)?;
    let results = compute_statistics(records);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Same setup as `play`, but every seat automated and no pacing delay
fn build_config(args: &SimulateArgs) -> Result<GameConfig> {
    let config = args.game.to_config(None)?;
    Ok(GameConfig {
        humans: 0,
        bots: config.total_players(),
        pacing: PacingConfig::instant(),
        ..config
    }
    .normalized())
}

fn play_games(config: &GameConfig, games: usize, base_seed: u64, sequential: bool) -> Result<Vec<GameRecord>> {
    let play = |game_index: usize| {
        let seed = base_seed.wrapping_add(game_index as u64);
        play_single_game(config, game_index + 1, seed)
    };

    if sequential {
        (0..games).map(play).collect()
    } else {
        (0..games).into_par_iter().map(play).collect()
    }
}

fn report_results(results: &SimulationResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn play_single_game(config: &GameConfig, game_number: usize, seed: u64) -> Result<GameRecord> {
    let mut game = Game::new(GameConfig {
        seed: Some(seed),
        ..config.clone()
    })?;

    while !game.is_over() {
        game.run_automated_turn()?;
    }

    let summary = game
        .result()
        .ok_or_else(|| anyhow::anyhow!("game {} ended without a summary", game_number))?;
    let tiles: Vec<usize> = summary.scores.iter().map(|s| s.tiles).collect();
    let best = tiles.iter().copied().max().unwrap_or(0);
    let leaders = (0..tiles.len()).filter(|&i| tiles[i] == best).collect();

    tracing::debug!("Game {}: {} ({} turns)", game_number, summary, game.turns());

    Ok(GameRecord {
        game_number,
        seed,
        turns: game.turns(),
        tiles,
        leaders,
    })
}

fn compute_statistics(games: Vec<GameRecord>) -> SimulationResults {
    let seat_count = games.iter().map(|g| g.tiles.len()).max().unwrap_or(0);
    let mut seats: Vec<SeatStats> = (0..seat_count)
        .map(|seat| SeatStats { seat, ..Default::default() })
        .collect();

    for game in &games {
        for (seat, &tiles) in game.tiles.iter().enumerate() {
            seats[seat].mean_tiles += tiles as f32;
        }
        match game.leaders.as_slice() {
            [only] => seats[*only].outright_wins += 1,
            shared => {
                for &seat in shared {
                    seats[seat].shared_wins += 1;
                }
            }
        }
    }

    let total = games.len();
    if total > 0 {
        for seat in &mut seats {
            seat.mean_tiles /= total as f32;
        }
    }

    let total_turns: u32 = games.iter().map(|g| g.turns).sum();
    let avg_turns = if total == 0 {
        0.0
    } else {
        total_turns as f32 / total as f32
    };

    SimulationResults {
        total_games: total,
        avg_turns,
        seats,
        games,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_text_results(results: &SimulationResults) {
    let total = results.total_games;

    println!("\n=== Simulation Results ===");
    println!("Total games: {}", total);
    println!("Avg turns:   {:.1}", results.avg_turns);
    println!();
    for seat in &results.seats {
        println!(
            "Seat {}: {} wins ({:.1}%), {} shared, {:.1} tiles on average",
            seat.seat + 1,
            seat.outright_wins,
            percent(seat.outright_wins, total),
            seat.shared_wins,
            seat.mean_tiles
        );
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
