//! Play command - one game on the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game(), report_result()
//! - Level 3: automated_step(), human_step()
//! - Level 4: command parsing, formatting

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use hexclaim_core::{Game, Rotation, TurnReport};

use crate::game_args::GameArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Pause for the configured tick interval between automated ticks
    #[arg(long)]
    pub watch: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// A line of human input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Rotate(Rotation),
    Select,
    Quit,
    Help,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the game from config and flags
/// 2. Alternate between human prompts and automated ticks until it ends
/// 3. Report the summary
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = args.game.to_config(seed)?;
    let mut game = Game::new(config)?;

    tracing::info!(
        "{} players on a radius {} board",
        game.players().len(),
        game.board().radius()
    );

    let stdin = io::stdin();
    let finished = play_game(&mut game, &mut stdin.lock(), args.watch)?;

    if finished {
        report_result(&game, args.json)?;
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Drive the game to completion. Returns false if the human quit early.
fn play_game(game: &mut Game, input: &mut impl BufRead, watch: bool) -> Result<bool> {
    while !game.is_over() {
        let keep_going = if game.active_player().is_automated() {
            automated_step(game, watch)?;
            true
        } else {
            human_step(game, input)?
        };
        if !keep_going {
            return Ok(false);
        }
    }
    Ok(true)
}

fn report_result(game: &Game, json: bool) -> Result<()> {
    let Some(summary) = game.result() else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", summary);
        let leaders: Vec<String> = summary.leaders().iter().map(|p| p.display_name()).collect();
        println!("Most tiles: {}", leaders.join(" & "));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn automated_step(game: &mut Game, watch: bool) -> Result<()> {
    if let Some(report) = game.tick()? {
        print_report(game, &report);
    } else if watch {
        std::thread::sleep(game.config().pacing.tick_interval());
    }
    Ok(())
}

/// Prompt the active human for one command. Returns false on quit or end of input.
fn human_step(game: &mut Game, input: &mut impl BufRead) -> Result<bool> {
    let player = game.active_player();
    let direction = game.active_selector().direction();
    let weight = game.board().capture_weight(player.color(), direction);
    print!("{} facing {} ({} to capture) [l/r/enter/q]: ", player, direction, weight);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }

    match parse_command(&line) {
        Some(Command::Rotate(rotation)) => {
            game.human_input(rotation);
        }
        Some(Command::Select) => match game.human_select()? {
            Some(report) => print_report(game, &report),
            None => println!("Nothing to capture {}", direction),
        },
        Some(Command::Quit) => return Ok(false),
        Some(Command::Help) | None => {
            println!("l = turn left, r = turn right, enter = capture, q = quit");
        }
    }
    Ok(true)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "l" | "left" => Some(Command::Rotate(Rotation::CounterClockwise)),
        "r" | "right" => Some(Command::Rotate(Rotation::Clockwise)),
        "" | "go" | "capture" => Some(Command::Select),
        "q" | "quit" => Some(Command::Quit),
        "?" | "h" | "help" => Some(Command::Help),
        _ => None,
    }
}

fn print_report(game: &Game, report: &TurnReport) {
    let name = game
        .players()
        .iter()
        .find(|p| p.color() == report.player)
        .map(|p| p.display_name())
        .unwrap_or_else(|| report.player.to_string());
    println!(
        "{} captured {} tile(s) {} ({} owned)",
        name,
        report.captured,
        report.direction,
        game.board().num_tiles_owned_by(report.player)
    );
}

// ============================================================================
// TESTS
// ============================================================================
