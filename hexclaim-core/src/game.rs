//! Turn coordination: spawning, turn order, skipping and scoring

use std::fmt;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::ai::{choose_direction, AutoTurnDriver, DriverStep};
use crate::board::Board;
use crate::config::{GameConfig, SpawnMode, MAX_PLAYERS};
use crate::error::{GameError, Result};
use crate::hex::{Direction, Hex, Rotation};
use crate::player::{Color, ColorRegistry, Player};
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::selector::DirectionSelector;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Rim corners used by fair spawning, indexed by player count - 1
const FAIR_SPAWNS: [&[Direction]; MAX_PLAYERS] = [
    &[Direction::North],
    &[Direction::North, Direction::South],
    &[Direction::North, Direction::SouthEast, Direction::SouthWest],
    &[
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ],
    &[
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ],
    &Direction::ALL,
];

/// Fair spawn points for `players` players on a board of `radius`
pub fn fair_spawn_points(players: usize, radius: u32) -> Vec<Hex> {
    let players = players.clamp(1, MAX_PLAYERS);
    FAIR_SPAWNS[players - 1]
        .iter()
        .map(|d| d.offset().scale(radius as i32))
        .collect()
}

// ============================================================================
// RESULTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    GameOver,
}

/// A committed capture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub player: Color,
    pub direction: Direction,
    pub captured: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: Player,
    pub tiles: usize,
}

/// Final tile counts, in turn order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub scores: Vec<Score>,
}

impl GameSummary {
    pub fn tally(players: &[Player], board: &Board) -> Self {
        let scores = players
            .iter()
            .map(|&player| Score {
                player,
                tiles: board.num_tiles_owned_by(player.color()),
            })
            .collect();
        Self { scores }
    }

    pub fn tiles_of(&self, color: Color) -> Option<usize> {
        self.scores
            .iter()
            .find(|s| s.player.color() == color)
            .map(|s| s.tiles)
    }

    /// Players sharing the highest tile count
    pub fn leaders(&self) -> Vec<Player> {
        let best = self.scores.iter().map(|s| s.tiles).max().unwrap_or(0);
        self.scores
            .iter()
            .filter(|s| s.tiles == best)
            .map(|s| s.player)
            .collect()
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Game over!")?;
        for (i, score) in self.scores.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}: {}", sep, score.player, score.tiles)?;
        }
        Ok(())
    }
}

// ============================================================================
// GAME
// ============================================================================

/// A game session.
///
/// Single-threaded: every mutation goes through `&mut self`, either from
/// human input or from [`Game::tick`] while an automated player is moving.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    registry: ColorRegistry,
    players: Vec<Player>,
    selectors: Vec<DirectionSelector>,
    board: Board,
    active: usize,
    phase: Phase,
    result: Option<GameSummary>,
    summary_visible: bool,
    driver: Option<AutoTurnDriver>,
    scheduler: Box<dyn Scheduler>,
    rng: ChaCha8Rng,
    turns: u32,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Start a game whose automated turns are paced by polling [`Game::tick`]
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_scheduler(config, Box::new(ManualScheduler::new()))
    }

    pub fn with_scheduler(config: GameConfig, scheduler: Box<dyn Scheduler>) -> Result<Self> {
        let config = config.normalized();
        let mut rng = seeded_rng(config.seed);
        let board = Board::new(config.radius, config.wall_density, &mut rng);
        Self::assemble(config, board, ColorRegistry::new(), scheduler, rng)
    }

    /// Start a game on a pre-built board. The spawn phase still runs.
    pub fn with_board(config: GameConfig, board: Board, scheduler: Box<dyn Scheduler>) -> Result<Self> {
        let config = GameConfig {
            radius: board.radius(),
            wall_density: board.wall_density(),
            ..config.normalized()
        };
        let rng = seeded_rng(config.seed);
        Self::assemble(config, board, ColorRegistry::new(), scheduler, rng)
    }

    /// Tear this session down and start a new one on the same scheduler
    pub fn restart(mut self, config: GameConfig) -> Result<Self> {
        self.stop_driver();
        let config = config.normalized();
        let mut rng = seeded_rng(config.seed);
        let board = Board::new(config.radius, config.wall_density, &mut rng);
        Self::assemble(config, board, self.registry, self.scheduler, rng)
    }

    fn assemble(
        config: GameConfig,
        board: Board,
        mut registry: ColorRegistry,
        scheduler: Box<dyn Scheduler>,
        mut rng: ChaCha8Rng,
    ) -> Result<Self> {
        registry.reset();

        let mut players = Vec::with_capacity(config.total_players());
        for automated in std::iter::repeat(false)
            .take(config.humans)
            .chain(std::iter::repeat(true).take(config.bots))
        {
            players.push(registry.create_player(config.favorite_color, automated, &mut rng)?);
        }
        let selectors = players
            .iter()
            .map(|p| DirectionSelector::new(p.color()))
            .collect();

        let mut game = Self {
            config,
            registry,
            players,
            selectors,
            board,
            active: 0,
            phase: Phase::InProgress,
            result: None,
            summary_visible: false,
            driver: None,
            scheduler,
            rng,
            turns: 0,
        };

        game.spawn_players()?;
        info!(
            "Starting game: {} players, radius {}, {:?} spawn",
            game.players.len(),
            game.board.radius(),
            game.config.spawn_mode
        );

        if !game.board.has_legal_moves(game.active_player().color()) {
            game.advance();
        }
        game.after_advance()?;

        Ok(game)
    }

    fn spawn_players(&mut self) -> Result<()> {
        match self.config.spawn_mode {
            SpawnMode::Fair => {
                let points = fair_spawn_points(self.players.len(), self.board.radius());
                for (player, hex) in self.players.iter().zip(points) {
                    if !self.board.spawn(player.color(), hex) {
                        let fallback = self.board.spawn_random(player.color(), &mut self.rng)?;
                        warn!(
                            "Fair spawn {:?} unavailable for {}, placed at {:?}",
                            hex, player, fallback
                        );
                    }
                }
            }
            SpawnMode::Random => {
                for player in &self.players {
                    let hex = self.board.spawn_random(player.color(), &mut self.rng)?;
                    debug!("{} spawned at {:?}", player, hex);
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in turn order: humans first, then automated
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn selectors(&self) -> &[DirectionSelector] {
        &self.selectors
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_player(&self) -> Player {
        self.players[self.active]
    }

    pub fn active_selector(&self) -> &DirectionSelector {
        &self.selectors[self.active]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Game-over summary, until it is dismissed
    pub fn summary(&self) -> Option<&GameSummary> {
        self.result.as_ref().filter(|_| self.summary_visible)
    }

    /// Final scores, whether or not the summary was dismissed
    pub fn result(&self) -> Option<&GameSummary> {
        self.result.as_ref()
    }

    /// Committed captures so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// The automated-turn driver, while an automated player is moving
    pub fn driver(&self) -> Option<&AutoTurnDriver> {
        self.driver.as_ref()
    }

    // ========================================================================
    // HUMAN INPUT
    // ========================================================================

    /// Turn the active human's selector. Returns false (and does nothing)
    /// when the active player is automated or the game is over.
    pub fn human_input(&mut self, rotation: Rotation) -> bool {
        if self.is_over() || self.active_player().is_automated() {
            return false;
        }
        self.selectors[self.active].rotate(rotation);
        true
    }

    /// Confirm the active human's direction, or dismiss the summary once the game is over
    pub fn human_select(&mut self) -> Result<Option<TurnReport>> {
        if self.is_over() {
            self.summary_visible = false;
            return Ok(None);
        }
        if self.active_player().is_automated() {
            return Ok(None);
        }
        self.take_turn()
    }

    // ========================================================================
    // TURNS
    // ========================================================================

    /// Capture with the active player's selected direction.
    ///
    /// Only reachable through [`Game::human_select`] and [`Game::tick`].
    /// A direction with no capture weight is a no-op and the turn does not pass.
    fn take_turn(&mut self) -> Result<Option<TurnReport>> {
        if self.is_over() {
            return Ok(None);
        }

        let player = self.active_player().color();
        let direction = self.selectors[self.active].direction();
        if self.board.capture_weight(player, direction) == 0 {
            debug!("{} cannot capture {}, ignoring", player, direction);
            return Ok(None);
        }

        // the active player's driver, if any, ends with this capture
        self.stop_driver();
        let captured = self.board.capture_tiles(player, direction);
        self.turns += 1;
        debug!("Turn {}: {} captured {} tiles {}", self.turns, player, captured, direction);

        self.advance();
        self.after_advance()?;

        Ok(Some(TurnReport { player, direction, captured }))
    }

    /// Move to the next player with a legal move, giving up after one lap
    fn advance(&mut self) {
        let n = self.players.len();
        for _ in 0..n {
            self.active = (self.active + 1) % n;
            if self.board.has_legal_moves(self.players[self.active].color()) {
                break;
            }
        }
    }

    fn after_advance(&mut self) -> Result<()> {
        let any_moves = self
            .players
            .iter()
            .any(|p| self.board.has_legal_moves(p.color()));

        if !any_moves {
            self.finish();
        } else if self.active_player().is_automated() {
            self.start_driver()?;
        }
        Ok(())
    }

    fn finish(&mut self) {
        let summary = GameSummary::tally(&self.players, &self.board);
        info!("{} (after {} turns)", summary, self.turns);
        self.phase = Phase::GameOver;
        self.result = Some(summary);
        self.summary_visible = true;
    }

    // ========================================================================
    // AUTOMATED TURNS
    // ========================================================================

    fn start_driver(&mut self) -> Result<()> {
        let player = self.active_player().color();
        let weights = self.board.capture_weights(player);
        let target = match choose_direction(&weights, &mut self.rng) {
            Some(target) => target,
            None => {
                error!("{} has no capture weight in any direction", player);
                return Err(GameError::NoSelectableDirection { player });
            }
        };

        let timer = self.scheduler.schedule_repeating(self.config.pacing.tick_interval());
        debug!("{} aiming {} (weights {:?})", player, target, weights);
        self.driver = Some(AutoTurnDriver::new(player, target, &self.config.pacing, timer));
        Ok(())
    }

    fn stop_driver(&mut self) {
        if let Some(driver) = self.driver.take() {
            self.scheduler.cancel(driver.timer());
        }
    }

    /// Advance the automated-turn driver by one timer tick.
    ///
    /// Returns the committed turn on the tick that takes it. Does nothing
    /// when no automated player is moving.
    pub fn tick(&mut self) -> Result<Option<TurnReport>> {
        let Some(driver) = self.driver.as_mut() else {
            return Ok(None);
        };

        let selector = &mut self.selectors[self.active];
        match driver.tick(selector.direction()) {
            DriverStep::Wait => Ok(None),
            DriverStep::Finished => {
                debug_assert!(false, "committed driver left installed");
                Ok(None)
            }
            DriverStep::Rotate(rotation) => {
                selector.rotate(rotation);
                Ok(None)
            }
            DriverStep::Commit => {
                self.stop_driver();
                self.take_turn()
            }
        }
    }

    /// Tick until the current automated turn commits
    pub fn run_automated_turn(&mut self) -> Result<Option<TurnReport>> {
        while self.driver.is_some() {
            if let Some(report) = self.tick()? {
                return Ok(Some(report));
            }
        }
        Ok(None)
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
