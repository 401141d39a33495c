//! HEXCLAIM Core - Rules engine
//!
//! This crate provides the game logic for HEXCLAIM:
//! - Hex geometry (axial coordinates, six compass directions)
//! - Color palette and player registry
//! - Board state and ring-by-ring capture
//! - Per-player direction selectors
//! - Weighted-random automated players with tick-driven pacing
//! - Turn coordination, skipping and scoring

pub mod hex;
pub mod error;
pub mod player;
pub mod board;
pub mod selector;
pub mod scheduler;
pub mod config;
pub mod ai;
pub mod game;

// Re-exports for convenient access
pub use hex::{hex_region, Direction, Hex, Rotation};
pub use error::{GameError, Result};
pub use player::{Color, ColorRegistry, Player};
pub use board::{Board, Tile, TileState};
pub use selector::{DirectionPreview, DirectionSelector};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle};
pub use config::{GameConfig, PacingConfig, SpawnMode, MAX_PLAYERS};
pub use ai::{choose_direction, AutoTurnDriver, DriverPhase, DriverStep};
pub use game::{fair_spawn_points, Game, GameSummary, Phase, Score, TurnReport};
