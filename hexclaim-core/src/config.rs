//! Game configuration

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::player::Color;

/// Maximum number of participants in one game
pub const MAX_PLAYERS: usize = 6;

/// How starting tiles are placed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SpawnMode {
    /// Fixed, evenly spread points on the board's rim
    #[default]
    Fair,
    /// Independent uniformly random neutral tiles
    Random,
}

impl FromStr for SpawnMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fair" => Ok(SpawnMode::Fair),
            "random" => Ok(SpawnMode::Random),
            _ => Err(GameError::UnknownSpawnMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for SpawnMode {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Tick counts for the automated-turn driver
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Ticks before the selector starts turning
    pub think_ticks: u32,
    /// Ticks between reaching the chosen direction and committing
    pub confirm_ticks: u32,
    /// Interval of the driver's repeating timer
    pub tick_interval_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            think_ticks: 3,
            confirm_ticks: 2,
            tick_interval_ms: 150,
        }
    }
}

impl PacingConfig {
    /// No delays at all; automated turns commit on the first tick after aligning
    pub fn instant() -> Self {
        Self {
            think_ticks: 0,
            confirm_ticks: 0,
            tick_interval_ms: 0,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Parameters for a game session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Human players; they take the first seats
    pub humans: usize,
    /// Automated players
    pub bots: usize,
    pub radius: u32,
    /// Color every player asks for; collisions get a random free color
    pub favorite_color: Color,
    pub spawn_mode: SpawnMode,
    /// Probability that a tile starts as a wall
    pub wall_density: f64,
    /// RNG seed (None = from entropy)
    pub seed: Option<u64>,
    pub pacing: PacingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            humans: 1,
            bots: 3,
            radius: 5,
            favorite_color: Color::Red,
            spawn_mode: SpawnMode::Fair,
            wall_density: 0.1,
            seed: None,
            pacing: PacingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Config for a game with automated players only
    pub fn bots_only(bots: usize, radius: u32) -> Self {
        Self {
            humans: 0,
            bots,
            radius,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Clamp humans to [0, 6], bots so there are 1 to 6 players in total,
    /// and wall density to [0, 1]. Fair spawning for several players needs a
    /// rim, so its radius is at least 1.
    pub fn normalized(&self) -> Self {
        let humans = self.humans.min(MAX_PLAYERS);
        let mut bots = self.bots.min(MAX_PLAYERS - humans);
        if humans + bots == 0 {
            bots = 1;
        }
        let wall_density = if self.wall_density.is_nan() {
            0.0
        } else {
            self.wall_density.clamp(0.0, 1.0)
        };
        let radius = if self.spawn_mode == SpawnMode::Fair && humans + bots > 1 {
            self.radius.max(1)
        } else {
            self.radius
        };

        Self {
            humans,
            bots,
            radius,
            wall_density,
            ..self.clone()
        }
    }

    pub fn total_players(&self) -> usize {
        self.humans + self.bots
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
