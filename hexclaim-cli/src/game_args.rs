//! Game setup options shared by the commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexclaim_core::{Color, GameConfig, SpawnMode};

#[derive(Args, Clone, Debug)]
pub struct GameArgs {
    /// JSON game config; other flags override its fields
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Human players (take the first seats)
    #[arg(long)]
    pub humans: Option<usize>,

    /// Automated players
    #[arg(long)]
    pub bots: Option<usize>,

    /// Board radius
    #[arg(long)]
    pub radius: Option<u32>,

    /// Favorite color every player asks for
    #[arg(long)]
    pub color: Option<String>,

    /// Spawn mode: fair or random
    #[arg(long)]
    pub spawn: Option<String>,

    /// Probability that a tile starts as a wall
    #[arg(long)]
    pub walls: Option<f64>,
}

impl GameArgs {
    /// Build the game config: file (or defaults), then flags, then seed
    pub fn to_config(&self, seed: Option<u64>) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load game config: {}", path.display()))?,
            None => GameConfig::default(),
        };

        if let Some(humans) = self.humans {
            config.humans = humans;
        }
        if let Some(bots) = self.bots {
            config.bots = bots;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(color) = &self.color {
            config.favorite_color = color.parse::<Color>()?;
        }
        if let Some(spawn) = &self.spawn {
            config.spawn_mode = spawn.parse::<SpawnMode>()?;
        }
        if let Some(walls) = self.walls {
            config.wall_density = walls;
        }
        if seed.is_some() {
            config.seed = seed;
        }

        Ok(config)
    }
}
