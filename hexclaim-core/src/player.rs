//! Players and the color palette that identifies them

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Palette entry. A player's color is its identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red = 0,
    Orange = 1,
    Yellow = 2,
    Green = 3,
    Cyan = 4,
    Blue = 5,
    Purple = 6,
}

impl Color {
    pub const COUNT: usize = 7;

    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Blue,
        Color::Purple,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Orange => "Orange",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Cyan => "Cyan",
            Color::Blue => "Blue",
            Color::Purple => "Purple",
        }
    }

    /// Fill color for renderers
    pub fn hex_code(self) -> &'static str {
        match self {
            Color::Red => "#e6194b",
            Color::Orange => "#f58231",
            Color::Yellow => "#ffe119",
            Color::Green => "#3cb44b",
            Color::Cyan => "#42d4f4",
            Color::Blue => "#4363d8",
            Color::Purple => "#911eb4",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownColor(s.to_string()))
    }
}

/// A participant. Two players are the same player iff they share a color.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    automated: bool,
}

impl Player {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_automated(&self) -> bool {
        self.automated
    }

    pub fn is_human(&self) -> bool {
        !self.automated
    }

    pub fn display_name(&self) -> String {
        if self.automated {
            format!("CPU {}", self.color)
        } else {
            self.color.name().to_string()
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
    }
}

impl Eq for Player {}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Tracks which palette colors are held by active players.
///
/// Owned by a game session; [`ColorRegistry::reset`] releases every color
/// before a new game's players are created.
#[derive(Clone, Debug, Default)]
pub struct ColorRegistry {
    in_use: [bool; Color::COUNT],
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release every color
    pub fn reset(&mut self) {
        self.in_use = [false; Color::COUNT];
    }

    pub fn is_free(&self, color: Color) -> bool {
        !self.in_use[color.index()]
    }

    pub fn free_colors(&self) -> Vec<Color> {
        Color::ALL.into_iter().filter(|&c| self.is_free(c)).collect()
    }

    /// Create a player, taking `preferred` if it is free and a uniformly random
    /// free color otherwise.
    pub fn create_player<R: Rng>(
        &mut self,
        preferred: Color,
        automated: bool,
        rng: &mut R,
    ) -> Result<Player> {
        let color = if self.is_free(preferred) {
            preferred
        } else {
            *self
                .free_colors()
                .choose(rng)
                .ok_or(GameError::PaletteExhausted)?
        };
        self.in_use[color.index()] = true;

        Ok(Player { color, automated })
    }
}
