//! Board state and the capture algorithm

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::hex::{hex_region, Direction, Hex};
use crate::player::Color;

/// Capture state of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Neutral,
    Owned(Color),
    /// Permanently blocked; only ever set at construction
    Wall,
}

impl TileState {
    pub fn is_neutral(self) -> bool {
        self == TileState::Neutral
    }

    pub fn owner(self) -> Option<Color> {
        match self {
            TileState::Owned(color) => Some(color),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub hex: Hex,
    pub state: TileState,
}

/// Hexagonal board of a fixed radius.
///
/// Tiles are stored in row order so iteration (and therefore seeded random
/// placement) is reproducible.
#[derive(Clone, Debug)]
pub struct Board {
    radius: u32,
    wall_density: f64,
    tiles: Vec<Tile>,
    index: FxHashMap<Hex, usize>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build a board where each tile independently becomes a wall with
    /// probability `wall_density` (clamped to [0, 1], NaN meaning no walls).
    pub fn new<R: Rng>(radius: u32, wall_density: f64, rng: &mut R) -> Self {
        let wall_density = if wall_density.is_nan() {
            0.0
        } else {
            wall_density.clamp(0.0, 1.0)
        };
        let mut board = Self::empty(radius, wall_density);
        for tile in &mut board.tiles {
            if rng.gen_bool(wall_density) {
                tile.state = TileState::Wall;
            }
        }
        board
    }

    /// Build a board with an explicit wall layout. Hexes outside the board are ignored.
    pub fn with_walls(radius: u32, walls: &[Hex]) -> Self {
        let mut board = Self::empty(radius, 0.0);
        for hex in walls {
            if let Some(&i) = board.index.get(hex) {
                board.tiles[i].state = TileState::Wall;
            }
        }
        board
    }

    fn empty(radius: u32, wall_density: f64) -> Self {
        let tiles: Vec<Tile> = hex_region(radius)
            .map(|hex| Tile { hex, state: TileState::Neutral })
            .collect();
        let index = tiles.iter().enumerate().map(|(i, t)| (t.hex, i)).collect();

        Self { radius, wall_density, tiles, index }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn wall_density(&self) -> f64 {
        self.wall_density
    }

    /// Number of tiles on the board (walls included)
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.index.contains_key(&hex)
    }

    pub fn tile(&self, hex: Hex) -> Option<&Tile> {
        self.index.get(&hex).map(|&i| &self.tiles[i])
    }

    /// State at `hex`, `None` off the board
    pub fn state(&self, hex: Hex) -> Option<TileState> {
        self.tile(hex).map(|t| t.state)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    pub fn neutral_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.state.is_neutral()).count()
    }

    pub fn num_tiles_owned_by(&self, owner: Color) -> usize {
        self.owned_by(owner).count()
    }

    fn owned_by(&self, owner: Color) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles
            .iter()
            .filter(move |t| t.state == TileState::Owned(owner))
    }

    // ========================================================================
    // SPAWNING
    // ========================================================================

    /// Capture `hex` for `owner` if it exists and is neutral
    pub fn spawn(&mut self, owner: Color, hex: Hex) -> bool {
        match self.index.get(&hex) {
            Some(&i) if self.tiles[i].state.is_neutral() => {
                self.tiles[i].state = TileState::Owned(owner);
                true
            }
            _ => false,
        }
    }

    /// Capture a uniformly random neutral tile for `owner`
    pub fn spawn_random<R: Rng>(&mut self, owner: Color, rng: &mut R) -> Result<Hex> {
        let neutral: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| self.tiles[i].state.is_neutral())
            .collect();
        let &i = neutral.choose(rng).ok_or(GameError::NoTilesAvailable)?;
        self.tiles[i].state = TileState::Owned(owner);
        Ok(self.tiles[i].hex)
    }

    // ========================================================================
    // CAPTURE
    // ========================================================================

    /// Neutral tiles one step in `direction` from anything `owner` holds
    fn capture_targets(&self, owner: Color, direction: Direction) -> Vec<usize> {
        self.owned_by(owner)
            .filter_map(|t| self.index.get(&t.hex.neighbor(direction)).copied())
            .filter(|&i| self.tiles[i].state.is_neutral())
            .collect()
    }

    /// How many tiles a capture in `direction` would take. Zero means illegal.
    pub fn capture_weight(&self, owner: Color, direction: Direction) -> usize {
        self.capture_targets(owner, direction).len()
    }

    /// Capture weight for every direction, in clockwise order
    pub fn capture_weights(&self, owner: Color) -> [(Direction, usize); 6] {
        Direction::ALL.map(|d| (d, self.capture_weight(owner, d)))
    }

    pub fn has_legal_moves(&self, owner: Color) -> bool {
        Direction::ALL
            .iter()
            .any(|&d| self.capture_weight(owner, d) > 0)
    }

    /// Expand `owner` one ring in `direction`. Targets are collected before
    /// any tile changes, so tiles captured here do not chain further.
    /// Returns the number of tiles captured.
    pub fn capture_tiles(&mut self, owner: Color, direction: Direction) -> usize {
        let targets = self.capture_targets(owner, direction);
        for &i in &targets {
            self.tiles[i].state = TileState::Owned(owner);
        }
        targets.len()
    }

    /// Reset every tile, walls included, to neutral
    pub fn clear_all(&mut self) {
        for tile in &mut self.tiles {
            tile.state = TileState::Neutral;
        }
    }
}
