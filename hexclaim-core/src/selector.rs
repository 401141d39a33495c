//! Per-player direction selection

use serde::{Deserialize, Serialize};

use crate::hex::{Direction, Hex, Rotation};
use crate::player::Color;

/// Two-cell picture of a capture: the owner's cell at the center and the
/// cell it would take in the selected direction. Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionPreview {
    pub owner: Color,
    pub center: Hex,
    pub target: Hex,
}

impl DirectionPreview {
    pub fn new(owner: Color, direction: Direction) -> Self {
        Self {
            owner,
            center: Hex::ORIGIN,
            target: Hex::ORIGIN.neighbor(direction),
        }
    }
}

/// The direction a player will capture in next. Starts at North.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionSelector {
    owner: Color,
    direction: Direction,
    preview: DirectionPreview,
}

impl DirectionSelector {
    pub fn new(owner: Color) -> Self {
        Self {
            owner,
            direction: Direction::North,
            preview: DirectionPreview::new(owner, Direction::North),
        }
    }

    pub fn owner(&self) -> Color {
        self.owner
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn preview(&self) -> &DirectionPreview {
        &self.preview
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        self.direction = self.direction.rotated(rotation);
        self.preview = DirectionPreview::new(self.owner, self.direction);
    }
}
