//! Hex geometry with axial coordinates

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Check if this hex lies inside a hexagon of the given radius centered at origin
    pub fn is_within(&self, radius: u32) -> bool {
        let radius = radius as i32;
        self.q.abs() <= radius && self.r.abs() <= radius && (self.q + self.r).abs() <= radius
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i32 {
        (self.q.abs() + self.r.abs() + (self.q + self.r).abs()) / 2
    }

    /// Get neighbor in direction
    pub fn neighbor(&self, direction: Direction) -> Hex {
        *self + direction.offset()
    }

    /// Scale the hex vector by `k`
    pub fn scale(&self, k: i32) -> Hex {
        Hex::new(self.q * k, self.r * k)
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::new(self.q + rhs.q, self.r + rhs.r)
    }
}

/// Every coordinate of a hexagonal region, row by row
pub fn hex_region(radius: u32) -> impl Iterator<Item = Hex> {
    let radius = radius as i32;
    (-radius..=radius).flat_map(move |r| {
        let q_min = (-radius).max(-radius - r);
        let q_max = radius.min(radius - r);
        (q_min..=q_max).map(move |q| Hex::new(q, r))
    })
}

/// Compass direction on the hex grid.
///
/// Declaration order is the clockwise rotation cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    SouthEast = 2,
    South = 3,
    SouthWest = 4,
    NorthWest = 5,
}

/// Which way a direction selector turns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    fn delta(self) -> usize {
        match self {
            Rotation::Clockwise => 1,
            Rotation::CounterClockwise => Direction::COUNT - 1,
        }
    }
}

impl Direction {
    pub const COUNT: usize = 6;

    /// Clockwise cycle starting at North
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Position in the clockwise cycle
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Direction {
        Self::ALL[index % Self::COUNT]
    }

    /// Unit offset in axial coordinates
    pub fn offset(self) -> Hex {
        match self {
            Direction::North => Hex::new(0, -1),
            Direction::NorthEast => Hex::new(1, -1),
            Direction::SouthEast => Hex::new(1, 0),
            Direction::South => Hex::new(0, 1),
            Direction::SouthWest => Hex::new(-1, 1),
            Direction::NorthWest => Hex::new(-1, 0),
        }
    }

    /// One step around the cycle
    pub fn rotated(self, rotation: Rotation) -> Direction {
        Self::from_index(self.index() + rotation.delta())
    }

    /// Shortest rotation bringing `self` to `target`, `None` if already there.
    /// Ties (opposite directions) turn clockwise.
    pub fn rotation_towards(self, target: Direction) -> Option<Rotation> {
        let clockwise_steps = (target.index() + Self::COUNT - self.index()) % Self::COUNT;
        match clockwise_steps {
            0 => None,
            1..=3 => Some(Rotation::Clockwise),
            _ => Some(Rotation::CounterClockwise),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::NorthEast => "NorthEast",
            Direction::SouthEast => "SouthEast",
            Direction::South => "South",
            Direction::SouthWest => "SouthWest",
            Direction::NorthWest => "NorthWest",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
