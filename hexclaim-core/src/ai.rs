//! Automated players: weighted direction policy and turn pacing

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PacingConfig;
use crate::hex::{Direction, Rotation};
use crate::player::Color;
use crate::scheduler::TimerHandle;

// ============================================================================
// POLICY
// ============================================================================

/// Pick a direction with probability proportional to its weight.
///
/// Zero-weight directions are never picked. Returns `None` when every
/// weight is zero (or the slice is empty).
pub fn choose_direction<R: Rng>(weights: &[(Direction, usize)], rng: &mut R) -> Option<Direction> {
    let dist = WeightedIndex::new(weights.iter().map(|&(_, w)| w)).ok()?;
    Some(weights[dist.sample(rng)].0)
}

// ============================================================================
// PACING
// ============================================================================

/// Where the driver is in its pacing sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverPhase {
    /// Ticks left before the selector starts turning
    Thinking(u32),
    /// Turning one step per tick towards the chosen direction
    Aligning(Direction),
    /// Ticks left before the turn is committed
    Confirming(u32),
    Done,
}

/// What the game should do for this tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverStep {
    Wait,
    Rotate(Rotation),
    Commit,
    /// Already committed; further ticks do nothing
    Finished,
}

/// Dials an automated player's selector in to a pre-chosen direction and
/// then commits exactly once.
#[derive(Clone, Debug)]
pub struct AutoTurnDriver {
    player: Color,
    target: Direction,
    phase: DriverPhase,
    confirm_ticks: u32,
    timer: TimerHandle,
}

impl AutoTurnDriver {
    pub fn new(player: Color, target: Direction, pacing: &PacingConfig, timer: TimerHandle) -> Self {
        Self {
            player,
            target,
            phase: DriverPhase::Thinking(pacing.think_ticks),
            confirm_ticks: pacing.confirm_ticks,
            timer,
        }
    }

    pub fn player(&self) -> Color {
        self.player
    }

    pub fn target(&self) -> Direction {
        self.target
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn timer(&self) -> TimerHandle {
        self.timer
    }

    /// Advance one tick given the selector's current direction
    pub fn tick(&mut self, current: Direction) -> DriverStep {
        loop {
            match self.phase {
                DriverPhase::Thinking(0) => self.phase = DriverPhase::Aligning(self.target),
                DriverPhase::Thinking(n) => {
                    self.phase = DriverPhase::Thinking(n - 1);
                    return DriverStep::Wait;
                }
                DriverPhase::Aligning(target) => match current.rotation_towards(target) {
                    Some(rotation) => return DriverStep::Rotate(rotation),
                    None => self.phase = DriverPhase::Confirming(self.confirm_ticks),
                },
                DriverPhase::Confirming(0) => {
                    self.phase = DriverPhase::Done;
                    return DriverStep::Commit;
                }
                DriverPhase::Confirming(n) => {
                    self.phase = DriverPhase::Confirming(n - 1);
                    return DriverStep::Wait;
                }
                DriverPhase::Done => return DriverStep::Finished,
            }
        }
    }
}
