//! Timer capability consumed by the automated-turn driver.
//!
//! The core never sleeps or spawns anything. A host implements [`Scheduler`]
//! on top of whatever timer facility it has and calls
//! [`Game::tick`](crate::Game::tick) each time a scheduled timer fires.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Identifies a repeating timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

pub trait Scheduler: fmt::Debug {
    /// Start firing every `interval` until cancelled
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    /// Stop a timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Scheduler for hosts that poll: it only records which timers are live.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<(TimerHandle, Duration)>,
    started: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live timers and their intervals
    pub fn active(&self) -> &[(TimerHandle, Duration)] {
        &self.active
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.active.iter().any(|&(h, _)| h == handle)
    }

    pub fn started(&self) -> usize {
        self.started
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.started += 1;
        self.active.push((handle, interval));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let before = self.active.len();
        self.active.retain(|&(h, _)| h != handle);
        if self.active.len() < before {
            self.cancelled += 1;
        }
    }
}

/// Lets a host keep a handle on the scheduler it gave to a game
impl<S: Scheduler> Scheduler for Rc<RefCell<S>> {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.borrow_mut().schedule_repeating(interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.borrow_mut().cancel(handle)
    }
}
