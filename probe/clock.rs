/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Injectable time source for the probe.
//!
//! The probe never calls `Instant::now()` directly; it reads time through
//! a [`ProbeClock`] so benchmark runs can be replayed step by step under
//! a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source. Implementations must never go backwards
/// between consecutive `now()` calls.
pub trait ProbeClock {
    fn now(&self) -> Instant;
}

/// The real wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl ProbeClock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced clock for deterministic replay. Cloning yields a handle
/// onto the same underlying instant, so a test can keep one handle while
/// the probe owns the other.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeClock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
