/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Frame-rate sampling over one-second windows.
//!
//! The host frame loop reports each painted frame via [`FrameSampler::on_frame`];
//! the sampler counts frames and closes a window every time at least one
//! second has elapsed since the window opened, recording the count as one
//! FPS sample. The trailing partial window is dropped at stop, so short
//! runs bias toward complete windows rather than inflated tails.

use std::time::{Duration, Instant};

use crate::util::round2;

/// Windows close once this much time has elapsed since they opened.
pub const WINDOW_LENGTH: Duration = Duration::from_secs(1);

/// Frame counter with one-second sample windows. Inert until
/// [`start_tracking`](Self::start_tracking) arms it; disarming via
/// [`stop_tracking`](Self::stop_tracking) is idempotent and keeps the
/// collected samples readable.
#[derive(Clone, Debug, Default)]
pub struct FrameSampler {
    armed: bool,
    frames: u32,
    window_started: Option<Instant>,
    samples: Vec<u32>,
}

impl FrameSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the sampler. Re-arming restarts the frame counter and window
    /// boundary without touching samples already collected.
    pub fn start_tracking(&mut self, now: Instant) {
        self.armed = true;
        self.frames = 0;
        self.window_started = Some(now);
    }

    /// Count one painted frame. Ignored while disarmed.
    pub fn on_frame(&mut self, now: Instant) {
        if !self.armed {
            return;
        }
        let Some(window_started) = self.window_started else {
            return;
        };
        self.frames += 1;
        if now - window_started >= WINDOW_LENGTH {
            self.samples.push(self.frames);
            self.frames = 0;
            self.window_started = Some(now);
        }
    }

    /// Disarm. Frames counted in the unfinished window are dropped.
    pub fn stop_tracking(&mut self) {
        self.armed = false;
        self.frames = 0;
        self.window_started = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Mean of the collected window samples, rounded to two decimals.
    /// Zero when no window ever completed.
    pub fn average_fps(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: u32 = self.samples.iter().sum();
        round2(f64::from(total) / self.samples.len() as f64)
    }
}
