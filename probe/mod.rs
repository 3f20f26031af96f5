/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Interaction performance probe.
//!
//! Measures how the shell holds up under a scripted pointer gesture:
//! - `sampler`: frame-rate sampling over one-second windows
//! - `marks`: paired start/end interaction timing marks
//! - `gesture`: synthetic pointer event scripts and the driver that
//!   replays them against a [`PointerSink`]
//! - `runner`: the orchestrator tying stabilization, gesture, and
//!   sampling into one benchmark run
//! - `surface`: name -> rect registry for resolving probe targets
//!
//! Everything here is driven by an injected [`clock::ProbeClock`] and a
//! host-owned tick, never by wall-clock sleeps, so a full run can be
//! replayed deterministically in tests.

pub mod clock;
pub mod gesture;
pub mod marks;
pub mod runner;
pub mod sampler;
pub mod surface;

use serde::Serialize;

pub use clock::{ManualClock, MonotonicClock, ProbeClock};
pub use gesture::{DragScript, GestureDriver, GestureStatus, PointerEvent, PointerPhase, PointerSink};
pub use marks::InteractionMarks;
pub use runner::PerfProbe;
pub use sampler::FrameSampler;
pub use surface::SurfaceRegistry;

/// Probe failure taxonomy. Callers decide whether to surface or log;
/// the probe itself already logs at the failure site.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("probe target surface not found: {id}")]
    SurfaceNotFound { id: String },
    #[error("a probe run is already in progress")]
    AlreadyRunning,
    #[error("interaction end marked without a matching start mark")]
    MissingStartMark,
}

/// Outcome of one completed benchmark run. Both figures are rounded to
/// two decimal places.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProbeResult {
    pub average_fps: f64,
    pub interaction_duration_ms: f64,
}

impl ProbeResult {
    /// Pretty JSON for copy/paste out of the probe panel.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize probe result: {}", e))
    }
}
