/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Benchmark orchestrator.
//!
//! One [`PerfProbe`] run is: resolve the target surface, arm the frame
//! sampler, wait out a stabilization delay so the run does not measure
//! its own button click, replay a fixed diagonal drag through the
//! gesture driver, then close the timing marks and record the result.
//! The probe is a state machine pumped by the host frame loop via
//! [`tick`](PerfProbe::tick) and [`on_frame`](PerfProbe::on_frame);
//! starting is rejected, not queued, while a run is in flight.

use std::time::{Duration, Instant};

use euclid::default::Point2D;

use super::clock::ProbeClock;
use super::gesture::{DragScript, GestureDriver, GestureStatus, PointerSink};
use super::marks::InteractionMarks;
use super::sampler::FrameSampler;
use super::surface::SurfaceRegistry;
use super::{ProbeError, ProbeResult};
use crate::util::round2;

/// Settle time between arming the sampler and the first pointer event.
pub const STABILIZATION: Duration = Duration::from_millis(500);
/// The scripted benchmark gesture: a diagonal drag across the canvas.
pub const DRAG_START: Point2D<f32> = Point2D::new(100.0, 100.0);
pub const DRAG_END: Point2D<f32> = Point2D::new(400.0, 400.0);
pub const DRAG_STEPS: u32 = 60;
pub const DRAG_INTERVAL: Duration = Duration::from_millis(16);

enum ProbePhase {
    Idle,
    Stabilizing { until: Instant },
    Dragging { driver: GestureDriver },
}

pub struct PerfProbe<C: ProbeClock> {
    clock: C,
    phase: ProbePhase,
    sampler: FrameSampler,
    marks: InteractionMarks,
    last_result: Option<ProbeResult>,
}

impl<C: ProbeClock> PerfProbe<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            phase: ProbePhase::Idle,
            sampler: FrameSampler::new(),
            marks: InteractionMarks::new(),
            last_result: None,
        }
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.phase, ProbePhase::Idle)
    }

    /// Result of the most recently completed run, surviving until the
    /// next run completes.
    pub fn last_result(&self) -> Option<ProbeResult> {
        self.last_result
    }

    /// Begin a run against the named surface. Fails if a run is already
    /// in flight or the surface is not registered this frame.
    pub fn start(
        &mut self,
        surface_id: &str,
        surfaces: &SurfaceRegistry,
    ) -> Result<(), ProbeError> {
        if self.is_running() {
            log::warn!("perf probe start rejected: a run is already in progress");
            return Err(ProbeError::AlreadyRunning);
        }
        let Some(rect) = surfaces.resolve(surface_id) else {
            log::error!("perf probe target surface not found: {surface_id}");
            return Err(ProbeError::SurfaceNotFound {
                id: surface_id.to_string(),
            });
        };
        log::info!("perf probe armed against '{surface_id}' ({rect:?})");
        let now = self.clock.now();
        self.sampler = FrameSampler::new();
        self.sampler.start_tracking(now);
        self.phase = ProbePhase::Stabilizing {
            until: now + STABILIZATION,
        };
        Ok(())
    }

    /// Report one painted frame to the sampler. No-op while idle.
    pub fn on_frame(&mut self) {
        if self.is_running() {
            let now = self.clock.now();
            self.sampler.on_frame(now);
        }
    }

    /// Advance the run. The host calls this once per frame; the sink
    /// receives whatever scripted pointer events have come due.
    pub fn tick(&mut self, sink: &mut dyn PointerSink) {
        let now = self.clock.now();
        match &mut self.phase {
            ProbePhase::Idle => return,
            ProbePhase::Stabilizing { until } => {
                if now < *until {
                    return;
                }
                self.marks.mark_start(now);
                let script = DragScript::new(DRAG_START, DRAG_END, DRAG_STEPS, DRAG_INTERVAL);
                self.phase = ProbePhase::Dragging {
                    driver: GestureDriver::new(script, now),
                };
                return;
            }
            ProbePhase::Dragging { driver } => {
                if driver.tick(now, sink) != GestureStatus::Complete {
                    return;
                }
            }
        }
        self.finish(now);
    }

    /// Cancel an in-flight run, keeping the previous result.
    pub fn abort(&mut self) {
        if self.is_running() {
            log::info!("perf probe run aborted");
        }
        self.sampler.stop_tracking();
        self.marks.clear();
        self.phase = ProbePhase::Idle;
    }

    fn finish(&mut self, now: Instant) {
        let duration_ms = match self.marks.mark_end(now) {
            Ok(duration) => duration,
            Err(e) => {
                // Unreachable through the normal phase sequence; fail the
                // run loudly rather than recording a bogus result.
                log::error!("perf probe finished in an inconsistent state: {e}");
                self.abort();
                return;
            }
        };
        self.sampler.stop_tracking();
        let result = ProbeResult {
            average_fps: self.sampler.average_fps(),
            interaction_duration_ms: round2(duration_ms),
        };
        log::info!(
            "perf probe complete: {:.2} fps avg, {:.2} ms interaction",
            result.average_fps,
            result.interaction_duration_ms
        );
        self.last_result = Some(result);
        self.phase = ProbePhase::Idle;
    }
}
