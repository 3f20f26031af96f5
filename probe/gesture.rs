/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Synthetic pointer gestures.
//!
//! A [`DragScript`] expands a start/end pair into a timed sequence of
//! pointer events; a [`GestureDriver`] replays that sequence against a
//! [`PointerSink`] as host ticks arrive. The driver never sleeps; a tick
//! that arrives late flushes every event that has come due, so replay
//! under a manual clock and replay against the real frame loop dispatch
//! the same events in the same order.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use euclid::default::Point2D;

/// Default number of interpolation steps for a scripted drag.
pub const DEFAULT_STEPS: u32 = 10;
/// Default spacing between scripted pointer events, one 60 Hz frame.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Begin,
    Move,
    End,
}

/// One synthetic pointer event in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point2D<f32>,
}

/// Receiver for synthetic pointer events. The graph canvas implements
/// this so scripted gestures travel the same path as real input.
pub trait PointerSink {
    fn dispatch_pointer(&mut self, event: PointerEvent);
}

#[derive(Clone, Copy, Debug)]
struct ScheduledEvent {
    offset: Duration,
    event: PointerEvent,
}

/// A begin/move/end drag between two points, interpolated linearly.
///
/// The script emits a begin at the start position, `steps` move events at
/// `start + k * (end - start) / steps` for `k` in `0..steps`, and an end
/// at the end position; each event is spaced `interval` after the
/// previous one, with the begin and the first move sharing time zero.
#[derive(Clone, Debug)]
pub struct DragScript {
    events: Vec<ScheduledEvent>,
}

impl DragScript {
    pub fn new(start: Point2D<f32>, end: Point2D<f32>, steps: u32, interval: Duration) -> Self {
        let mut events = Vec::with_capacity(steps as usize + 2);
        events.push(ScheduledEvent {
            offset: Duration::ZERO,
            event: PointerEvent {
                phase: PointerPhase::Begin,
                position: start,
            },
        });
        if steps > 0 {
            let delta = (end - start) / steps as f32;
            for k in 0..steps {
                events.push(ScheduledEvent {
                    offset: interval * k,
                    event: PointerEvent {
                        phase: PointerPhase::Move,
                        position: start + delta * k as f32,
                    },
                });
            }
        }
        events.push(ScheduledEvent {
            offset: interval * steps,
            event: PointerEvent {
                phase: PointerPhase::End,
                position: end,
            },
        });
        Self { events }
    }

    pub fn with_defaults(start: Point2D<f32>, end: Point2D<f32>) -> Self {
        Self::new(start, end, DEFAULT_STEPS, DEFAULT_INTERVAL)
    }

    /// Total scheduled playback time, begin to end.
    pub fn duration(&self) -> Duration {
        self.events.last().map(|e| e.offset).unwrap_or(Duration::ZERO)
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStatus {
    Running,
    Complete,
}

/// Replays a [`DragScript`] against a sink, one tick at a time.
#[derive(Debug)]
pub struct GestureDriver {
    pending: VecDeque<ScheduledEvent>,
    armed_at: Instant,
}

impl GestureDriver {
    /// Arm the script at `now`; event offsets are measured from here.
    pub fn new(script: DragScript, now: Instant) -> Self {
        Self {
            pending: script.events.into(),
            armed_at: now,
        }
    }

    /// Dispatch every event that has come due by `now`, in script order.
    pub fn tick(&mut self, now: Instant, sink: &mut dyn PointerSink) -> GestureStatus {
        while let Some(next) = self.pending.front() {
            if now < self.armed_at + next.offset {
                return GestureStatus::Running;
            }
            let due = self.pending.pop_front();
            if let Some(scheduled) = due {
                sink.dispatch_pointer(scheduled.event);
            }
        }
        GestureStatus::Complete
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}
