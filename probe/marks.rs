/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Paired start/end interaction timing marks.

use std::time::Instant;

use super::ProbeError;

/// One start/end mark pair. Ending without a start is a hard error
/// rather than a silent zero, so orchestration bugs surface immediately
/// instead of polluting results.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionMarks {
    start: Option<Instant>,
}

impl InteractionMarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the interaction start. A second call before `mark_end`
    /// moves the start forward.
    pub fn mark_start(&mut self, now: Instant) {
        self.start = Some(now);
    }

    /// Close the pair and return the elapsed interaction time in
    /// milliseconds. Consumes the start mark.
    pub fn mark_end(&mut self, now: Instant) -> Result<f64, ProbeError> {
        let start = self.start.take().ok_or(ProbeError::MissingStartMark)?;
        Ok(now.duration_since(start).as_secs_f64() * 1000.0)
    }

    pub fn is_open(&self) -> bool {
        self.start.is_some()
    }

    /// Drop any open start mark, e.g. when a run is aborted.
    pub fn clear(&mut self) {
        self.start = None;
    }
}
