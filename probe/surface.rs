/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Named surface registry.
//!
//! The shell registers each probe-targetable surface (currently just the
//! graph canvas) with its screen rect every frame; the probe resolves
//! targets by name at start time. Re-registration replaces the previous
//! rect, so layout changes between frames are picked up automatically.

use std::collections::HashMap;

use euclid::default::Rect;

#[derive(Clone, Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, Rect<f32>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all registrations. Called at the top of each frame before
    /// surfaces re-register themselves.
    pub fn begin_frame(&mut self) {
        self.surfaces.clear();
    }

    pub fn register(&mut self, id: impl Into<String>, rect: Rect<f32>) {
        self.surfaces.insert(id.into(), rect);
    }

    pub fn resolve(&self, id: &str) -> Option<Rect<f32>> {
        self.surfaces.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
