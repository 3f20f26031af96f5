/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! GraphDeck: argument-graph node cards with a built-in interaction
//! performance probe.
//!
//! - [`model`]: node table and presentation-card derivation
//! - [`render`]: egui canvas, card painting, probe panel
//! - [`probe`]: frame sampler, gesture driver, benchmark orchestrator
//! - [`app`]: the eframe shell tying the pieces together

pub mod app;
pub mod model;
pub mod probe;
pub mod render;
pub mod util;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
