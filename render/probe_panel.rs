/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Probe control panel.
//!
//! Renders the benchmark controls and the last result. The panel emits
//! [`ProbePanelAction`]s instead of touching the probe directly, keeping
//! the run/abort plumbing testable without an egui rendering context.

use egui::Ui;

use crate::probe::ProbeResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbePanelAction {
    RunRequested,
    AbortRequested,
}

/// Panel inputs for one frame.
pub struct ProbePanelState<'a> {
    pub running: bool,
    pub last_result: Option<&'a ProbeResult>,
}

pub fn fps_line(result: &ProbeResult) -> String {
    format!("Average FPS: {:.2}", result.average_fps)
}

pub fn duration_line(result: &ProbeResult) -> String {
    format!("Interaction: {:.2} ms", result.interaction_duration_ms)
}

/// Draw the panel, returning any actions the user triggered.
pub fn show(ui: &mut Ui, state: &ProbePanelState<'_>) -> Vec<ProbePanelAction> {
    let mut actions = Vec::new();

    ui.heading("Interaction benchmark");
    ui.label("Scripted diagonal drag across the graph canvas.");
    ui.separator();

    ui.horizontal(|ui| {
        let run = ui.add_enabled(!state.running, egui::Button::new("Run test"));
        if run.clicked() {
            actions.push(ProbePanelAction::RunRequested);
        }
        if state.running {
            ui.spinner();
            if ui.button("Abort").clicked() {
                actions.push(ProbePanelAction::AbortRequested);
            }
        }
    });

    if state.running {
        ui.label("Running test\u{2026}");
    } else if let Some(result) = state.last_result {
        ui.separator();
        ui.monospace(fps_line(result));
        ui.monospace(duration_line(result));
        if ui.button("Copy JSON").clicked()
            && let Ok(json) = result.to_json()
        {
            ui.ctx().copy_text(json);
        }
    } else {
        ui.weak("No run yet.");
    }

    actions
}
