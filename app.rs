/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application state for the card deck shell.
//!
//! Owns the node table, the selection/active-path state, the pannable
//! canvas, and the perf probe. All mutation goes through action
//! application methods so the interesting behavior runs headlessly in
//! tests; the `eframe::App` impl is a thin frame-loop adapter.

use std::collections::HashSet;

use egui::Vec2;
use euclid::default::{Point2D, Rect, Size2D};

use crate::model::NodeTable;
use crate::model::card::NodeCard;
use crate::probe::clock::MonotonicClock;
use crate::probe::gesture::{PointerEvent, PointerPhase, PointerSink};
use crate::probe::runner::PerfProbe;
use crate::probe::surface::SurfaceRegistry;
use crate::render::card_view::ThumbnailCache;
use crate::render::probe_panel::{self, ProbePanelAction, ProbePanelState};
use crate::render::{self, CanvasAction};

/// Registry name of the card canvas, the probe's drag target.
pub const GRAPH_CANVAS_SURFACE: &str = "graph-canvas";

/// Pannable canvas viewport. Implements [`PointerSink`] so scripted
/// probe gestures travel the same pan path as real drags.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanvasState {
    pub pan: Vec2,
    pointer_down: Option<Point2D<f32>>,
}

impl CanvasState {
    pub fn apply_drag_delta(&mut self, delta: Vec2) {
        self.pan += delta;
    }
}

impl PointerSink for CanvasState {
    fn dispatch_pointer(&mut self, event: PointerEvent) {
        match event.phase {
            PointerPhase::Begin => self.pointer_down = Some(event.position),
            PointerPhase::Move => {
                if let Some(previous) = self.pointer_down {
                    let delta = event.position - previous;
                    self.pan += Vec2::new(delta.x, delta.y);
                    self.pointer_down = Some(event.position);
                }
            }
            PointerPhase::End => self.pointer_down = None,
        }
    }
}

pub struct GraphDeckApp {
    pub table: NodeTable,
    pub selected: Option<String>,
    pub active_path: HashSet<String>,
    pub canvas: CanvasState,
    pub probe: PerfProbe<MonotonicClock>,
    pub surfaces: SurfaceRegistry,
    pub thumbnails: ThumbnailCache,
}

impl GraphDeckApp {
    pub fn from_table(table: NodeTable) -> Self {
        Self {
            table,
            selected: None,
            active_path: HashSet::new(),
            canvas: CanvasState::default(),
            probe: PerfProbe::new(MonotonicClock),
            surfaces: SurfaceRegistry::new(),
            thumbnails: ThumbnailCache::new(),
        }
    }

    /// Select `id`, lighting up its identity chain as the active path.
    /// Selecting the same node again clears the selection.
    pub fn select_node(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
            self.active_path.clear();
            return;
        }
        if !self.table.contains(id) {
            log::warn!("selection ignored for unknown node: {id}");
            return;
        }
        self.selected = Some(id.to_string());
        self.active_path = self.table.identity_chain(id).into_iter().collect();
    }

    /// Derive the presentation cards in stable order. With a selection
    /// in place, everything off the active path drops to the distant
    /// (half-size) tier.
    pub fn cards(&self) -> Vec<NodeCard> {
        let has_focus = self.selected.is_some();
        self.table
            .sorted_ids()
            .into_iter()
            .filter_map(|id| {
                let distant = has_focus && !self.active_path.contains(id);
                NodeCard::derive(id, &self.table, &self.active_path, distant)
            })
            .collect()
    }

    pub fn apply_canvas_actions(&mut self, actions: Vec<CanvasAction>) {
        for action in actions {
            match action {
                CanvasAction::NodeClicked(id) => self.select_node(&id),
            }
        }
    }

    pub fn apply_panel_actions(&mut self, actions: Vec<ProbePanelAction>) {
        for action in actions {
            match action {
                ProbePanelAction::RunRequested => {
                    // Failures are logged at the probe; the panel simply
                    // stays idle.
                    let _ = self.probe.start(GRAPH_CANVAS_SURFACE, &self.surfaces);
                }
                ProbePanelAction::AbortRequested => self.probe.abort(),
            }
        }
    }
}

impl eframe::App for GraphDeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.surfaces.begin_frame();
        self.probe.on_frame();
        self.probe.tick(&mut self.canvas);

        let running = self.probe.is_running();
        let last_result = self.probe.last_result();
        let panel_actions = egui::SidePanel::right("probe-panel")
            .default_width(220.0)
            .show(ctx, |ui| {
                let state = ProbePanelState {
                    running,
                    last_result: last_result.as_ref(),
                };
                probe_panel::show(ui, &state)
            })
            .inner;

        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let cards = self.cards();
                let (response, actions) =
                    render::show_canvas(ui, &cards, self.canvas.pan, &mut self.thumbnails);
                if response.dragged() {
                    self.canvas.apply_drag_delta(response.drag_delta());
                }
                let rect = response.rect;
                self.surfaces.register(
                    GRAPH_CANVAS_SURFACE,
                    Rect::new(
                        Point2D::new(rect.min.x, rect.min.y),
                        Size2D::new(rect.width(), rect.height()),
                    ),
                );
                actions
            })
            .inner;

        self.apply_canvas_actions(canvas_actions);
        self.apply_panel_actions(panel_actions);

        if self.probe.is_running() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeRecord;
    use crate::probe::gesture::{DragScript, GestureDriver};
    use euclid::default::Point2D;
    use std::time::{Duration, Instant};

    fn demo_table() -> NodeTable {
        let mut table = NodeTable::new();
        table.insert("a", NodeRecord::default());
        let mut b = NodeRecord::default();
        b.identical_to = Some("a".to_string());
        table.insert("b", b);
        table.insert("c", NodeRecord::default());
        table
    }

    #[test]
    fn test_click_selects_and_lights_identity_chain() {
        let mut app = GraphDeckApp::from_table(demo_table());
        app.apply_canvas_actions(vec![CanvasAction::NodeClicked("b".to_string())]);
        assert_eq!(app.selected.as_deref(), Some("b"));
        assert!(app.active_path.contains("b"));
        assert!(app.active_path.contains("a"));
        assert!(!app.active_path.contains("c"));
    }

    #[test]
    fn test_second_click_deselects() {
        let mut app = GraphDeckApp::from_table(demo_table());
        app.select_node("a");
        app.select_node("a");
        assert!(app.selected.is_none());
        assert!(app.active_path.is_empty());
    }

    #[test]
    fn test_unknown_click_is_ignored() {
        let mut app = GraphDeckApp::from_table(demo_table());
        app.select_node("ghost");
        assert!(app.selected.is_none());
    }

    #[test]
    fn test_off_path_cards_go_distant_when_focused() {
        let mut app = GraphDeckApp::from_table(demo_table());
        assert!(app.cards().iter().all(|c| !c.distant));
        app.select_node("b");
        let cards = app.cards();
        let by_id = |id: &str| cards.iter().find(|c| c.id == id).unwrap();
        assert!(!by_id("a").distant);
        assert!(!by_id("b").distant);
        assert!(by_id("c").distant);
    }

    #[test]
    fn test_scripted_drag_pans_the_canvas_by_the_full_delta() {
        let mut canvas = CanvasState::default();
        let script = DragScript::new(
            Point2D::new(100.0, 100.0),
            Point2D::new(400.0, 400.0),
            60,
            Duration::from_millis(16),
        );
        let base = Instant::now();
        let mut driver = GestureDriver::new(script, base);
        driver.tick(base + Duration::from_secs(2), &mut canvas);
        // Moves walk to (395, 395); the end event does not move.
        assert_eq!(canvas.pan, Vec2::new(295.0, 295.0));
        assert!(canvas.pointer_down.is_none());
    }

    #[test]
    fn test_move_without_begin_does_not_pan() {
        let mut canvas = CanvasState::default();
        canvas.dispatch_pointer(PointerEvent {
            phase: PointerPhase::Move,
            position: Point2D::new(50.0, 50.0),
        });
        assert_eq!(canvas.pan, Vec2::ZERO);
    }

    #[test]
    fn test_run_request_requires_a_registered_surface() {
        let mut app = GraphDeckApp::from_table(demo_table());
        app.apply_panel_actions(vec![ProbePanelAction::RunRequested]);
        assert!(!app.probe.is_running());

        app.surfaces.register(
            GRAPH_CANVAS_SURFACE,
            Rect::new(Point2D::new(0.0, 0.0), Size2D::new(800.0, 600.0)),
        );
        app.apply_panel_actions(vec![ProbePanelAction::RunRequested]);
        assert!(app.probe.is_running());

        app.apply_panel_actions(vec![ProbePanelAction::AbortRequested]);
        assert!(!app.probe.is_running());
    }
}
