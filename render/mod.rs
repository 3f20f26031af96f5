/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Canvas rendering for node cards.
//!
//! Lays the derived cards out on a pannable canvas and paints them via
//! [`card_view`]. Interactions come back as [`CanvasAction`]s, which
//! decouples click detection from click application (pure state
//! mutation) and keeps the latter testable without an egui rendering
//! context.

pub mod card_view;
pub mod probe_panel;

use egui::{Pos2, Rect, Response, Sense, Ui, Vec2, pos2};

use crate::model::card::NodeCard;
use card_view::{ThumbnailCache, card_size, draw_card};

/// Cards per grid row.
const GRID_COLUMNS: usize = 3;
const GRID_GAP: f32 = 18.0;
const GRID_MARGIN: f32 = 24.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CanvasAction {
    NodeClicked(String),
}

/// Rect for the card at `index` in the grid, in screen coordinates.
/// Distant cards shrink in place, centered in their grid cell.
pub fn card_rect(canvas: Rect, pan: Vec2, index: usize, distant: bool) -> Rect {
    let cell = card_size(false);
    let column = (index % GRID_COLUMNS) as f32;
    let row = (index / GRID_COLUMNS) as f32;
    let cell_min = pos2(
        canvas.min.x + GRID_MARGIN + column * (cell.x + GRID_GAP),
        canvas.min.y + GRID_MARGIN + row * (cell.y + GRID_GAP),
    ) + pan;
    let cell_rect = Rect::from_min_size(cell_min, cell);
    if distant {
        Rect::from_center_size(cell_rect.center(), card_size(true))
    } else {
        cell_rect
    }
}

/// Draw the card canvas. The returned response covers the whole canvas
/// (for drag panning); clicks on individual cards come back as actions.
pub fn show_canvas(
    ui: &mut Ui,
    cards: &[NodeCard],
    pan: Vec2,
    thumbnails: &mut ThumbnailCache,
) -> (Response, Vec<CanvasAction>) {
    let canvas = ui.available_rect_before_wrap();
    let response = ui.allocate_rect(canvas, Sense::drag());

    let mut actions = Vec::new();
    for (index, card) in cards.iter().enumerate() {
        let rect = card_rect(canvas, pan, index, card.distant);
        if !canvas.intersects(rect) {
            continue;
        }
        let card_response = draw_card(ui, rect, card, thumbnails);
        if card_response.clicked() {
            actions.push(CanvasAction::NodeClicked(card.id.clone()));
        }
    }
    (response, actions)
}

/// Hit-test the grid layout without a rendering context.
pub fn card_at(canvas: Rect, pan: Vec2, cards: &[NodeCard], point: Pos2) -> Option<usize> {
    // Later cards paint on top, so scan back to front.
    for (index, card) in cards.iter().enumerate().rev() {
        if card_rect(canvas, pan, index, card.distant).contains(point) {
            return Some(index);
        }
    }
    None
}
