/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Card painting.
//!
//! Draws one [`NodeCard`] into an absolute rect on the canvas: category
//! frame, summary, content preview or bullets, thumbnail, and the
//! terminal status line. All styling decisions were already made during
//! card derivation; this module only maps them to shapes.

use std::collections::{HashMap, HashSet};

use egui::{
    Align2, Color32, ColorImage, Context, FontId, Rect, Response, Sense, Shape, Stroke,
    StrokeKind, TextureHandle, TextureId, Ui, pos2, vec2,
};
use image::load_from_memory;

use crate::model::NodeCategory;
use crate::model::card::{CardPreview, NodeCard};
use crate::util::truncate_with_ellipsis;

/// Full-size card footprint; distant cards render at half this size.
pub const CARD_SIZE: egui::Vec2 = egui::Vec2::new(190.0, 130.0);

const CORNER_RADIUS: f32 = 6.0;
const THUMBNAIL_EDGE: f32 = 28.0;
const PLACEHOLDER_EDGE: usize = 16;

/// Colors for one category of card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryStyle {
    pub border: Color32,
    pub fill: Color32,
    pub text: Color32,
}

/// Category palette: blue questions, green theses, red antitheses,
/// purple syntheses, yellow reasons, gray for everything else.
pub fn style_for(category: NodeCategory) -> CategoryStyle {
    match category {
        NodeCategory::Question => CategoryStyle {
            border: Color32::from_rgb(96, 150, 220),
            fill: Color32::from_rgb(28, 42, 64),
            text: Color32::from_gray(235),
        },
        NodeCategory::Thesis => CategoryStyle {
            border: Color32::from_rgb(110, 190, 130),
            fill: Color32::from_rgb(26, 52, 36),
            text: Color32::from_gray(235),
        },
        NodeCategory::Antithesis => CategoryStyle {
            border: Color32::from_rgb(215, 105, 95),
            fill: Color32::from_rgb(58, 30, 28),
            text: Color32::from_gray(235),
        },
        NodeCategory::Synthesis => CategoryStyle {
            border: Color32::from_rgb(165, 120, 215),
            fill: Color32::from_rgb(44, 32, 62),
            text: Color32::from_gray(235),
        },
        NodeCategory::Reason => CategoryStyle {
            border: Color32::from_rgb(210, 185, 95),
            fill: Color32::from_rgb(56, 48, 24),
            text: Color32::from_gray(235),
        },
        NodeCategory::Other => CategoryStyle {
            border: Color32::from_gray(120),
            fill: Color32::from_gray(38),
            text: Color32::from_gray(220),
        },
    }
}

pub fn card_size(distant: bool) -> egui::Vec2 {
    if distant { CARD_SIZE * 0.5 } else { CARD_SIZE }
}

/// Title line for a card; empty summaries get a stand-in.
pub fn display_summary(summary: &str) -> &str {
    if summary.is_empty() {
        "Untitled Node"
    } else {
        summary
    }
}

/// Decode thumbnail bytes into an egui image. `None` on any decode
/// failure or a degenerate image.
pub fn decode_thumbnail(bytes: &[u8]) -> Option<ColorImage> {
    let image = load_from_memory(bytes).ok()?.to_rgba8();
    let width = image.width() as usize;
    let height = image.height() as usize;
    if width == 0 || height == 0 {
        return None;
    }
    Some(ColorImage::from_rgba_unmultiplied([width, height], &image))
}

/// Neutral checker shown when a card has no usable thumbnail.
pub fn placeholder_image() -> ColorImage {
    let mut rgba = Vec::with_capacity(PLACEHOLDER_EDGE * PLACEHOLDER_EDGE * 4);
    for y in 0..PLACEHOLDER_EDGE {
        for x in 0..PLACEHOLDER_EDGE {
            let shade: u8 = if (x / 4 + y / 4) % 2 == 0 { 70 } else { 95 };
            rgba.extend_from_slice(&[shade, shade, shade, 255]);
        }
    }
    ColorImage::from_rgba_unmultiplied([PLACEHOLDER_EDGE, PLACEHOLDER_EDGE], &rgba)
}

/// Per-card texture cache. A card whose bytes fail to decode falls back
/// to the placeholder exactly once and is never re-decoded after that.
#[derive(Default)]
pub struct ThumbnailCache {
    textures: HashMap<String, TextureHandle>,
    fallback_applied: HashSet<String>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `card`, uploading on first use.
    pub fn texture_for(&mut self, ctx: &Context, card: &NodeCard) -> TextureId {
        if let Some(handle) = self.textures.get(&card.id) {
            return handle.id();
        }
        let image = match card.thumbnail.as_deref() {
            Some(bytes) if !self.fallback_applied.contains(&card.id) => {
                match decode_thumbnail(bytes) {
                    Some(image) => image,
                    None => {
                        log::debug!("thumbnail decode failed for node {}, using placeholder", card.id);
                        self.fallback_applied.insert(card.id.clone());
                        placeholder_image()
                    }
                }
            }
            _ => placeholder_image(),
        };
        let handle = ctx.load_texture(
            format!("card-thumbnail-{}", card.id),
            image,
            Default::default(),
        );
        let id = handle.id();
        self.textures.insert(card.id.clone(), handle);
        id
    }

    pub fn used_fallback(&self, card_id: &str) -> bool {
        self.fallback_applied.contains(card_id)
    }

    /// Forget uploaded textures, e.g. after the table is reloaded.
    /// Fallback latches survive so broken thumbnails stay latched.
    pub fn evict_textures(&mut self) {
        self.textures.clear();
    }
}

/// Paint `card` into `rect` and report interaction.
pub fn draw_card(ui: &mut Ui, rect: Rect, card: &NodeCard, thumbnails: &mut ThumbnailCache) -> Response {
    let response = ui.interact(rect, ui.id().with(&card.id), Sense::click());
    let style = style_for(card.category);

    // Nonsense cards render dimmed, matching their dead-end status.
    let dim = if card.nonsense { 0.55 } else { 1.0 };
    let fill = style.fill.gamma_multiply(dim);
    let border = style.border.gamma_multiply(dim);
    let text = style.text.gamma_multiply(dim);

    let painter = ui.painter_at(rect.expand(4.0));
    painter.rect_filled(rect, CORNER_RADIUS, fill);
    let border_width = if response.hovered() { 2.5 } else { 1.5 };
    painter.rect_stroke(
        rect,
        CORNER_RADIUS,
        Stroke::new(border_width, border),
        StrokeKind::Inside,
    );
    if card.in_active_path {
        painter.rect_stroke(
            rect.expand(3.0),
            CORNER_RADIUS,
            Stroke::new(2.0, Color32::from_rgb(255, 200, 100)),
            StrokeKind::Outside,
        );
    }

    let distant = card.distant;
    let padding = if distant { 5.0 } else { 8.0 };
    let title_font = FontId::proportional(if distant { 10.0 } else { 14.0 });
    let body_font = FontId::proportional(if distant { 8.0 } else { 11.0 });
    let mut cursor = pos2(rect.min.x + padding, rect.min.y + padding);

    // Category badge line.
    painter.text(
        cursor,
        Align2::LEFT_TOP,
        card.category.label(),
        FontId::proportional(if distant { 7.0 } else { 10.0 }),
        border,
    );
    cursor.y += if distant { 9.0 } else { 14.0 };

    // Summary, clipped to the card width.
    let title_chars = if distant { 14 } else { 24 };
    painter.text(
        cursor,
        Align2::LEFT_TOP,
        truncate_with_ellipsis(display_summary(&card.summary), title_chars),
        title_font,
        text,
    );
    cursor.y += if distant { 12.0 } else { 20.0 };

    // Thumbnail sits in the top-right corner of full-size cards; cards
    // without bytes get the placeholder so the column is always present.
    if !distant {
        let edge = THUMBNAIL_EDGE;
        let thumb_rect = Rect::from_min_size(
            pos2(rect.max.x - edge - padding, rect.min.y + padding),
            vec2(edge, edge),
        );
        let texture = thumbnails.texture_for(ui.ctx(), card);
        painter.image(
            texture,
            thumb_rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE.gamma_multiply(dim),
        );
    }

    // Distant cards carry the badge and summary only.
    if !distant {
        match &card.preview {
            CardPreview::Plain(content) if !content.is_empty() => {
                for line in wrap_chars(content, 34).into_iter().take(3) {
                    painter.text(cursor, Align2::LEFT_TOP, line, body_font.clone(), text);
                    cursor.y += 13.0;
                }
            }
            CardPreview::Plain(_) => {}
            CardPreview::Bullets(bullets) => {
                for (index, bullet) in bullets.iter().take(3).enumerate() {
                    let line = format!("{}. {}", index + 1, truncate_with_ellipsis(bullet, 30));
                    painter.text(cursor, Align2::LEFT_TOP, line, body_font.clone(), text);
                    cursor.y += 13.0;
                }
            }
        }
    }

    if let Some(status) = &card.terminal_status {
        let status_pos = pos2(rect.min.x + padding, rect.max.y - padding);
        painter.text(
            status_pos,
            Align2::LEFT_BOTTOM,
            status,
            FontId::proportional(if distant { 7.0 } else { 10.0 }),
            Color32::from_gray(170).gamma_multiply(dim),
        );
    }

    // Identity cards get a dashed accent along the bottom edge.
    if card.identity && !card.nonsense {
        let y = rect.max.y - 2.0;
        painter.extend(Shape::dashed_line(
            &[pos2(rect.min.x + 4.0, y), pos2(rect.max.x - 4.0, y)],
            Stroke::new(1.5, border),
            4.0,
            3.0,
        ));
    }

    response
}

/// Greedy character wrap. Good enough for monospace-ish previews; the
/// painter clips anything that still overflows.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate_len = current.chars().count() + word.chars().count() + 1;
        if !current.is_empty() && candidate_len > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeRecord, NodeTable};
    use std::collections::HashSet as StdHashSet;

    #[test]
    fn test_each_category_has_a_distinct_border() {
        let categories = [
            NodeCategory::Question,
            NodeCategory::Thesis,
            NodeCategory::Antithesis,
            NodeCategory::Synthesis,
            NodeCategory::Reason,
            NodeCategory::Other,
        ];
        let mut seen = Vec::new();
        for category in categories {
            let border = style_for(category).border;
            assert!(!seen.contains(&border), "duplicate border for {category:?}");
            seen.push(border);
        }
    }

    #[test]
    fn test_distant_cards_are_half_size() {
        assert_eq!(card_size(true), card_size(false) * 0.5);
    }

    #[test]
    fn test_decode_rejects_garbage_bytes() {
        assert!(decode_thumbnail(&[0, 1, 2, 3, 4]).is_none());
        assert!(decode_thumbnail(&[]).is_none());
    }

    #[test]
    fn test_placeholder_has_expected_size() {
        let image = placeholder_image();
        assert_eq!(image.size, [PLACEHOLDER_EDGE, PLACEHOLDER_EDGE]);
    }

    #[test]
    fn test_fallback_latches_after_first_decode_failure() {
        let ctx = Context::default();
        let mut cache = ThumbnailCache::new();
        let mut table = NodeTable::new();
        table.insert(
            "n",
            NodeRecord {
                thumbnail: Some(vec![0xde, 0xad, 0xbe, 0xef]),
                ..Default::default()
            },
        );
        let card =
            crate::model::card::NodeCard::derive("n", &table, &StdHashSet::new(), false).unwrap();

        let first = cache.texture_for(&ctx, &card);
        assert!(cache.used_fallback("n"));
        // Subsequent lookups reuse the cached placeholder texture.
        let second = cache.texture_for(&ctx, &card);
        assert_eq!(first, second);
        // Even after eviction the latch prevents another decode attempt.
        cache.evict_textures();
        cache.texture_for(&ctx, &card);
        assert!(cache.used_fallback("n"));
    }

    #[test]
    fn test_cards_without_thumbnails_get_a_cached_placeholder() {
        let ctx = Context::default();
        let mut cache = ThumbnailCache::new();
        let mut table = NodeTable::new();
        table.insert("n", NodeRecord::default());
        let card =
            crate::model::card::NodeCard::derive("n", &table, &StdHashSet::new(), false).unwrap();
        let first = cache.texture_for(&ctx, &card);
        // No decode ever failed, so the fallback latch stays clear.
        assert!(!cache.used_fallback("n"));
        // The placeholder texture is uploaded once and reused.
        assert_eq!(cache.texture_for(&ctx, &card), first);
    }

    #[test]
    fn test_empty_summary_falls_back_to_untitled() {
        assert_eq!(display_summary(""), "Untitled Node");
        assert_eq!(display_summary("Free will exists"), "Free will exists");
    }

    #[test]
    fn test_wrap_chars_respects_width() {
        let lines = wrap_chars("one two three four five six seven", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 11);
        }
        assert!(wrap_chars("", 10).is_empty());
    }
}
