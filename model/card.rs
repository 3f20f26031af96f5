/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Presentation-ready card derivation.
//!
//! A [`NodeCard`] is everything the render layer needs to draw one node,
//! computed up front from the [`NodeTable`]: category, truncated preview,
//! terminal status line, and the size/emphasis flags. Deriving it here
//! keeps the egui code a dumb painter and makes the styling rules
//! testable without a rendering context.

use std::collections::HashSet;

use super::{NodeCategory, NodeTable};

/// Content preview displayed in the card body under the summary.
pub const PREVIEW_MAX_CHARS: usize = 80;
/// Summaries quoted inside a terminal status line are clipped to this
/// many characters before the ellipsis.
pub const STATUS_SUMMARY_MAX_CHARS: usize = 25;
const STATUS_SUMMARY_KEEP_CHARS: usize = 22;
/// Unresolvable identity targets are named by an id prefix this long.
const STATUS_ID_PREFIX_CHARS: usize = 8;

/// Body content of a card, either prose or an ordered bullet list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardPreview {
    /// Plain prose, clipped to [`PREVIEW_MAX_CHARS`].
    Plain(String),
    /// Numbered bullets extracted from brace-delimited content segments.
    Bullets(Vec<String>),
}

/// One node, flattened for presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeCard {
    pub id: String,
    pub category: NodeCategory,
    pub summary: String,
    pub preview: CardPreview,
    /// Status line shown when the node is terminal (nonsense or a
    /// restatement of another node).
    pub terminal_status: Option<String>,
    pub nonsense: bool,
    pub identity: bool,
    /// Nodes far from the focus render at the half-size tier.
    pub distant: bool,
    pub in_active_path: bool,
    pub thumbnail: Option<Vec<u8>>,
}

impl NodeCard {
    /// Derive the card for `id`, or `None` if the table has no such node.
    pub fn derive(
        id: &str,
        table: &NodeTable,
        active_path: &HashSet<String>,
        distant: bool,
    ) -> Option<NodeCard> {
        let Some(record) = table.get(id) else {
            log::warn!("no node data for {id}; skipping card");
            return None;
        };
        Some(NodeCard {
            id: id.to_string(),
            category: record.category,
            summary: record.summary.clone(),
            preview: derive_preview(&record.content),
            terminal_status: terminal_status(record.nonsense, record.identical_to.as_deref(), table),
            nonsense: record.nonsense,
            identity: record.identical_to.is_some(),
            distant,
            in_active_path: active_path.contains(id),
            thumbnail: record.thumbnail.clone(),
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal_status.is_some()
    }
}

fn derive_preview(content: &str) -> CardPreview {
    let bullets = parse_bullets(content);
    if bullets.is_empty() {
        let preview = if content.chars().count() > PREVIEW_MAX_CHARS {
            format!("{}\u{2026}", clip_chars(content, PREVIEW_MAX_CHARS))
        } else {
            content.to_string()
        };
        CardPreview::Plain(preview)
    } else {
        CardPreview::Bullets(bullets)
    }
}

/// Extract `{...}` segments from content. A stray `{` restarts the
/// current segment rather than nesting, and unclosed braces contribute
/// nothing.
pub fn parse_bullets(content: &str) -> Vec<String> {
    let mut bullets = Vec::new();
    let mut segment: Option<String> = None;
    for ch in content.chars() {
        match ch {
            '{' => segment = Some(String::new()),
            '}' => {
                if let Some(text) = segment.take() {
                    bullets.push(text.trim().to_string());
                }
            }
            _ => {
                if let Some(text) = segment.as_mut() {
                    text.push(ch);
                }
            }
        }
    }
    bullets
}

/// Status line for terminal nodes. Nonsense wins over identity when a
/// record carries both flags.
fn terminal_status(
    nonsense: bool,
    identical_to: Option<&str>,
    table: &NodeTable,
) -> Option<String> {
    if nonsense {
        return Some("Nonsense".to_string());
    }
    let target = identical_to?;
    match table.get(target).filter(|r| !r.summary.is_empty()) {
        Some(record) => {
            let summary = if record.summary.chars().count() > STATUS_SUMMARY_MAX_CHARS {
                format!(
                    "{}\u{2026}",
                    clip_chars(&record.summary, STATUS_SUMMARY_KEEP_CHARS)
                )
            } else {
                record.summary.clone()
            };
            Some(format!("Identical to: {}", summary))
        }
        None => Some(format!(
            "Identical to Node {}\u{2026}",
            clip_chars(target, STATUS_ID_PREFIX_CHARS)
        )),
    }
}

fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeRecord;

    fn table_with(entries: &[(&str, NodeRecord)]) -> NodeTable {
        let mut table = NodeTable::new();
        for (id, record) in entries {
            table.insert(*id, record.clone());
        }
        table
    }

    fn plain_record(summary: &str, content: &str) -> NodeRecord {
        NodeRecord {
            summary: summary.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_missing_node_is_none() {
        let table = NodeTable::new();
        assert!(NodeCard::derive("ghost", &table, &HashSet::new(), false).is_none());
    }

    #[test]
    fn test_short_content_is_not_clipped() {
        let table = table_with(&[("n", plain_record("s", "short content"))]);
        let card = NodeCard::derive("n", &table, &HashSet::new(), false).unwrap();
        assert_eq!(card.preview, CardPreview::Plain("short content".to_string()));
    }

    #[test]
    fn test_long_content_is_clipped_to_preview_length() {
        let content = "x".repeat(200);
        let table = table_with(&[("n", plain_record("s", &content))]);
        let card = NodeCard::derive("n", &table, &HashSet::new(), false).unwrap();
        match card.preview {
            CardPreview::Plain(text) => {
                assert_eq!(text.chars().count(), PREVIEW_MAX_CHARS + 1);
                assert!(text.ends_with('\u{2026}'));
            }
            other => panic!("expected plain preview, got {:?}", other),
        }
    }

    #[test]
    fn test_braced_content_becomes_bullets() {
        let table = table_with(&[(
            "n",
            plain_record("s", "intro {first point} middle {second point} end"),
        )]);
        let card = NodeCard::derive("n", &table, &HashSet::new(), false).unwrap();
        assert_eq!(
            card.preview,
            CardPreview::Bullets(vec!["first point".to_string(), "second point".to_string()])
        );
    }

    #[test]
    fn test_stray_open_brace_restarts_segment() {
        assert_eq!(parse_bullets("{a {b}"), vec!["b".to_string()]);
        assert_eq!(parse_bullets("{never closed"), Vec::<String>::new());
        assert_eq!(parse_bullets("no braces at all"), Vec::<String>::new());
    }

    #[test]
    fn test_nonsense_status() {
        let mut record = plain_record("s", "c");
        record.nonsense = true;
        let table = table_with(&[("n", record)]);
        let card = NodeCard::derive("n", &table, &HashSet::new(), false).unwrap();
        assert_eq!(card.terminal_status.as_deref(), Some("Nonsense"));
        assert!(card.is_terminal());
    }

    #[test]
    fn test_identity_status_quotes_short_target_summary() {
        let mut dup = plain_record("d", "c");
        dup.identical_to = Some("orig".to_string());
        let table = table_with(&[("dup", dup), ("orig", plain_record("The original claim", "c"))]);
        let card = NodeCard::derive("dup", &table, &HashSet::new(), false).unwrap();
        assert_eq!(
            card.terminal_status.as_deref(),
            Some("Identical to: The original claim")
        );
        assert!(card.identity);
    }

    #[test]
    fn test_identity_status_clips_long_target_summary() {
        let mut dup = plain_record("d", "c");
        dup.identical_to = Some("orig".to_string());
        let long = "a very long summary that exceeds the clip threshold";
        let table = table_with(&[("dup", dup), ("orig", plain_record(long, "c"))]);
        let card = NodeCard::derive("dup", &table, &HashSet::new(), false).unwrap();
        let status = card.terminal_status.unwrap();
        assert!(status.starts_with("Identical to: "));
        let quoted = status.trim_start_matches("Identical to: ");
        // 22 kept characters plus the ellipsis.
        assert_eq!(quoted.chars().count(), 23);
        assert!(quoted.ends_with('\u{2026}'));
    }

    #[test]
    fn test_identity_target_with_empty_summary_falls_back_to_id_prefix() {
        let mut dup = plain_record("d", "c");
        dup.identical_to = Some("orig".to_string());
        let table = table_with(&[("dup", dup), ("orig", plain_record("", "c"))]);
        let card = NodeCard::derive("dup", &table, &HashSet::new(), false).unwrap();
        assert_eq!(
            card.terminal_status.as_deref(),
            Some("Identical to Node orig\u{2026}")
        );
    }

    #[test]
    fn test_identity_status_for_missing_target_uses_id_prefix() {
        let mut dup = plain_record("d", "c");
        dup.identical_to = Some("0123456789abcdef".to_string());
        let table = table_with(&[("dup", dup)]);
        let card = NodeCard::derive("dup", &table, &HashSet::new(), false).unwrap();
        assert_eq!(
            card.terminal_status.as_deref(),
            Some("Identical to Node 01234567\u{2026}")
        );
    }

    #[test]
    fn test_nonsense_wins_over_identity() {
        let mut record = plain_record("s", "c");
        record.nonsense = true;
        record.identical_to = Some("other".to_string());
        let table = table_with(&[("n", record), ("other", plain_record("o", "c"))]);
        let card = NodeCard::derive("n", &table, &HashSet::new(), false).unwrap();
        assert_eq!(card.terminal_status.as_deref(), Some("Nonsense"));
    }

    #[test]
    fn test_active_path_membership() {
        let table = table_with(&[("n", plain_record("s", "c"))]);
        let mut path = HashSet::new();
        path.insert("n".to_string());
        let card = NodeCard::derive("n", &table, &path, false).unwrap();
        assert!(card.in_active_path);
        let card = NodeCard::derive("n", &table, &HashSet::new(), true).unwrap();
        assert!(!card.in_active_path);
        assert!(card.distant);
    }
}
