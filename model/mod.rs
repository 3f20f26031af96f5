/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Argument-graph data model.
//!
//! Core structures:
//! - `NodeTable`: flat id -> record lookup table, loaded from JSON
//! - `NodeRecord`: one argument node (category, summary, content, flags)
//! - `NodeCategory`: the argumentation role driving card styling
//!
//! Derivation of presentation-ready cards lives in [`card`]; this module
//! stays free of any UI types so it can be exercised headlessly.

pub mod card;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Argumentation role of a node. Unknown strings in source data fold
/// into `Other` rather than failing the whole table load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Question,
    Thesis,
    Antithesis,
    Synthesis,
    Reason,
    #[default]
    #[serde(other)]
    Other,
}

impl NodeCategory {
    /// Display label for badges and tooltips.
    pub fn label(&self) -> &'static str {
        match self {
            NodeCategory::Question => "Question",
            NodeCategory::Thesis => "Thesis",
            NodeCategory::Antithesis => "Antithesis",
            NodeCategory::Synthesis => "Synthesis",
            NodeCategory::Reason => "Reason",
            NodeCategory::Other => "Node",
        }
    }
}

/// One argument node as stored in the table. The node's id is the table
/// key, not a record field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "node_type", default)]
    pub category: NodeCategory,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    /// Terminal flag: the node was judged not to be a meaningful claim.
    #[serde(default)]
    pub nonsense: bool,
    /// Terminal flag: the node restates another node. Holds the id of
    /// the node it duplicates; the target may or may not be present in
    /// the table.
    #[serde(default)]
    pub identical_to: Option<String>,
    /// Optional encoded thumbnail (PNG or JPEG bytes). Decoded lazily
    /// by the render layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Vec<u8>>,
}

/// Flat lookup table of argument nodes keyed by string id. The JSON
/// form is the bare `id -> record` object, see [`NodeTable::from_json_str`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeTable {
    nodes: HashMap<String, NodeRecord>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from a JSON object of `id -> record`.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let nodes: HashMap<String, NodeRecord> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse node table: {}", e))?;
        Ok(Self { nodes })
    }

    pub fn insert(&mut self, id: impl Into<String>, record: NodeRecord) {
        self.nodes.insert(id.into(), record);
    }

    pub fn get(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids in stable (sorted) order, for deterministic layout and tests.
    pub fn sorted_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Follow the `identical_to` chain from `start`, inclusive. Stops at
    /// the first id that is absent from the table or already visited, so
    /// cyclic identity data cannot loop.
    pub fn identity_chain(&self, start: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = start.to_string();
        while self.contains(&current) && !chain.contains(&current) {
            chain.push(current.clone());
            match self.get(&current).and_then(|r| r.identical_to.clone()) {
                Some(next) => current = next,
                None => break,
            }
        }
        chain
    }
}
