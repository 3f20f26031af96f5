/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Desktop entry point: loads the bundled demo table and runs the shell.

use graphdeck::app::GraphDeckApp;
use graphdeck::model::NodeTable;

/// Small argument map exercising every card variant: categories,
/// bullets, terminal statuses, and an identity chain.
const DEMO_TABLE: &str = r#"{
    "q1": {
        "node_type": "question",
        "summary": "Does free will exist?",
        "content": "The central question under discussion."
    },
    "t1": {
        "node_type": "thesis",
        "summary": "Free will exists",
        "content": "{We experience deliberation directly} {Moral responsibility presupposes choice} {Determinism is unproven at the level of agents}"
    },
    "a1": {
        "node_type": "antithesis",
        "summary": "All events are physically determined",
        "content": "Every mental state supervenes on a physical state, and physical states evolve under closed dynamical laws, leaving no room for agent-level intervention in the causal order."
    },
    "s1": {
        "node_type": "synthesis",
        "summary": "Compatibilism",
        "content": "{Freedom as acting on one's own reasons} {Determinism constrains physics, not agency}"
    },
    "r1": {
        "node_type": "reason",
        "summary": "Introspection is unreliable",
        "content": "Experienced deliberation is weak evidence about underlying causation."
    },
    "x1": {
        "node_type": "thesis",
        "summary": "Humans choose freely",
        "identical_to": "t1",
        "content": "Restates the main thesis."
    },
    "x2": {
        "node_type": "reason",
        "summary": "Quantum woo",
        "nonsense": true,
        "content": "Indeterminacy somewhere implies freedom everywhere."
    },
    "x3": {
        "node_type": "thesis",
        "summary": "Orphaned duplicate",
        "identical_to": "deleted-node-1234",
        "content": "Points at a node no longer in the table."
    }
}"#;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let table = match NodeTable::from_json_str(DEMO_TABLE) {
        Ok(table) => table,
        Err(e) => {
            log::error!("demo table failed to load: {e}");
            NodeTable::new()
        }
    };
    log::info!("graphdeck {} starting with {} nodes", graphdeck::VERSION, table.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GraphDeck")
            .with_inner_size([1024.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "graphdeck",
        options,
        Box::new(move |_cc| Ok(Box::new(GraphDeckApp::from_table(table)))),
    )
}
