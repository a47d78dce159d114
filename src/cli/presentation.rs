//! CLI presentation: text and json formatters for tree and chain output.

use crate::chain::MerkleChain;
use crate::error::{ApiError, StorageError};
use crate::tree::MerkleTree;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

fn to_pretty_json(value: &serde_json::Value) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(StorageError::IoError(e.into())))
}

fn section_title(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Root only, or a level table (leaves first) followed by the root
pub fn format_tree_text(tree: &MerkleTree, levels: bool) -> String {
    if !levels {
        return tree.root().to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Level", "Index", "Digest"]);
    for (level, row) in tree.levels().iter().enumerate() {
        for (index, digest) in row.iter().enumerate() {
            table.add_row(vec![level.to_string(), index.to_string(), digest.clone()]);
        }
    }

    format!(
        "{}\n{}\n\nRoot: {}",
        section_title(&format!("Merkle tree ({}, {} leaves)", tree.algorithm(), tree.len())),
        table,
        tree.root()
    )
}

pub fn format_tree_json(tree: &MerkleTree, levels: bool) -> Result<String, ApiError> {
    let mut out = json!({
        "algorithm": tree.algorithm().name(),
        "leaves": tree.len(),
        "depth": tree.depth(),
        "root": tree.root(),
    });
    if levels {
        out["levels"] = json!(tree.levels());
    }
    to_pretty_json(&out)
}

pub fn format_chain_text(chain: &MerkleChain) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Snapshot", "Values", "Root"]);
    for (index, node) in chain.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            node.data().len().to_string(),
            node.root().to_string(),
        ]);
    }

    format!(
        "{}\n{}\n\nGenesis: {}\nRoot: {}",
        section_title(&format!("Merkle chain ({} snapshots)", chain.len())),
        table,
        chain.genesis_at(),
        chain.root()
    )
}

pub fn format_chain_json(chain: &MerkleChain) -> Result<String, ApiError> {
    let snapshots: Vec<serde_json::Value> = chain
        .iter()
        .map(|node| {
            json!({
                "root": node.root(),
                "prev_root": node.prev_root(),
                "next_root": node.next_root(),
                "values": node.data(),
            })
        })
        .collect();
    to_pretty_json(&json!({
        "genesis_at": chain.genesis_at(),
        "root": chain.root(),
        "snapshots": snapshots,
    }))
}
