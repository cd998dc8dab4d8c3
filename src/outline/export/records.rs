use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::super::sanitize::LabelProfile;
use super::super::tree::OutlineNode;
use super::{node_id, walk_preorder};

/// One visible node for sunburst/treemap style charts. `parent_id` is empty
/// for nodes without a rendered parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub id: String,
    pub parent_id: String,
    pub label: String,
}

pub fn to_records(root: &OutlineNode, profile: &LabelProfile) -> Vec<FlatRecord> {
    let root_emitted = root.is_emitted();
    let mut records = Vec::new();

    walk_preorder(root, &mut |node, id, parent| {
        if !node.is_emitted() {
            return;
        }
        let parent_id = parent
            .filter(|value| *value != 0 || root_emitted)
            .map(node_id)
            .unwrap_or_default();
        records.push(FlatRecord {
            id: node_id(id),
            parent_id,
            label: profile.apply(&node.label).into_owned(),
        });
    });

    records
}

pub fn records_to_json(records: &[FlatRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("failed to serialize flat records")
}

pub fn records_to_csv(records: &[FlatRecord]) -> String {
    let mut lines = vec!["id,parent_id,label".to_string()];
    for record in records {
        lines.push(format!(
            "{},{},{}",
            escape_csv_cell(&record.id),
            escape_csv_cell(&record.parent_id),
            escape_csv_cell(&record.label)
        ));
    }
    lines.join("\n")
}

fn escape_csv_cell(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains(['\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
