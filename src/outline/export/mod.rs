//! Projections of an outline tree into external dialects.
//!
//! Every exporter walks the tree in pre-order and numbers nodes the same way
//! (root = `n0`), so diagram, graph and record output agree on node identity.

mod dot;
mod json;
mod mermaid;
mod records;
mod text;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::sanitize::LabelProfile;
use super::tree::OutlineNode;

pub use dot::to_dot;
pub use json::to_json;
pub use mermaid::to_mermaid;
pub use records::{FlatRecord, records_to_csv, records_to_json, to_records};
pub use text::to_outline_text;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Outline,
    Json,
    Mermaid,
    Dot,
    Records,
    RecordsCsv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Outline,
        ExportFormat::Json,
        ExportFormat::Mermaid,
        ExportFormat::Dot,
        ExportFormat::Records,
        ExportFormat::RecordsCsv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Json => "json",
            Self::Mermaid => "mermaid",
            Self::Dot => "dot",
            Self::Records => "records",
            Self::RecordsCsv => "records-csv",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Outline => "outline.txt",
            Self::Json => "outline.json",
            Self::Mermaid => "outline.mmd",
            Self::Dot => "outline.dot",
            Self::Records => "records.json",
            Self::RecordsCsv => "records.csv",
        }
    }

    /// Diagram dialects get the substitution table; everything else keeps the
    /// canonical labels.
    pub fn profile(self) -> LabelProfile {
        match self {
            Self::Mermaid | Self::Dot => LabelProfile::DIAGRAM_SAFE,
            Self::Outline | Self::Json | Self::Records | Self::RecordsCsv => {
                LabelProfile::IDENTITY
            }
        }
    }

    pub fn render(self, tree: &OutlineNode, options: &ExportOptions) -> Result<String> {
        let profile = self.profile();
        match self {
            Self::Outline => Ok(to_outline_text(tree, &profile, options.indent_width)),
            Self::Json => to_json(tree, &profile),
            Self::Mermaid => Ok(to_mermaid(tree, &profile, options.direction)),
            Self::Dot => Ok(to_dot(tree, &profile, options.direction)),
            Self::Records => records_to_json(&to_records(tree, &profile)),
            Self::RecordsCsv => Ok(records_to_csv(&to_records(tree, &profile))),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Serialize, Deserialize)]
pub enum GraphDirection {
    #[default]
    #[serde(rename = "TB")]
    #[value(name = "TB")]
    TopBottom,
    #[serde(rename = "LR")]
    #[value(name = "LR")]
    LeftRight,
    #[serde(rename = "BT")]
    #[value(name = "BT")]
    BottomTop,
    #[serde(rename = "RL")]
    #[value(name = "RL")]
    RightLeft,
}

impl GraphDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopBottom => "TB",
            Self::LeftRight => "LR",
            Self::BottomTop => "BT",
            Self::RightLeft => "RL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub indent_width: usize,
    pub direction: GraphDirection,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            direction: GraphDirection::TopBottom,
        }
    }
}

pub(crate) fn node_id(index: usize) -> String {
    format!("n{index}")
}

/// Visits nodes in pre-order with their pre-order index and parent index.
pub(crate) fn walk_preorder<'a>(
    root: &'a OutlineNode,
    visit: &mut impl FnMut(&'a OutlineNode, usize, Option<usize>),
) {
    fn step<'a>(
        node: &'a OutlineNode,
        id: usize,
        parent: Option<usize>,
        next: &mut usize,
        visit: &mut impl FnMut(&'a OutlineNode, usize, Option<usize>),
    ) {
        visit(node, id, parent);
        for child in &node.children {
            *next += 1;
            let child_id = *next;
            step(child, child_id, Some(id), next, visit);
        }
    }

    let mut next = 0usize;
    step(root, 0, None, &mut next, visit);
}
