use std::borrow::Cow;

use anyhow::{Context, Result};
use serde::Serialize;

use super::super::sanitize::LabelProfile;
use super::super::tree::OutlineNode;

#[derive(Debug, Serialize)]
struct JsonNode<'a> {
    label: Option<Cow<'a, str>>,
    children: Vec<JsonNode<'a>>,
}

impl<'a> JsonNode<'a> {
    fn from_node(node: &'a OutlineNode, profile: &LabelProfile) -> Self {
        Self {
            label: node.is_emitted().then(|| profile.apply(&node.label)),
            children: node
                .children
                .iter()
                .map(|child| JsonNode::from_node(child, profile))
                .collect(),
        }
    }
}

/// Nested `{label, children}` objects. A label-less root serializes its label
/// as `null`.
pub fn to_json(root: &OutlineNode, profile: &LabelProfile) -> Result<String> {
    serde_json::to_string_pretty(&JsonNode::from_node(root, profile))
        .context("failed to serialize outline json")
}
