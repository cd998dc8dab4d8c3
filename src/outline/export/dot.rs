use super::super::sanitize::LabelProfile;
use super::super::tree::OutlineNode;
use super::{GraphDirection, node_id, walk_preorder};

/// Graphviz DOT source with one declaration per node and one edge per
/// parent/child pair. Identifiers come from pre-order position, never from
/// label text.
pub fn to_dot(root: &OutlineNode, profile: &LabelProfile, direction: GraphDirection) -> String {
    let mut lines = vec![
        "digraph outline {".to_string(),
        format!(
            "  graph [rankdir={}, bgcolor=\"white\"];",
            direction.as_str()
        ),
        "  node [shape=box, style=\"rounded,filled\", color=\"#444444\", fillcolor=\"white\", fontname=\"sans-serif\"];".to_string(),
        "  edge [color=\"#888888\"];".to_string(),
    ];
    let root_emitted = root.is_emitted();

    walk_preorder(root, &mut |node, id, parent| {
        if !node.is_emitted() {
            return;
        }
        lines.push(format!(
            "  {} [label=\"{}\"];",
            node_id(id),
            profile.apply(&node.label)
        ));
        if let Some(parent_id) = parent.filter(|value| *value != 0 || root_emitted) {
            lines.push(format!("  {} -> {};", node_id(parent_id), node_id(id)));
        }
    });

    lines.push("}".to_string());
    lines.join("\n")
}
