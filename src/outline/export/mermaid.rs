use super::super::sanitize::LabelProfile;
use super::super::tree::OutlineNode;
use super::{GraphDirection, node_id, walk_preorder};

/// Mermaid flowchart source. Nodes without a rendered parent are declared on
/// their own line; every other node appears on the edge line from its parent.
pub fn to_mermaid(root: &OutlineNode, profile: &LabelProfile, direction: GraphDirection) -> String {
    let mut lines = vec![format!("flowchart {}", direction.as_str())];
    let root_emitted = root.is_emitted();

    walk_preorder(root, &mut |node, id, parent| {
        if !node.is_emitted() {
            return;
        }
        let declaration = format!("{}[\"{}\"]", node_id(id), profile.apply(&node.label));
        match parent {
            Some(parent_id) if parent_id != 0 || root_emitted => {
                lines.push(format!("    {} --> {declaration}", node_id(parent_id)));
            }
            _ => lines.push(format!("    {declaration}")),
        }
    });

    lines.join("\n")
}
