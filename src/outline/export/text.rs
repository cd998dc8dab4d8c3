use super::super::sanitize::LabelProfile;
use super::super::tree::OutlineNode;
use super::walk_preorder;

/// Indented outline, one node per line. Indentation grows by `indent_width`
/// spaces per level below the first rendered level.
pub fn to_outline_text(root: &OutlineNode, profile: &LabelProfile, indent_width: usize) -> String {
    let offset = if root.is_emitted() { 0 } else { 1 };
    let mut lines = Vec::new();

    walk_preorder(root, &mut |node, _, _| {
        if !node.is_emitted() {
            return;
        }
        let indent = " ".repeat(indent_width * (node.level - offset));
        lines.push(format!("{indent}{}", profile.apply(&node.label)));
    });

    lines.join("\n")
}
