use tracing::debug;

use super::classify::HeadingCandidate;

/// A node of the heading outline. The synthetic root sits at level 0 and every
/// child sits exactly one level below its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    pub label: String,
    pub level: usize,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn root() -> Self {
        Self {
            label: String::new(),
            level: 0,
            children: Vec::new(),
        }
    }

    /// Gives the root a document title so exporters emit it as a node.
    pub fn with_title(mut self, title: Option<&str>) -> Self {
        if let Some(title) = title.map(str::trim).filter(|value| !value.is_empty()) {
            self.label = title.to_string();
        }
        self
    }

    fn leaf(label: String, level: usize) -> Self {
        Self {
            label,
            level,
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// The label-less synthetic root is never rendered as a node of its own.
    pub fn is_emitted(&self) -> bool {
        !(self.is_root() && self.label.is_empty())
    }

    /// Number of headings below this node.
    pub fn node_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.node_count())
            .sum()
    }

    /// Deepest level present in the subtree.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(OutlineNode::height)
            .max()
            .unwrap_or(self.level)
    }

    /// Copy of the tree holding only nodes with `level <= depth`. Deeper nodes
    /// are dropped together with their subtrees.
    pub fn limit_depth(&self, depth: usize) -> OutlineNode {
        let children = if self.level < depth {
            self.children
                .iter()
                .map(|child| child.limit_depth(depth))
                .collect()
        } else {
            Vec::new()
        };

        OutlineNode {
            label: self.label.clone(),
            level: self.level,
            children,
        }
    }
}

/// Folds heading candidates into a tree using a stack of open nodes, one per
/// level. `stack[i]` always holds the open node at level `i`.
///
/// A candidate deeper than `stack.len()` (a level gap) attaches to the deepest
/// open node and takes the level directly below it.
pub fn build_tree(candidates: &[HeadingCandidate]) -> OutlineNode {
    let mut stack = vec![OutlineNode::root()];
    let mut absorbed_gaps = 0usize;

    for candidate in candidates {
        let requested = candidate.level.max(1);
        close_open_nodes(&mut stack, requested);

        let level = stack.len();
        if level != requested {
            absorbed_gaps += 1;
            debug!(
                order = candidate.order,
                requested,
                level,
                label = %candidate.label,
                "absorbed heading level gap"
            );
        }

        stack.push(OutlineNode::leaf(candidate.label.clone(), level));
    }

    close_open_nodes(&mut stack, 1);
    let root = stack.pop().unwrap_or_else(OutlineNode::root);

    debug!(
        headings = candidates.len(),
        absorbed_gaps,
        height = root.height(),
        "built outline tree"
    );
    root
}

/// Pops open nodes until the top sits at `level - 1` or shallower, attaching
/// each popped node to its parent.
fn close_open_nodes(stack: &mut Vec<OutlineNode>, level: usize) {
    while stack.len() > level {
        let Some(node) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                stack.push(node);
                break;
            }
        }
    }
}
