//! Heading detection and outline construction for layout-degraded document text.
//!
//! Data flows one way: raw text is split into lines, each line is offered to
//! the [`HeadingClassifier`], the resulting [`HeadingCandidate`]s are folded into
//! an [`OutlineNode`] tree, and exporters project a depth-limited copy of that
//! tree into one of the [`ExportFormat`] dialects.

mod classify;
pub mod export;
mod normalize;
mod sanitize;
mod tree;


pub use classify::{HeadingCandidate, HeadingClassifier};
pub use export::ExportFormat;
pub use normalize::{Line, normalize_lines};
pub use tree::{OutlineNode, build_tree};

pub const DEFAULT_DEPTH: usize = 2;

/// Classifies every normalized line of `text`, keeping document order.
pub fn classify_text(classifier: &HeadingClassifier, text: &str) -> Vec<HeadingCandidate> {
    classify_lines(classifier, &normalize_lines(text))
}

pub fn classify_lines(classifier: &HeadingClassifier, lines: &[Line]) -> Vec<HeadingCandidate> {
    lines
        .iter()
        .filter_map(|line| classifier.classify(line))
        .collect()
}
