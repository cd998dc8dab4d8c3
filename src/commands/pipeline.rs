use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cli::OutlineArgs;
use crate::extract::SourceText;
use crate::model::{OutlineConfig, OutlineCounts};
use crate::outline::export::ExportOptions;
use crate::outline::{
    HeadingCandidate, HeadingClassifier, OutlineNode, build_tree, classify_lines, normalize_lines,
};

/// Settings resolved from CLI flags over the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineSettings {
    pub depth: usize,
    pub colon_headings: bool,
    pub title: Option<String>,
    pub options: ExportOptions,
}

pub fn resolve_settings(config: &OutlineConfig, args: &OutlineArgs) -> Result<OutlineSettings> {
    let depth = args.depth.unwrap_or(config.default_depth);
    if depth == 0 || depth > config.max_depth {
        bail!(
            "depth must be between 1 and {} (got {})",
            config.max_depth,
            depth
        );
    }

    Ok(OutlineSettings {
        depth,
        colon_headings: args.colon_headings || config.colon_headings,
        title: args.title.clone().or_else(|| config.title.clone()),
        options: ExportOptions {
            indent_width: config.indent_width,
            direction: args.direction.unwrap_or(config.graph_direction),
        },
    })
}

/// One parse of a source document. `tree` is the full outline; views at any
/// depth are derived from it without reparsing.
#[derive(Debug, Clone)]
pub struct OutlineBuild {
    pub line_count: usize,
    pub candidates: Vec<HeadingCandidate>,
    pub tree: OutlineNode,
}

impl OutlineBuild {
    pub fn view(&self, depth: usize) -> OutlineNode {
        let view = self.tree.limit_depth(depth);
        debug!(
            depth,
            kept = view.node_count(),
            pruned = self.tree.node_count() - view.node_count(),
            "limited outline depth"
        );
        view
    }

    pub fn counts(&self, depth: usize) -> OutlineCounts {
        OutlineCounts {
            line_count: self.line_count,
            heading_count: self.candidates.len(),
            full_node_count: self.tree.node_count(),
            visible_node_count: self.view(depth).node_count(),
            full_height: self.tree.height(),
        }
    }
}

pub fn build_outline(source: &SourceText, settings: &OutlineSettings) -> Result<OutlineBuild> {
    let classifier = HeadingClassifier::new(settings.colon_headings)?;
    let lines = normalize_lines(&source.text);
    let candidates = classify_lines(&classifier, &lines);
    let tree = build_tree(&candidates).with_title(settings.title.as_deref());

    info!(
        lines = lines.len(),
        headings = candidates.len(),
        height = tree.height(),
        "built outline"
    );

    if candidates.is_empty() {
        info!("no headings found; outline contains only the root");
    }

    Ok(OutlineBuild {
        line_count: lines.len(),
        candidates,
        tree,
    })
}
