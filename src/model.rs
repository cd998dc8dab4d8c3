use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::outline::{DEFAULT_DEPTH, ExportFormat};
use crate::outline::export::GraphDirection;

pub const MAX_DEPTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub default_depth: usize,
    pub max_depth: usize,
    pub colon_headings: bool,
    pub indent_width: usize,
    pub title: Option<String>,
    pub graph_direction: GraphDirection,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            default_depth: DEFAULT_DEPTH,
            max_depth: MAX_DEPTH,
            colon_headings: false,
            indent_width: 2,
            title: None,
            graph_direction: GraphDirection::TopBottom,
        }
    }
}

impl OutlineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: OutlineConfig = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub kind: String,
    pub path: Option<String>,
    pub sha256: String,
    pub char_count: usize,
    pub fallback_used: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlineCounts {
    pub line_count: usize,
    pub heading_count: usize,
    pub full_node_count: usize,
    pub visible_node_count: usize,
    pub full_height: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub format: ExportFormat,
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub command: String,
    pub depth: usize,
    pub title: Option<String>,
    pub source: SourceSummary,
    pub counts: OutlineCounts,
    pub files: Vec<ExportedFile>,
    pub warnings: Vec<String>,
}
