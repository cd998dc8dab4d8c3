use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::outline::ExportFormat;
use crate::outline::export::GraphDirection;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-outline",
    version,
    about = "Heading outline extraction and diagram export for PDF text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the outline in one format to stdout
    Render(RenderArgs),
    /// Write outline files and an export manifest to a directory
    Export(ExportArgs),
    /// List the lines recognised as headings
    Headings(HeadingsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// PDF or text file to read; a `.pdf` extension selects pdftotext extraction
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Document text; used as the fallback when PDF extraction fails
    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub max_pages: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutlineArgs {
    /// Deepest heading level shown (defaults to the config value, 2)
    #[arg(long, short = 'L')]
    pub depth: Option<usize>,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Label for the root node
    #[arg(long)]
    pub title: Option<String>,

    /// Treat short lines ending in a colon as level-1 headings
    #[arg(long, default_value_t = false)]
    pub colon_headings: bool,

    #[arg(long, value_enum)]
    pub direction: Option<GraphDirection>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub outline: OutlineArgs,

    #[arg(long, value_enum, default_value_t = ExportFormat::Outline)]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub outline: OutlineArgs,

    #[arg(long, default_value = "outline-export")]
    pub out_dir: PathBuf,

    /// Formats to write; all formats when omitted
    #[arg(long = "format", value_enum)]
    pub formats: Vec<ExportFormat>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum HeadingsOutput {
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct HeadingsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub colon_headings: bool,

    #[arg(long, value_enum, default_value_t = HeadingsOutput::Text)]
    pub output: HeadingsOutput,
}
