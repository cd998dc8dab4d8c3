use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::RenderArgs;
use crate::extract::load_source;
use crate::model::OutlineConfig;
use crate::util::write_text_file;

use super::pipeline::{build_outline, resolve_settings};

pub fn run(args: RenderArgs) -> Result<()> {
    let config = OutlineConfig::load(args.outline.config.as_deref())?;
    let settings = resolve_settings(&config, &args.outline)?;
    let source = load_source(&args.source)?;

    let build = build_outline(&source, &settings)?;
    let view = build.view(settings.depth);
    let rendered = args.format.render(&view, &settings.options)?;

    info!(
        format = args.format.as_str(),
        profile = args.format.profile().name(),
        depth = settings.depth,
        nodes = view.node_count(),
        "rendered outline"
    );

    if let Some(path) = &args.output {
        write_text_file(path, &rendered)?;
        info!(path = %path.display(), "wrote rendered outline");
        return Ok(());
    }

    let mut output = io::BufWriter::new(io::stdout().lock());
    if !rendered.is_empty() {
        writeln!(output, "{rendered}").context("failed to write rendered outline")?;
    }
    output.flush()?;
    Ok(())
}
