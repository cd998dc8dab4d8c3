use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{HeadingsArgs, HeadingsOutput};
use crate::extract::load_source;
use crate::model::OutlineConfig;
use crate::outline::{HeadingCandidate, HeadingClassifier, classify_text};

pub fn run(args: HeadingsArgs) -> Result<()> {
    let config = OutlineConfig::load(args.config.as_deref())?;
    let source = load_source(&args.source)?;
    let classifier = HeadingClassifier::new(args.colon_headings || config.colon_headings)?;
    let candidates = classify_text(&classifier, &source.text);

    info!(headings = candidates.len(), "classified headings");

    match args.output {
        HeadingsOutput::Json => write_json_response(&candidates),
        HeadingsOutput::Text => write_text_response(&candidates),
    }
}

fn write_json_response(candidates: &[HeadingCandidate]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, candidates)
        .context("failed to serialize headings json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_response(candidates: &[HeadingCandidate]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Headings: {}", candidates.len())?;
    for candidate in candidates {
        writeln!(
            output,
            "{}\tL{}\t{}\t{}",
            candidate.order + 1,
            candidate.level,
            candidate.rule.as_str(),
            candidate.label
        )?;
    }

    output.flush()?;
    Ok(())
}
