use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::cli::ExportArgs;
use crate::extract::load_source;
use crate::model::{ExportRunManifest, ExportedFile, OutlineConfig};
use crate::outline::ExportFormat;
use crate::util::{
    ensure_directory, now_utc_string, sha256_bytes, utc_compact_string, write_json_pretty,
    write_text_file,
};

use super::pipeline::{OutlineBuild, OutlineSettings, build_outline, resolve_settings};

const MANIFEST_FILE_NAME: &str = "export_manifest.json";

pub fn run(args: ExportArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("export-{}", utc_compact_string(started_ts));

    let config = OutlineConfig::load(args.outline.config.as_deref())?;
    let settings = resolve_settings(&config, &args.outline)?;
    let source = load_source(&args.source)?;

    info!(out_dir = %args.out_dir.display(), run_id = %run_id, "starting export");

    let build = build_outline(&source, &settings)?;
    let formats = selected_formats(&args.formats);
    let files = write_exports(&build, &settings, &formats, &args.out_dir)?;

    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| args.out_dir.join(MANIFEST_FILE_NAME));

    let manifest = ExportRunManifest {
        manifest_version: 1,
        run_id,
        started_at,
        completed_at: now_utc_string(),
        command: render_export_command(&args, &settings, &formats),
        depth: settings.depth,
        title: settings.title.clone(),
        source: source.summary(),
        counts: build.counts(settings.depth),
        files,
        warnings: source.warnings.clone(),
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote export manifest");
    info!(
        files = manifest.files.len(),
        headings = manifest.counts.heading_count,
        visible_nodes = manifest.counts.visible_node_count,
        "export completed"
    );

    Ok(())
}

/// Requested formats in declaration order without duplicates; all formats
/// when none were requested.
pub(super) fn selected_formats(requested: &[ExportFormat]) -> Vec<ExportFormat> {
    if requested.is_empty() {
        return ExportFormat::ALL.to_vec();
    }

    ExportFormat::ALL
        .into_iter()
        .filter(|format| requested.contains(format))
        .collect()
}

/// Renders every format from the same depth-limited view and writes each to
/// `out_dir` under its fixed file name.
pub(super) fn write_exports(
    build: &OutlineBuild,
    settings: &OutlineSettings,
    formats: &[ExportFormat],
    out_dir: &Path,
) -> Result<Vec<ExportedFile>> {
    ensure_directory(out_dir)?;
    let view = build.view(settings.depth);

    let mut files = Vec::with_capacity(formats.len());
    for format in formats {
        let rendered = format.render(&view, &settings.options)?;
        let path: PathBuf = out_dir.join(format.file_name());
        write_text_file(&path, &rendered)?;

        info!(format = format.as_str(), path = %path.display(), "wrote export");
        files.push(ExportedFile {
            format: *format,
            path: path.display().to_string(),
            sha256: sha256_bytes(rendered.as_bytes()),
        });
    }

    Ok(files)
}

fn render_export_command(
    args: &ExportArgs,
    settings: &OutlineSettings,
    formats: &[ExportFormat],
) -> String {
    let mut command = vec!["pdf-outline".to_string(), "export".to_string()];

    if let Some(input) = &args.source.input {
        command.push("--input".to_string());
        command.push(input.display().to_string());
    }
    if args.source.text.is_some() {
        command.push("--text".to_string());
        command.push("<inline>".to_string());
    }
    if let Some(max_pages) = args.source.max_pages {
        command.push("--max-pages".to_string());
        command.push(max_pages.to_string());
    }

    command.push("--depth".to_string());
    command.push(settings.depth.to_string());
    command.push("--direction".to_string());
    command.push(settings.options.direction.as_str().to_string());
    if settings.colon_headings {
        command.push("--colon-headings".to_string());
    }
    if let Some(config) = &args.outline.config {
        command.push("--config".to_string());
        command.push(config.display().to_string());
    }

    command.push("--out-dir".to_string());
    command.push(args.out_dir.display().to_string());
    for format in formats {
        command.push("--format".to_string());
        command.push(format.as_str().to_string());
    }

    command.join(" ")
}
