use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, warn};

use crate::cli::SourceArgs;
use crate::model::SourceSummary;
use crate::util::{non_whitespace_char_count, sha256_bytes};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SourceKind {
    Pdf,
    TextFile,
    Inline,
    Stdin,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::TextFile => "text_file",
            Self::Inline => "inline",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceText {
    pub kind: SourceKind,
    pub path: Option<PathBuf>,
    pub text: String,
    pub fallback_used: bool,
    pub warnings: Vec<String>,
}

impl SourceText {
    fn new(kind: SourceKind, path: Option<&Path>, text: String) -> Self {
        Self {
            kind,
            path: path.map(Path::to_path_buf),
            text,
            fallback_used: false,
            warnings: Vec::new(),
        }
    }

    pub fn summary(&self) -> SourceSummary {
        SourceSummary {
            kind: self.kind.as_str().to_string(),
            path: self.path.as_ref().map(|path| path.display().to_string()),
            sha256: sha256_bytes(self.text.as_bytes()),
            char_count: non_whitespace_char_count(&self.text),
            fallback_used: self.fallback_used,
        }
    }
}

/// Acquires document text from a PDF, a text file, inline text or stdin.
///
/// With a PDF input, `--text` acts as the fallback when extraction fails.
pub fn load_source(args: &SourceArgs) -> Result<SourceText> {
    let source = match (&args.input, &args.text) {
        (Some(path), fallback) if is_pdf_path(path) => {
            let extracted = extract_pdf_text(path, args.max_pages);
            resolve_pdf_extraction(path, extracted, fallback.as_deref())?
        }
        (Some(path), _) => {
            SourceText::new(SourceKind::TextFile, Some(path.as_path()), read_text_file(path)?)
        }
        (None, Some(text)) => SourceText::new(SourceKind::Inline, None, text.clone()),
        (None, None) => SourceText::new(SourceKind::Stdin, None, read_stdin()?),
    };

    info!(
        kind = source.kind.as_str(),
        path = %source.path.as_deref().map(|path| path.display().to_string()).unwrap_or_default(),
        chars = non_whitespace_char_count(&source.text),
        fallback_used = source.fallback_used,
        "loaded source text"
    );

    Ok(source)
}

/// Turns a PDF extraction outcome into source text, falling back to manually
/// supplied text when extraction failed or produced nothing.
pub fn resolve_pdf_extraction(
    path: &Path,
    extracted: Result<String>,
    fallback: Option<&str>,
) -> Result<SourceText> {
    let error = match extracted {
        Ok(text) if non_whitespace_char_count(&text) > 0 => {
            return Ok(SourceText::new(SourceKind::Pdf, Some(path), text));
        }
        Ok(_) => anyhow!("pdftotext produced no text for {}", path.display()),
        Err(error) => error,
    };

    let Some(fallback) = fallback.filter(|text| !text.trim().is_empty()) else {
        return Err(error).with_context(|| format!("no text available from {}", path.display()));
    };

    let message = format!(
        "PDF extraction failed for {}; using manually supplied text: {:#}",
        path.display(),
        error
    );
    warn!(path = %path.display(), error = %error, "falling back to manually supplied text");

    let mut source = SourceText::new(SourceKind::Inline, Some(path), fallback.to_string());
    source.fallback_used = true;
    source.warnings.push(message);
    Ok(source)
}

fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn extract_pdf_text(pdf_path: &Path, max_pages: Option<usize>) -> Result<String> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
    if let Some(max_pages) = max_pages {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    Ok(join_pages(&raw))
}

/// Joins form-feed separated pages with newlines, dropping NUL bytes and
/// trailing blank pages.
fn join_pages(raw: &str) -> String {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages.join("\n")
}

fn read_text_file(path: &Path) -> Result<String> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(decode_text(&raw))
}

fn read_stdin() -> Result<String> {
    let mut raw = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut raw)
        .context("failed to read text from stdin")?;
    Ok(decode_text(&raw))
}

fn decode_text(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.strip_prefix('\u{FEFF}')
        .unwrap_or(text.as_ref())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_pages_drops_trailing_blank_pages_and_nul_bytes() {
        let raw = "第1章 導入\n\u{000C}1.1 背\u{0000}景\n\u{000C}  \n\u{000C}";
        assert_eq!(join_pages(raw), "第1章 導入\n\n1.1 背景\n");
    }

    #[test]
    fn decode_text_replaces_invalid_utf8_and_strips_bom() {
        let mut raw = "\u{FEFF}1 概要\n".as_bytes().to_vec();
        raw.push(0xFF);
        let text = decode_text(&raw);
        assert!(text.starts_with("1 概要"));
        assert!(text.ends_with('\u{FFFD}'));
    }

    #[test]
    fn is_pdf_path_ignores_extension_case() {
        assert!(is_pdf_path(Path::new("report.PDF")));
        assert!(!is_pdf_path(Path::new("report.txt")));
        assert!(!is_pdf_path(Path::new("report")));
    }

    #[test]
    fn resolve_pdf_extraction_keeps_extracted_text() {
        let source = resolve_pdf_extraction(
            Path::new("doc.pdf"),
            Ok("1 概要".to_string()),
            Some("ignored"),
        )
        .expect("extraction should succeed");

        assert_eq!(source.kind, SourceKind::Pdf);
        assert_eq!(source.text, "1 概要");
        assert!(!source.fallback_used);
        assert!(source.warnings.is_empty());
    }

    #[test]
    fn resolve_pdf_extraction_falls_back_to_manual_text() {
        let source = resolve_pdf_extraction(
            Path::new("doc.pdf"),
            Err(anyhow!("failed to execute pdftotext")),
            Some("第1章 導入"),
        )
        .expect("fallback text should be used");

        assert_eq!(source.kind, SourceKind::Inline);
        assert_eq!(source.text, "第1章 導入");
        assert!(source.fallback_used);
        assert_eq!(source.warnings.len(), 1);
        assert!(source.summary().fallback_used);
    }

    #[test]
    fn resolve_pdf_extraction_treats_blank_output_as_failure() {
        let error = resolve_pdf_extraction(Path::new("scan.pdf"), Ok("  \n ".to_string()), None)
            .expect_err("blank extraction without fallback should fail");

        assert!(format!("{error:#}").contains("no text available from scan.pdf"));
    }
}
