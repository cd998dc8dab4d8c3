use std::borrow::Cow;

use tracing::debug;

/// Characters that end a line, besides the `\r\n` pair.
const LINE_BOUNDARIES: [char; 10] = [
    '\n', '\r', '\u{000B}', '\u{000C}', '\u{001C}', '\u{001D}', '\u{001E}', '\u{0085}',
    '\u{2028}', '\u{2029}',
];

/// One non-empty, trimmed line of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub index: usize,
    pub text: String,
}

/// Splits extracted text into trimmed, non-empty lines.
///
/// `\r\n`, lone `\r`, form feeds (page breaks from `pdftotext`) and the Unicode
/// line and paragraph separators all end a line. NUL bytes are dropped.
/// Internal spacing is kept as extracted.
pub fn normalize_lines(raw: &str) -> Vec<Line> {
    let unified: Cow<'_, str> = if raw.contains("\r\n") {
        Cow::Owned(raw.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(raw)
    };

    let mut lines = Vec::new();

    for (index, raw_line) in unified.split(LINE_BOUNDARIES).enumerate() {
        let cleaned = if raw_line.contains('\u{0000}') {
            raw_line.replace('\u{0000}', "")
        } else {
            raw_line.to_string()
        };

        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            continue;
        }

        lines.push(Line {
            index,
            text: trimmed.to_string(),
        });
    }

    debug!(lines = lines.len(), "normalized extracted text");
    lines
}
