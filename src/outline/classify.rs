use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use super::normalize::Line;

const BULLET_GLYPHS: &[char] = &[
    '-', '‐', '−', '–', '—', '・', '•', '●', '○', '◦', '▪', '■', '□', '*', '＊',
];

const COLON_HEADING_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ChapterMarker,
    AppendixMarker,
    DottedNumber,
    HyphenatedNumber,
    ParenthesizedNumber,
    ColonTerminated,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::ChapterMarker => "chapter_marker",
            RuleKind::AppendixMarker => "appendix_marker",
            RuleKind::DottedNumber => "dotted_number",
            RuleKind::HyphenatedNumber => "hyphenated_number",
            RuleKind::ParenthesizedNumber => "parenthesized_number",
            RuleKind::ColonTerminated => "colon_terminated",
        }
    }
}

/// A line recognised as a heading, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingCandidate {
    pub level: usize,
    pub label: String,
    pub order: usize,
    pub rule: RuleKind,
}

/// One entry of the priority list. `level` may reject a syntactic match by
/// returning `None`; `fallback_label` names the heading when nothing but the
/// marker is left on the line.
#[derive(Debug)]
struct HeadingRule {
    kind: RuleKind,
    pattern: Regex,
    level: fn(&Captures<'_>) -> Option<usize>,
    fallback_label: fn(&Captures<'_>, &str) -> String,
}

#[derive(Debug)]
pub struct HeadingClassifier {
    rules: Vec<HeadingRule>,
}

impl HeadingClassifier {
    /// Builds the fixed rule list. Rules are tried top to bottom and the first
    /// accepted match decides the line.
    pub fn new(colon_headings: bool) -> Result<Self> {
        let mut rules = vec![
            HeadingRule {
                kind: RuleKind::ChapterMarker,
                pattern: Regex::new(
                    r"^第\s*(?P<num>[0-9０-９]+|[〇一二三四五六七八九十百千]+)\s*(?P<unit>[章節])\s*[:：.．]?\s*(?P<label>.*)$",
                )
                .context("failed to compile chapter marker regex")?,
                level: chapter_level,
                fallback_label: numbered_fallback,
            },
            HeadingRule {
                kind: RuleKind::AppendixMarker,
                pattern: Regex::new(
                    r"^(?P<marker>付録|(?i:appendix)\b)(?:\s*(?P<designator>[A-Z0-9０-９]{1,2})(?:$|[\s:：.．]))?\s*[:：.．]?\s*(?P<label>.*)$",
                )
                .context("failed to compile appendix marker regex")?,
                level: level_one,
                fallback_label: appendix_fallback,
            },
            HeadingRule {
                kind: RuleKind::DottedNumber,
                pattern: Regex::new(
                    r"^(?P<num>\d{1,3}(?:[.．]\d{1,3})*)(?P<dot>[.．])?(?:(?:\s*:\s+|\s*：\s*|\s+)(?P<label>.*)|(?P<tail>[^\x00-\x7F）－‐].*))?$",
                )
                .context("failed to compile dotted number regex")?,
                level: dotted_level,
                fallback_label: numbered_fallback,
            },
            HeadingRule {
                kind: RuleKind::HyphenatedNumber,
                pattern: Regex::new(
                    r"^(?P<num>\d{1,3}[-－‐]\d{1,3})(?:\s+(?P<label>.*)|(?P<tail>[^\x00-\x7F].*))?$",
                )
                .context("failed to compile hyphenated number regex")?,
                level: level_two,
                fallback_label: numbered_fallback,
            },
            HeadingRule {
                kind: RuleKind::ParenthesizedNumber,
                pattern: Regex::new(
                    r"^(?:[(（](?P<enclosed>\d{1,3})[)）]|(?P<num>\d{1,3})[)）])\s*(?P<label>.*)$",
                )
                .context("failed to compile parenthesized number regex")?,
                level: level_two,
                fallback_label: numbered_fallback,
            },
        ];

        if colon_headings {
            rules.push(HeadingRule {
                kind: RuleKind::ColonTerminated,
                pattern: Regex::new(r"^(?P<label>.+?)\s*[:：]$")
                    .context("failed to compile colon heading regex")?,
                level: colon_level,
                fallback_label: colon_fallback,
            });
        }

        Ok(Self { rules })
    }

    pub fn classify(&self, line: &Line) -> Option<HeadingCandidate> {
        let text = line.text.trim();
        if text.is_empty() {
            return None;
        }

        for rule in &self.rules {
            let Some(captures) = rule.pattern.captures(text) else {
                continue;
            };
            let Some(level) = (rule.level)(&captures) else {
                continue;
            };

            let raw_label = captures
                .name("label")
                .or_else(|| captures.name("tail"))
                .map(|value| value.as_str())
                .unwrap_or_default();
            let mut label = clean_label(raw_label);
            if label.is_empty() {
                label = (rule.fallback_label)(&captures, text);
            } else if let Some(designator) = captures.name("designator") {
                label = format!("{} {label}", designator.as_str());
            }

            debug!(
                order = line.index,
                level,
                rule = rule.kind.as_str(),
                label = %label,
                "classified heading"
            );

            return Some(HeadingCandidate {
                level,
                label,
                order: line.index,
                rule: rule.kind,
            });
        }

        None
    }
}

/// Trims the label and strips any leading bullet glyphs.
pub(crate) fn clean_label(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(|character: char| {
            BULLET_GLYPHS.contains(&character) || character.is_whitespace()
        })
        .trim_end()
        .to_string()
}

fn level_one(_: &Captures<'_>) -> Option<usize> {
    Some(1)
}

fn level_two(_: &Captures<'_>) -> Option<usize> {
    Some(2)
}

fn chapter_level(captures: &Captures<'_>) -> Option<usize> {
    match captures.name("unit").map(|value| value.as_str()) {
        Some("章") => Some(1),
        Some("節") => Some(2),
        _ => None,
    }
}

fn dotted_level(captures: &Captures<'_>) -> Option<usize> {
    let num = captures.name("num")?.as_str();
    let components = num.split(['.', '．']).count();

    // "12月" is a date, "1.2概要" is a heading.
    if captures.name("tail").is_some() && components == 1 && captures.name("dot").is_none() {
        return None;
    }

    Some(components)
}

fn colon_level(captures: &Captures<'_>) -> Option<usize> {
    let label = captures.name("label")?.as_str();
    if label.chars().count() + 1 > COLON_HEADING_MAX_CHARS {
        return None;
    }

    let has_word = label.chars().any(|character| {
        character.is_ascii_alphanumeric()
            || ('\u{4E00}'..='\u{9FA5}').contains(&character)
            || ('\u{3041}'..='\u{3093}').contains(&character)
            || ('\u{30A1}'..='\u{30F3}').contains(&character)
    });
    has_word.then_some(1)
}

fn numbered_fallback(captures: &Captures<'_>, line: &str) -> String {
    let num = captures
        .name("num")
        .or_else(|| captures.name("enclosed"))
        .map(|value| value.as_str())
        .unwrap_or(line);
    format!("No. {num}")
}

fn colon_fallback(_: &Captures<'_>, line: &str) -> String {
    line.trim_end_matches([':', '：']).trim().to_string()
}

fn appendix_fallback(captures: &Captures<'_>, line: &str) -> String {
    let marker = captures
        .name("marker")
        .map(|value| value.as_str())
        .unwrap_or(line);
    match captures.name("designator") {
        Some(designator) if marker == "付録" => format!("{marker}{}", designator.as_str()),
        Some(designator) => format!("{marker} {}", designator.as_str()),
        None => marker.to_string(),
    }
}
