//! Section Extractor: turns the free-text AI evaluation into labelled sections.
//!
//! The analysis text is loosely formatted: headers such as `OVERALL_SCORE: 85/100`
//! or `STRENGTHS:` followed by numbered lines. Extraction is a fold over the lines
//! with an explicit current-`Section` tag and a `ParsedSections` accumulator.
//! It never fails; anything it does not recognise is dropped.
//!
//! Known limitation: markers are matched by substring, so a list item that
//! literally contains `WEAKNESSES` (or any other marker) switches the section.

use serde::Serialize;

/// The section whose content is currently being accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    None,
    Score,
    Breakdown,
    Strengths,
    Weaknesses,
    Keywords,
    Consistency,
}

impl Section {
    /// Whether numbered lines under this section are collected as list items.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Section::Strengths | Section::Weaknesses | Section::Keywords
        )
    }
}

struct Marker {
    keyword: &'static str,
    section: Section,
    /// Header lines of this marker carry their value after the first colon.
    inline_value: bool,
}

/// Checked in order; the first marker contained in a line wins.
const MARKERS: &[Marker] = &[
    Marker {
        keyword: "OVERALL_SCORE",
        section: Section::Score,
        inline_value: true,
    },
    Marker {
        keyword: "SCORE_BREAKDOWN",
        section: Section::Breakdown,
        inline_value: true,
    },
    Marker {
        keyword: "STRENGTHS",
        section: Section::Strengths,
        inline_value: false,
    },
    Marker {
        keyword: "WEAKNESSES",
        section: Section::Weaknesses,
        inline_value: false,
    },
    Marker {
        keyword: "KEYWORD_SUGGESTIONS",
        section: Section::Keywords,
        inline_value: false,
    },
    Marker {
        keyword: "CONSISTENCY_CHECK",
        section: Section::Consistency,
        inline_value: true,
    },
];

/// Structured view of an AI analysis. Every field is empty when its marker is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSections {
    pub score: String,
    pub breakdown: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub keywords: Vec<String>,
    pub consistency: String,
}

impl ParsedSections {
    pub fn is_empty(&self) -> bool {
        self.score.is_empty()
            && self.breakdown.is_empty()
            && self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.keywords.is_empty()
            && self.consistency.is_empty()
    }
}

/// Classification of a single trimmed line given the active section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A marker line. `value` is `Some` for markers that carry an inline value
    /// (empty when the line has no colon).
    Header {
        section: Section,
        value: Option<&'a str>,
    },
    /// A numbered list entry, with its `N.` prefix removed.
    Item(&'a str),
    Ignored,
}

/// Transition table for one line. `line` is expected to be trimmed already.
pub fn classify_line(current: Section, line: &str) -> LineKind<'_> {
    if let Some(marker) = MARKERS.iter().find(|m| line.contains(m.keyword)) {
        let value = marker.inline_value.then(|| value_after_colon(line));
        return LineKind::Header {
            section: marker.section,
            value,
        };
    }

    if line.is_empty() || !current.is_list() {
        return LineKind::Ignored;
    }

    match strip_list_number(line) {
        Some(item) => LineKind::Item(item),
        None => LineKind::Ignored,
    }
}

/// Fold state: the active section plus everything collected so far.
#[derive(Debug, Default)]
struct Extractor {
    section: Section,
    parsed: ParsedSections,
}

impl Extractor {
    fn step(mut self, raw_line: &str) -> Self {
        match classify_line(self.section, raw_line.trim()) {
            LineKind::Header { section, value } => {
                self.section = section;
                if let Some(value) = value {
                    let value = value.to_string();
                    match section {
                        Section::Score => self.parsed.score = value,
                        Section::Breakdown => self.parsed.breakdown = value,
                        Section::Consistency => self.parsed.consistency = value,
                        _ => {}
                    }
                }
            }
            LineKind::Item(item) => {
                let item = item.to_string();
                match self.section {
                    Section::Strengths => self.parsed.strengths.push(item),
                    Section::Weaknesses => self.parsed.weaknesses.push(item),
                    Section::Keywords => self.parsed.keywords.push(item),
                    _ => {}
                }
            }
            LineKind::Ignored => {}
        }
        self
    }
}

/// Extracts labelled sections from an AI analysis text. Infallible.
pub fn extract(text: &str) -> ParsedSections {
    text.split('\n')
        .fold(Extractor::default(), Extractor::step)
        .parsed
}

/// Text after the first colon, trimmed. Later colons stay in the value.
fn value_after_colon(line: &str) -> &str {
    line.split_once(':')
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default()
}

/// Strips a leading `<digits>.` and any whitespace after it.
fn strip_list_number(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return None;
    }
    rest.strip_prefix('.').map(str::trim_start)
}
