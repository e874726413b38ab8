//! Candidate model shared by extraction, scoring, ranking, and the wire.
//!
//! A [`Candidate`] lives for one extraction pass and is discarded when the
//! request completes. The [`ElementHandle`] inside it is non-owning: the
//! element it points at may leave the page, so consumers re-resolve by `href`
//! when the handle goes stale.

use serde::{Deserialize, Serialize};

use crate::constants::{CANDIDATE_TEXT_MAX_CHARS, CONFIDENCE_FULL_SCORE, DEDUP_TEXT_PREFIX};

/// What kind of page element a candidate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Link,
    Button,
    Heading,
}

impl CandidateKind {
    /// Wire/prompt spelling of the kind.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::Link => "link",
            CandidateKind::Button => "button",
            CandidateKind::Heading => "heading",
        }
    }
}

impl std::fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse structural classification of where a candidate lives on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Nav,
    Header,
    Footer,
    Upper,
    Body,
}

impl Region {
    /// Structural score bonus. Navigation chrome is where answers to
    /// short way-finding queries usually live; footers are penalized.
    #[inline]
    pub fn bonus(&self) -> i32 {
        match self {
            Region::Nav => 11,
            Region::Header => 6,
            Region::Upper => 4,
            Region::Body => 0,
            Region::Footer => -5,
        }
    }
}

/// Opaque slot into the [`PageDocument`](crate::extract::PageDocument) that
/// produced a candidate. Handles are assigned in scan order and never outlive
/// the document; a handle whose element left the page resolves to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub(crate) usize);

impl ElementHandle {
    /// Slot index, for embedders that key geometry or highlight state by slot.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A page element eligible for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub kind: CandidateKind,
    /// Readable label: trimmed, whitespace-collapsed, capped at 240 chars.
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub region: Region,
    /// Live reference into the scanned page; absent for wire-received
    /// candidates.
    #[serde(skip)]
    pub element: Option<ElementHandle>,
}

impl Candidate {
    /// Builds a candidate, normalizing `text` on the way in.
    pub fn new(
        kind: CandidateKind,
        text: impl AsRef<str>,
        href: Option<String>,
        region: Region,
    ) -> Self {
        Self {
            kind,
            text: normalize_text(text.as_ref()),
            href,
            region,
            element: None,
        }
    }

    /// Identity key for de-duplication: `(kind, href, first 60 chars of text)`.
    pub fn dedup_key(&self) -> (CandidateKind, Option<String>, String) {
        (
            self.kind,
            self.href.clone(),
            char_prefix(&self.text, DEDUP_TEXT_PREFIX).to_string(),
        )
    }
}

/// A candidate annotated with its heuristic score.
///
/// Scores are unbounded integer heuristic units, not probabilities; see
/// [`confidence_percent`](ScoredCandidate::confidence_percent) for the
/// display-only mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: i32,
}

impl ScoredCandidate {
    /// Display-only confidence: the score as a fraction of a nominal
    /// full-confidence score of 35, clamped to `[0, 100]`.
    pub fn confidence_percent(&self) -> u8 {
        let percent = (self.score as i64 * 100) / CONFIDENCE_FULL_SCORE as i64;
        percent.clamp(0, 100) as u8
    }
}

/// Trims, collapses internal whitespace, and caps at 240 chars.
pub fn normalize_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    char_prefix(&collapsed, CANDIDATE_TEXT_MAX_CHARS).to_string()
}

/// First `n` chars of `s`, cut on a char boundary.
pub(crate) fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
