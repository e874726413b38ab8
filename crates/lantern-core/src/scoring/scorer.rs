use tracing::debug;

use crate::candidate::{Candidate, CandidateKind, ScoredCandidate};
use crate::constants::{DEFAULT_MIN_SCORE, DEFAULT_TOP_N};

/// Domain vocabulary the heuristic rewards. A candidate touching one of
/// these earns +2; when the query itself also contains the keyword the
/// candidate earns a further +3 for vocabulary alignment.
pub const KEYWORDS: &[&str] = &[
    "portal",
    "login",
    "log in",
    "sign in",
    "signin",
    "account",
    "dashboard",
    "admissions",
    "apply",
    "application",
    "register",
    "registration",
    "billing",
    "pay",
    "tuition",
    "financial aid",
    "scholarship",
    "courses",
    "catalog",
    "schedule",
    "calendar",
    "library",
    "directory",
    "contact",
    "help",
    "support",
    "careers",
    "jobs",
    "news",
    "events",
    "map",
    "parking",
    "housing",
    "dining",
    "alumni",
    "athletics",
    "bookstore",
    "transcript",
    "grades",
    "email",
];

/// Labels that carry no information about where they lead.
const FILLER_PHRASES: &[&str] = &["click here", "read more", "learn more"];

/// Text length (chars) at or under which the concise-label bonus applies.
const SHORT_LABEL_MAX: usize = 30;
/// Text length (chars) above which the verbose-label penalty applies.
const LONG_LABEL_MIN: usize = 70;

/// Scores one candidate against a query. Pure and deterministic:
/// identical inputs always yield identical scores.
pub fn score(candidate: &Candidate, query: &str) -> i32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0;
    }

    let text = candidate.text.to_lowercase();
    let href = candidate
        .href
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();

    let mut points = 0i32;

    // Whole-query lexical overlap. An exact match collects both bonuses.
    if text == query {
        points += 22;
    }
    if text.contains(&query) {
        points += 14;
    }

    for word in query.split_whitespace() {
        if text == word {
            points += 7;
        } else if text.contains(word) {
            points += 5;
        }
        if href.contains(word) {
            points += 3;
        }
    }

    if href.contains(&query) {
        points += 7;
    }

    for keyword in KEYWORDS {
        if text.contains(keyword) || href.contains(keyword) {
            points += 2;
            if query.contains(keyword) {
                points += 3;
            }
        }
    }

    points += candidate.region.bonus();

    // Headings are weakly preferred as orientation cues.
    if candidate.kind == CandidateKind::Heading {
        points += 3;
    }

    let len = text.chars().count();
    if len > 0 && len <= SHORT_LABEL_MAX {
        points += 5;
    } else if len > LONG_LABEL_MIN {
        points -= 3;
    }

    if FILLER_PHRASES.iter().any(|phrase| text == *phrase) {
        points -= 2;
    }

    points
}

/// Ranks candidates with the default top-N (5) and acceptance threshold (8).
pub fn rank(candidates: &[Candidate], query: &str) -> Vec<ScoredCandidate> {
    rank_with(candidates, query, DEFAULT_TOP_N, DEFAULT_MIN_SCORE)
}

/// Scores, filters, and orders candidates.
///
/// Candidates scoring ≤ 0 are excluded outright; the rest are stably sorted
/// by descending score (ties keep extraction order), cut at the acceptance
/// threshold, and truncated to `top_n`. An empty result means "not found".
pub fn rank_with(
    candidates: &[Candidate],
    query: &str,
    top_n: usize,
    min_score: i32,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| ScoredCandidate {
            candidate: candidate.clone(),
            score: score(candidate, query),
        })
        .filter(|s| s.score > 0)
        .collect();

    // slice::sort_by is stable, so equal scores preserve extraction order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.retain(|s| s.score >= min_score);
    scored.truncate(top_n);

    debug!(
        query_len = query.len(),
        candidates = candidates.len(),
        results = scored.len(),
        "local ranking complete"
    );

    scored
}
