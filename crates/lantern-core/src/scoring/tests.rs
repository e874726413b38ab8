use super::*;
use crate::candidate::{Candidate, CandidateKind, Region};

fn link(text: &str, href: &str, region: Region) -> Candidate {
    Candidate::new(
        CandidateKind::Link,
        text,
        Some(href.to_string()),
        region,
    )
}

fn heading(text: &str) -> Candidate {
    Candidate::new(CandidateKind::Heading, text, None, Region::Body)
}

#[test]
fn test_score_is_idempotent() {
    let candidate = link("Student Portal", "/portal", Region::Nav);
    let first = score(&candidate, "portal");
    for _ in 0..10 {
        assert_eq!(score(&candidate, "portal"), first);
    }
}

#[test]
fn test_exact_match_scores_at_least_36() {
    // Exact equality collects both the +22 exact and +14 substring bonuses.
    let candidate = link("billing", "/somewhere", Region::Body);
    assert!(score(&candidate, "billing") >= 36);

    let no_href = Candidate::new(CandidateKind::Link, "billing", None, Region::Body);
    assert!(score(&no_href, "Billing ") >= 36);
}

#[test]
fn test_exact_match_outranks_non_exact_in_same_region() {
    let exact = link("billing", "/a", Region::Body);
    let partial = link("billing department overview", "/a", Region::Body);
    assert!(score(&exact, "billing") > score(&partial, "billing"));
}

#[test]
fn test_region_bonus_is_monotonic_with_fixed_deltas() {
    let at = |region| score(&link("Campus Map", "/map", region), "gym");

    let nav = at(Region::Nav);
    let header = at(Region::Header);
    let upper = at(Region::Upper);
    let body = at(Region::Body);
    let footer = at(Region::Footer);

    assert!(nav > header && header > upper && upper > body && body > footer);
    assert_eq!(nav - body, 11);
    assert_eq!(header - body, 6);
    assert_eq!(upper - body, 4);
    assert_eq!(body - footer, 5);
}

#[test]
fn test_query_word_matching_tiers() {
    // Text equal to a single query word: +7; substring only: +5.
    let equal = Candidate::new(CandidateKind::Link, "apply", None, Region::Body);
    let contains = Candidate::new(CandidateKind::Link, "apply now", None, Region::Body);
    let word_delta = score(&equal, "apply today") - score(&contains, "apply today");
    // Both are short labels with the "apply" keyword; only the word tier differs.
    assert_eq!(word_delta, 2);
}

#[test]
fn test_href_contains_full_query_bonus() {
    let with = link("Records", "/student-records", Region::Body);
    let without = link("Records", "/registrar", Region::Body);
    // +5 word substring in text is shared; href adds +3 (word) +7 (full query).
    assert_eq!(
        score(&with, "records") - score(&without, "records"),
        10
    );
}

#[test]
fn test_keyword_alignment_bonus() {
    // Candidate touches "portal" both times; only the aligned query adds +3.
    let candidate = link("Student Portal", "/portal", Region::Body);
    let aligned = score(&candidate, "portal");
    let unaligned = score(&candidate, "student");
    assert!(aligned > unaligned);
}

#[test]
fn test_heading_bonus() {
    let h = heading("Financial Aid");
    let mut l = h.clone();
    l.kind = CandidateKind::Link;
    assert_eq!(score(&h, "aid") - score(&l, "aid"), 3);
}

#[test]
fn test_label_length_shaping() {
    let short = Candidate::new(CandidateKind::Link, "Courses", Some("/c".into()), Region::Body);
    let medium = Candidate::new(
        CandidateKind::Link,
        "Courses offered this term at the college",
        Some("/c".into()),
        Region::Body,
    );
    let long = Candidate::new(
        CandidateKind::Link,
        "Courses offered this term at the college including evening, weekend and online sections",
        Some("/c".into()),
        Region::Body,
    );

    // A non-matching query isolates the length shaping from lexical bonuses.
    assert_eq!(score(&short, "zzz") - score(&medium, "zzz"), 5);
    assert_eq!(score(&medium, "zzz") - score(&long, "zzz"), 3);
}

#[test]
fn test_filler_phrase_penalty() {
    let filler = Candidate::new(CandidateKind::Link, "Click Here", Some("/go".into()), Region::Body);
    let plain = Candidate::new(CandidateKind::Link, "Click Page", Some("/go".into()), Region::Body);
    assert_eq!(score(&plain, "zzz") - score(&filler, "zzz"), 2);
}

#[test]
fn test_empty_query_scores_zero() {
    let candidate = link("Anything", "/a", Region::Nav);
    assert_eq!(score(&candidate, ""), 0);
    assert_eq!(score(&candidate, "   "), 0);
}

#[test]
fn test_billing_example() {
    // Worked example: "billing" against a nav pay-my-bill link and a footer
    // about link. The first clears the threshold comfortably; the second is
    // excluded.
    let candidates = vec![
        link("Pay My Bill", "/billing", Region::Nav),
        link("About Us", "/about", Region::Footer),
    ];

    assert!(score(&candidates[0], "billing") >= 18);
    assert!(score(&candidates[1], "billing") <= 0);

    let results = rank(&candidates, "billing");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].candidate.text, "Pay My Bill");
}

#[test]
fn test_rank_excludes_below_threshold() {
    // Weak overlap only: short label bonus alone must not clear threshold 8.
    let candidates = vec![link("Misc", "/misc", Region::Body)];
    assert!(rank(&candidates, "registrar").is_empty());
}

#[test]
fn test_rank_empty_when_nothing_matches() {
    let candidates = vec![
        link("Weather", "/weather", Region::Footer),
        link("Privacy", "/privacy", Region::Footer),
    ];
    assert!(rank(&candidates, "quantum chromodynamics").is_empty());
}

#[test]
fn test_rank_ties_keep_extraction_order() {
    // Hrefs contribute nothing for this query, so both score identically.
    let candidates = vec![
        link("Library Hours", "/a", Region::Nav),
        link("Library Hours", "/b", Region::Nav),
    ];
    let results = rank(&candidates, "library");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].score, results[1].score);
    // Stable sort: the first-extracted candidate stays first.
    assert_eq!(results[0].candidate.href.as_deref(), Some("/a"));
}

#[test]
fn test_rank_truncates_to_top_n() {
    let candidates: Vec<Candidate> = (0..10)
        .map(|i| link("Student Portal", &format!("/portal/{i}"), Region::Nav))
        .collect();
    let results = rank_with(&candidates, "portal", 3, 8);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].candidate.href.as_deref(), Some("/portal/0"));
}

#[test]
fn test_rank_orders_descending() {
    let candidates = vec![
        link("About", "/about", Region::Body),
        link("Student Portal", "/portal", Region::Nav),
        link("Portal", "/portal", Region::Header),
    ];
    let results = rank(&candidates, "portal");
    assert!(results.len() >= 2);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}
