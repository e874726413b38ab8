use std::time::Duration;

use super::*;
use crate::cache::JudgmentCache;
use crate::candidate::{Candidate, CandidateKind, Region};
use crate::constants::REMOTE_CANDIDATE_CAP;
use crate::judge::MockJudge;
use crate::ratelimit::{ManualClock, RateLimiter};

fn link(text: &str, href: &str) -> Candidate {
    Candidate::new(
        CandidateKind::Link,
        text,
        Some(href.to_string()),
        Region::Body,
    )
}

fn service(judge: MockJudge, ceiling: u32) -> RankService<MockJudge, ManualClock> {
    RankService::with_parts(
        judge,
        JudgmentCache::new(Duration::from_secs(30)),
        RateLimiter::with_clock(ceiling, Duration::from_secs(60), ManualClock::new()),
    )
}

#[tokio::test]
async fn test_fresh_then_cached() {
    let service = service(MockJudge::picking(1), 10);
    let candidates = vec![link("Student Portal", "/portal"), link("Log In", "/login")];

    let first = service.rank(1, "log in", &candidates).await.unwrap();
    assert!(!first.cached);
    assert_eq!(first.judgment.as_ref().unwrap().index, 1);

    let second = service.rank(1, "log in", &candidates).await.unwrap();
    assert!(second.cached);
    assert_eq!(second.judgment, first.judgment);
    assert_eq!(second.raw, first.raw);
}

#[tokio::test]
async fn test_cache_key_varies_with_query() {
    let service = service(MockJudge::picking(0), 10);
    let candidates = vec![link("Library", "/library")];

    let a = service.rank(1, "library", &candidates).await.unwrap();
    let b = service.rank(1, "books", &candidates).await.unwrap();
    assert!(!a.cached);
    assert!(!b.cached);
}

#[tokio::test]
async fn test_cache_is_shared_across_clients() {
    let service = service(MockJudge::picking(0), 10);
    let candidates = vec![link("Library", "/library")];

    let a = service.rank(1, "library", &candidates).await.unwrap();
    let b = service.rank(2, "library", &candidates).await.unwrap();
    assert!(!a.cached);
    assert!(b.cached);
}

#[tokio::test]
async fn test_rate_gate_runs_before_cache() {
    let service = service(MockJudge::picking(0), 2);
    let candidates = vec![link("Library", "/library")];

    service.rank(1, "library", &candidates).await.unwrap();
    service.rank(1, "library", &candidates).await.unwrap();

    // Third request would be a cache hit, but the window is spent.
    let err = service.rank(1, "library", &candidates).await.unwrap_err();
    assert!(matches!(err, RankError::RateLimited { .. }));
}

#[tokio::test]
async fn test_rate_limit_is_per_client() {
    let service = service(MockJudge::picking(0), 1);
    let candidates = vec![link("Library", "/library")];

    service.rank(1, "library", &candidates).await.unwrap();
    assert!(service.rank(2, "library", &candidates).await.is_ok());
    assert!(matches!(
        service.rank(1, "library", &candidates).await,
        Err(RankError::RateLimited { .. })
    ));
}

#[tokio::test]
async fn test_empty_query_rejected() {
    let service = service(MockJudge::picking(0), 10);
    let err = service.rank(1, "   ", &[]).await.unwrap_err();
    assert!(matches!(err, RankError::EmptyQuery));
}

#[tokio::test]
async fn test_upstream_failure_surfaces() {
    let service = service(MockJudge::failing("provider down"), 10);
    let candidates = vec![link("Library", "/library")];

    let err = service.rank(1, "library", &candidates).await.unwrap_err();
    match err {
        RankError::Upstream(message) => assert!(message.contains("provider down")),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_upstream_failure_is_not_cached() {
    let judge = MockJudge::scripted(vec![
        Err("provider down".to_string()),
        Ok(r#"{"index": 0, "reason": "recovered"}"#.to_string()),
    ]);
    let service = service(judge, 10);
    let candidates = vec![link("Library", "/library")];

    assert!(service.rank(1, "library", &candidates).await.is_err());

    let retry = service.rank(1, "library", &candidates).await.unwrap();
    assert!(!retry.cached);
    assert_eq!(retry.judgment.unwrap().index, 0);
}

#[tokio::test]
async fn test_unparseable_reply_is_cached_as_no_opinion() {
    let service = service(MockJudge::replying("garbled nonsense"), 10);
    let candidates = vec![link("Library", "/library")];

    let first = service.rank(1, "library", &candidates).await.unwrap();
    assert!(!first.cached);
    assert_eq!(first.judgment, None);
    assert_eq!(first.raw, "garbled nonsense");

    let second = service.rank(1, "library", &candidates).await.unwrap();
    assert!(second.cached);
    assert_eq!(second.judgment, None);
}

#[tokio::test]
async fn test_cache_expiry_reinvokes_judge() {
    let judge = std::sync::Arc::new(MockJudge::picking(0));
    let service = RankService::with_parts(
        std::sync::Arc::clone(&judge),
        JudgmentCache::new(Duration::from_millis(40)),
        RateLimiter::with_clock(10, Duration::from_secs(60), ManualClock::new()),
    );
    let candidates = vec![link("Library", "/library")];

    service.rank(1, "library", &candidates).await.unwrap();
    let hit = service.rank(1, "library", &candidates).await.unwrap();
    assert!(hit.cached);
    assert_eq!(judge.call_count(), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;
    let reissued = service.rank(1, "library", &candidates).await.unwrap();
    assert!(!reissued.cached);
    assert_eq!(judge.call_count(), 2);
}

#[tokio::test]
async fn test_candidates_truncated_to_remote_cap() {
    let service = service(MockJudge::picking(0), 10);
    let many: Vec<_> = (0..REMOTE_CANDIDATE_CAP + 40)
        .map(|i| link(&format!("Item {i}"), &format!("/item/{i}")))
        .collect();

    let full = service.rank(1, "item", &many).await.unwrap();
    assert!(!full.cached);

    // Same first 80 candidates: the tail does not reach the cache key.
    let trimmed = &many[..REMOTE_CANDIDATE_CAP];
    let again = service.rank(1, "item", trimmed).await.unwrap();
    assert!(again.cached);
}
