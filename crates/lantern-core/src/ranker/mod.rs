//! Remote ranking service: rate limit, cache, judge, one request at a time.
//!
//! [`RankService`] is the transport-independent core of the gateway. The
//! HTTP layer maps its errors onto statuses and mirrors the cache outcome
//! into the status header.

mod service;
mod wire;

#[cfg(test)]
mod tests;

pub use service::{RankError, RankReply, RankService};
pub use wire::{RankErrorBody, RankRequestBody, RankResponseBody, WireCandidate};

/// Response header carrying the serving disposition.
pub const LANTERN_STATUS_HEADER: &str = "X-Lantern-Status";

/// Status header value for a judge round trip.
pub const STATUS_FRESH: &str = "fresh";
/// Status header value for a cache hit.
pub const STATUS_CACHED: &str = "cached";
/// Status header value for a rate-limited rejection.
pub const STATUS_RATE_LIMITED: &str = "rate-limited";
/// Status header value for an upstream failure.
pub const STATUS_ERROR: &str = "error";
