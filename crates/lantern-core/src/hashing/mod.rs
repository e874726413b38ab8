//! BLAKE3 digests for cache keys and client identifiers.

use blake3::Hasher;

use crate::candidate::Candidate;
use crate::constants::CACHE_KEY_CANDIDATES;

/// Canonical digest of a rank request: the query plus an order-preserving
/// projection of the first 60 candidates' `{text, href}` pairs.
///
/// Field and record separators are injected so that shifting characters
/// between text and href (or between adjacent candidates) always changes the
/// digest. Candidates beyond the projection bound do not participate, which
/// keeps the key stable for long pages whose tail churns.
pub fn hash_rank_request(query: &str, candidates: &[Candidate]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(query.as_bytes());
    for candidate in candidates.iter().take(CACHE_KEY_CANDIDATES) {
        hasher.update(b"\x1e");
        hasher.update(candidate.text.as_bytes());
        hasher.update(b"\x1f");
        if let Some(href) = &candidate.href {
            hasher.update(href.as_bytes());
        }
    }
    *hasher.finalize().as_bytes()
}

/// 64-bit client identifier from an auth token, truncated from BLAKE3.
///
/// Collisions only merge two clients into one rate window, so 64 bits is
/// plenty; this is not used for authentication.
#[inline]
pub fn hash_client_token(token: &str) -> u64 {
    let hash = blake3::hash(token.as_bytes());
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
