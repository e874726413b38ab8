//! Remote-first search orchestration.
//!
//! [`SearchController`] wires a candidate source, a ranking transport, and a
//! highlighter into the full find-on-page flow: collect candidates, ask the
//! remote judge, fall back to the local heuristic on any remote failure, and
//! highlight the winner. Remote failure is never fatal to the search itself;
//! only an unreachable candidate source is.

mod controller;
mod traits;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use controller::{FallbackReason, SearchController, SearchOutcome};
pub use traits::{CandidateSource, Highlighter, RankTransport, SourceError, TransportError};

#[cfg(any(test, feature = "mock"))]
pub use mock::{RecordingHighlighter, StaticSource};
