//! Remote relevance judge.
//!
//! A judge receives the user query plus a numbered candidate roster and
//! returns, as text, a verdict naming the single best candidate index. The
//! backend trait abstracts the model provider; the prompt builder and the
//! lenient verdict parser are pure and tested in isolation.

mod genai;
mod parse;
mod prompt;

#[cfg(any(test, feature = "mock"))]
mod mock;

pub use self::genai::GenaiJudge;
pub use parse::parse_judgment;
pub use prompt::{SYSTEM_DIRECTIVE, build_prompt};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockJudge;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decoded judge verdict.
///
/// `index` points into the candidate roster the prompt was built from; a
/// negative index means the judge declined to pick. `reason` is free text
/// and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub index: i64,
    #[serde(default)]
    pub reason: String,
}

impl Judgment {
    /// Whether the verdict names a candidate at all.
    #[inline]
    pub fn is_pick(&self) -> bool {
        self.index >= 0
    }
}

#[derive(Debug, Error)]
pub enum JudgeError {
    /// The model provider failed or was unreachable.
    #[error("judge upstream error: {0}")]
    Upstream(String),
}

/// A model backend that completes a system-directed prompt.
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Runs one completion and returns the raw reply text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, JudgeError>;
}

#[async_trait]
impl<T: JudgeBackend + ?Sized> JudgeBackend for std::sync::Arc<T> {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, JudgeError> {
        (**self).complete(system, prompt).await
    }
}
