use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{JudgeBackend, JudgeError};

/// Scripted judge backend for tests.
///
/// Replies are consumed in order; when the script runs dry the last
/// configured reply repeats. `Err` entries surface as
/// [`JudgeError::Upstream`].
pub struct MockJudge {
    script: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    calls: AtomicUsize,
}

impl MockJudge {
    /// A judge that always replies with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(reply.into())])
    }

    /// A judge that always picks `index`.
    pub fn picking(index: i64) -> Self {
        Self::replying(format!("{{\"index\": {index}, \"reason\": \"mock pick\"}}"))
    }

    /// A judge whose provider always fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::scripted(vec![Err(message.into())])
    }

    /// A judge that plays `script` front to back, then repeats the tail.
    pub fn scripted(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many completions have been requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JudgeBackend for MockJudge {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, JudgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = {
            let mut script = self.script.lock();
            match script.pop_front() {
                Some(entry) => {
                    *self.last.lock() = Some(entry.clone());
                    entry
                }
                None => self
                    .last
                    .lock()
                    .clone()
                    .unwrap_or_else(|| Err("mock script empty".to_string())),
            }
        };

        next.map_err(JudgeError::Upstream)
    }
}

impl std::fmt::Debug for MockJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockJudge")
            .field("calls", &self.call_count())
            .finish()
    }
}
