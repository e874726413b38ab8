use std::sync::Arc;

use lantern::judge::JudgeBackend;
use lantern::ranker::RankService;

/// Shared handler state: the rank pipeline plus the model name for the
/// readiness surface.
pub struct HandlerState<J: JudgeBackend + 'static> {
    pub service: Arc<RankService<J>>,

    pub judge_model: String,
}

impl<J: JudgeBackend + 'static> HandlerState<J> {
    pub fn new(service: Arc<RankService<J>>, judge_model: impl Into<String>) -> Self {
        Self {
            service,
            judge_model: judge_model.into(),
        }
    }
}

impl<J: JudgeBackend + 'static> Clone for HandlerState<J> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            judge_model: self.judge_model.clone(),
        }
    }
}
