use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::instrument;

use super::{JudgeBackend, JudgeError};
use crate::constants::JUDGE_MAX_TOKENS;

/// Judge backend over the `genai` multi-provider client. The model string
/// selects the provider; credentials come from the provider's usual
/// environment variable.
pub struct GenaiJudge {
    client: Client,
    model: String,
}

impl GenaiJudge {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
        }
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl JudgeBackend for GenaiJudge {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, JudgeError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(system),
            ChatMessage::user(prompt),
        ]);
        // Deterministic, short replies: the verdict is one small object.
        let options = ChatOptions::default()
            .with_temperature(0.0)
            .with_max_tokens(JUDGE_MAX_TOKENS);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&options))
            .await
            .map_err(|err| JudgeError::Upstream(err.to_string()))?;

        Ok(response.first_text().unwrap_or_default().to_string())
    }
}

impl std::fmt::Debug for GenaiJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiJudge")
            .field("model", &self.model)
            .finish()
    }
}
