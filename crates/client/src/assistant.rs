//! Assistant providers behind the chat pane.

use std::sync::Arc;
use std::time::Duration;

use askknightro_core::assistant::{AssistantError, AssistantProvider, AssistantRequest};
use askknightro_core::models::AskRequest;
use async_trait::async_trait;
use rand::Rng;

use crate::api::KnightroApi;
use crate::config::{AssistantMode, ClientConfig};

/// Answers handed out by [`CannedAssistant`].
pub const CANNED_RESPONSES: [&str; 5] = [
    "That's a great question! Let me help you understand this concept better. \
     It often helps to look at an idea from more than one perspective.",
    "I can help you with that topic. Here's what you need to know for this course...",
    "Let me break this down for you. This concept relates to what we've covered in class so far...",
    "That's an important part of your curriculum. Here's a detailed explanation that should \
     help with your studies...",
    "I understand you're asking about this concept. Let me provide you with a comprehensive \
     answer that connects to your course material...",
];

/// Stand-in assistant: waits, then picks a canned answer at random.
#[derive(Debug, Clone)]
pub struct CannedAssistant {
    delay: Duration,
}

impl CannedAssistant {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for CannedAssistant {
    fn default() -> Self {
        Self::new(ClientConfig::default().reply_delay)
    }
}

#[async_trait]
impl AssistantProvider for CannedAssistant {
    async fn reply(&self, request: &AssistantRequest) -> Result<String, AssistantError> {
        tokio::time::sleep(self.delay).await;
        let index = rand::rng().random_range(0..CANNED_RESPONSES.len());
        tracing::debug!(course_id = request.course_id, index, "Canned reply chosen");
        Ok(CANNED_RESPONSES[index].to_string())
    }
}

/// Assistant backed by the retrieval endpoint `POST /api/ask`.
#[derive(Debug, Clone)]
pub struct BackendAssistant {
    api: KnightroApi,
    top_k: u32,
}

impl BackendAssistant {
    pub fn new(api: KnightroApi, top_k: u32) -> Self {
        Self { api, top_k }
    }
}

#[async_trait]
impl AssistantProvider for BackendAssistant {
    async fn reply(&self, request: &AssistantRequest) -> Result<String, AssistantError> {
        let ask = AskRequest {
            class_id: request.course_id,
            student_id: request.student_id,
            question: request.question.clone(),
            top_k: Some(self.top_k),
        };

        let response = self.api.ask(&ask).await.map_err(|e| {
            tracing::warn!(course_id = request.course_id, error = %e, "Ask request failed");
            AssistantError::Unavailable(e.user_message())
        })?;

        tracing::info!(
            course_id = request.course_id,
            sources = response.sources.len(),
            "Assistant answered"
        );

        let answer = response.answer.trim();
        if answer.is_empty() {
            return Err(AssistantError::EmptyAnswer);
        }
        Ok(answer.to_string())
    }
}

/// Provider selected by [`ClientConfig::assistant_mode`].
pub fn provider_for(config: &ClientConfig, api: KnightroApi) -> Arc<dyn AssistantProvider> {
    match config.assistant_mode {
        AssistantMode::Canned => Arc::new(CannedAssistant::new(config.reply_delay)),
        AssistantMode::Backend => Arc::new(BackendAssistant::new(api, config.assistant_top_k)),
    }
}
