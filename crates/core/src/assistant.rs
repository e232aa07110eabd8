//! Assistant response provider seam.
//!
//! The chat driver only knows this trait. Swapping the canned stub for a
//! real backend call is a constructor change, not a state-machine change.

use async_trait::async_trait;

use crate::chat::PendingReply;
use crate::types::DbId;

/// Everything a provider may use to answer one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantRequest {
    pub course_id: DbId,
    pub course_name: String,
    pub student_id: Option<DbId>,
    pub question: String,
}

impl AssistantRequest {
    pub fn from_pending(pending: PendingReply, student_id: Option<DbId>) -> Self {
        Self {
            course_id: pending.course_id,
            course_name: pending.course_name,
            student_id,
            question: pending.question,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Assistant is unavailable: {0}")]
    Unavailable(String),

    #[error("Assistant returned an empty answer")]
    EmptyAnswer,
}

#[async_trait]
pub trait AssistantProvider: Send + Sync {
    async fn reply(&self, request: &AssistantRequest) -> Result<String, AssistantError>;
}
