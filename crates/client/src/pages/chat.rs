//! Async driver for the course chat pane.
//!
//! [`CourseChat`] owns one [`ChatPane`] behind a mutex and feeds it the
//! results of the course fetch and of assistant replies. Every completion is
//! checked against the page's [`CancellationToken`]; once [`CourseChat::close`]
//! has run (or the driver is dropped) late results are discarded.

use std::sync::Arc;

use askknightro_core::assistant::{AssistantProvider, AssistantRequest};
use askknightro_core::chat::{BootstrapState, ChatPane, PendingReply, SendRejection};
use askknightro_core::models::TeacherDto;
use askknightro_core::types::DbId;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::KnightroApi;

pub struct CourseChat {
    api: KnightroApi,
    provider: Arc<dyn AssistantProvider>,
    student_id: Option<DbId>,
    pane: Arc<Mutex<ChatPane>>,
    cancel: CancellationToken,
}

impl CourseChat {
    pub fn new(
        api: KnightroApi,
        provider: Arc<dyn AssistantProvider>,
        student_id: Option<DbId>,
    ) -> Self {
        Self {
            api,
            provider,
            student_id,
            pane: Arc::new(Mutex::new(ChatPane::new())),
            cancel: CancellationToken::new(),
        }
    }

    /// Load the course named in the URL and seed the greeting.
    ///
    /// The instructor lookup is best-effort: any failure leaves the
    /// placeholder name and the pane still becomes ready.
    pub async fn bootstrap(&self, course_id: Option<DbId>) -> BootstrapState {
        if self.is_closed() {
            return self.state().await;
        }
        let Some(course_id) = self.pane.lock().await.open(course_id) else {
            tracing::info!("Course chat opened without a course");
            return BootstrapState::NoCourseSelected;
        };

        let course = tokio::select! {
            _ = self.cancel.cancelled() => return self.state().await,
            result = self.api.get_course(course_id) => result,
        };

        let course = match course {
            Ok(course) => course,
            Err(e) => {
                tracing::error!(course_id, error = %e, "Failed to load course for chat");
                let mut pane = self.pane.lock().await;
                if !self.cancel.is_cancelled() {
                    pane.course_failed(e.user_message());
                }
                return pane.bootstrap().clone();
            }
        };

        let instructor = match course.teacher_id {
            Some(teacher_id) => self.fetch_instructor(course_id, teacher_id).await,
            None => None,
        };

        let mut pane = self.pane.lock().await;
        if !self.cancel.is_cancelled() {
            pane.course_loaded(&course, instructor.as_ref());
            tracing::info!(course_id, course_name = %course.course_name, "Course chat ready");
        }
        pane.bootstrap().clone()
    }

    async fn fetch_instructor(&self, course_id: DbId, teacher_id: DbId) -> Option<TeacherDto> {
        let result = tokio::select! {
            _ = self.cancel.cancelled() => return None,
            result = self.api.get_teacher(teacher_id) => result,
        };
        match result {
            Ok(teacher) => Some(teacher),
            Err(e) => {
                tracing::warn!(course_id, teacher_id, error = %e, "Instructor lookup failed; using placeholder");
                None
            }
        }
    }

    pub async fn set_draft(&self, text: impl Into<String>) {
        self.pane.lock().await.set_draft(text);
    }

    /// Send a question.
    ///
    /// The user message is appended before this returns. The reply arrives
    /// on a spawned task; await the handle to wait for it. A closed chat
    /// rejects without touching the pane.
    pub async fn send(&self, text: &str) -> Result<JoinHandle<()>, SendRejection> {
        if self.is_closed() {
            return Err(SendRejection::Closed);
        }
        let pending = self.pane.lock().await.submit(text)?;
        Ok(self.spawn_reply(pending))
    }

    /// Send the current draft.
    pub async fn send_draft(&self) -> Result<JoinHandle<()>, SendRejection> {
        if self.is_closed() {
            return Err(SendRejection::Closed);
        }
        let pending = self.pane.lock().await.submit_draft()?;
        Ok(self.spawn_reply(pending))
    }

    fn spawn_reply(&self, pending: PendingReply) -> JoinHandle<()> {
        let request = AssistantRequest::from_pending(pending, self.student_id);

        let pane = Arc::clone(&self.pane);
        let provider = Arc::clone(&self.provider);
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = provider.reply(&request) => result,
            };

            let mut pane = pane.lock().await;
            if cancel.is_cancelled() {
                return;
            }
            match result {
                Ok(answer) => {
                    pane.deliver_reply(answer);
                }
                Err(e) => {
                    tracing::warn!(course_id = request.course_id, error = %e, "Assistant reply failed");
                    pane.reply_failed(e.to_string());
                }
            }
        })
    }

    pub async fn state(&self) -> BootstrapState {
        self.pane.lock().await.bootstrap().clone()
    }

    /// A copy of the pane for rendering.
    pub async fn snapshot(&self) -> ChatPane {
        self.pane.lock().await.clone()
    }

    /// Stop applying async results to the pane.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for CourseChat {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askknightro_core::assistant::AssistantError;
    use askknightro_core::chat::ReplyState;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl AssistantProvider for Echo {
        async fn reply(&self, request: &AssistantRequest) -> Result<String, AssistantError> {
            Ok(format!("echo: {}", request.question))
        }
    }

    /// A base URL nothing listens on; bootstrap tests live in `tests/`.
    fn offline_chat() -> CourseChat {
        CourseChat::new(KnightroApi::new("http://127.0.0.1:9"), Arc::new(Echo), Some(1))
    }

    #[tokio::test]
    async fn no_course_selected_needs_no_network() {
        let chat = offline_chat();
        assert_eq!(chat.bootstrap(None).await, BootstrapState::NoCourseSelected);
        assert_eq!(chat.send("hi").await.unwrap_err(), SendRejection::InputDisabled);
    }

    fn ready_course() -> askknightro_core::models::CourseDto {
        askknightro_core::models::CourseDto {
            class_id: 5,
            course_name: "Chemistry".into(),
            semester: None,
            teacher_id: None,
            course_description: None,
            enrollment_code: None,
            shard_id: None,
        }
    }

    async fn ready_chat() -> CourseChat {
        let chat = offline_chat();
        {
            let mut pane = chat.pane.lock().await;
            pane.open(Some(5));
            pane.course_loaded(&ready_course(), None);
        }
        chat
    }

    #[tokio::test]
    async fn draft_is_sent_and_answered() {
        let chat = ready_chat().await;
        chat.set_draft("  what is a mole?  ").await;

        chat.send_draft().await.unwrap().await.unwrap();

        let pane = chat.snapshot().await;
        assert_eq!(pane.draft(), "");
        assert_eq!(pane.reply(), ReplyState::Idle);
        let contents: Vec<_> = pane.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(&contents[contents.len() - 2..], ["what is a mole?", "echo: what is a mole?"]);
    }

    #[tokio::test]
    async fn closed_chat_rejects_sends_without_touching_the_log() {
        let chat = ready_chat().await;
        let before = chat.snapshot().await.messages().len();

        chat.close();
        assert!(chat.is_closed());
        assert_eq!(chat.send("anyone there?").await.unwrap_err(), SendRejection::Closed);
        chat.set_draft("still here?").await;
        assert_eq!(chat.send_draft().await.unwrap_err(), SendRejection::Closed);

        let pane = chat.snapshot().await;
        assert_eq!(pane.messages().len(), before);
        assert_ne!(pane.reply(), ReplyState::WaitingForReply);
    }

    #[tokio::test]
    async fn closed_chat_does_not_bootstrap() {
        let chat = offline_chat();
        chat.close();

        assert_eq!(chat.bootstrap(Some(5)).await, BootstrapState::Idle);
        assert!(chat.snapshot().await.messages().is_empty());
    }
}
