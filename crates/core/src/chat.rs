//! Course chat pane state machine.
//!
//! Two independent machines share one pane:
//!
//! - bootstrap: `Idle -> AwaitingCourseData -> Ready | Error`, or
//!   `Idle -> NoCourseSelected` when the URL carries no course;
//! - reply cycle: `Idle <-> Composing -> WaitingForReply -> Idle`.
//!
//! The message log is append-only and ordered by call sequence. This module
//! is synchronous; the async driver that fetches data and waits for replies
//! lives in the client crate and feeds results back through these methods.

use crate::models::{CourseDto, TeacherDto};
use crate::types::{DbId, Timestamp};

/// Shown when the instructor lookup fails or the course has no teacher.
pub const INSTRUCTOR_PLACEHOLDER: &str = "TBA";

pub const NO_COURSE_MESSAGE: &str =
    "No course selected. Open a course from your dashboard to start chatting.";

/// Greeting seeded as the first assistant message of a course chat.
pub fn greeting_for(course_name: &str) -> String {
    format!(
        "Hello! I'm Knightro, your AI course assistant for {course_name}. I'm here to help \
         you with course content, assignments, study tips, and answer any questions you have \
         about the material. How can I assist you today?"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapState {
    Idle,
    AwaitingCourseData,
    Ready,
    /// Terminal and valid: the pane was opened without a course.
    NoCourseSelected,
    /// Terminal for this page load: the course itself could not be loaded.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyState {
    Idle,
    Composing,
    WaitingForReply,
}

/// Why a send was refused. Every rejection leaves the pane unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendRejection {
    #[error("message is empty")]
    EmptyMessage,
    #[error("the assistant is still replying")]
    AwaitingReply,
    #[error("chat input is disabled")]
    InputDisabled,
    #[error("the chat has been closed")]
    Closed,
}

/// Course details shown above the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseHeader {
    pub course_id: DbId,
    pub course_name: String,
    pub semester: Option<String>,
    pub instructor_name: String,
}

/// A question accepted by [`ChatPane::submit`] that now needs an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub course_id: DbId,
    pub course_name: String,
    pub question: String,
}

#[derive(Debug, Clone)]
pub struct ChatPane {
    bootstrap: BootstrapState,
    reply: ReplyState,
    header: Option<CourseHeader>,
    messages: Vec<ChatMessage>,
    draft: String,
    notice: Option<String>,
    next_id: u64,
}

impl Default for ChatPane {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPane {
    pub fn new() -> Self {
        Self {
            bootstrap: BootstrapState::Idle,
            reply: ReplyState::Idle,
            header: None,
            messages: Vec::new(),
            draft: String::new(),
            notice: None,
            next_id: 1,
        }
    }

    // ---- bootstrap ----

    /// Start bootstrapping for the course in the URL.
    ///
    /// Returns the course id to fetch, or `None` when the pane went straight
    /// to [`BootstrapState::NoCourseSelected`].
    pub fn open(&mut self, course_id: Option<DbId>) -> Option<DbId> {
        match course_id {
            Some(id) => {
                self.bootstrap = BootstrapState::AwaitingCourseData;
                Some(id)
            }
            None => {
                self.bootstrap = BootstrapState::NoCourseSelected;
                None
            }
        }
    }

    /// Apply a loaded course and the best-effort instructor record.
    pub fn course_loaded(&mut self, course: &CourseDto, instructor: Option<&TeacherDto>) {
        let instructor_name = instructor
            .and_then(|t| t.name.as_deref())
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(INSTRUCTOR_PLACEHOLDER)
            .to_string();

        self.header = Some(CourseHeader {
            course_id: course.class_id,
            course_name: course.course_name.clone(),
            semester: course.semester.clone(),
            instructor_name,
        });
        self.bootstrap = BootstrapState::Ready;
        self.seed_greeting();
    }

    pub fn course_failed(&mut self, message: impl Into<String>) {
        self.bootstrap = BootstrapState::Error(message.into());
    }

    /// Append the greeting if, and only if, the log is empty.
    ///
    /// Returns whether a greeting was appended.
    pub fn seed_greeting(&mut self) -> bool {
        let Some(header) = &self.header else {
            return false;
        };
        if !self.messages.is_empty() {
            return false;
        }
        let greeting = greeting_for(&header.course_name);
        self.push(Sender::Assistant, greeting);
        true
    }

    // ---- reply cycle ----

    /// Track the text box. A non-empty draft moves `Idle` to `Composing`.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        if self.reply != ReplyState::WaitingForReply {
            self.reply = if self.draft.trim().is_empty() {
                ReplyState::Idle
            } else {
                ReplyState::Composing
            };
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Send the current draft.
    pub fn submit_draft(&mut self) -> Result<PendingReply, SendRejection> {
        let text = self.draft.clone();
        self.submit(&text)
    }

    /// Append a user message and enter `WaitingForReply`.
    pub fn submit(&mut self, text: &str) -> Result<PendingReply, SendRejection> {
        if self.reply == ReplyState::WaitingForReply {
            return Err(SendRejection::AwaitingReply);
        }
        let header = match (&self.bootstrap, &self.header) {
            (BootstrapState::Ready, Some(header)) => header.clone(),
            _ => return Err(SendRejection::InputDisabled),
        };
        let question = text.trim();
        if question.is_empty() {
            return Err(SendRejection::EmptyMessage);
        }

        let question = question.to_string();
        self.push(Sender::User, question.clone());
        self.draft.clear();
        self.notice = None;
        self.reply = ReplyState::WaitingForReply;

        Ok(PendingReply {
            course_id: header.course_id,
            course_name: header.course_name,
            question,
        })
    }

    /// Append the assistant's answer and return to `Idle`.
    ///
    /// Ignored (returns `false`) when no reply is outstanding.
    pub fn deliver_reply(&mut self, text: impl Into<String>) -> bool {
        if self.reply != ReplyState::WaitingForReply {
            return false;
        }
        self.push(Sender::Assistant, text.into());
        self.reply = ReplyState::Idle;
        true
    }

    /// The outstanding reply failed; nothing is appended.
    pub fn reply_failed(&mut self, message: impl Into<String>) {
        if self.reply == ReplyState::WaitingForReply {
            self.reply = ReplyState::Idle;
            self.notice = Some(message.into());
        }
    }

    // ---- views ----

    pub fn bootstrap(&self) -> &BootstrapState {
        &self.bootstrap
    }

    pub fn reply(&self) -> ReplyState {
        self.reply
    }

    pub fn is_typing(&self) -> bool {
        self.reply == ReplyState::WaitingForReply
    }

    pub fn input_enabled(&self) -> bool {
        self.bootstrap == BootstrapState::Ready && !self.is_typing()
    }

    /// Message explaining why input is disabled, if it is for a terminal
    /// reason rather than a pending reply.
    pub fn disabled_reason(&self) -> Option<String> {
        match &self.bootstrap {
            BootstrapState::NoCourseSelected => Some(NO_COURSE_MESSAGE.to_string()),
            BootstrapState::Error(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    pub fn header(&self) -> Option<&CourseHeader> {
        self.header.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Page-local notice from the last failed reply.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn push(&mut self, sender: Sender, content: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender,
            content,
            timestamp: chrono::Utc::now(),
        });
    }
}
