//! Per-student chat history for one course, most recently active first.

use askknightro_core::models::{StoredChatMessage, StudentDto};
use askknightro_core::types::{BackendTimestamp, DbId};

use crate::api::KnightroApi;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentChatLog {
    pub student: StudentDto,
    pub messages: Vec<StoredChatMessage>,
    pub last_message_at: BackendTimestamp,
}

impl StudentChatLog {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseLogs {
    /// `None` when the course lookup failed; the logs still load.
    pub course_name: Option<String>,
    pub students: Vec<StudentChatLog>,
}

/// Load every enrolled student's history for `course_id`.
///
/// The roster is required. Individual history fetches are best-effort:
/// a failure or an empty history drops that student from the result.
pub async fn load_course_logs(api: &KnightroApi, course_id: DbId) -> Result<CourseLogs, ApiError> {
    let course_name = match api.get_course(course_id).await {
        Ok(course) => Some(course.course_name),
        Err(e) => {
            tracing::warn!(course_id, error = %e, "Course name unavailable for logs");
            None
        }
    };

    let roster = api.list_students_in_course(course_id).await?;

    let mut histories = Vec::with_capacity(roster.len());
    for student in roster {
        let Some(student_id) = student.student_id else {
            continue;
        };
        match api.chat_history(student_id, course_id).await {
            Ok(messages) => histories.push((student, messages)),
            Err(e) => {
                tracing::warn!(course_id, student_id, error = %e, "Skipping student history");
            }
        }
    }

    Ok(CourseLogs {
        course_name,
        students: group_by_recent_activity(histories),
    })
}

/// Drop silent students and order the rest by their latest message,
/// newest first. Ties keep roster order.
pub fn group_by_recent_activity(
    histories: Vec<(StudentDto, Vec<StoredChatMessage>)>,
) -> Vec<StudentChatLog> {
    let mut logs: Vec<StudentChatLog> = histories
        .into_iter()
        .filter_map(|(student, messages)| {
            let last_message_at = messages.iter().map(|m| m.timestamp).max()?;
            Some(StudentChatLog {
                student,
                messages,
                last_message_at,
            })
        })
        .collect();
    logs.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
    logs
}
