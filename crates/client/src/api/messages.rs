use askknightro_core::models::StoredChatMessage;
use askknightro_core::types::DbId;
use reqwest::Method;

use super::KnightroApi;
use crate::error::ApiError;

impl KnightroApi {
    /// `GET /api/messages/student/{sid}/class/{cid}`: persisted history of one
    /// student in one course.
    pub async fn chat_history(
        &self,
        student_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<StoredChatMessage>, ApiError> {
        Self::send_json(self.request(
            Method::GET,
            &format!("/api/messages/student/{student_id}/class/{course_id}"),
        ))
        .await
    }
}
