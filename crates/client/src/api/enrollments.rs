use askknightro_core::models::{EnrollmentRequest, StudentDto};
use askknightro_core::types::DbId;
use reqwest::Method;

use super::KnightroApi;
use crate::error::ApiError;

impl KnightroApi {
    /// `POST /api/enrollments/enroll`. Answers 204; a duplicate enrollment is
    /// [`ApiError::Conflict`] with code `ALREADY_ENROLLED`.
    pub async fn enroll(&self, request: &EnrollmentRequest) -> Result<(), ApiError> {
        Self::send_empty(
            self.request(Method::POST, "/api/enrollments/enroll")
                .json(request),
        )
        .await
    }

    /// `GET /api/enrollments/{courseId}`.
    pub async fn list_students_in_course(
        &self,
        course_id: DbId,
    ) -> Result<Vec<StudentDto>, ApiError> {
        Self::send_json(self.request(Method::GET, &format!("/api/enrollments/{course_id}"))).await
    }

    /// `DELETE /api/enrollments/{courseId}/students/{studentId}`.
    pub async fn remove_student(&self, course_id: DbId, student_id: DbId) -> Result<(), ApiError> {
        Self::send_empty(self.request(
            Method::DELETE,
            &format!("/api/enrollments/{course_id}/students/{student_id}"),
        ))
        .await
    }
}
