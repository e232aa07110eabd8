use askknightro_core::models::{StudentDto, TeacherDto};
use askknightro_core::types::DbId;
use reqwest::Method;

use super::KnightroApi;
use crate::error::ApiError;

impl KnightroApi {
    /// `GET /api/users/teachers/{id}`.
    pub async fn get_teacher(&self, teacher_id: DbId) -> Result<TeacherDto, ApiError> {
        Self::send_json(self.request(Method::GET, &format!("/api/users/teachers/{teacher_id}")))
            .await
    }

    /// `PUT /api/users/teachers/{id}`: whole-record update, echoes the saved row.
    pub async fn update_teacher(
        &self,
        teacher_id: DbId,
        teacher: &TeacherDto,
    ) -> Result<TeacherDto, ApiError> {
        Self::send_json(
            self.request(Method::PUT, &format!("/api/users/teachers/{teacher_id}"))
                .json(teacher),
        )
        .await
    }

    /// `GET /api/users/students/{id}`.
    pub async fn get_student(&self, student_id: DbId) -> Result<StudentDto, ApiError> {
        Self::send_json(self.request(Method::GET, &format!("/api/users/students/{student_id}")))
            .await
    }

    /// `PUT /api/users/students/{id}`.
    pub async fn update_student(
        &self,
        student_id: DbId,
        student: &StudentDto,
    ) -> Result<StudentDto, ApiError> {
        Self::send_json(
            self.request(Method::PUT, &format!("/api/users/students/{student_id}"))
                .json(student),
        )
        .await
    }
}
