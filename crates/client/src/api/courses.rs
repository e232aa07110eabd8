use askknightro_core::models::{CourseDraft, CourseDto};
use askknightro_core::roles::Role;
use askknightro_core::types::DbId;
use reqwest::Method;

use super::KnightroApi;
use crate::error::ApiError;

impl KnightroApi {
    /// `GET /api/users/courses/{id}`.
    pub async fn get_course(&self, course_id: DbId) -> Result<CourseDto, ApiError> {
        Self::send_json(self.request(Method::GET, &format!("/api/users/courses/{course_id}")))
            .await
    }

    /// `GET /api/users/courses/user/{userId}?role=STUDENT|TEACHER`.
    ///
    /// An anonymous role sends no `role` parameter.
    pub async fn list_courses_for_user(
        &self,
        user_id: DbId,
        role: Role,
    ) -> Result<Vec<CourseDto>, ApiError> {
        let mut builder =
            self.request(Method::GET, &format!("/api/users/courses/user/{user_id}"));
        if let Some(role) = role.as_query_param() {
            builder = builder.query(&[("role", role)]);
        }
        Self::send_json(builder).await
    }

    /// `POST /api/users/courses`.
    pub async fn create_course(&self, draft: &CourseDraft) -> Result<CourseDto, ApiError> {
        Self::send_json(self.request(Method::POST, "/api/users/courses").json(draft)).await
    }

    /// `PUT /api/users/courses/list/{id}`.
    pub async fn update_course(
        &self,
        course_id: DbId,
        draft: &CourseDraft,
    ) -> Result<CourseDto, ApiError> {
        Self::send_json(
            self.request(Method::PUT, &format!("/api/users/courses/list/{course_id}"))
                .json(draft),
        )
        .await
    }

    /// `DELETE /api/users/courses/{id}`.
    pub async fn delete_course(&self, course_id: DbId) -> Result<(), ApiError> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/users/courses/{course_id}")))
            .await
    }
}
