//! Joining a course by enrollment code.

use askknightro_core::models::{CourseDto, EnrollmentRequest};
use askknightro_core::roles::Role;
use askknightro_core::types::DbId;
use askknightro_core::validation::normalize_enrollment_code;

use crate::api::KnightroApi;
use crate::error::ApiError;

pub const REFRESH_NOTICE: &str = "Enrolled! Refresh your courses to see the new class.";

#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentOutcome {
    /// Enrolled, and the course was found in the refreshed list.
    Joined(CourseDto),
    /// Enrolled, but the refreshed list did not show the course yet.
    JoinedUnlisted,
}

impl EnrollmentOutcome {
    pub fn message(&self) -> String {
        match self {
            EnrollmentOutcome::Joined(course) => {
                format!("Successfully enrolled in {}!", course.course_name)
            }
            EnrollmentOutcome::JoinedUnlisted => REFRESH_NOTICE.to_string(),
        }
    }
}

/// Enroll the student with `code`.
///
/// A blank code is a no-op and returns `Ok(None)`. A failed re-list after a
/// successful enrollment is not an error; it yields
/// [`EnrollmentOutcome::JoinedUnlisted`].
pub async fn join_course(
    api: &KnightroApi,
    student_id: DbId,
    code: &str,
) -> Result<Option<EnrollmentOutcome>, ApiError> {
    let Some(code) = normalize_enrollment_code(code) else {
        return Ok(None);
    };

    api.enroll(&EnrollmentRequest {
        student_id,
        enrollment_code: code.clone(),
    })
    .await?;
    tracing::info!(student_id, "Enrolled by code");

    let courses = match api.list_courses_for_user(student_id, Role::Student).await {
        Ok(courses) => courses,
        Err(e) => {
            tracing::warn!(student_id, error = %e, "Could not refresh courses after enrolling");
            return Ok(Some(EnrollmentOutcome::JoinedUnlisted));
        }
    };

    Ok(Some(match find_by_code(courses, &code) {
        Some(course) => EnrollmentOutcome::Joined(course),
        None => EnrollmentOutcome::JoinedUnlisted,
    }))
}

fn find_by_code(courses: Vec<CourseDto>, code: &str) -> Option<CourseDto> {
    courses.into_iter().find(|c| {
        c.enrollment_code
            .as_deref()
            .is_some_and(|ec| ec.trim().eq_ignore_ascii_case(code))
    })
}
