//! Student and teacher dashboards.

use askknightro_core::models::CourseDto;
use askknightro_core::navigation::{course_chat_route, course_menu};
use askknightro_core::profile::{StudentProfile, TeacherProfile};
use askknightro_core::roles::Role;
use askknightro_core::types::DbId;

use crate::api::KnightroApi;

/// One course tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCard {
    pub course_id: DbId,
    pub title: String,
    pub section: String,
    pub semester: Option<String>,
    pub description: Option<String>,
    pub enrollment_code: Option<String>,
    /// Where clicking the card leads for this dashboard's role.
    pub route: String,
}

impl CourseCard {
    fn from_course(course: &CourseDto, role: Role) -> Self {
        let route = match role {
            Role::Teacher => course_menu(course.class_id)
                .into_iter()
                .next()
                .map(|link| link.route)
                .unwrap_or_default(),
            _ => course_chat_route(course.class_id),
        };
        Self {
            course_id: course.class_id,
            title: course.course_name.clone(),
            section: format!("Class #{}", course.class_id),
            semester: course.semester.clone(),
            description: course.course_description.clone(),
            enrollment_code: course.enrollment_code.clone(),
            route,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub role: Role,
    /// Name for the welcome line; falls back when the profile is unavailable.
    pub display_name: String,
    pub courses: Vec<CourseCard>,
    /// Page-local error when the course list could not be loaded.
    pub error: Option<String>,
}

/// Load the student dashboard. Profile and course list are fetched together.
pub async fn load_student_dashboard(api: &KnightroApi, student_id: DbId) -> Dashboard {
    let (profile, courses) = tokio::join!(
        api.get_student(student_id),
        api.list_courses_for_user(student_id, Role::Student),
    );

    let display_name = match profile {
        Ok(dto) => StudentProfile::from_dto(&dto).display_name(),
        Err(e) => {
            tracing::warn!(student_id, error = %e, "Student profile unavailable; using fallback name");
            StudentProfile::default().display_name()
        }
    };

    assemble(Role::Student, display_name, courses)
}

/// Load the teacher dashboard.
pub async fn load_teacher_dashboard(api: &KnightroApi, teacher_id: DbId) -> Dashboard {
    let (profile, courses) = tokio::join!(
        api.get_teacher(teacher_id),
        api.list_courses_for_user(teacher_id, Role::Teacher),
    );

    let display_name = match profile {
        Ok(dto) => TeacherProfile::from_dto(&dto).display_name(),
        Err(e) => {
            tracing::warn!(teacher_id, error = %e, "Teacher profile unavailable; using fallback name");
            TeacherProfile::default().display_name()
        }
    };

    assemble(Role::Teacher, display_name, courses)
}

fn assemble(
    role: Role,
    display_name: String,
    courses: Result<Vec<CourseDto>, crate::error::ApiError>,
) -> Dashboard {
    match courses {
        Ok(courses) => Dashboard {
            role,
            display_name,
            courses: courses.iter().map(|c| CourseCard::from_course(c, role)).collect(),
            error: None,
        },
        Err(e) => {
            tracing::error!(role = %role, error = %e, "Failed to load courses");
            Dashboard {
                role,
                display_name,
                courses: Vec::new(),
                error: Some(e.user_message()),
            }
        }
    }
}
