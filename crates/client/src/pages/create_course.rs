//! Course creation with material upload.

use askknightro_core::models::{CourseDraft, CourseDto, MaterialFile};
use askknightro_core::validation::{is_accepted_material, CourseForm};

use crate::api::KnightroApi;
use crate::error::PageError;

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCourse {
    pub course: CourseDto,
    /// Names of the uploaded materials, in upload order.
    pub uploaded: Vec<String>,
    /// Picked files that were not `.txt` and were never sent.
    pub skipped: Vec<String>,
}

impl CreatedCourse {
    /// Where the teacher lands afterwards.
    pub fn redirect_route(&self) -> String {
        format!("/teacher-course-dashboard?courseId={}", self.course.class_id)
    }
}

/// Validate the form, create the course, then upload each material in turn.
///
/// `progress` receives a status line before each step. The first upload
/// failure aborts the remaining uploads; the course itself stays created.
pub async fn create_course(
    api: &KnightroApi,
    form: &CourseForm,
    files: Vec<MaterialFile>,
    mut progress: impl FnMut(&str),
) -> Result<CreatedCourse, PageError> {
    let teacher_id = form.validate()?;

    let (accepted, rejected): (Vec<_>, Vec<_>) =
        files.into_iter().partition(|f| is_accepted_material(&f.name));
    let skipped: Vec<String> = rejected.into_iter().map(|f| f.name).collect();
    if !skipped.is_empty() {
        tracing::info!(skipped = ?skipped, "Ignoring non-.txt materials");
    }

    progress("Creating course…");
    let draft = CourseDraft {
        course_name: form.course_name.trim().to_string(),
        semester: form.semester.trim().to_string(),
        course_description: Some(form.description.trim().to_string()).filter(|d| !d.is_empty()),
        teacher_id: Some(teacher_id),
        shard_id: None,
        enrollment_code: Some(form.enrollment_code.trim().to_string()).filter(|c| !c.is_empty()),
    };
    let course = api.create_course(&draft).await?;
    tracing::info!(course_id = course.class_id, teacher_id, "Course created");

    let total = accepted.len();
    let mut uploaded = Vec::with_capacity(total);
    for (i, file) in accepted.iter().enumerate() {
        progress(&format!("Embedding {}/{}: {}", i + 1, total, file.name));
        api.upload_material(course.class_id, file).await.map_err(|e| {
            tracing::error!(course_id = course.class_id, file = %file.name, error = %e, "Material upload failed");
            e
        })?;
        uploaded.push(file.name.clone());
    }

    progress("Done!");
    Ok(CreatedCourse {
        course,
        uploaded,
        skipped,
    })
}
