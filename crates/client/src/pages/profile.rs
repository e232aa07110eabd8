//! Profile pages: load, edit, cancel, save.

use askknightro_core::profile::{ProfileEditor, StudentProfile, TeacherProfile};
use askknightro_core::types::DbId;

use crate::api::KnightroApi;
use crate::error::{ApiError, PageError};

#[derive(Debug)]
pub struct StudentProfilePage {
    student_id: DbId,
    pub editor: ProfileEditor<StudentProfile>,
}

impl StudentProfilePage {
    pub async fn load(api: &KnightroApi, student_id: DbId) -> Result<Self, ApiError> {
        let dto = api.get_student(student_id).await?;
        Ok(Self {
            student_id,
            editor: ProfileEditor::new(StudentProfile::from_dto(&dto)),
        })
    }

    /// Submit the whole draft and adopt the echoed record.
    ///
    /// Password confirmation is checked first; on any failure the draft and
    /// edit mode are left untouched so the user can correct it.
    pub async fn save(&mut self, api: &KnightroApi) -> Result<(), PageError> {
        self.editor.draft().validate_for_save()?;
        let saved = api
            .update_student(self.student_id, &self.editor.draft().to_dto())
            .await?;
        self.editor.commit(StudentProfile::from_dto(&saved));
        tracing::info!(student_id = self.student_id, "Student profile saved");
        Ok(())
    }
}

#[derive(Debug)]
pub struct TeacherProfilePage {
    teacher_id: DbId,
    pub editor: ProfileEditor<TeacherProfile>,
}

impl TeacherProfilePage {
    pub async fn load(api: &KnightroApi, teacher_id: DbId) -> Result<Self, ApiError> {
        let dto = api.get_teacher(teacher_id).await?;
        Ok(Self {
            teacher_id,
            editor: ProfileEditor::new(TeacherProfile::from_dto(&dto)),
        })
    }

    pub async fn save(&mut self, api: &KnightroApi) -> Result<(), PageError> {
        let saved = api
            .update_teacher(self.teacher_id, &self.editor.draft().to_dto(self.teacher_id))
            .await?;
        self.editor.commit(TeacherProfile::from_dto(&saved));
        tracing::info!(teacher_id = self.teacher_id, "Teacher profile saved");
        Ok(())
    }
}
