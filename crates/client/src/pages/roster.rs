//! Teacher course pages: enrolled students and uploaded materials.

use askknightro_core::error::CoreError;
use askknightro_core::models::{MaterialDto, MaterialFile, StudentDto};
use askknightro_core::types::DbId;
use askknightro_core::validation::is_accepted_material;

use crate::api::KnightroApi;
use crate::error::PageError;

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CourseRoster {
    pub course_id: DbId,
    pub students: Vec<StudentDto>,
}

impl CourseRoster {
    pub async fn load(api: &KnightroApi, course_id: DbId) -> Result<Self, PageError> {
        let students = api.list_students_in_course(course_id).await?;
        Ok(Self {
            course_id,
            students,
        })
    }

    /// Unenroll a student, then drop them from the local list.
    pub async fn remove(&mut self, api: &KnightroApi, student_id: DbId) -> Result<(), PageError> {
        api.remove_student(self.course_id, student_id).await?;
        self.students.retain(|s| s.student_id != Some(student_id));
        tracing::info!(course_id = self.course_id, student_id, "Student removed from course");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CourseMaterials {
    pub course_id: DbId,
    pub materials: Vec<MaterialDto>,
}

impl CourseMaterials {
    /// Load the live (non-deleted) materials.
    pub async fn load(api: &KnightroApi, course_id: DbId) -> Result<Self, PageError> {
        let mut page = Self {
            course_id,
            materials: Vec::new(),
        };
        page.reload(api).await?;
        Ok(page)
    }

    pub async fn reload(&mut self, api: &KnightroApi) -> Result<(), PageError> {
        self.materials = api
            .list_materials(self.course_id)
            .await?
            .into_iter()
            .filter(|m| m.is_deleted != Some(true))
            .collect();
        Ok(())
    }

    pub async fn upload(&mut self, api: &KnightroApi, file: &MaterialFile) -> Result<(), PageError> {
        ensure_text_file(&file.name)?;
        let material = api.upload_material(self.course_id, file).await?;
        tracing::info!(course_id = self.course_id, material_id = material.id, "Material uploaded");
        self.reload(api).await
    }

    pub async fn rename(
        &mut self,
        api: &KnightroApi,
        material_id: DbId,
        name: &str,
    ) -> Result<(), PageError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::validation("Material name is required").into());
        }
        api.update_material(material_id, name, None).await?;
        self.reload(api).await
    }

    /// Swap a material's content, keeping or changing its name.
    pub async fn replace(
        &mut self,
        api: &KnightroApi,
        material_id: DbId,
        file: &MaterialFile,
    ) -> Result<(), PageError> {
        ensure_text_file(&file.name)?;
        api.update_material(material_id, &file.name, Some(file)).await?;
        self.reload(api).await
    }

    pub async fn delete(&mut self, api: &KnightroApi, material_id: DbId) -> Result<(), PageError> {
        api.delete_material(material_id).await?;
        self.materials.retain(|m| m.id != material_id);
        tracing::info!(course_id = self.course_id, material_id, "Material deleted");
        Ok(())
    }
}

fn ensure_text_file(name: &str) -> Result<(), CoreError> {
    if is_accepted_material(name) {
        Ok(())
    } else {
        Err(CoreError::validation("Only .txt files are supported"))
    }
}
