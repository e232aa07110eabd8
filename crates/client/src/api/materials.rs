use askknightro_core::models::{MaterialDto, MaterialFile};
use askknightro_core::types::DbId;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::KnightroApi;
use crate::error::ApiError;

impl KnightroApi {
    /// `GET /api/materials/course/{courseId}`.
    pub async fn list_materials(&self, course_id: DbId) -> Result<Vec<MaterialDto>, ApiError> {
        Self::send_json(
            self.request(Method::GET, &format!("/api/materials/course/{course_id}")),
        )
        .await
    }

    /// `POST /api/materials` as multipart `classId`, `file`, `name`.
    ///
    /// The backend embeds the file before answering, so this call is slow for
    /// large materials.
    pub async fn upload_material(
        &self,
        course_id: DbId,
        file: &MaterialFile,
    ) -> Result<MaterialDto, ApiError> {
        let form = Form::new()
            .text("classId", course_id.to_string())
            .text("name", file.name.clone())
            .part("file", file_part(file)?);
        Self::send_json(self.request(Method::POST, "/api/materials").multipart(form)).await
    }

    /// `PUT /api/materials/{id}`: rename, and optionally replace the content.
    pub async fn update_material(
        &self,
        material_id: DbId,
        name: &str,
        replacement: Option<&MaterialFile>,
    ) -> Result<MaterialDto, ApiError> {
        let mut form = Form::new().text("name", name.to_string());
        if let Some(file) = replacement {
            form = form.part("file", file_part(file)?);
        }
        Self::send_json(
            self.request(Method::PUT, &format!("/api/materials/{material_id}"))
                .multipart(form),
        )
        .await
    }

    /// `DELETE /api/materials/{id}`.
    pub async fn delete_material(&self, material_id: DbId) -> Result<(), ApiError> {
        Self::send_empty(self.request(Method::DELETE, &format!("/api/materials/{material_id}")))
            .await
    }
}

fn file_part(file: &MaterialFile) -> Result<Part, ApiError> {
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str("text/plain")?)
}
