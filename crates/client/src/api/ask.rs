use askknightro_core::models::{AskRequest, AskResponse};
use reqwest::Method;

use super::KnightroApi;
use crate::error::ApiError;

impl KnightroApi {
    /// `POST /api/ask`: retrieval-augmented answer over course materials.
    pub async fn ask(&self, request: &AskRequest) -> Result<AskResponse, ApiError> {
        Self::send_json(self.request(Method::POST, "/api/ask").json(request)).await
    }
}
