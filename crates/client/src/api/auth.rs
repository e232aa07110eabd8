use askknightro_core::models::{ConfirmSignupRequest, LoginRequest, LoginResponse, SignupRequest};
use reqwest::Method;

use super::KnightroApi;
use crate::error::ApiError;

impl KnightroApi {
    /// `POST /api/auth/login`.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        Self::send_json(self.request(Method::POST, "/api/auth/login").json(request)).await
    }

    /// `POST /api/auth/signup`. The backend answers 202 and emails a code.
    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        Self::send_empty(self.request(Method::POST, "/api/auth/signup").json(request)).await
    }

    /// `POST /api/auth/confirm-signup`.
    pub async fn confirm_signup(&self, request: &ConfirmSignupRequest) -> Result<(), ApiError> {
        Self::send_empty(
            self.request(Method::POST, "/api/auth/confirm-signup")
                .json(request),
        )
        .await
    }
}
