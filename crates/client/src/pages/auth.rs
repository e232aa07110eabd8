//! Login, logout, signup and signup confirmation.

use askknightro_core::error::CoreError;
use askknightro_core::models::{ConfirmSignupRequest, LoginRequest, SignupRequest};
use askknightro_core::navigation::NavMenu;
use askknightro_core::roles::{Role, SignupRole};
use askknightro_core::session::{self, SessionTokens};
use askknightro_core::validation::{validate_request, LoginForm, SignupForm};

use crate::api::KnightroApi;
use crate::context::SessionContext;
use crate::error::PageError;

/// Result of a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedIn {
    pub role: Role,
    /// Dashboard to navigate to.
    pub home_route: &'static str,
}

/// Validate the form, authenticate and persist the session.
pub async fn login(ctx: &SessionContext, form: &LoginForm) -> Result<LoggedIn, PageError> {
    form.validate()?;

    let response = ctx
        .api()
        .login(&LoginRequest {
            username: form.email.trim().to_string(),
            password: form.password.clone(),
        })
        .await?;

    if let Some(challenge) = response.challenge_name.as_deref() {
        tracing::warn!(challenge, "Login requires an additional challenge");
        return Err(CoreError::Unauthorized(format!(
            "Additional sign-in step required ({challenge})"
        ))
        .into());
    }

    let tokens = SessionTokens {
        access_token: response.access_token,
        id_token: response.id_token,
        refresh_token: response.refresh_token,
    };
    let role = session::store_login(ctx.store(), &tokens, None)?;
    tracing::info!(role = %role, "Logged in");

    Ok(LoggedIn {
        role,
        home_route: NavMenu::for_role(role).home_route(),
    })
}

pub fn logout(ctx: &SessionContext) -> Result<(), PageError> {
    session::clear_session(ctx.store())?;
    tracing::info!("Logged out");
    Ok(())
}

/// Optional role-specific signup details.
#[derive(Debug, Clone, Default)]
pub struct SignupExtras {
    pub department: Option<String>,
    pub major: Option<String>,
}

/// Validate and submit a signup. The backend emails a confirmation code.
pub async fn signup(
    api: &KnightroApi,
    form: &SignupForm,
    extras: SignupExtras,
) -> Result<SignupRole, PageError> {
    form.validate()?;
    let role = form
        .role
        .ok_or_else(|| CoreError::validation("Please select whether you are a student or teacher"))?;

    let request = SignupRequest {
        name: form.full_name(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        role,
        department: extras.department.filter(|d| !d.trim().is_empty()),
        major: extras.major.filter(|m| !m.trim().is_empty()),
    };
    validate_request(&request)?;

    api.signup(&request).await?;
    tracing::info!(role = ?role, "Signup submitted; awaiting confirmation code");
    Ok(role)
}

/// Confirm a signup with the emailed code.
pub async fn confirm_signup(
    api: &KnightroApi,
    request: &ConfirmSignupRequest,
) -> Result<(), PageError> {
    validate_request(request)?;
    api.confirm_signup(request).await?;
    tracing::info!(role = ?request.role, "Signup confirmed");
    Ok(())
}
