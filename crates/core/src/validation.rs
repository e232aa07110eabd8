//! Form validation.
//!
//! Checks run in a fixed order and stop at the first failure; the returned
//! [`CoreError::Validation`] message is shown inline next to the form. All of
//! these failures are recoverable by correcting the input.

use validator::Validate;

use crate::error::CoreError;
use crate::roles::SignupRole;
use crate::types::DbId;

/// Email domains accepted at login and signup.
pub const ALLOWED_EMAIL_DOMAINS: &[&str] = &["@gmail.com", "@ucf.edu"];

/// Only plain-text materials are embedded by the backend.
pub const MATERIAL_EXTENSION: &str = ".txt";

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CoreError::validation("Email is required"));
    }
    if !ALLOWED_EMAIL_DOMAINS.iter().any(|d| email.ends_with(d)) {
        return Err(CoreError::validation(
            "Email must end with @gmail.com or @ucf.edu",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(CoreError::validation("Password is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<SignupRole>,
    pub agree_to_terms: bool,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_email(&self.email)?;
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(CoreError::validation(
                "First name and last name are required",
            ));
        }
        if self.role.is_none() {
            return Err(CoreError::validation(
                "Please select whether you are a student or teacher",
            ));
        }
        if self.password.is_empty() {
            return Err(CoreError::validation("Password is required"));
        }
        validate_password_match(&self.password, &self.confirm_password)?;
        if !self.agree_to_terms {
            return Err(CoreError::validation(
                "You must agree to the terms and conditions",
            ));
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Both password fields must agree. Two empty fields agree.
pub fn validate_password_match(password: &str, confirm: &str) -> Result<(), CoreError> {
    if password != confirm {
        return Err(CoreError::validation("Passwords do not match"));
    }
    Ok(())
}

/// Turn `validator` errors on a wire DTO into one inline message.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), CoreError> {
    request.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        CoreError::Validation(messages.join("; "))
    })
}

#[derive(Debug, Clone, Default)]
pub struct CourseForm {
    pub teacher_id: Option<DbId>,
    pub course_name: String,
    pub semester: String,
    pub enrollment_code: String,
    pub description: String,
}

impl CourseForm {
    pub fn validate(&self) -> Result<DbId, CoreError> {
        let teacher_id = self.teacher_id.ok_or_else(|| {
            CoreError::validation("Missing teacher id. Please log in again.")
        })?;
        if self.course_name.trim().is_empty() || self.semester.trim().is_empty() {
            return Err(CoreError::validation(
                "Please provide Course Name and Term/Semester.",
            ));
        }
        Ok(teacher_id)
    }
}

/// Whether a picked file is an accepted material.
pub fn is_accepted_material(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(MATERIAL_EXTENSION)
}

/// Trimmed enrollment code, or `None` when the input is blank.
pub fn normalize_enrollment_code(code: &str) -> Option<String> {
    let code = code.trim();
    (!code.is_empty()).then(|| code.to_string())
}
