use askknightro_core::error::CoreError;
use serde::Deserialize;

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Duplicate enrollment and similar state conflicts.
    #[error("Conflict: {message}")]
    Conflict {
        code: Option<String>,
        message: String,
    },

    /// Any other non-2xx status.
    #[error("Backend error ({status}): {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

/// Error body written by the backend's exception handlers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|b| b.code.clone());
        let message = parsed
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty())
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .unwrap_or_else(|| default_message(status).to_string());

        match status {
            401 | 403 => ApiError::Unauthorized { message },
            404 => ApiError::NotFound { message },
            409 => ApiError::Conflict { code, message },
            _ => ApiError::Status {
                status,
                code,
                message,
            },
        }
    }

    /// Backend error code such as `ALREADY_ENROLLED`, when one was sent.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Conflict { code, .. } | ApiError::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// The short text a page shows inline.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Request(e) if e.is_timeout() => "The server took too long to respond.".into(),
            ApiError::Request(_) => "Could not reach the server.".into(),
            ApiError::Unauthorized { message }
            | ApiError::NotFound { message }
            | ApiError::Conflict { message, .. }
            | ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server sent an unexpected response.".into(),
        }
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        401 | 403 => "You are not signed in.",
        404 => "Not found.",
        409 => "Conflict.",
        _ => "Request failed.",
    }
}

/// Errors a page composition surfaces to its view.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Validation or session storage failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("You need to log in first.")]
    NotSignedIn,
}

impl PageError {
    pub fn user_message(&self) -> String {
        match self {
            PageError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn structured_conflict_body_keeps_code_and_message() {
        let err = ApiError::from_status(
            409,
            r#"{"code":"ALREADY_ENROLLED","message":"Student already enrolled"}"#,
        );
        assert_matches!(&err, ApiError::Conflict { .. });
        assert_eq!(err.code(), Some("ALREADY_ENROLLED"));
        assert_eq!(err.user_message(), "Student already enrolled");
    }

    #[test]
    fn not_found_and_unauthorized_are_distinguished() {
        assert_matches!(
            ApiError::from_status(404, r#"{"code":"NOT_FOUND","message":"Course not found"}"#),
            ApiError::NotFound { message } if message == "Course not found"
        );
        assert_matches!(
            ApiError::from_status(401, ""),
            ApiError::Unauthorized { .. }
        );
    }

    #[test]
    fn plain_text_body_becomes_the_message() {
        let err = ApiError::from_status(500, "boom\n");
        assert_matches!(
            &err,
            ApiError::Status { status: 500, code: None, message } if message == "boom"
        );
    }

    #[test]
    fn empty_body_gets_a_default_message() {
        let err = ApiError::from_status(502, "  ");
        assert_eq!(err.user_message(), "Request failed.");
    }

    #[test]
    fn spring_style_error_field_is_used() {
        let err = ApiError::from_status(400, r#"{"status":400,"error":"Bad Request"}"#);
        assert_eq!(err.user_message(), "Bad Request");
    }
}
