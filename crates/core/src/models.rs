//! Wire-level records exchanged with the AskKnightro backend.
//!
//! Field names are camelCase on the wire. Every optional backend column is an
//! `Option` here; the client never assumes the backend fills it.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::roles::SignupRole;
use crate::types::{BackendTimestamp, DbId};

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// A teacher-owned class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub class_id: DbId,
    pub course_name: String,
    #[serde(default)]
    pub semester: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<DbId>,
    #[serde(default)]
    pub course_description: Option<String>,
    #[serde(default)]
    pub enrollment_code: Option<String>,
    #[serde(default)]
    pub shard_id: Option<String>,
}

/// Body of a create/update course call. A blank enrollment code is omitted so
/// the backend generates one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub course_name: String,
    pub semester: String,
    pub course_description: Option<String>,
    pub teacher_id: Option<DbId>,
    pub shard_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_code: Option<String>,
}

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    #[serde(default)]
    pub teacher_id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Write-only; never echoed back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// GPA arrives as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Gpa {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Gpa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gpa::Number(n) => write!(f, "{n}"),
            Gpa::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    #[serde(default)]
    pub student_id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub year_standing: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub grad_date: Option<String>,
    #[serde(default)]
    pub school_id: Option<String>,
    #[serde(default)]
    pub university_college: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub emergency_phone: Option<String>,
    #[serde(default)]
    pub gpa: Option<Gpa>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Enrollment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub student_id: DbId,
    pub enrollment_code: String,
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// An uploaded course file used for assistant grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDto {
    pub id: DbId,
    #[serde(default)]
    pub class_id: Option<DbId>,
    pub name: String,
    #[serde(default)]
    pub vector_id: Option<String>,
    #[serde(default)]
    pub is_deleted: Option<bool>,
    #[serde(default)]
    pub deleted_at: Option<BackendTimestamp>,
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Chat history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SenderType {
    Student,
    #[serde(rename = "AI")]
    Ai,
}

/// A persisted chat message as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredChatMessage {
    #[serde(default)]
    pub message_id: Option<DbId>,
    #[serde(default)]
    pub session_id: Option<DbId>,
    pub student_id: DbId,
    pub class_id: DbId,
    pub sender_type: SenderType,
    pub content: String,
    pub timestamp: BackendTimestamp,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The user's email.
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub challenge_name: Option<String>,
    #[serde(default)]
    pub session: Option<String>,
}

/// Self-signup request. Field constraints mirror the backend's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: SignupRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConfirmSignupRequest {
    /// The user's email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Confirmation code is required"))]
    pub code: String,
    pub role: SignupRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub class_id: DbId,
    #[serde(default)]
    pub student_id: Option<DbId>,
    pub question: String,
    #[serde(default)]
    pub top_k: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskSource {
    #[serde(default)]
    pub material_id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<AskSource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn course_tolerates_missing_optional_columns() {
        let course: CourseDto =
            serde_json::from_str(r#"{"classId": 3, "courseName": "Psych 101"}"#).unwrap();
        assert_eq!(course.class_id, 3);
        assert_eq!(course.teacher_id, None);
        assert_eq!(course.enrollment_code, None);
    }

    #[test]
    fn blank_enrollment_code_is_not_sent() {
        let draft = CourseDraft {
            course_name: "Algorithms".into(),
            semester: "Fall 2025".into(),
            course_description: None,
            teacher_id: Some(1),
            shard_id: None,
            enrollment_code: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("enrollmentCode").is_none());
        assert_eq!(json["courseName"], "Algorithms");
        assert!(json["shardId"].is_null());
    }

    #[test]
    fn gpa_accepts_number_or_string() {
        let s: StudentDto = serde_json::from_str(r#"{"gpa": 3.5}"#).unwrap();
        assert_eq!(s.gpa, Some(Gpa::Number(3.5)));
        let s: StudentDto = serde_json::from_str(r#"{"gpa": "A-"}"#).unwrap();
        assert_eq!(s.gpa, Some(Gpa::Text("A-".into())));
    }

    #[test]
    fn password_is_never_serialized_when_absent() {
        let json = serde_json::to_value(TeacherDto::default()).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn stored_message_parses_backend_shape() {
        let msg: StoredChatMessage = serde_json::from_str(
            r#"{"messageId":1,"sessionId":2,"studentId":3,"classId":4,
                "senderType":"AI","content":"hi","timestamp":"2025-03-01T10:15:30"}"#,
        )
        .unwrap();
        assert_eq!(msg.sender_type, SenderType::Ai);
        assert_eq!(msg.timestamp.to_string(), "2025-03-01 10:15:30");
    }

    #[test]
    fn signup_request_enforces_backend_constraints() {
        let mut req = SignupRequest {
            name: "Knight".into(),
            email: "knight@ucf.edu".into(),
            password: "longenough".into(),
            role: SignupRole::Student,
            department: None,
            major: None,
        };
        assert!(req.validate().is_ok());

        req.password = "short".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        req.password = "longenough".into();
        req.email = "not-an-email".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn signup_role_is_uppercase_on_the_wire() {
        let json = serde_json::to_value(SignupRole::Teacher).unwrap();
        assert_eq!(json, "TEACHER");
    }
}
