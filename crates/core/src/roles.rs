//! Role claims and role classification.
//!
//! Group names must match the identity provider's group configuration.

use serde::{Deserialize, Serialize};

pub const GROUP_STUDENT: &str = "student";
pub const GROUP_TEACHER: &str = "teacher";

/// Client-derived classification gating navigation and dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    /// No usable session claim ("none").
    #[serde(rename = "none")]
    Anonymous,
}

impl Role {
    /// Classify a group list.
    ///
    /// `student` wins over `teacher` when both are present; anything else is
    /// anonymous. Group names are compared case-insensitively.
    pub fn from_groups<S: AsRef<str>>(groups: &[S]) -> Self {
        let has = |name: &str| groups.iter().any(|g| g.as_ref().eq_ignore_ascii_case(name));
        if has(GROUP_STUDENT) {
            Role::Student
        } else if has(GROUP_TEACHER) {
            Role::Teacher
        } else {
            Role::Anonymous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Anonymous => "none",
        }
    }

    /// Value of the backend's `role` query parameter, if the role has one.
    pub fn as_query_param(&self) -> Option<&'static str> {
        match self {
            Role::Student => Some("STUDENT"),
            Role::Teacher => Some("TEACHER"),
            Role::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Role::Anonymous)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role chosen at signup, echoed again at confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignupRole {
    Student,
    Teacher,
}

impl std::str::FromStr for SignupRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            GROUP_STUDENT => Ok(SignupRole::Student),
            GROUP_TEACHER => Ok(SignupRole::Teacher),
            other => Err(format!("Unknown role '{other}'. Must be student or teacher")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_group_resolves_student() {
        assert_eq!(Role::from_groups(&["student"]), Role::Student);
    }

    #[test]
    fn teacher_group_resolves_teacher() {
        assert_eq!(Role::from_groups(&["teacher"]), Role::Teacher);
    }

    #[test]
    fn student_takes_precedence_over_teacher() {
        assert_eq!(Role::from_groups(&["teacher", "student"]), Role::Student);
        assert_eq!(Role::from_groups(&["student", "teacher"]), Role::Student);
    }

    #[test]
    fn unknown_or_empty_groups_are_anonymous() {
        let empty: [&str; 0] = [];
        assert_eq!(Role::from_groups(&empty), Role::Anonymous);
        assert_eq!(Role::from_groups(&["admin"]), Role::Anonymous);
    }

    #[test]
    fn group_match_ignores_case() {
        assert_eq!(Role::from_groups(&["Teacher"]), Role::Teacher);
    }

    #[test]
    fn query_param_only_for_authenticated_roles() {
        assert_eq!(Role::Student.as_query_param(), Some("STUDENT"));
        assert_eq!(Role::Teacher.as_query_param(), Some("TEACHER"));
        assert_eq!(Role::Anonymous.as_query_param(), None);
    }

    #[test]
    fn anonymous_serializes_as_none() {
        assert_eq!(serde_json::to_string(&Role::Anonymous).unwrap(), "\"none\"");
    }

    #[test]
    fn signup_role_parses_case_insensitively() {
        assert_eq!("Teacher".parse::<SignupRole>().unwrap(), SignupRole::Teacher);
        assert!("admin".parse::<SignupRole>().is_err());
    }
}
