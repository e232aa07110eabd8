//! Profile view models and the edit/cancel/save cycle.
//!
//! The editor keeps the last loaded (or saved) record as a snapshot next to
//! the draft being edited. Cancel restores the snapshot exactly; save submits
//! the whole draft and adopts whatever the backend echoes back.

use crate::error::CoreError;
use crate::models::{Gpa, StudentDto, TeacherDto};
use crate::types::DbId;
use crate::validation::validate_password_match;

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ProfileEditor<T> {
    snapshot: T,
    draft: T,
    editing: bool,
}

impl<T: Clone + PartialEq> ProfileEditor<T> {
    pub fn new(loaded: T) -> Self {
        Self {
            draft: loaded.clone(),
            snapshot: loaded,
            editing: false,
        }
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Apply a change to the draft. Ignored unless editing.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        if self.editing {
            f(&mut self.draft);
        }
    }

    /// Drop all draft changes.
    pub fn cancel(&mut self) {
        self.draft = self.snapshot.clone();
        self.editing = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != self.snapshot
    }

    /// Adopt a saved record as the new snapshot and leave edit mode.
    pub fn commit(&mut self, saved: T) {
        self.draft = saved.clone();
        self.snapshot = saved;
        self.editing = false;
    }

    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

/// Editable student profile. Empty strings stand for absent values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentProfile {
    pub student_id: Option<DbId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: String,
    pub year: String,
    /// `YYYY-MM-DD`.
    pub grad_date: String,
    pub school_id: String,
    pub university_college: String,
    pub profile_picture: String,
    pub phone: String,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub gpa: String,
    /// Write-only; cleared after every save.
    pub password: String,
    pub confirm_password: String,
}

impl StudentProfile {
    pub fn from_dto(d: &StudentDto) -> Self {
        let name = d.name.as_deref().unwrap_or("").trim();
        let (first, last) = match name.split_once(' ') {
            Some((first, rest)) => (first, rest.trim()),
            None => (name, ""),
        };

        Self {
            student_id: d.student_id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: text(&d.email),
            major: text(&d.major),
            year: text(&d.year_standing),
            grad_date: d
                .grad_date
                .as_deref()
                .map(|g| g.chars().take(10).collect())
                .unwrap_or_default(),
            school_id: text(&d.school_id),
            university_college: text(&d.university_college),
            profile_picture: text(&d.profile_picture),
            phone: text(&d.phone),
            address: text(&d.address),
            emergency_contact: text(&d.emergency_contact),
            emergency_phone: text(&d.emergency_phone),
            gpa: d.gpa.as_ref().map(Gpa::to_string).unwrap_or_default(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    /// Whole-record payload for a save. Blank optional fields become `null`
    /// and the password is only sent when one was typed.
    pub fn to_dto(&self) -> StudentDto {
        let gpa = non_empty(&self.gpa).map(|g| match g.parse::<f64>() {
            Ok(n) => Gpa::Number(n),
            Err(_) => Gpa::Text(g),
        });

        StudentDto {
            student_id: self.student_id,
            name: non_empty(&self.full_name()),
            email: non_empty(&self.email),
            profile_picture: non_empty(&self.profile_picture),
            year_standing: non_empty(&self.year),
            major: non_empty(&self.major),
            grad_date: non_empty(&self.grad_date),
            school_id: non_empty(&self.school_id),
            university_college: non_empty(&self.university_college),
            phone: non_empty(&self.phone),
            address: non_empty(&self.address),
            emergency_contact: non_empty(&self.emergency_contact),
            emergency_phone: non_empty(&self.emergency_phone),
            gpa,
            password: non_empty(&self.password),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Name for headings, with a generic fallback.
    pub fn display_name(&self) -> String {
        let name = self.full_name();
        if name.is_empty() {
            "Student".to_string()
        } else {
            name
        }
    }

    pub fn validate_for_save(&self) -> Result<(), CoreError> {
        validate_password_match(&self.password, &self.confirm_password)
    }

    /// Set a field by its form name. Returns an error for unknown or
    /// read-only fields.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), CoreError> {
        let slot = match field {
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "email" => &mut self.email,
            "major" => &mut self.major,
            "year" => &mut self.year,
            "gradDate" => &mut self.grad_date,
            "schoolId" => &mut self.school_id,
            "universityCollege" => &mut self.university_college,
            "profilePicture" => &mut self.profile_picture,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "emergencyContact" => &mut self.emergency_contact,
            "emergencyPhone" => &mut self.emergency_phone,
            "gpa" => &mut self.gpa,
            "password" => &mut self.password,
            "confirmPassword" => &mut self.confirm_password,
            other => {
                return Err(CoreError::validation(format!(
                    "Unknown or read-only student field '{other}'"
                )))
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

/// Editable teacher profile. Email is read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherProfile {
    pub teacher_id: Option<DbId>,
    pub name: String,
    pub email: String,
    pub department: String,
    pub profile_picture: String,
    pub bio: String,
}

impl TeacherProfile {
    pub fn from_dto(d: &TeacherDto) -> Self {
        Self {
            teacher_id: d.teacher_id,
            name: text(&d.name),
            email: text(&d.email),
            department: text(&d.department),
            profile_picture: text(&d.profile_picture),
            bio: text(&d.bio),
        }
    }

    pub fn to_dto(&self, teacher_id: DbId) -> TeacherDto {
        TeacherDto {
            teacher_id: Some(teacher_id),
            name: non_empty(&self.name),
            email: non_empty(&self.email),
            department: non_empty(&self.department),
            profile_picture: non_empty(&self.profile_picture),
            bio: non_empty(&self.bio),
            password: None,
        }
    }

    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            "Professor".to_string()
        } else {
            self.name.clone()
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), CoreError> {
        let slot = match field {
            "name" => &mut self.name,
            "department" => &mut self.department,
            "profilePicture" => &mut self.profile_picture,
            "bio" => &mut self.bio,
            other => {
                return Err(CoreError::validation(format!(
                    "Unknown or read-only teacher field '{other}'"
                )))
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
