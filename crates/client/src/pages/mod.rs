//! Page compositions: each drives core state from backend calls the way one
//! screen of the web client does.

pub mod auth;
pub mod chat;
pub mod course_logs;
pub mod create_course;
pub mod dashboard;
pub mod enrollment;
pub mod profile;
pub mod roster;
