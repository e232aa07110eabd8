//! Domain core of the AskKnightro client.
//!
//! Session and role resolution, the navigation shell, the course chat state
//! machine, profile editing and form validation. Nothing here talks to the
//! network; the client crate drives these types from backend responses.

pub mod assistant;
pub mod chat;
pub mod error;
pub mod models;
pub mod navigation;
pub mod profile;
pub mod roles;
pub mod session;
pub mod token;
pub mod types;
pub mod validation;
