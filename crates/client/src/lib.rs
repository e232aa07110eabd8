//! Networked side of the AskKnightro client.
//!
//! [`api::KnightroApi`] wraps the backend's REST endpoints; [`pages`] composes
//! those calls with the domain state in `askknightro-core`.

pub mod api;
pub mod assistant;
pub mod config;
pub mod context;
pub mod error;
pub mod pages;

pub use api::KnightroApi;
pub use config::{ClientConfig, ConfigError};
pub use context::SessionContext;
pub use error::{ApiError, PageError};
