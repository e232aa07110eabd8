pub mod auth;
pub mod chat;
pub mod home;
pub mod student;
pub mod teacher;

use anyhow::{bail, Result};
use askknightro_client::SessionContext;
use askknightro_core::roles::Role;
use askknightro_core::types::DbId;

/// The stored user id, provided the session has `role`.
pub fn require_role(ctx: &SessionContext, role: Role) -> Result<DbId> {
    let session = ctx.session();
    if session.role != role {
        bail!(
            "This command needs a {} session (current: {}). Run `askknightro login` first.",
            role,
            session.role
        );
    }
    match session.user_id {
        Some(id) => Ok(id),
        None => bail!("No user id in the stored session. Please log in again."),
    }
}
