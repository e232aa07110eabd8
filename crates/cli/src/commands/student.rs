use anyhow::Result;
use askknightro_client::pages::enrollment::join_course;
use askknightro_client::SessionContext;
use askknightro_core::roles::Role;

use super::require_role;

pub async fn enroll(ctx: &SessionContext, code: &str) -> Result<()> {
    let student_id = require_role(ctx, Role::Student)?;

    match join_course(&ctx.api(), student_id, code).await {
        Ok(Some(outcome)) => println!("{}", outcome.message()),
        Ok(None) => println!("Enter an enrollment code."),
        Err(e) => anyhow::bail!(e.user_message()),
    }
    Ok(())
}
