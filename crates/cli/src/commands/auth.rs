use anyhow::Result;
use askknightro_client::pages::auth::{self, SignupExtras};
use askknightro_client::SessionContext;
use askknightro_core::models::ConfirmSignupRequest;
use askknightro_core::roles::{Role, SignupRole};
use askknightro_core::validation::{LoginForm, SignupForm};
use clap::Args;

pub async fn login(ctx: &SessionContext, email: String, password: String) -> Result<()> {
    let logged_in = auth::login(ctx, &LoginForm { email, password })
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("Logged in as {}. Home: {}", logged_in.role, logged_in.home_route);
    Ok(())
}

pub fn logout(ctx: &SessionContext) -> Result<()> {
    auth::logout(ctx)?;
    println!("Logged out.");
    Ok(())
}

#[derive(Args)]
pub struct SignupArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Repeat the password; defaults to `--password`
    #[arg(long)]
    confirm_password: Option<String>,
    /// `student` or `teacher`
    #[arg(long)]
    role: SignupRole,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    major: Option<String>,
    /// Accept the terms and conditions
    #[arg(long)]
    agree: bool,
}

pub async fn signup(ctx: &SessionContext, args: SignupArgs) -> Result<()> {
    let form = SignupForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        confirm_password: args.confirm_password.unwrap_or_else(|| args.password.clone()),
        password: args.password,
        role: Some(args.role),
        agree_to_terms: args.agree,
    };
    let extras = SignupExtras {
        department: args.department,
        major: args.major,
    };

    auth::signup(&ctx.api(), &form, extras)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!(
        "Account created. Check {} for a confirmation code, then run `askknightro confirm`.",
        form.email.trim()
    );
    Ok(())
}

#[derive(Args)]
pub struct ConfirmArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    code: String,
    #[arg(long)]
    role: SignupRole,
    #[arg(long)]
    name: Option<String>,
}

pub async fn confirm(ctx: &SessionContext, args: ConfirmArgs) -> Result<()> {
    let request = ConfirmSignupRequest {
        username: args.email.trim().to_string(),
        code: args.code.trim().to_string(),
        role: args.role,
        name: args.name,
    };
    auth::confirm_signup(&ctx.api(), &request)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    println!("Account confirmed. You can now log in.");
    Ok(())
}

pub fn whoami(ctx: &SessionContext) {
    let (resolver, menu) = ctx.mount_navigation();
    let role = resolver.role().unwrap_or(Role::Anonymous);
    println!("Role: {role}");
    if let Some(id) = ctx.user_id() {
        println!("User id: {id}");
    }
    if let Some(menu) = menu {
        println!("Menu:");
        for link in menu.links() {
            println!("  {:<14} {}", link.label, link.route);
        }
    }
}
