//! `askknightro` -- terminal client for the AskKnightro course assistant.
//!
//! # Environment variables
//!
//! | Variable                   | Default                     | Description                         |
//! |----------------------------|-----------------------------|-------------------------------------|
//! | `API_BASE_URL`             | `http://localhost:8080`     | Backend base URL                    |
//! | `REQUEST_TIMEOUT_SECS`     | `30`                        | Per-request timeout                 |
//! | `ASSISTANT_MODE`           | `canned`                    | `canned` or `backend`               |
//! | `ASSISTANT_REPLY_DELAY_MS` | `1500`                      | Canned assistant thinking time      |
//! | `ASSISTANT_TOP_K`          | `5`                         | Chunks retrieved per question       |
//! | `SESSION_FILE`             | `.askknightro/session.json` | Persisted login session             |
//! | `RUST_LOG`                 | `askknightro=info`          | Log filter (logs go to stderr)      |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use askknightro_client::{ClientConfig, SessionContext};
use askknightro_core::session::FileSessionStore;
use askknightro_core::types::DbId;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "askknightro")]
#[command(about = "AskKnightro - AI course assistant client", long_about = None)]
struct Cli {
    /// Session file to use instead of `SESSION_FILE`
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a @ucf.edu or @gmail.com account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Create an account; a confirmation code is emailed
    Signup(commands::auth::SignupArgs),
    /// Confirm a new account with the emailed code
    Confirm(commands::auth::ConfirmArgs),
    /// Show the resolved role and its menu
    Whoami,
    /// List your courses
    Dashboard,
    /// Chat with the course assistant (type /quit to leave)
    Chat {
        #[arg(long)]
        course: Option<DbId>,
    },
    /// Join a course by enrollment code
    Enroll {
        #[arg(long)]
        code: String,
    },
    /// Create a course and upload .txt materials
    CreateCourse(commands::teacher::CreateCourseArgs),
    /// Show student chat logs for a course
    Logs {
        #[arg(long)]
        course: DbId,
    },
    /// List (or remove) students in a course
    Roster {
        #[arg(long)]
        course: DbId,
        /// Student id to unenroll
        #[arg(long)]
        remove: Option<DbId>,
    },
    /// Manage course materials
    Materials {
        #[arg(long)]
        course: DbId,
        #[command(subcommand)]
        action: Option<commands::teacher::MaterialsAction>,
    },
    /// Show or edit your profile
    Profile {
        /// Field update as `field=value`, e.g. `major=Physics`
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askknightro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }
    tracing::debug!(
        api_base_url = %config.api_base_url,
        session_file = %config.session_file.display(),
        "Configuration loaded",
    );

    let store = Arc::new(FileSessionStore::open(&config.session_file));
    let ctx = SessionContext::new(config, store)?;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await?,
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Signup(args) => commands::auth::signup(&ctx, args).await?,
        Commands::Confirm(args) => commands::auth::confirm(&ctx, args).await?,
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Dashboard => commands::home::dashboard(&ctx).await?,
        Commands::Chat { course } => commands::chat::run(&ctx, course).await?,
        Commands::Enroll { code } => commands::student::enroll(&ctx, &code).await?,
        Commands::CreateCourse(args) => commands::teacher::create_course(&ctx, args).await?,
        Commands::Logs { course } => commands::teacher::logs(&ctx, course).await?,
        Commands::Roster { course, remove } => {
            commands::teacher::roster(&ctx, course, remove).await?
        }
        Commands::Materials { course, action } => {
            commands::teacher::materials(&ctx, course, action).await?
        }
        Commands::Profile { set } => commands::home::profile(&ctx, &set).await?,
    }

    Ok(())
}
