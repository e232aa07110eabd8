//! Teacher-only commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use askknightro_client::pages::course_logs::load_course_logs;
use askknightro_client::pages::create_course;
use askknightro_client::pages::roster::{CourseMaterials, CourseRoster};
use askknightro_client::SessionContext;
use askknightro_core::models::{MaterialFile, SenderType};
use askknightro_core::roles::Role;
use askknightro_core::types::DbId;
use askknightro_core::validation::CourseForm;
use clap::{Args, Subcommand};

use super::require_role;

#[derive(Args)]
pub struct CreateCourseArgs {
    #[arg(long)]
    name: String,
    /// Term, e.g. "Fall 2025"
    #[arg(long)]
    semester: String,
    /// Leave out to let the backend generate one
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Material to upload; only .txt files are sent
    #[arg(long = "material", value_name = "PATH")]
    materials: Vec<PathBuf>,
}

pub async fn create_course(ctx: &SessionContext, args: CreateCourseArgs) -> Result<()> {
    let teacher_id = require_role(ctx, Role::Teacher)?;

    let files = args
        .materials
        .iter()
        .map(|path| read_material(path))
        .collect::<Result<Vec<_>>>()?;

    let form = CourseForm {
        teacher_id: Some(teacher_id),
        course_name: args.name,
        semester: args.semester,
        enrollment_code: args.code.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
    };

    let created = create_course::create_course(&ctx.api(), &form, files, |line| println!("{line}"))
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    for name in &created.skipped {
        println!("Skipped {name} (only .txt files are supported)");
    }
    println!(
        "Created \"{}\" (id {}). Enrollment code: {}",
        created.course.course_name,
        created.course.class_id,
        created.course.enrollment_code.as_deref().unwrap_or("-")
    );
    println!("Next: {}", created.redirect_route());
    Ok(())
}

pub async fn logs(ctx: &SessionContext, course_id: DbId) -> Result<()> {
    require_role(ctx, Role::Teacher)?;
    let logs = load_course_logs(&ctx.api(), course_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!(
        "Chat logs for {}",
        logs.course_name.as_deref().unwrap_or("this course")
    );
    if logs.students.is_empty() {
        println!("No student conversations yet.");
    }
    for log in &logs.students {
        let name = log.student.name.as_deref().unwrap_or("Unknown student");
        println!();
        println!(
            "{name} - {} messages, last at {}",
            log.message_count(),
            log.last_message_at.format("%Y-%m-%d %H:%M")
        );
        for message in &log.messages {
            let who = match message.sender_type {
                SenderType::Student => "Student",
                SenderType::Ai => "Knightro",
            };
            println!("  [{}] {who}: {}", message.timestamp.format("%H:%M"), message.content);
        }
    }
    Ok(())
}

pub async fn roster(ctx: &SessionContext, course_id: DbId, remove: Option<DbId>) -> Result<()> {
    require_role(ctx, Role::Teacher)?;
    let api = ctx.api();
    let mut roster = CourseRoster::load(&api, course_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if let Some(student_id) = remove {
        roster
            .remove(&api, student_id)
            .await
            .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        println!("Removed student {student_id}.");
    }

    println!("{} students enrolled", roster.students.len());
    for student in &roster.students {
        println!(
            "  {:>6}  {:<24} {}",
            student.student_id.map(|id| id.to_string()).unwrap_or_default(),
            student.name.as_deref().unwrap_or("-"),
            student.email.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

#[derive(Subcommand)]
pub enum MaterialsAction {
    /// Upload a .txt file
    Upload { path: PathBuf },
    /// Rename a material
    Rename {
        id: DbId,
        name: String,
    },
    /// Replace a material's content
    Replace { id: DbId, path: PathBuf },
    /// Delete a material
    Delete { id: DbId },
}

pub async fn materials(
    ctx: &SessionContext,
    course_id: DbId,
    action: Option<MaterialsAction>,
) -> Result<()> {
    require_role(ctx, Role::Teacher)?;
    let api = ctx.api();
    let mut page = CourseMaterials::load(&api, course_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    let result = match action {
        None => Ok(()),
        Some(MaterialsAction::Upload { path }) => page.upload(&api, &read_material(&path)?).await,
        Some(MaterialsAction::Rename { id, name }) => page.rename(&api, id, &name).await,
        Some(MaterialsAction::Replace { id, path }) => {
            page.replace(&api, id, &read_material(&path)?).await
        }
        Some(MaterialsAction::Delete { id }) => page.delete(&api, id).await,
    };
    result.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if page.materials.is_empty() {
        println!("No materials uploaded.");
    }
    for material in &page.materials {
        println!("  {:>6}  {}", material.id, material.name);
    }
    Ok(())
}

fn read_material(path: &Path) -> Result<MaterialFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;
    Ok(MaterialFile { name, bytes })
}
