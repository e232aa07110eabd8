//! Commands shared by both roles: dashboard and profile.

use anyhow::{bail, Result};
use askknightro_client::pages::dashboard::{load_student_dashboard, load_teacher_dashboard};
use askknightro_client::pages::profile::{StudentProfilePage, TeacherProfilePage};
use askknightro_client::SessionContext;
use askknightro_core::navigation::course_menu;
use askknightro_core::roles::Role;

pub async fn dashboard(ctx: &SessionContext) -> Result<()> {
    let session = ctx.session();
    let Some(user_id) = session.user_id else {
        bail!("Not logged in. Run `askknightro login` first.");
    };
    let api = ctx.api();

    let dash = match session.role {
        Role::Student => load_student_dashboard(&api, user_id).await,
        Role::Teacher => load_teacher_dashboard(&api, user_id).await,
        Role::Anonymous => bail!("Not logged in. Run `askknightro login` first."),
    };

    println!("Welcome back, {}!", dash.display_name);
    if let Some(error) = &dash.error {
        println!("{error}");
        return Ok(());
    }
    if dash.courses.is_empty() {
        println!("No courses yet.");
    }
    for card in &dash.courses {
        println!();
        println!("{}  ({})", card.title, card.section);
        if let Some(semester) = &card.semester {
            println!("  Term: {semester}");
        }
        if let Some(description) = &card.description {
            println!("  {description}");
        }
        match dash.role {
            Role::Teacher => {
                if let Some(code) = &card.enrollment_code {
                    println!("  Enrollment code: {code}");
                }
                for link in course_menu(card.course_id) {
                    println!("  {:<12} {}", link.label, link.route);
                }
            }
            _ => println!("  Chat: askknightro chat --course {}", card.course_id),
        }
    }
    Ok(())
}

pub async fn profile(ctx: &SessionContext, updates: &[String]) -> Result<()> {
    let session = ctx.session();
    let Some(user_id) = session.user_id else {
        bail!("Not logged in. Run `askknightro login` first.");
    };
    let api = ctx.api();
    let updates = parse_updates(updates)?;

    match session.role {
        Role::Student => {
            let mut page = StudentProfilePage::load(&api, user_id).await?;
            if !updates.is_empty() {
                page.editor.begin_edit();
                for (field, value) in &updates {
                    let mut result = Ok(());
                    page.editor.update(|p| result = p.set_field(field, value));
                    result?;
                }
                page.save(&api)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("Profile saved.");
            }
            let p = page.editor.snapshot();
            println!("{}", p.display_name());
            for (label, value) in [
                ("Email", &p.email),
                ("Major", &p.major),
                ("Year", &p.year),
                ("Graduation", &p.grad_date),
                ("College", &p.university_college),
                ("Phone", &p.phone),
                ("GPA", &p.gpa),
            ] {
                if !value.is_empty() {
                    println!("  {label:<11} {value}");
                }
            }
        }
        Role::Teacher => {
            let mut page = TeacherProfilePage::load(&api, user_id).await?;
            if !updates.is_empty() {
                page.editor.begin_edit();
                for (field, value) in &updates {
                    let mut result = Ok(());
                    page.editor.update(|p| result = p.set_field(field, value));
                    result?;
                }
                page.save(&api)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("Profile saved.");
            }
            let p = page.editor.snapshot();
            println!("{}", p.display_name());
            for (label, value) in [
                ("Email", &p.email),
                ("Department", &p.department),
                ("Bio", &p.bio),
            ] {
                if !value.is_empty() {
                    println!("  {label:<11} {value}");
                }
            }
        }
        Role::Anonymous => bail!("Not logged in. Run `askknightro login` first."),
    }
    Ok(())
}

fn parse_updates(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|entry| match entry.split_once('=') {
            Some((field, value)) => Ok((field.trim().to_string(), value.to_string())),
            None => bail!("Expected FIELD=VALUE, got '{entry}'"),
        })
        .collect()
}
