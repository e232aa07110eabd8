//! Interactive course chat on stdin/stdout.

use std::io::Write;

use anyhow::Result;
use askknightro_client::assistant::provider_for;
use askknightro_client::pages::chat::CourseChat;
use askknightro_client::SessionContext;
use askknightro_core::chat::{BootstrapState, Sender};
use askknightro_core::types::DbId;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(ctx: &SessionContext, course: Option<DbId>) -> Result<()> {
    let api = ctx.api();
    let provider = provider_for(ctx.config(), api.clone());
    let chat = CourseChat::new(api, provider, ctx.user_id());

    match chat.bootstrap(course).await {
        BootstrapState::Ready => {}
        _ => {
            let pane = chat.snapshot().await;
            println!("{}", pane.disabled_reason().unwrap_or_default());
            return Ok(());
        }
    }

    let pane = chat.snapshot().await;
    if let Some(header) = pane.header() {
        println!(
            "{} | {} | Instructor: {}",
            header.course_name,
            header.semester.as_deref().unwrap_or("-"),
            header.instructor_name
        );
    }
    let mut shown = print_new(&chat, 0).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        chat.set_draft(line).await;
        match chat.send_draft().await {
            Ok(handle) => {
                println!("Knightro is typing...");
                handle.await?;
                if let Some(notice) = chat.snapshot().await.notice() {
                    println!("! {notice}");
                }
                shown = print_new(&chat, shown).await;
            }
            Err(rejection) => tracing::debug!(%rejection, "Message not sent"),
        }
    }

    chat.close();
    Ok(())
}

/// Print assistant messages appended since `shown`; returns the new count.
async fn print_new(chat: &CourseChat, shown: usize) -> usize {
    let pane = chat.snapshot().await;
    for message in &pane.messages()[shown..] {
        if message.sender == Sender::Assistant {
            println!("Knightro: {}", message.content);
        }
    }
    pane.messages().len()
}
