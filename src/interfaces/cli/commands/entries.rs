//! Entry commands: add and list

use std::sync::Arc;

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{EnqueueRequest, Scheduler};
use crate::storage::{Entry, SeaOrmStorage};
use crate::utils::today;

pub async fn add_entry(
    storage: Arc<SeaOrmStorage>,
    url: String,
    comment: String,
    private: String,
) -> Result<(), CliError> {
    let scheduler = Scheduler::new(storage);
    let entry = scheduler
        .enqueue(
            EnqueueRequest {
                target: url,
                comment,
                visibility: private,
            },
            today(),
        )
        .await?;

    println!(
        "{} Queued #{} -> {} (live on {})",
        "✓".bold().green(),
        entry.id.to_string().cyan(),
        entry.target.as_deref().unwrap_or("").blue().underline(),
        entry.active_at.to_string().yellow()
    );
    Ok(())
}

fn print_entry(entry: &Entry) {
    let mut parts = vec![format!(
        "#{} {} -> {}",
        entry.id.to_string().cyan(),
        entry.active_at,
        entry.target.as_deref().unwrap_or("-").blue().underline()
    )];
    if !entry.comment.is_empty() {
        parts.push(format!("({})", entry.comment).dimmed().to_string());
    }
    if !entry.visibility.is_empty() {
        parts.push(format!("[{}]", entry.visibility).yellow().to_string());
    }
    println!("  {}", parts.join(" "));
}

pub async fn list_entries(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let scheduler = Scheduler::new(storage);
    let today = today();
    let archive = scheduler.list_archive(today).await?;
    let queue = scheduler.list_queue(today).await?;

    if archive.is_empty() && queue.is_empty() {
        println!("{} No entries yet", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Live and past:".bold().green());
    for entry in &archive {
        print_entry(entry);
    }
    println!();
    println!("{}", "Queued:".bold().green());
    for entry in &queue {
        print_entry(entry);
    }
    println!();
    println!(
        "{} {} live, {} queued",
        "ℹ".bold().blue(),
        archive.len().to_string().green(),
        queue.len().to_string().yellow()
    );
    Ok(())
}
