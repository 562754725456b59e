//! Spreadsheet-to-table reconciliation.
//!
//! Each row carries a `state` cell selecting the action. A failing row is
//! reported and skipped; the run never rolls back or retries.

pub mod reader;

use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::api::SupabaseClient;
use reader::{RowState, SheetRow};

/// What happened to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowOutcome {
    Applied,
    Skipped,
}

/// Run the reconciler against a spreadsheet file.
pub async fn run_sync(client: &SupabaseClient, path: &Path) -> Result<()> {
    let rows = reader::read_sheet_rows(path)?;
    println!(
        "Processing {} rows from {}",
        rows.len().to_string().bold(),
        path.display().to_string().cyan()
    );

    let mut applied = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for row in &rows {
        if row.site.title.is_empty() {
            log::warn!("row {}: skipped, no title", row.line);
            skipped += 1;
            continue;
        }

        match apply_row(client, row).await {
            Ok(RowOutcome::Applied) => applied += 1,
            Ok(RowOutcome::Skipped) => skipped += 1,
            Err(e) => {
                log::error!("row '{}': {e:#}", row.site.title);
                failed += 1;
            }
        }
    }

    println!();
    println!(
        "Done: {} applied, {} skipped, {} failed",
        applied.to_string().green(),
        skipped,
        if failed > 0 {
            failed.to_string().red().to_string()
        } else {
            failed.to_string()
        }
    );
    Ok(())
}

/// Dispatch one row by its state. Errors from the remote bubble up to the
/// caller, which logs them and moves on.
async fn apply_row(client: &SupabaseClient, row: &SheetRow) -> Result<RowOutcome> {
    let title = &row.site.title;

    match &row.state {
        RowState::New => {
            println!("{} {}", "[new]".green(), title);
            let existing = client.find_sites_by_title(title, "id").await?;
            if !existing.is_empty() {
                println!("  already exists, skipping insert");
                return Ok(RowOutcome::Skipped);
            }
            client.insert_site(&row.site).await?;
            Ok(RowOutcome::Applied)
        }
        RowState::Delete => {
            println!("{} {}", "[delete]".red(), title);
            client.delete_site(title).await?;
            Ok(RowOutcome::Applied)
        }
        RowState::Update => {
            println!("{} {}", "[update]".yellow(), title);
            let data = serde_json::to_value(&row.site)?;
            client.update_site(title, &data).await?;
            Ok(RowOutcome::Applied)
        }
        RowState::Normal => Ok(RowOutcome::Skipped),
        RowState::Unknown(raw) => {
            log::warn!("row '{}': unrecognized state '{}'", title, raw);
            Ok(RowOutcome::Skipped)
        }
    }
}
