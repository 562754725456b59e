//! Local-image-to-bucket publishing.
//!
//! Scans the upload directory, links each file to a site row by its stem,
//! uploads the bytes, writes the public URL back onto the row, then archives
//! the file into the done directory. A file that fails anywhere in that
//! sequence stays in the upload directory and is retried on the next run.

pub mod object_name;

use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{IMAGES_BUCKET, SupabaseClient};
use object_name::{content_type_for, object_name_for, title_from_filename};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublishOutcome {
    Published,
    NoMatchingSite,
}

/// Run the publisher over the upload directory.
pub async fn run_upload(client: &SupabaseClient, upload_dir: &Path, done_dir: &Path) -> Result<()> {
    fs::create_dir_all(upload_dir)
        .with_context(|| format!("failed to create {}", upload_dir.display()))?;
    fs::create_dir_all(done_dir)
        .with_context(|| format!("failed to create {}", done_dir.display()))?;

    let files = pending_files(upload_dir)?;
    if files.is_empty() {
        println!("{} is empty, nothing to upload", upload_dir.display());
        return Ok(());
    }

    println!("Found {} images to upload", files.len().to_string().bold());

    let mut published = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &files {
        let filename = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };

        match publish_one(client, path, &filename, done_dir).await {
            Ok(PublishOutcome::Published) => published += 1,
            Ok(PublishOutcome::NoMatchingSite) => skipped += 1,
            Err(e) => {
                // file stays in the upload directory for the next run
                log::error!("{filename}: {e:#}");
                failed += 1;
            }
        }
    }

    println!();
    println!(
        "Done: {} published, {} skipped, {} failed",
        published.to_string().green(),
        skipped,
        if failed > 0 {
            failed.to_string().red().to_string()
        } else {
            failed.to_string()
        }
    );
    Ok(())
}

/// Regular files in the upload directory, in directory order.
fn pending_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}

async fn publish_one(
    client: &SupabaseClient,
    path: &Path,
    filename: &str,
    done_dir: &Path,
) -> Result<PublishOutcome> {
    let title = title_from_filename(filename);
    println!("{} {} (title: {})", "[upload]".cyan(), filename, title);

    let matches = client.find_sites_by_title(&title, "id,url").await?;
    let Some(site) = matches.first() else {
        log::warn!("no site titled '{title}' yet, run sync first; leaving {filename} in place");
        return Ok(PublishOutcome::NoMatchingSite);
    };

    let site_url = site.url.as_deref().unwrap_or("");
    let object = object_name_for(site_url, filename);
    let content_type = content_type_for(filename);

    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    client
        .upload_object(IMAGES_BUCKET, &object, bytes, &content_type)
        .await?;

    let public_url = client.public_url(IMAGES_BUCKET, &object);
    client
        .update_site(&title, &json!({ "image_url": public_url }))
        .await?;
    println!("  linked: {}", public_url.dimmed());

    archive_file(path, done_dir, filename)?;
    println!("  archived to {}", done_dir.display());

    Ok(PublishOutcome::Published)
}

/// Move a published file into the done directory. Falls back to copy+remove
/// when rename fails (done dir on another filesystem).
fn archive_file(path: &Path, done_dir: &Path, filename: &str) -> Result<()> {
    let target = done_dir.join(filename);
    if fs::rename(path, &target).is_err() {
        fs::copy(path, &target)
            .with_context(|| format!("failed to copy {} to {}", path.display(), target.display()))?;
        fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}
