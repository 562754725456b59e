//! Batch tooling for the sitenav catalog.
//!
//! Two jobs, run independently:
//! - `sync` reconciles an operator-maintained spreadsheet into the remote
//!   `sites` table (insert/update/delete keyed by title).
//! - `upload-images` publishes local image files to the storage bucket and
//!   links them back onto matching rows.

mod api;
mod config;
mod sync;
mod upload;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::api::SupabaseClient;
use crate::config::Config;

/// Sitenav catalog maintenance CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile the operator spreadsheet into the remote sites table
    Sync {
        /// Path to the spreadsheet (first worksheet is read)
        #[arg(long, default_value = "data.xlsx")]
        file: PathBuf,
    },
    /// Upload pending images to the storage bucket and link them to sites
    UploadImages {
        /// Directory scanned for images awaiting upload
        #[arg(long, default_value = "images_upload")]
        upload_dir: PathBuf,
        /// Directory uploaded images are archived into
        #[arg(long, default_value = "images_done")]
        done_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("Make sure .env.local exists and defines both variables.");
            process::exit(1);
        }
    };

    let client = match SupabaseClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Sync { file } => sync::run_sync(&client, &file).await,
        Commands::UploadImages {
            upload_dir,
            done_dir,
        } => upload::run_upload(&client, &upload_dir, &done_dir).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
