//! `nid` - terminal front end for the identity-record index.
//!
//! Wires the library's operations to subcommands: batch ingestion with
//! live per-file progress, search with CSV export, full-database export,
//! printable server copies, drive-folder configuration, and clear-all.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing_subscriber::EnvFilter;

use nid_index::{
    digits_only, export, BatchEvent, DriveSync, FileInput, FileStatus, GeminiExtractor,
    JsonFileStore, RecordIndex, SearchOptions, SearchQuery, SourceKind,
};

#[derive(Parser)]
#[command(name = "nid", about = "Bilingual identity-record indexer", version)]
struct Cli {
    /// Data directory for the persisted index (defaults to the platform
    /// data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from document files and admit them to the index
    Ingest {
        /// Image or PDF files to process, in queue order
        files: Vec<PathBuf>,
    },

    /// Look up records by identifier fragment and date of birth
    Search {
        /// Full NID number, or its last 4 digits
        nid: String,

        /// Date of birth, YYYY-MM-DD
        dob: String,

        /// Also export the results as CSV into the current directory
        #[arg(long)]
        csv: bool,
    },

    /// List all indexed records
    List,

    /// Export the full database as CSV
    Export {
        /// Output directory (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render a printable server copy for one record
    Print {
        /// Full NID number of the record
        nid: String,

        /// Output HTML file (defaults to server_copy_{nid}.html)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Configure or run the drive sync
    Drive {
        #[command(subcommand)]
        action: DriveCommands,
    },

    /// Wipe the index and its persisted state
    Clear,
}

#[derive(Subcommand)]
enum DriveCommands {
    /// Show the configured folder id
    Show,

    /// Set the folder from a pasted URL or raw id
    Set { input: String },

    /// Pull records from the configured folder
    Sync,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nid-archive"),
    };

    let mut index = RecordIndex::load(JsonFileStore::new(data_dir)).await;

    match cli.command {
        Commands::Ingest { files } => ingest(&mut index, files).await,
        Commands::Search { nid, dob, csv } => search(&index, nid, dob, csv).await,
        Commands::List => list(&index),
        Commands::Export { out } => export_all(&index, out).await,
        Commands::Print { nid, out } => print_copy(&index, nid, out).await,
        Commands::Drive { action } => drive(&mut index, action).await,
        Commands::Clear => clear(&mut index).await,
    }
}

async fn ingest(index: &mut RecordIndex<JsonFileStore>, paths: Vec<PathBuf>) -> Result<()> {
    if paths.is_empty() {
        bail!("no files given");
    }

    let extractor = GeminiExtractor::from_env()
        .context("set GEMINI_API_KEY to enable extraction")?;

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        files.push(FileInput::new(name, mime.essence_str(), bytes));
    }

    let report = index
        .ingest(&extractor, files, SourceKind::Local, |event| match event {
            BatchEvent::Started { total } => {
                println!("{}", format!("Processing {total} file(s)...").bold());
            }
            BatchEvent::FileStarted { file_name, .. } => {
                println!("  {} {}", "→".cyan(), file_name);
            }
            BatchEvent::FileFinished(outcome) => match &outcome.status {
                FileStatus::Done { records } => {
                    println!(
                        "  {} {} {}",
                        "✓".green(),
                        outcome.file_name,
                        format!("+{records} record(s)").green()
                    );
                }
                FileStatus::Failed { message } => {
                    println!("  {} {} {}", "✗".red(), outcome.file_name, message.red());
                }
                _ => {}
            },
            BatchEvent::Finished(_) => {}
        })
        .await?;

    let done = report.outcomes.iter().filter(|o| o.is_done()).count();
    let failed = report.outcomes.len() - done;
    println!();
    println!(
        "{} {} succeeded, {} failed, {} admitted ({} duplicate/invalid dropped)",
        "Batch complete:".bold(),
        done.to_string().green(),
        failed.to_string().red(),
        report.admitted.to_string().green(),
        report.dropped
    );
    println!("Index now holds {} record(s)", index.len());

    Ok(())
}

async fn search(
    index: &RecordIndex<JsonFileStore>,
    nid: String,
    dob: String,
    csv: bool,
) -> Result<()> {
    let query = SearchQuery::new(nid, dob);
    let results = index.search(&query, &SearchOptions::default()).await;

    if results.is_empty() {
        println!("{}", "No match / খুঁজে পাওয়া যায়নি".yellow());
        return Ok(());
    }

    println!("{}", format!("{} match(es)", results.len()).bold());
    for record in &results {
        println!();
        println!("  {}  {}", record.full_name_bn.bold(), record.full_name_en.dimmed());
        println!("  NID: {}   DOB: {}", record.nid_number.cyan(), record.date_of_birth);
        if let Some(serial) = &record.voter_serial {
            println!("  Voter serial: {serial}");
        }
        println!("  Source: {} ({})", record.source_file.dimmed(), record.source_kind);
    }

    if csv {
        let written = export::write_csv(&results, "search_results", &PathBuf::from(".")).await?;
        if let Some(path) = written {
            println!();
            println!("CSV written to {}", path.display().to_string().green());
        }
    }

    Ok(())
}

fn list(index: &RecordIndex<JsonFileStore>) -> Result<()> {
    if index.is_empty() {
        println!("{}", "No records indexed yet".dimmed());
        return Ok(());
    }

    for record in index.records() {
        println!(
            "{}  {}  {}  {}",
            record.nid_number.cyan(),
            record.date_of_birth,
            record.full_name_bn,
            record.source_file.dimmed()
        );
    }
    println!();
    println!("{} record(s)", index.len());

    Ok(())
}

async fn export_all(index: &RecordIndex<JsonFileStore>, out: Option<PathBuf>) -> Result<()> {
    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    match export::write_csv(index.records(), "full_database", &dir).await? {
        Some(path) => println!("Exported {} record(s) to {}", index.len(), path.display()),
        None => println!("{}", "Nothing to export".dimmed()),
    }
    Ok(())
}

async fn print_copy(
    index: &RecordIndex<JsonFileStore>,
    nid: String,
    out: Option<PathBuf>,
) -> Result<()> {
    let wanted = digits_only(&nid);
    let record = index
        .records()
        .iter()
        .find(|r| r.nid_number == wanted)
        .with_context(|| format!("no record with identifier {wanted}"))?;

    let path = out.unwrap_or_else(|| PathBuf::from(format!("server_copy_{wanted}.html")));
    tokio::fs::write(&path, export::render_server_copy(record)).await?;
    println!("Server copy written to {}", path.display().to_string().green());

    Ok(())
}

async fn drive(index: &mut RecordIndex<JsonFileStore>, action: DriveCommands) -> Result<()> {
    match action {
        DriveCommands::Show => {
            let folder = index
                .drive_folder()
                .await?
                .unwrap_or_else(|| nid_index::DEFAULT_FOLDER_ID.to_string());
            println!("Drive folder: {}", folder.green());
        }
        DriveCommands::Set { input } => {
            let folder = nid_index::parse_folder_id(&input);
            if folder.is_empty() {
                bail!("empty folder id");
            }
            index.set_drive_folder(&folder).await?;
            println!("Drive folder set to {}", folder.green());
        }
        DriveCommands::Sync => {
            let folder = index
                .drive_folder()
                .await?
                .unwrap_or_else(|| nid_index::DEFAULT_FOLDER_ID.to_string());

            let term = Term::stdout();
            term.write_line(&format!("Syncing drive folder {}...", folder.cyan()))?;

            let records = DriveSync::new(folder).sync().await;
            let report = index.admit(records).await?;
            println!(
                "Sync complete: {} admitted, {} dropped",
                report.admitted.to_string().green(),
                report.dropped
            );
        }
    }
    Ok(())
}

async fn clear(index: &mut RecordIndex<JsonFileStore>) -> Result<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Clear database? / ডাটাবেস মুছে ফেলবেন?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".dimmed());
        return Ok(());
    }

    index.clear().await?;
    println!("{}", "Index cleared".green());

    Ok(())
}
