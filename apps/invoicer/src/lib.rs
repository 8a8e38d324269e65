//! # Sunar Invoicer Library
//!
//! The operator-facing application for the Sunar Invoice system.
//!
//! ## Module Organization
//! ```text
//! invoicer/
//! ├── lib.rs          ◄─── You are here (startup & command dispatch)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── invoice.rs  ◄─── Draft / finalize / show / list / search
//! │   └── rates.rs    ◄─── Default-rate preferences
//! ├── service.rs      ◄─── Finalize pipeline (archive, then render)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── draft.rs    ◄─── Draft editing + full recompute on every edit
//! │   └── prefs.rs    ◄─── Default-rate preference file
//! ├── pdf.rs          ◄─── A4 document rendering
//! └── error.rs        ◄─── Application error type
//! ```

pub mod commands;
pub mod error;
pub mod pdf;
pub mod service;
pub mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{AppError, AppResult};
use state::{default_prefs_path, RatePrefs};
use sunar_db::{Database, DbConfig};

/// Sunar Invoice - jewellery shop invoicing.
#[derive(Parser, Debug)]
#[command(name = "sunar-invoicer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a fresh draft file with the next invoice number
    New {
        /// Where to write the draft JSON
        #[arg(long, default_value = "draft.json")]
        out: PathBuf,
    },

    /// Archive a draft and render its PDF
    Finalize {
        /// Path to the draft JSON file
        draft: PathBuf,

        /// Directory for the rendered PDF (default: platform data dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print one archived invoice by business number
    Show { invoice_number: String },

    /// List recent invoices
    List {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Search the archive by customer name
    Search { term: String },

    /// Show the default gold rates
    Rates,

    /// Update the default gold rates for future drafts
    SetRates { rate_22k: f64, rate_24k: f64 },
}

/// Runs the application.
///
/// ## Startup Sequence
/// 1. Initialize tracing (respects `RUST_LOG`)
/// 2. Resolve the database path (`SUNAR_DB_PATH` overrides the platform
///    data directory)
/// 3. Connect to SQLite, run migrations
/// 4. Dispatch the command
pub async fn run() -> AppResult<()> {
    init_tracing();
    let cli = Cli::parse();

    let prefs_path = default_prefs_path()?;

    // Rate preference commands never need the database
    match &cli.command {
        Command::Rates => return commands::rates::show(&prefs_path),
        Command::SetRates { rate_22k, rate_24k } => {
            return commands::rates::set(&prefs_path, *rate_22k, *rate_24k)
        }
        _ => {}
    }

    let db_path = database_path()?;
    info!(path = %db_path.display(), "Opening database");
    let db = Database::new(DbConfig::new(db_path)).await?;

    let result = match cli.command {
        Command::New { out } => {
            let prefs = RatePrefs::load(&prefs_path);
            commands::invoice::new_draft(&db, &prefs, &out).await
        }
        Command::Finalize { draft, out_dir } => {
            let out_dir = match out_dir {
                Some(dir) => dir,
                None => default_output_dir()?,
            };
            commands::invoice::finalize(&db, &draft, &out_dir).await
        }
        Command::Show { invoice_number } => commands::invoice::show(&db, &invoice_number).await,
        Command::List { limit } => commands::invoice::list(&db, limit).await,
        Command::Search { term } => commands::invoice::search(&db, &term).await,
        Command::Rates | Command::SetRates { .. } => unreachable!("handled above"),
    };

    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sunar=trace` - Show trace for sunar crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sunar=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.sunar.invoice/sunar.db`
/// - **Windows**: `%APPDATA%\sunar\invoice\sunar.db`
/// - **Linux**: `~/.local/share/sunar-invoice/sunar.db`
///
/// ## Development Override
/// Set `SUNAR_DB_PATH` to use a custom path.
fn database_path() -> AppResult<PathBuf> {
    if let Ok(path) = std::env::var("SUNAR_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("sunar.db"))
}

/// Default directory for rendered documents.
fn default_output_dir() -> AppResult<PathBuf> {
    let dirs = project_dirs()?;
    Ok(dirs.data_dir().join("invoices"))
}

fn project_dirs() -> AppResult<ProjectDirs> {
    ProjectDirs::from("com", "sunar", "invoice")
        .ok_or_else(|| AppError::Usage("Could not determine app data directory".to_string()))
}
