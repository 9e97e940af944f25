// src/main.rs
//
// extresults CLI
//
// 1. LOGGING   - tracing subscriber, also receives the library's `log` records
// 2. CONFIG    - case directory and database from flags or environment
// 3. DATABASE  - pool, schema (idempotent)
// 4. STORE     - SQLite-backed repositories
// 5. COMMAND   - import / seed-file / stats

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use extresults::config::CaseConfig;
use extresults::db::{create_connection_pool, get_connection, get_database_stats, initialize_database};
use extresults::events::{ArtifactIndexingFailed, EventBus, ModuleContentAdded, ModuleDataAdded};
use extresults::repositories::CaseStore;
use extresults::services::{split_path, ExternalResultsImporter};
use extresults::{ExternalResults, StandardArtifactTypes};

#[derive(Parser)]
#[command(author, version, about = "Import external tool results into a case", long_about = None)]
struct Cli {
    /// Case root directory
    #[arg(long, global = true, env = "EXTRESULTS_CASE_DIR")]
    case_dir: Option<PathBuf>,

    /// Case database file (defaults to case.db inside the case directory)
    #[arg(long, global = true, env = "EXTRESULTS_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a JSON results document
    Import {
        results: PathBuf,

        /// Print the returned errors as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Add a catalog entry (e.g. "/img/dir/x.bin") to resolve parents and sources against
    SeedFile {
        path: String,

        #[arg(long, default_value_t = 0)]
        size: u64,

        /// Catalog the entry as a directory
        #[arg(long)]
        dir: bool,
    },
    /// Print row counts of the case database
    Stats,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = case_config(&cli)?;
    config.validate()?;
    config.ensure_directories()?;

    let pool = Arc::new(
        create_connection_pool(&config)
            .with_context(|| format!("opening {}", config.database_path.display()))?,
    );
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }

    let store = CaseStore::sqlite(Arc::clone(&pool));

    match cli.command {
        Commands::Import { results, json } => {
            let results = ExternalResults::from_json_file(&results)
                .with_context(|| format!("reading {}", results.display()))?;

            let event_bus = Arc::new(EventBus::new());
            subscribe_notifications(&event_bus);

            let importer = ExternalResultsImporter::new(
                store,
                event_bus,
                config.case_directory(),
                StandardArtifactTypes::builtin(),
            );
            let errors = importer.import_results(&results);

            if json {
                println!("{}", serde_json::to_string_pretty(&errors)?);
            }

            if errors.is_empty() {
                tracing::info!(records = results.record_count(), "import finished");
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::warn!(errors = errors.len(), "import finished with errors");
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::SeedFile { path, size, dir } => {
            let (name, parent_path) = split_path(&path);
            let entry = store.files.add_entry(name, parent_path, size, !dir)?;
            println!("{}\t{}", entry.id, entry.full_path());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Stats => {
            let conn = get_connection(&pool)?;
            let stats = get_database_stats(&conn)?;
            println!("{:#?}", stats);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Surfaces importer notifications in the log
fn subscribe_notifications(event_bus: &EventBus) {
    event_bus.subscribe::<ModuleContentAdded, _>(|event| {
        tracing::info!(path = %event.file.full_path(), id = event.file.id, "new content");
    });
    event_bus.subscribe::<ModuleDataAdded, _>(|event| {
        tracing::info!(artifact_type = %event.artifact_type_name, "new data");
    });
    event_bus.subscribe::<ArtifactIndexingFailed, _>(|event| {
        tracing::warn!(
            artifact_id = event.artifact_id,
            artifact = %event.display_name,
            reason = %event.reason,
            "artifact could not be indexed for keyword search"
        );
    });
}

fn case_config(cli: &Cli) -> Result<CaseConfig> {
    let case_directory = match &cli.case_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => std::env::current_dir()?.join(dir),
        None => CaseConfig::default_case_directory()?,
    };

    let config = CaseConfig::for_case(case_directory);
    Ok(match &cli.db {
        Some(db) => config.with_database_path(db),
        None => config,
    })
}
