use clap::{Parser, Subcommand};
use importer::{
    ContestImporter, ContestSnapshot, ImportContext, SnapshotImporter, SnapshotTransformer,
    SnapshotValidator,
};
use sqlx::postgres::PgPoolOptions;
use std::path::{Path, PathBuf};
use storage::dto::ranking::RankingEntry;
use storage::services::{CategoryFilter, compute_ranking, export::ranking_csv};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "contest-import")]
#[command(about = "Photo contest snapshot importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and import one contest snapshot
    Snapshot {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Import every snapshot found in a directory and its subdirectories
    BulkImport {
        #[arg(long, default_value = "./imports")]
        directory: PathBuf,

        #[arg(long)]
        validate_only: bool,
    },
    /// Rank a snapshot offline and write the CSV export
    Rank {
        file: PathBuf,

        /// `all` or a category id as found in the snapshot
        #[arg(long, default_value = "all")]
        category: String,

        /// Write the CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("contest_import={},importer={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Snapshot {
            file,
            validate_only,
        } => {
            handle_snapshot_import(file, validate_only, cli.database_url.as_deref()).await?;
        }
        Commands::BulkImport {
            directory,
            validate_only,
        } => {
            handle_bulk_import(directory, validate_only, cli.database_url.as_deref()).await?;
        }
        Commands::Rank {
            file,
            category,
            output,
        } => {
            handle_rank(file, &category, output).await?;
        }
    }

    Ok(())
}

async fn connect(database_url: Option<&str>) -> Result<sqlx::PgPool, Box<dyn std::error::Error>> {
    let database_url = database_url.ok_or("DATABASE_URL must be set to import into the database")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

async fn handle_snapshot_import(
    file: PathBuf,
    validate_only: bool,
    database_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading snapshot from: {}", file.display());
    let snapshot = SnapshotImporter::load(&file).await?;

    tracing::info!(
        "Loaded contest: {} ({} categories, {} photos)",
        snapshot.contest.name,
        snapshot.categories.len(),
        snapshot.photos.len()
    );

    tracing::info!("Validating snapshot...");
    let validation_report = SnapshotValidator::validate(&snapshot)?;
    validation_report.log_warnings();
    tracing::info!("✓ Validation successful!");

    if validate_only {
        return Ok(());
    }

    let pool = connect(database_url).await?;

    let imported = SnapshotTransformer::convert(snapshot)?;
    SnapshotTransformer::new(&pool)
        .import_to_database(&imported)
        .await?;

    tracing::info!("✓ Import completed successfully!");

    Ok(())
}

async fn handle_bulk_import(
    directory: PathBuf,
    validate_only: bool,
    database_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Scanning directory for snapshot files: {}", directory.display());

    let mut json_files = Vec::new();
    let mut entries = tokio::fs::read_dir(&directory).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_dir() {
            let mut sub_entries = tokio::fs::read_dir(&path).await?;
            while let Some(sub_entry) = sub_entries.next_entry().await? {
                let sub_path = sub_entry.path();
                if is_json(&sub_path) {
                    json_files.push(sub_path);
                }
            }
        } else if is_json(&path) {
            json_files.push(path);
        }
    }

    if json_files.is_empty() {
        tracing::warn!("No JSON files found in {}", directory.display());
        return Ok(());
    }

    json_files.sort();
    tracing::info!("Found {} snapshot file(s)", json_files.len());

    let context = if validate_only {
        None
    } else {
        Some(ImportContext {
            pool: connect(database_url).await?,
        })
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for (idx, file_path) in json_files.iter().enumerate() {
        tracing::info!(
            "[{}/{}] Processing: {}",
            idx + 1,
            json_files.len(),
            file_path.display()
        );

        let result = match &context {
            Some(context) => {
                SnapshotImporter
                    .import(&file_path.to_string_lossy(), context)
                    .await
            }
            None => validate_file(file_path).await,
        };

        match result {
            Ok(()) => {
                success_count += 1;
                tracing::info!("  ✓ Success");
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ Error: {}", e);
            }
        }
    }

    tracing::info!("Summary: {} succeeded, {} failed", success_count, error_count);

    if error_count > 0 {
        return Err(format!("{} file(s) failed to import", error_count).into());
    }

    Ok(())
}

async fn validate_file(file_path: &Path) -> importer::Result<()> {
    let snapshot = SnapshotImporter::load(file_path).await?;
    let validation_report = SnapshotValidator::validate(&snapshot)?;

    for warning in &validation_report.warnings {
        tracing::warn!("  {}", warning);
    }

    Ok(())
}

async fn handle_rank(
    file: PathBuf,
    category: &str,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot: ContestSnapshot = SnapshotImporter::load(&file).await?;
    SnapshotValidator::validate(&snapshot)?.log_warnings();

    let imported = SnapshotTransformer::convert(snapshot)?;

    let filter = if category == "all" {
        CategoryFilter::All
    } else {
        let category_id = imported
            .category_id(category)
            .ok_or_else(|| format!("Unknown category '{}' in {}", category, file.display()))?;
        CategoryFilter::Category(category_id)
    };

    let ranked = compute_ranking(imported.photos, filter);
    tracing::info!("Ranked {} photo(s) of '{}'", ranked.len(), imported.contest.name);

    let entries = RankingEntry::from_ranking(ranked, &imported.categories);
    let csv = ranking_csv(&entries);

    match output {
        Some(path) => {
            tokio::fs::write(&path, csv).await?;
            tracing::info!("Ranking written to: {}", path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
