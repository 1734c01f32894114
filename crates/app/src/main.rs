use std::path::{Path, PathBuf};

use anyhow::Context;
use tally_core::KeywordTable;
use tally_import::transform_file;
use tally_storage::StoreConfig;

const DEFAULT_RAW_DIR: &str = "data/raw";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let raw_dir =
        std::env::var("RAW_DIR").unwrap_or_else(|_| DEFAULT_RAW_DIR.to_string());
    let files = discover_csv_files(Path::new(&raw_dir))?;
    if files.is_empty() {
        tracing::info!("no files found in {raw_dir}");
        return Ok(());
    }

    let config = StoreConfig::from_env();
    let pool = tally_storage::create_pool(&config)
        .await
        .context("failed to open transaction store")?;

    // One file at a time: fully transformed in memory, then written.
    // A schema or store failure aborts the whole run.
    let table = KeywordTable::default();
    let mut total_rows = 0u64;
    for path in &files {
        tracing::info!("processing {}", path.display());

        let outcome = transform_file(path, &table)
            .with_context(|| format!("failed to transform {}", path.display()))?;

        if outcome.dropped_count() > 0 {
            tracing::warn!(
                file = %path.display(),
                dropped = outcome.dropped_count(),
                "dropped invalid rows"
            );
        }
        if outcome.records.is_empty() {
            tracing::info!("no valid rows, skipping");
            continue;
        }

        total_rows += tally_storage::append_transactions(&pool, &outcome.records)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?;
    }

    tracing::info!("loaded rows: {total_rows}");
    Ok(())
}

/// All `*.csv` files directly under `dir`, sorted by name. A missing
/// directory is the same as an empty one.
fn discover_csv_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    Ok(files)
}
