//! One end-to-end reconciliation run: load the remote table, back it up,
//! scan the library, merge, and write the result.

use anyhow::{Context, Result};
use cb_reconcile::{reconcile_library, ChangeReport};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::scanner::Scanner;
use crate::store;

/// Per-run switches that are not part of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Compute the merge and report without writing anything.
    pub dry_run: bool,
}

/// What a run did.
#[derive(Debug)]
pub struct SyncSummary {
    pub remote_rows: usize,
    pub local_files: usize,
    pub local_movies: usize,
    pub ignored_files: usize,
    pub total_rows: usize,
    pub backup: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: ChangeReport,
}

/// Reconcile the library under `config.library.root` into the remote table.
///
/// Nothing is written if the scan fails, so an untitled Location folder
/// leaves the output untouched.
pub fn run(config: &Config, options: &SyncOptions) -> Result<SyncSummary> {
    let root = config
        .library
        .root
        .as_deref()
        .context("No library root configured (use --library or [library].root)")?;
    if !root.is_dir() {
        anyhow::bail!("Library root is not a directory: {:?}", root);
    }

    let loaded = store::read_table(&config.remote.path, config.remote.has_totals_row)?;
    let mut table = loaded.table;
    let remote_rows = table.len();

    let backup = if options.dry_run || table.is_empty() {
        None
    } else {
        Some(store::write_backup(&config.output.backup_dir, &table)?)
    };

    let scanner = Scanner::new(config.library.grouping_depth, &config.library.ignored_files);
    let files = scanner.scan(root)?;

    let outcome = reconcile_library(&files, &config.classifier(), &mut table);

    let output = if options.dry_run {
        info!("Dry run: not writing {:?}", config.output.path);
        None
    } else {
        store::write_table(&config.output.path, &table)?;
        info!("Wrote {} rows to {:?}", table.len(), config.output.path);
        Some(config.output.path.clone())
    };

    if let Some(path) = config.output.report_path.as_ref().filter(|_| !options.dry_run) {
        let json = outcome.report.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {:?}", path))?;
    }

    Ok(SyncSummary {
        remote_rows,
        local_files: files.len(),
        local_movies: outcome.local_movies,
        ignored_files: outcome.ignored_files,
        total_rows: table.len(),
        backup,
        output,
        report: outcome.report,
    })
}
