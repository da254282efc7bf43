//! CSV persistence for the record table.
//!
//! The remote table is read by header name, so extra columns are ignored and
//! missing ones come back empty. Everything written out uses the canonical
//! column order.

use anyhow::{Context, Result};
use cb_core::{Error, MetadataRecord};
use cb_reconcile::RecordTable;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A remote table as loaded from disk.
#[derive(Debug)]
pub struct LoadedTable {
    pub table: RecordTable,
    /// Rows dropped for having an empty Title.
    pub untitled_rows: usize,
    /// Whether a leading totals row was removed.
    pub dropped_totals_row: bool,
}

/// Read the remote record table from `path`.
///
/// A missing file is an empty table. When `has_totals_row` is set, the first
/// data row is discarded.
pub fn read_table(path: &Path, has_totals_row: bool) -> Result<LoadedTable> {
    if !path.exists() {
        info!("Remote table {:?} not found, starting empty", path);
        return Ok(LoadedTable {
            table: RecordTable::new(),
            untitled_rows: 0,
            dropped_totals_row: false,
        });
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to read CSV file: {:?}", path))?;

    let headers = rdr
        .headers()
        .map_err(|e| Error::table(format!("{:?}: unreadable header: {e}", path)))?
        .clone();

    let mut records = Vec::new();
    let mut untitled_rows = 0;
    for (line, result) in rdr.records().enumerate() {
        let row =
            result.map_err(|e| Error::table(format!("{:?}: row {}: {e}", path, line + 2)))?;
        let record = MetadataRecord::from_columns(headers.iter().zip(row.iter()));
        if record.title.trim().is_empty() {
            untitled_rows += 1;
            continue;
        }
        records.push(record);
    }

    let dropped_totals_row = has_totals_row && !records.is_empty();
    if dropped_totals_row {
        let totals = records.remove(0);
        info!("Dropped totals row: {:?}", totals.title);
    }

    if untitled_rows > 0 {
        debug!("Dropped {} rows with an empty Title", untitled_rows);
    }
    info!("Loaded {} rows from {:?}", records.len(), path);

    Ok(LoadedTable {
        table: RecordTable::from_records(records),
        untitled_rows,
        dropped_totals_row,
    })
}

/// Write `table` to `path` with a canonical header row.
pub fn write_table(path: &Path, table: &RecordTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {:?}", path))?;

    wtr.write_record(RecordTable::headers())
        .context("Failed to write header")?;
    for row in table.to_rows() {
        wtr.write_record(&row).context("Failed to write row")?;
    }
    wtr.flush().context("Failed to flush CSV")?;

    debug!("Wrote {} rows to {:?}", table.len(), path);
    Ok(())
}

/// Backup file path for a snapshot taken at `at`.
pub fn backup_path(dir: &Path, at: &DateTime<Local>) -> PathBuf {
    dir.join(format!(
        "video_collection_{}.csv",
        at.format("%Y%m%d-%H%M%S")
    ))
}

/// Snapshot `table` into `dir` under a timestamped name.
pub fn write_backup(dir: &Path, table: &RecordTable) -> Result<PathBuf> {
    let path = backup_path(dir, &Local::now());
    write_table(&path, table)?;
    info!("Backed up remote table to {:?}", path);
    Ok(path)
}
