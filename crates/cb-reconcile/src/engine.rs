//! The reconciliation engine: merge local records into the record table.

use std::collections::HashSet;

use cb_core::MetadataRecord;

use crate::report::ChangeReport;
use crate::table::RecordTable;

/// Merge local records into `table` by identity key.
///
/// A matched row gets its mutable columns overwritten and is reported as
/// updated only if one of them actually changed. An unmatched record is
/// appended and reported as added. Each row is matched at most once per
/// pass: when the table holds several rows with one key, successive local
/// records with that key take them in table order.
pub fn reconcile<I>(local: I, table: &mut RecordTable) -> ChangeReport
where
    I: IntoIterator<Item = MetadataRecord>,
{
    let mut report = ChangeReport::new();
    let mut claimed = HashSet::new();

    for record in local {
        let key = record.identity_key();
        let target = table
            .find_all(&key)
            .iter()
            .copied()
            .find(|idx| !claimed.contains(idx));

        match target {
            Some(idx) => {
                claimed.insert(idx);
                let Some(row) = table.get_mut(idx) else {
                    continue;
                };
                let changed = row.update_mutable_from(&record);
                if changed.is_empty() {
                    tracing::trace!(key = %key, "unchanged");
                } else {
                    tracing::debug!(key = %key, columns = ?changed, "updated");
                    report.record_updated(&record);
                }
            }
            None => {
                tracing::debug!(key = %key, file = %record.filename, "added");
                report.record_added(&record);
                claimed.insert(table.push(record));
            }
        }
    }

    tracing::info!(
        added = report.added.len(),
        updated = report.updated.len(),
        rows = table.len(),
        "reconciliation complete"
    );

    report
}
