//! The record table: ordered typed rows plus an identity-key index.

use std::collections::HashMap;

use cb_core::{Column, IdentityKey, MetadataRecord};

use crate::subtitles::SubtitleIndex;

/// Ordered collection of [`MetadataRecord`] rows.
///
/// The index maps each key to every row carrying it, in table order. The
/// first of them is the preferred match target.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    rows: Vec<MetadataRecord>,
    index: HashMap<IdentityKey, Vec<usize>>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows in their stored order.
    pub fn from_records(rows: Vec<MetadataRecord>) -> Self {
        let mut table = Self {
            rows,
            index: HashMap::new(),
        };
        table.rebuild_index();
        table
    }

    /// Header row in canonical column order.
    pub fn headers() -> [&'static str; 15] {
        Column::ALL.map(|c| c.header())
    }

    /// Row index of the first row with `key`.
    pub fn find(&self, key: &IdentityKey) -> Option<usize> {
        self.find_all(key).first().copied()
    }

    /// Indices of all rows with `key`, in table order.
    pub fn find_all(&self, key: &IdentityKey) -> &[usize] {
        self.index.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get(&self, idx: usize) -> Option<&MetadataRecord> {
        self.rows.get(idx)
    }

    /// Mutable access to a row. Identity columns must not be changed
    /// through this, or the index goes stale.
    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut MetadataRecord> {
        self.rows.get_mut(idx)
    }

    /// Append a row and index it. Returns the new row's index.
    pub fn push(&mut self, record: MetadataRecord) -> usize {
        let key = record.identity_key();
        let idx = self.rows.len();
        self.rows.push(record);
        self.index.entry(key).or_default().push(idx);
        idx
    }

    pub fn rows(&self) -> &[MetadataRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_records(self) -> Vec<MetadataRecord> {
        self.rows
    }

    /// Row values in canonical column order, ready for writing.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(MetadataRecord::to_columns).collect()
    }

    /// Post-merge normalization, applied once after reconciliation:
    /// 1. Files is at least 1 on every row;
    /// 2. External Subtitles is recomputed from the subtitle side table;
    /// 3. rows are stably sorted by (Title, Year);
    /// 4. trailing rows whose Title is an integer are dropped.
    ///
    /// Empty values are already the empty string on typed rows, and column
    /// order is fixed by [`MetadataRecord::to_columns`].
    pub fn normalize(&mut self, subtitles: &SubtitleIndex) {
        for row in &mut self.rows {
            row.files = row.files.max(1);
            row.external_subtitles = subtitles
                .lookup(&row.filename)
                .unwrap_or_default()
                .to_string();
        }

        let unclaimed = subtitles.unclaimed(self.rows.iter().map(|r| r.filename.as_str()));
        for file in unclaimed {
            tracing::warn!(subtitle = file, "subtitle does not belong to any row");
        }

        self.rows
            .sort_by(|a, b| (&a.title, &a.year).cmp(&(&b.title, &b.year)));

        let trimmed = self.trim_numeric_tail();
        if trimmed > 0 {
            tracing::info!(rows = trimmed, "dropped numeric-title rows from the end of the table");
        }

        self.rebuild_index();
    }

    /// Drop rows from the end while the last Title parses as an integer.
    /// Returns how many rows were dropped.
    pub fn trim_numeric_tail(&mut self) -> usize {
        let before = self.rows.len();
        while self
            .rows
            .last()
            .is_some_and(|row| is_integer_title(&row.title))
        {
            self.rows.pop();
        }
        let trimmed = before - self.rows.len();
        if trimmed > 0 {
            self.rebuild_index();
        }
        trimmed
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, row) in self.rows.iter().enumerate() {
            let key = row.identity_key();
            if self.index.contains_key(&key) {
                tracing::warn!(key = %key, row = idx, "duplicate identity key in table");
            }
            self.index.entry(key).or_default().push(idx);
        }
    }
}

/// Whether a Title cell is a bare integer, like a leaked totals row.
/// Any length of digits counts, with an optional sign.
fn is_integer_title(title: &str) -> bool {
    let title = title.trim();
    let digits = title.strip_prefix(['+', '-']).unwrap_or(title);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
