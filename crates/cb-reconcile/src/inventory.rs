//! Local inventory: parsed files grouped into one record per movie.

use std::collections::HashMap;

use cb_core::{FileClassifier, FileKind, IdentityKey, LocalFile, MetadataRecord};
use cb_parser::split_extension;

use crate::subtitles::{normalize_name, SubtitleIndex};

/// Parsed files grouped by [`IdentityKey`].
///
/// Groups keep their first-seen order. Within a group, the first file's
/// metadata is kept as-is; later parts only bump the Files count and may
/// take over the canonical filename.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: Vec<MetadataRecord>,
    index: HashMap<IdentityKey, usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one parsed file.
    ///
    /// A new key starts a group with `files = 1`. A known key increments the
    /// count, and the stored filename is replaced when the new one sorts
    /// earlier, so `Part1` ends up canonical over `Part2`.
    pub fn add(&mut self, mut record: MetadataRecord) {
        let key = record.identity_key();

        match self.index.get(&key) {
            Some(&idx) => {
                let existing = &mut self.records[idx];
                existing.files += 1;
                if record.filename < existing.filename {
                    existing.filename = std::mem::take(&mut record.filename);
                }
                tracing::debug!(key = %key, files = existing.files, "merged part into group");
            }
            None => {
                record.files = 1;
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&MetadataRecord> {
        self.index.get(key).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<MetadataRecord> {
        self.records
    }
}

/// What a pass over the local file list produced.
#[derive(Debug, Default)]
pub struct Collected {
    pub inventory: Inventory,
    pub subtitles: SubtitleIndex,
    /// Files that were neither video nor subtitle.
    pub ignored: usize,
}

/// Route every local file: subtitles into the side table, videos through the
/// parser into the inventory. Location and the on-disk name are stamped on
/// each record here, since the parser never sees them.
pub fn collect(files: &[LocalFile], classifier: &FileClassifier) -> Collected {
    let mut collected = Collected::default();

    for file in files {
        let file_name = normalize_name(&file.file_name);
        let (_, extension) = split_extension(&file_name);

        match classifier.kind_of_extension(extension) {
            FileKind::Subtitle => collected.subtitles.register(&file_name),
            FileKind::Video => {
                let mut record = cb_parser::parse_file(&file_name);
                record.location = file.location.clone();
                tracing::trace!(file = %file_name, key = %record.identity_key(), "parsed");
                collected.inventory.add(record);
            }
            FileKind::Other => {
                tracing::debug!(path = %file.path.display(), "not a video or subtitle, ignoring");
                collected.ignored += 1;
            }
        }
    }

    collected
}
