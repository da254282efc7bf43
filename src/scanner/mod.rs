//! Library scanner.
//!
//! Walks the movies root and yields every file that sits directly inside a
//! Location folder, tagged with that folder's name. Folder and file names
//! are NFC-normalized so that names written by different filesystems
//! compare equal downstream.

use cb_core::{Error, LocalFile, Result, UNTITLED_FOLDER};
use std::path::Path;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

/// Walks a library root at a fixed grouping depth.
#[derive(Debug, Clone)]
pub struct Scanner {
    grouping_depth: usize,
    ignored_files: Vec<String>,
}

impl Scanner {
    /// `grouping_depth` is the depth of the Location folders below the root
    /// (1 means the root's direct children).
    pub fn new(grouping_depth: usize, ignored_files: &[String]) -> Self {
        Self {
            grouping_depth,
            ignored_files: ignored_files.to_vec(),
        }
    }

    /// Scan `root` and return the files found inside Location folders, in
    /// file-name order.
    ///
    /// Fails with [`Error::UntitledFolder`] before returning anything if a
    /// Location folder is named `untitled folder`.
    pub fn scan(&self, root: &Path) -> Result<Vec<LocalFile>> {
        info!("Scanning library: {:?}", root);

        let file_depth = self.grouping_depth + 1;
        let mut files = Vec::new();
        let mut skipped = 0usize;

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(file_depth)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| Error::from(std::io::Error::from(e)))?;
            let depth = entry.depth();
            let name = normalize(&entry.file_name().to_string_lossy());

            if entry.file_type().is_dir() {
                if depth == self.grouping_depth {
                    if name == UNTITLED_FOLDER {
                        return Err(Error::untitled_folder(entry.path()));
                    }
                    debug!("Location folder: /{}", name);
                }
                continue;
            }

            if depth != file_depth {
                debug!("Skipping file outside a Location folder: {:?}", entry.path());
                skipped += 1;
                continue;
            }

            if self.ignored_files.iter().any(|ignored| *ignored == name) {
                debug!("Skipping ignored file: {:?}", entry.path());
                skipped += 1;
                continue;
            }

            let location = entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .map(|n| format!("/{}", normalize(&n.to_string_lossy())))
                .unwrap_or_else(|| "/".to_string());

            files.push(LocalFile {
                path: entry.path().to_path_buf(),
                location,
                file_name: name,
            });
        }

        info!(found = files.len(), skipped, "Library scan complete");
        Ok(files)
    }
}

fn normalize(name: &str) -> String {
    name.nfc().collect()
}
