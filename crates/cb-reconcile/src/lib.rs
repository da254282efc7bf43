//! cb-reconcile: group local files into movies and merge them into the
//! record table.
//!
//! The flow is `collect` (subtitle side table + local inventory) →
//! [`reconcile`] (match by identity key, update or append) →
//! [`RecordTable::normalize`] (subtitles, sort, tail trim).

pub mod engine;
pub mod inventory;
pub mod report;
pub mod subtitles;
pub mod table;

pub use engine::reconcile;
pub use inventory::{collect, Collected, Inventory};
pub use report::ChangeReport;
pub use subtitles::SubtitleIndex;
pub use table::RecordTable;

use cb_core::{FileClassifier, LocalFile};

/// Outcome of [`reconcile_library`].
#[derive(Debug)]
pub struct Reconciliation {
    pub report: ChangeReport,
    /// Number of distinct movies found locally.
    pub local_movies: usize,
    /// Number of files that were neither video nor subtitle.
    pub ignored_files: usize,
}

/// Run the whole core: collect local files, reconcile them into `table`,
/// and normalize the result.
pub fn reconcile_library(
    files: &[LocalFile],
    classifier: &FileClassifier,
    table: &mut RecordTable,
) -> Reconciliation {
    let Collected {
        inventory,
        subtitles,
        ignored,
    } = collect(files, classifier);
    let local_movies = inventory.len();

    tracing::info!(
        files = files.len(),
        movies = local_movies,
        subtitles = subtitles.len(),
        "collected local inventory"
    );

    let report = reconcile(inventory.into_records(), table);
    table.normalize(&subtitles);

    Reconciliation {
        report,
        local_movies,
        ignored_files: ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn local(name: &str) -> LocalFile {
        LocalFile {
            path: PathBuf::from(format!("/movies/Drama/{name}")),
            location: "/Drama".to_string(),
            file_name: name.to_string(),
        }
    }

    #[test]
    fn grouping_and_subtitle_association() {
        let files = vec![
            local("Movie-2003-1080p.Part1.mkv"),
            local("Movie-2003-1080p.Part2.mkv"),
            local("Movie-2003-1080p.Part1.srt"),
        ];
        let mut table = RecordTable::new();
        let result = reconcile_library(&files, &FileClassifier::default(), &mut table);

        assert_eq!(result.local_movies, 1);
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.files, 2);
        assert_eq!(row.filename, "Movie-2003-1080p.Part1.mkv");
        assert_eq!(row.external_subtitles, "srt");
        assert!(result.report.added.contains_key("Movie-2003-1080p.Part1.mkv"));
    }

    #[test]
    fn numbered_part_piece_groups_with_its_sibling() {
        let files = vec![
            local("Movie-2003-1080p.Part1.mkv"),
            local("Movie-2003-1080p.Part1.2.mkv"),
        ];
        let mut table = RecordTable::new();
        let result = reconcile_library(&files, &FileClassifier::default(), &mut table);

        assert_eq!(result.local_movies, 1);
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.files, 2);
        assert_eq!(row.resolution, "1080p");
        assert_eq!(row.director, "");
        assert_eq!(row.filename, "Movie-2003-1080p.Part1.2.mkv");
    }

    #[test]
    fn sibling_part_subtitle_serves_single_file_movie() {
        let files = vec![
            local("Movie-2003-1080p.mkv"),
            local("Movie-2003-1080p.Part1.srt"),
        ];
        let mut table = RecordTable::new();
        reconcile_library(&files, &FileClassifier::default(), &mut table);
        assert_eq!(table.rows()[0].external_subtitles, "srt");
    }

    #[test]
    fn remote_rows_without_local_files_survive() {
        let mut remote = cb_parser::parse_file("Casablanca-1942-480p.avi");
        remote.location = "/Classics".into();
        let mut table = RecordTable::from_records(vec![remote]);

        let files = vec![local("Heat-1995-1080p.mkv")];
        let result = reconcile_library(&files, &FileClassifier::default(), &mut table);

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].title, "Casablanca");
        assert_eq!(result.report.added.len(), 1);
        assert!(result.report.updated.is_empty());
    }
}
