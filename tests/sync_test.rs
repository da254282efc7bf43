//! Integration tests for a full sync run against a temporary library.

use assert_matches::assert_matches;
use cinemabin::config::Config;
use cinemabin::store;
use cinemabin::sync::{run, SyncOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

/// A library root plus remote/output/backup paths inside one tempdir.
fn setup() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.library.root = Some(dir.path().join("Movies"));
    config.remote.path = dir.path().join("video_collection.csv");
    config.output.path = dir.path().join("video_collection.raw.csv");
    config.output.backup_dir = dir.path().join("backups");
    fs::create_dir_all(dir.path().join("Movies")).unwrap();
    (dir, config)
}

fn movies(config: &Config) -> &Path {
    config.library.root.as_deref().unwrap()
}

fn write_remote(config: &Config, body: &str) {
    fs::write(&config.remote.path, body).unwrap();
}

// ---------------------------------------------------------------------------
// Grouping and subtitles
// ---------------------------------------------------------------------------

#[test]
fn parts_are_grouped_and_subtitles_attached() {
    let (_dir, config) = setup();
    let root = movies(&config);
    touch(&root.join("Crime/Kill_Bill-2003-1080p-x264.Part1.mkv"));
    touch(&root.join("Crime/Kill_Bill-2003-1080p-x264.Part2.mkv"));
    touch(&root.join("Crime/Kill_Bill-2003-1080p-x264.Part1.srt"));
    touch(&root.join("Crime/.DS_Store"));
    touch(&root.join("Sci-Fi/Inception-2010-1080p-x264-DTS-10bit.mkv"));
    touch(&root.join("Sci-Fi/poster.jpg"));

    let summary = run(&config, &SyncOptions::default()).unwrap();
    assert_eq!(summary.remote_rows, 0);
    assert_eq!(summary.local_files, 5);
    assert_eq!(summary.local_movies, 2);
    assert_eq!(summary.ignored_files, 1);
    assert_eq!(summary.report.added.len(), 2);
    assert!(summary.report.updated.is_empty());
    // Nothing to back up from an empty remote table.
    assert!(summary.backup.is_none());

    let merged = store::read_table(&config.output.path, false).unwrap().table;
    let rows = merged.rows();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].title, "Inception");
    assert_eq!(rows[0].location, "/Sci-Fi");
    assert_eq!(rows[0].files, 1);
    assert_eq!(rows[0].external_subtitles, "");

    assert_eq!(rows[1].title, "Kill Bill");
    assert_eq!(rows[1].location, "/Crime");
    assert_eq!(rows[1].files, 2);
    assert_eq!(rows[1].filename, "Kill_Bill-2003-1080p-x264.Part1.mkv");
    assert_eq!(rows[1].external_subtitles, "srt");
}

// ---------------------------------------------------------------------------
// Merging with an existing table
// ---------------------------------------------------------------------------

#[test]
fn remote_rows_are_kept_and_updated() {
    let (_dir, config) = setup();
    write_remote(
        &config,
        "Title,Year,Edition,Resolution,Director,Location,Files,Duration\n\
         Casablanca,1942,,480p,Michael Curtiz,/Drama,1,102\n\
         Inception,2010,,1080p,Christopher Nolan,/Old Shelf,1,148\n",
    );
    touch(&movies(&config).join("Sci-Fi/Inception-2010-1080p-x264-DTS-10bit.mkv"));

    let summary = run(&config, &SyncOptions::default()).unwrap();
    assert_eq!(summary.remote_rows, 2);
    assert!(summary.report.added.is_empty());
    assert_eq!(summary.report.updated.len(), 1);
    assert!(summary.backup.as_ref().unwrap().exists());

    let merged = store::read_table(&config.output.path, false).unwrap().table;
    let rows = merged.rows();
    assert_eq!(rows.len(), 2);

    // Casablanca is not on disk but stays in the table.
    assert_eq!(rows[0].title, "Casablanca");
    assert_eq!(rows[0].duration, "102");

    // Inception moved: mutable columns follow the library, the rest stays.
    assert_eq!(rows[1].location, "/Sci-Fi");
    assert_eq!(rows[1].codec, "x264");
    assert_eq!(rows[1].filename, "Inception-2010-1080p-x264-DTS-10bit.mkv");
    assert_eq!(rows[1].duration, "148");
}

#[test]
fn second_run_reports_no_changes() {
    let (_dir, mut config) = setup();
    touch(&movies(&config).join("Sci-Fi/Alien-1979-ZZ-720p.mkv"));
    touch(&movies(&config).join("Drama/Heat-1995-Michael_Mann-1080p.mkv"));

    let first = run(&config, &SyncOptions::default()).unwrap();
    assert_eq!(first.report.added.len(), 2);

    config.remote.path = config.output.path.clone();
    let second = run(&config, &SyncOptions::default()).unwrap();
    assert!(second.report.is_empty(), "{:?}", second.report);
    assert_eq!(second.total_rows, 2);
}

#[test]
fn totals_row_is_not_a_movie() {
    let (_dir, mut config) = setup();
    config.remote.has_totals_row = true;
    write_remote(
        &config,
        "Title,Year\n\
         Total: 2,\n\
         Heat,1995\n\
         Alien,1979\n",
    );

    let summary = run(&config, &SyncOptions::default()).unwrap();
    assert_eq!(summary.remote_rows, 2);
    assert_eq!(summary.total_rows, 2);

    let merged = store::read_table(&config.output.path, false).unwrap().table;
    let titles: Vec<_> = merged.rows().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Alien", "Heat"]);
}

// ---------------------------------------------------------------------------
// Failure modes and dry runs
// ---------------------------------------------------------------------------

#[test]
fn untitled_folder_aborts_without_writing() {
    let (_dir, config) = setup();
    touch(&movies(&config).join("Drama/Heat-1995-1080p.mkv"));
    touch(&movies(&config).join("untitled folder/Alien-1979-720p.mkv"));

    let err = run(&config, &SyncOptions::default()).unwrap_err();
    assert_matches!(
        err.downcast_ref::<cb_core::Error>(),
        Some(cb_core::Error::UntitledFolder { .. })
    );
    assert!(!config.output.path.exists());
}

#[test]
fn dry_run_writes_nothing() {
    let (dir, mut config) = setup();
    config.output.report_path = Some(dir.path().join("report.json"));
    write_remote(&config, "Title,Year\nHeat,1995\n");
    touch(&movies(&config).join("Sci-Fi/Alien-1979-720p.mkv"));

    let summary = run(&config, &SyncOptions { dry_run: true }).unwrap();
    assert_eq!(summary.report.added.len(), 1);
    assert!(summary.backup.is_none());
    assert!(summary.output.is_none());
    assert!(!config.output.path.exists());
    assert!(!config.output.backup_dir.exists());
    assert!(!dir.path().join("report.json").exists());
}

#[test]
fn report_file_lists_added_filenames() {
    let (dir, mut config) = setup();
    let report_path = dir.path().join("report.json");
    config.output.report_path = Some(report_path.clone());
    touch(&movies(&config).join("Sci-Fi/Alien-1979-720p.mkv"));

    run(&config, &SyncOptions::default()).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report_path).unwrap()).unwrap();
    assert_eq!(json["added"]["Alien-1979-720p.mkv"]["Title"], "Alien");
    assert!(json["updated"].as_object().unwrap().is_empty());
}

#[test]
fn missing_library_root_is_an_error() {
    let (_dir, mut config) = setup();
    config.library.root = None;
    assert!(run(&config, &SyncOptions::default()).is_err());
}
