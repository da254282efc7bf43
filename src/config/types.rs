use cb_core::{
    FileClassifier, DEFAULT_IGNORED_FILES, DEFAULT_SUBTITLE_EXTENSIONS, DEFAULT_VIDEO_EXTENSIONS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Extension-based classifier for discovered files.
    pub fn classifier(&self) -> FileClassifier {
        FileClassifier::new(
            &self.library.video_extensions,
            &self.library.subtitle_extensions,
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Movies root. Required for `sync`, usually given on the command line.
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Depth below the root of the Location folders (1 = direct children).
    #[serde(default = "default_grouping_depth")]
    pub grouping_depth: usize,

    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    #[serde(default = "default_subtitle_extensions")]
    pub subtitle_extensions: Vec<String>,

    /// Exact file names skipped during the scan (OS housekeeping files).
    #[serde(default = "default_ignored_files")]
    pub ignored_files: Vec<String>,
}

fn default_grouping_depth() -> usize {
    1
}

fn default_video_extensions() -> Vec<String> {
    DEFAULT_VIDEO_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_subtitle_extensions() -> Vec<String> {
    DEFAULT_SUBTITLE_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_ignored_files() -> Vec<String> {
    DEFAULT_IGNORED_FILES.iter().map(|s| s.to_string()).collect()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: None,
            grouping_depth: default_grouping_depth(),
            video_extensions: default_video_extensions(),
            subtitle_extensions: default_subtitle_extensions(),
            ignored_files: default_ignored_files(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// CSV file holding the existing record table.
    #[serde(default = "default_remote_path")]
    pub path: PathBuf,

    /// The first data row is a totals/subheader row, not a movie.
    #[serde(default)]
    pub has_totals_row: bool,
}

fn default_remote_path() -> PathBuf {
    PathBuf::from("video_collection.csv")
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            path: default_remote_path(),
            has_totals_row: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Where the merged record table is written.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Directory for timestamped safety backups of the remote table.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// Optional JSON change report.
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("video_collection.raw.csv")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            backup_dir: default_backup_dir(),
            report_path: None,
        }
    }
}
